//! Scan executor — orchestrates one manifest generation run.
//!
//! Ties together the directory walker, path resolution, suid detection and
//! checksum computation, accumulating manifest lines in memory until the
//! single bulk append at the end of the run. A failure anywhere before that
//! append leaves the manifest untouched.

pub mod manifest;

use crate::checksum::{self, Algorithm};
use crate::fs::metadata::is_suid;
use crate::fs::resolve::{self, LinkPolicy};
use crate::fs::walker::{self, ExcludeRule};
use crate::utils::logger::RunLog;
use crate::{GenError, Result};
use manifest::ManifestEntry;
use std::path::PathBuf;
use tracing::warn;

/// Configuration for one scan run.
#[derive(Debug, Clone)]
pub struct ScanJob {
    /// Directory tree to scan.
    pub root: PathBuf,

    /// Manifest file the run's records are appended to.
    pub filelist: PathBuf,

    /// Entries matching this rule are left out of the manifest.
    pub exclude: ExcludeRule,

    /// Digest algorithm for the checksum field.
    pub algorithm: Algorithm,

    /// Whether unresolvable entries abort the run or are skipped.
    pub link_policy: LinkPolicy,
}

impl ScanJob {
    /// Walk the tree and produce this run's manifest entries.
    ///
    /// All three fields of an entry are derived from the same resolved
    /// path. The first unreadable or unstattable file aborts the run.
    pub fn scan(&self, log: &mut RunLog) -> Result<Vec<ManifestEntry>> {
        let raw = walker::collect_entries(&self.root, &self.exclude)?;

        let mut entries = Vec::with_capacity(raw.len());
        for path in raw {
            let resolved = match resolve::resolve_entry(&path) {
                Ok(resolved) => resolved,
                Err(GenError::Unresolved(entry)) if self.link_policy == LinkPolicy::Lenient => {
                    warn!("skipping unresolvable entry: {}", entry.display());
                    continue;
                }
                Err(err) => return Err(err),
            };

            let path = resolved.into_path_buf();
            log.verbose(&format!("Processing {}", path.display()));
            let suid = is_suid(&path)?;
            let checksum = checksum::hash_file(&path, self.algorithm)?;
            entries.push(ManifestEntry {
                path: path.clone(),
                checksum,
                is_suid: suid,
            });
            log.verbose(&format!("Finished {}", path.display()));
        }

        Ok(entries)
    }

    /// Run the scan and append the results to the filelist.
    ///
    /// Returns the number of records appended.
    pub fn run(&self, log: &mut RunLog) -> Result<usize> {
        log.info(&format!("Generating filelist for {}", self.root.display()));

        let entries = self.scan(log)?;
        manifest::append_entries(&self.filelist, &entries)?;

        log.info(&format!(
            "Recorded {} files in {}",
            entries.len(),
            self.filelist.display()
        ));
        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const HI_SHA1: &str = "c22b5f9178342609428d6f51b2c5af4c0bde6a42";

    fn job(root: &Path, filelist: &Path, exclude: &str) -> ScanJob {
        ScanJob {
            root: root.to_path_buf(),
            filelist: filelist.to_path_buf(),
            exclude: ExcludeRule::new(exclude),
            algorithm: Algorithm::Sha1,
            link_policy: LinkPolicy::Lenient,
        }
    }

    fn quiet() -> RunLog {
        RunLog::new(false)
    }

    #[test]
    fn records_plain_files_with_their_digest() -> crate::Result<()> {
        let dir = TempDir::new()?;
        let manifest = dir.path().join("filelist");
        fs::write(dir.path().join("a.txt"), "hi")?;

        let count = job(dir.path(), &manifest, "/guard").run(&mut quiet())?;
        assert_eq!(count, 1);

        let contents = fs::read_to_string(&manifest)?;
        let expected = format!(
            "{} #FSG# {HI_SHA1} #FSG# false",
            dir.path().join("a.txt").display()
        );
        assert_eq!(contents.lines().collect::<Vec<_>>(), vec![expected.as_str()]);
        Ok(())
    }

    #[test]
    fn rerunning_appends_a_second_copy_of_every_record() -> crate::Result<()> {
        let dir = TempDir::new()?;
        let manifest = dir.path().join("filelist");
        fs::write(dir.path().join("a.txt"), "hi")?;
        fs::write(dir.path().join("b.txt"), "ho")?;

        let scan = job(dir.path(), &manifest, "/guard");
        scan.run(&mut quiet())?;
        scan.run(&mut quiet())?;

        let contents = fs::read_to_string(&manifest)?;
        let mut lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        lines.sort();
        assert_eq!(lines[0], lines[1]);
        assert_eq!(lines[2], lines[3]);
        Ok(())
    }

    #[test]
    fn excluded_entries_produce_no_record() -> crate::Result<()> {
        let dir = TempDir::new()?;
        let manifest = dir.path().join("filelist");
        fs::create_dir(dir.path().join("private"))?;
        fs::write(dir.path().join("private/secret.txt"), "s")?;
        fs::write(dir.path().join("kept.txt"), "k")?;

        job(dir.path(), &manifest, "private").run(&mut quiet())?;

        let contents = fs::read_to_string(&manifest)?;
        assert!(contents.contains("kept.txt"));
        assert!(!contents.contains("secret.txt"));
        Ok(())
    }

    #[test]
    fn empty_tree_still_creates_the_manifest() -> crate::Result<()> {
        let dir = TempDir::new()?;
        let manifest = dir.path().join("filelist");

        let count = job(dir.path(), &manifest, "/guard").run(&mut quiet())?;
        assert_eq!(count, 0);
        assert_eq!(fs::read_to_string(&manifest)?, "");
        Ok(())
    }

    #[test]
    #[cfg(unix)]
    fn suid_files_are_flagged() -> crate::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new()?;
        let manifest = dir.path().join("filelist");
        let binary = dir.path().join("b.bin");
        fs::write(&binary, "elf")?;
        fs::set_permissions(&binary, fs::Permissions::from_mode(0o4755))?;
        fs::write(dir.path().join("a.txt"), "hi")?;

        job(dir.path(), &manifest, "/guard").run(&mut quiet())?;

        let contents = fs::read_to_string(&manifest)?;
        for line in contents.lines() {
            if line.contains("b.bin") {
                assert!(line.ends_with("#FSG# true"));
            } else {
                assert!(line.ends_with("#FSG# false"));
            }
        }
        Ok(())
    }

    #[test]
    #[cfg(unix)]
    fn symlinks_are_recorded_under_the_target_path() -> crate::Result<()> {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new()?;
        let manifest = dir.path().join("filelist");
        fs::write(dir.path().join("a.txt"), "hi")?;
        symlink("a.txt", dir.path().join("link.txt"))?;

        job(dir.path(), &manifest, "/guard").run(&mut quiet())?;

        let contents = fs::read_to_string(&manifest)?;
        let target = dir.path().join("a.txt");
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            assert!(line.starts_with(&format!("{} #FSG# {HI_SHA1}", target.display())));
        }
        Ok(())
    }

    #[test]
    #[cfg(unix)]
    fn broken_links_are_skipped_when_lenient_and_fatal_when_strict() -> crate::Result<()> {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new()?;
        let manifest = dir.path().join("filelist");
        fs::write(dir.path().join("a.txt"), "hi")?;
        symlink("gone.txt", dir.path().join("dangling"))?;

        let lenient = job(dir.path(), &manifest, "/guard");
        assert_eq!(lenient.run(&mut quiet())?, 1);

        let strict = ScanJob {
            link_policy: LinkPolicy::Strict,
            ..lenient
        };
        let err = strict.run(&mut quiet());
        assert!(matches!(err, Err(GenError::Unresolved(_))));

        // The failed strict run appended nothing.
        assert_eq!(fs::read_to_string(&manifest)?.lines().count(), 1);
        Ok(())
    }

    #[test]
    fn missing_root_aborts_before_touching_the_manifest() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("filelist");

        let err = job(&dir.path().join("absent"), &manifest, "/guard").run(&mut quiet());
        assert!(matches!(err, Err(GenError::InvalidRoot(_))));
        assert!(!manifest.exists());
    }

    #[test]
    fn verbose_runs_log_per_file_progress() -> crate::Result<()> {
        let dir = TempDir::new()?;
        let manifest = dir.path().join("filelist");
        fs::write(dir.path().join("a.txt"), "hi")?;

        let mut log = RunLog::new(true);
        job(dir.path(), &manifest, "/guard").run(&mut log)?;

        let joined = log.lines().join("\n");
        assert!(joined.contains(&format!("Processing {}", dir.path().join("a.txt").display())));
        assert!(joined.contains(&format!("Finished {}", dir.path().join("a.txt").display())));
        Ok(())
    }
}
