//! Manifest types and serialization.
//!
//! One manifest line records the resolved path, its checksum and whether the
//! set-user-ID bit is present, separated by the `#FSG#` token the guard
//! parses. The manifest is append-only: records from one run are added as a
//! single block and existing content is never rewritten.

use crate::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Field separator understood by the guard.
pub const DELIMITER: &str = "#FSG#";

/// One line of the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Resolved absolute path the checksum and suid flag were taken from.
    pub path: PathBuf,

    /// Lowercase hex digest of the file's content.
    pub checksum: String,

    /// Whether the file mode carries the set-user-ID bit.
    pub is_suid: bool,
}

impl ManifestEntry {
    /// Serialize as `<path> #FSG# <checksum> #FSG# <true|false>`.
    ///
    /// Delimiter occurrences inside the path are not escaped; a path
    /// containing the literal token corrupts downstream parsing.
    pub fn to_line(&self) -> String {
        format!(
            "{} {DELIMITER} {} {DELIMITER} {}",
            self.path.display(),
            self.checksum,
            self.is_suid
        )
    }
}

/// Append `entries` to the manifest at `path` in one bulk write, creating
/// the file if absent. Nothing is deduplicated: appending the same records
/// twice stores them twice.
pub fn append_entries(path: &Path, entries: &[ManifestEntry]) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if entries.is_empty() {
        return Ok(());
    }

    let mut block = entries
        .iter()
        .map(ManifestEntry::to_line)
        .collect::<Vec<_>>()
        .join("\n");
    block.push('\n');
    file.write_all(block.as_bytes())?;
    Ok(())
}
