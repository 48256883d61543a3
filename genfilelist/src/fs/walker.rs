//! Directory traversal for manifest generation.
//!
//! Enumerates every entry under the scan root that should be considered for
//! the manifest: regular files, symlinks to files, and broken symlinks.
//! Directories are never listed, and symlinks are not followed into.

use crate::{GenError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Substring filter that keeps the guard's own binary out of the manifest.
///
/// Matching is a plain substring test against the full path string, not a
/// path-component match: any entry whose path contains the pattern anywhere
/// is skipped.
#[derive(Debug, Clone)]
pub struct ExcludeRule {
    pattern: String,
}

impl ExcludeRule {
    /// Surrounding whitespace in `pattern` is trimmed.
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.trim().to_string(),
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.to_string_lossy().contains(self.pattern.as_str())
    }
}

/// Walk the tree under `root` depth-first and collect candidate entries in
/// encounter order.
///
/// A symlink that resolves to a directory is treated as a directory and
/// skipped. Excluded entries are dropped silently — no log line, no
/// manifest record. Fails before producing anything if `root` is not an
/// existing directory; directory read errors during the walk propagate.
pub fn collect_entries(root: &Path, exclude: &ExcludeRule) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(GenError::InvalidRoot(root.display().to_string()));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;

        if entry.file_type().is_dir() {
            continue;
        }
        if exclude.matches(entry.path()) {
            continue;
        }
        // Symlinks pointing at directories belong to the directory listing,
        // not the file listing.
        if entry.file_type().is_symlink() && entry.path().is_dir() {
            continue;
        }

        entries.push(entry.into_path());
    }

    Ok(entries)
}
