//! Path resolution for directory entries.
//!
//! Decides which path the manifest records for an entry. A symlink target is
//! interpreted relative to the directory containing the link unless the
//! target is itself absolute; when that interpretation does not land on a
//! regular file, the entry is re-resolved through full canonicalization,
//! which follows every remaining hop.

use crate::{GenError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// How an entry's recorded path was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPath {
    /// The entry is not a symlink and was recorded as-is.
    Direct(PathBuf),
    /// The entry is a symlink whose target is a regular file.
    ViaLink(PathBuf),
    /// The one-hop target was not a regular file; canonicalizing the
    /// original entry found one.
    Fallback(PathBuf),
}

impl ResolvedPath {
    pub fn as_path(&self) -> &Path {
        match self {
            Self::Direct(path) | Self::ViaLink(path) | Self::Fallback(path) => path,
        }
    }

    pub fn into_path_buf(self) -> PathBuf {
        match self {
            Self::Direct(path) | Self::ViaLink(path) | Self::Fallback(path) => path,
        }
    }
}

/// What to do with entries that cannot be resolved to a regular file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPolicy {
    /// Skip the entry with a warning.
    Lenient,
    /// Abort the run.
    Strict,
}

/// Return the raw target of `path` if it is a symbolic link.
pub fn link_target(path: &Path) -> Option<PathBuf> {
    fs::read_link(path).ok()
}

/// Resolve the path recorded for one directory entry.
///
/// Entries that cannot be resolved to an existing regular file (broken
/// symlinks, links into directories, special files) are reported as
/// [`GenError::Unresolved`] instead of being recorded against a wrong path.
pub fn resolve_entry(path: &Path) -> Result<ResolvedPath> {
    let Some(target) = link_target(path) else {
        let direct = absolutize(path)?;
        if direct.is_file() {
            return Ok(ResolvedPath::Direct(direct));
        }
        return Err(GenError::Unresolved(path.to_path_buf()));
    };

    let candidate = if target.is_absolute() {
        target
    } else {
        match path.parent() {
            Some(dir) => dir.join(&target),
            None => target,
        }
    };
    let candidate = absolutize(&candidate)?;
    if candidate.is_file() {
        return Ok(ResolvedPath::ViaLink(candidate));
    }

    match fs::canonicalize(path) {
        Ok(real) if real.is_file() => Ok(ResolvedPath::Fallback(real)),
        _ => Err(GenError::Unresolved(path.to_path_buf())),
    }
}

/// Absolute form of `path` with `.` and `..` collapsed lexically, without
/// consulting the filesystem.
fn absolutize(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}
