//! File mode queries for manifest entries.

use crate::Result;
use std::fs;
use std::path::Path;

/// Report whether the file at `path` carries the set-user-ID bit.
///
/// Symlinks are followed, so the check applies to the resolved target, not
/// the link itself. Fails if the metadata query fails (the path may vanish
/// between resolution and this check).
pub fn is_suid(path: &Path) -> Result<bool> {
    let metadata = fs::metadata(path)?;
    Ok(mode_is_suid(&metadata))
}

#[cfg(unix)]
fn mode_is_suid(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;

    const S_ISUID: u32 = 0o4000;
    metadata.permissions().mode() & S_ISUID != 0
}

#[cfg(not(unix))]
fn mode_is_suid(_metadata: &fs::Metadata) -> bool {
    false
}
