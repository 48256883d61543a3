//! File checksum computation.
//!
//! Files are streamed through the selected digest rather than slurped into
//! memory, so manifest generation over large trees stays flat on RAM.

use crate::Result;
use sha1::{Digest, Sha1};
use sha2::Sha256;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const READ_BUF_SIZE: usize = 1024 * 1024;

/// Digest algorithm recorded in the manifest.
///
/// `Sha1` is what deployed guard binaries parse; `Sha256` is available for
/// consumers that only need a stable digest format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Algorithm {
    Sha1,
    Sha256,
}

/// Compute the lowercase hex digest of the file at `path`.
///
/// Fails if the file cannot be opened or read.
pub fn hash_file(path: &Path, algorithm: Algorithm) -> Result<String> {
    match algorithm {
        Algorithm::Sha1 => digest_file::<Sha1>(path),
        Algorithm::Sha256 => digest_file::<Sha256>(path),
    }
}

fn digest_file<D: Digest>(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = D::new();
    let mut buf = vec![0u8; READ_BUF_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
