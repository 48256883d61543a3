//! Custom error types for the filelist generator.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Invalid scan root: {0}")]
    InvalidRoot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Cannot resolve {} to a regular file", .0.display())]
    Unresolved(PathBuf),
}

pub type Result<T> = std::result::Result<T, GenError>;
