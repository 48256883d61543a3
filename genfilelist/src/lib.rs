//! Filelist generator for the FsGuard integrity checker.
//!
//! Walks a directory tree and appends one `path #FSG# checksum #FSG# suid`
//! record per regular file to a manifest the guard later verifies.

pub mod checksum;
pub mod executor;
pub mod fs;
pub mod utils;

// Re-export commonly used types
pub use executor::ScanJob;
pub use utils::errors::GenError;
pub type Result<T> = std::result::Result<T, GenError>;
