//! Filelist generator - Main entry point
//!
//! Produces the file-integrity manifest consumed by the FsGuard checker.

use anyhow::Result;
use clap::Parser;
use genfilelist::checksum::Algorithm;
use genfilelist::executor::ScanJob;
use genfilelist::fs::resolve::LinkPolicy;
use genfilelist::fs::walker::ExcludeRule;
use genfilelist::utils::{self, logger::RunLog};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory tree to scan
    root: PathBuf,

    /// Manifest file to append to (created if absent)
    filelist: PathBuf,

    /// Guard binary path; any entry whose path contains it is skipped
    fsguard_binary: String,

    /// Log per-file progress
    #[arg(long)]
    verbose: bool,

    /// Write the run log to this file at the end of the run
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Checksum algorithm recorded in the manifest
    #[arg(long, value_enum, default_value = "sha1")]
    checksum: Algorithm,

    /// Abort on entries that cannot be resolved to a regular file instead
    /// of skipping them
    #[arg(long)]
    strict_links: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    utils::logger::init(if args.verbose { "debug" } else { "info" })?;
    tracing::info!("Starting genfilelist v{}", env!("CARGO_PKG_VERSION"));

    let job = ScanJob {
        root: args.root,
        filelist: args.filelist,
        exclude: ExcludeRule::new(&args.fsguard_binary),
        algorithm: args.checksum,
        link_policy: if args.strict_links {
            LinkPolicy::Strict
        } else {
            LinkPolicy::Lenient
        },
    };

    let mut log = RunLog::new(args.verbose);
    let count = job.run(&mut log)?;
    tracing::info!("Manifest updated ({} entries)", count);

    if let Some(path) = &args.log_file {
        log.flush_to_file(path)?;
    }

    Ok(())
}
