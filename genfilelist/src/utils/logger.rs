//! Logging configuration using tracing, plus the buffered run log.

use chrono::Local;
use std::fs;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging with the specified level
pub fn init(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}

/// Buffered run log owned by a single scan run.
///
/// Every message is prefixed with a `[YYYY-MM-DD HH:MM:SS]` timestamp,
/// echoed to stdout immediately and kept in memory so the whole run can be
/// dumped to a file afterwards.
#[derive(Debug)]
pub struct RunLog {
    lines: Vec<String>,
    verbose: bool,
}

impl RunLog {
    pub fn new(verbose: bool) -> Self {
        Self {
            lines: Vec::new(),
            verbose,
        }
    }

    /// Record a message unconditionally.
    pub fn info(&mut self, msg: &str) {
        self.push(msg);
    }

    /// Record a message only when the run was started with `--verbose`.
    pub fn verbose(&mut self, msg: &str) {
        if self.verbose {
            self.push(msg);
        }
    }

    /// Messages recorded so far, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Overwrite `path` with the collected log lines.
    pub fn flush_to_file(&self, path: &Path) -> crate::Result<()> {
        let mut contents = self.lines.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        fs::write(path, contents)?;
        Ok(())
    }

    fn push(&mut self, msg: &str) {
        let line = format!("[{}] {}", Local::now().format("%Y-%m-%d %H:%M:%S"), msg);
        println!("{line}");
        self.lines.push(line);
    }
}
