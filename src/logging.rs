//! File logging for the terminal binary.
//!
//! The game owns the terminal, so log lines never go to stderr. Without a log
//! directory no logger is installed and the `log` macros in the library
//! crates are no-ops.

use std::path::Path;

use anyhow::{Context, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, opt_format};

/// Start logging into `dir`. Keep the returned handle alive for the whole run.
pub fn setup_logging(dir: &Path) -> Result<LoggerHandle> {
    Logger::try_with_env_or_str("info")
        .context("invalid log specification")?
        .log_to_file(FileSpec::default().directory(dir).basename("tetris-2048"))
        .format(opt_format)
        .rotate(
            Criterion::Size(10 * 1024 * 1024),
            Naming::Numbers,
            Cleanup::KeepLogFiles(3),
        )
        .start()
        .with_context(|| format!("failed to start logging in {}", dir.display()))
}
