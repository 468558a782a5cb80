//! Logging setup.
//!
//! The terminal UI owns stderr, so log records go to a file instead. Without
//! a log file no logger is installed and the `log` macros are no-ops.

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::path::Path;

/// Install an `env_logger` that appends to `path`. `RUST_LOG` overrides the
/// default `info` filter.
pub fn init_file_logger(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to install logger")?;

    Ok(())
}
