#![forbid(unsafe_code)]

//! `tracing-subscriber` setup.
//!
//! The interactive form owns the terminal, so it only logs when a log file is
//! configured. One-shot commands log to stderr.

use std::fs::OpenOptions;
use std::sync::Mutex;

use evcharge_core::config::LogConfig;
use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

/// Overrides `log.filter` when set.
pub const LOG_ENV: &str = "EVCHARGE_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Full-screen form: file or nothing.
    Interactive,
    /// One-shot command: stderr unless a file is configured.
    Stderr,
}

fn filter(config: &LogConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.filter)
            .map_err(|e| AppError::logging(format!("invalid filter {:?}: {e}", config.filter))),
    }
}

/// Install the global subscriber. Returns whether one was installed.
pub fn init(config: &LogConfig, target: LogTarget) -> Result<bool> {
    let filter = filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match (&config.file, target) {
        (Some(path), _) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        (None, LogTarget::Stderr) => builder.with_writer(std::io::stderr).try_init(),
        (None, LogTarget::Interactive) => return Ok(false),
    };
    // Only fails when a global subscriber already exists; keep that one.
    Ok(installed.is_ok())
}
