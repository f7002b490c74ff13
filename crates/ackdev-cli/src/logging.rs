//! Logging setup.
//!
//! The wizard owns the terminal while a session runs, so log output never
//! goes to stdout/stderr: it is appended to `--log-file` or discarded.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::types::LogLevel;

/// `RUST_LOG` takes precedence over `--log-level` when set.
pub fn init(level: LogLevel, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ackdev={level},ackdev_runtime={level}")));

    let result = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .try_init(),
    };

    result.map_err(|e| anyhow!("failed to initialise logging: {}", e))
}
