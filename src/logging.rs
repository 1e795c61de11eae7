//! File logging for modelbook.
//!
//! The TUI owns stdout, so tracing output goes to
//! `<data_dir>/modelbook/modelbook.log` instead.

use std::fs::{self, OpenOptions};
use std::io::LineWriter;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::constants::{
    APP_NAME, DEFAULT_LOG_FILTER, ENV_LOG_FILTER, LOG_FILENAME, LOG_ROTATE_BYTES,
};

/// Installs the global tracing subscriber.
///
/// Rotates the previous log to `modelbook.log.old` once it grows past
/// 100 KiB. The filter comes from `MODELBOOK_LOG`, falling back to
/// `modelbook=info`.
pub fn setup_logging() -> Result<()> {
    let dir = dirs::data_dir()
        .context("Could not determine data directory")?
        .join(APP_NAME);
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {:?}", dir))?;
    let log_path = dir.join(LOG_FILENAME);

    if let Ok(meta) = fs::metadata(&log_path) {
        if meta.len() > LOG_ROTATE_BYTES {
            fs::rename(&log_path, dir.join(format!("{LOG_FILENAME}.old")))?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let filter = EnvFilter::try_from_env(ENV_LOG_FILTER)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(LineWriter::new(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install subscriber: {err}"))?;
    Ok(())
}
