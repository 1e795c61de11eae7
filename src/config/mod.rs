//! The JSON document modelbook edits, and where it lives.
//!
//! The document is a top-level JSON object. modelbook owns only the
//! `custom_models` array; every other key is carried through load and save
//! untouched and in its original order.

mod loader;
mod paths;
mod types;

pub use loader::ConfigStore;
pub use types::ConfigDocument;

use std::io;
use std::path::PathBuf;

/// Failures while locating, reading or writing the config document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHomeDir,
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unexpected shape in {}: {reason}", .path.display())]
    Shape { path: PathBuf, reason: String },
    #[error("failed to save {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ConfigError {
    /// True for errors meaning "the file exists but is not a usable document".
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Shape { .. })
    }
}
