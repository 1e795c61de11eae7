//! Reading and writing the config document on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{ConfigDocument, ConfigError};

/// A config document at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document.
    ///
    /// A missing file is not an error: the parent directory is created
    /// (best effort) and an empty document is returned. The file is never
    /// written here, so a document that fails to parse stays on disk as is.
    pub fn load(&self) -> Result<ConfigDocument, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                if let Some(parent) = self.path.parent() {
                    if let Err(err) = fs::create_dir_all(parent) {
                        tracing::debug!(dir = %parent.display(), %err, "could not create config dir");
                    }
                }
                tracing::info!(path = %self.path.display(), "no config file, starting empty");
                return Ok(ConfigDocument::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let doc = ConfigDocument::parse(&text, &self.path)?;
        let foreign: Vec<&str> = doc.foreign_keys().collect();
        tracing::info!(path = %self.path.display(), ?foreign, "loaded config");
        Ok(doc)
    }

    /// Writes the document as pretty JSON, replacing the previous file.
    ///
    /// The text goes to `<path>.tmp` first and is renamed over the target so
    /// a failed write never leaves a truncated config behind.
    pub fn save(&self, doc: &ConfigDocument) -> Result<(), ConfigError> {
        let json = doc.to_pretty_json()?;
        let write_err = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(write_err)?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(source));
        }

        tracing::info!(path = %self.path.display(), "saved config");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}
