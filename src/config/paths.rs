//! Default location of the config document.

use std::path::PathBuf;

use super::ConfigError;
use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILENAME};

impl super::ConfigStore {
    /// Returns `~/.factory/config.json` for the current user.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDir`] if the home directory cannot be
    /// determined.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(CONFIG_DIR_NAME).join(CONFIG_FILENAME))
    }
}
