//! Runtime settings resolved from flags, environment and defaults.
//!
//! Precedence is command line > environment (including `.env`) > built-in
//! defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::ConfigStore;
use crate::constants::{ENV_CONFIG_PATH, ENV_MANUAL_SAVE};
use crate::editor::SavePolicy;

/// Where the document lives and when to write it.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub config_path: PathBuf,
    pub save_policy: SavePolicy,
}

impl Settings {
    /// Resolves settings against the process environment.
    pub fn resolve(config_flag: Option<PathBuf>, manual_save_flag: bool) -> Result<Self> {
        Self::resolve_with(config_flag, manual_save_flag, |key| std::env::var(key).ok())
    }

    /// Resolves settings with an injectable environment lookup.
    pub fn resolve_with(
        config_flag: Option<PathBuf>,
        manual_save_flag: bool,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let config_path = match config_flag {
            Some(path) => path,
            None => match env(ENV_CONFIG_PATH).filter(|v| !v.trim().is_empty()) {
                Some(path) => PathBuf::from(path),
                None => ConfigStore::default_path()
                    .context("Pass --config or set MODELBOOK_CONFIG")?,
            },
        };

        let manual = manual_save_flag
            || env(ENV_MANUAL_SAVE)
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false);

        Ok(Self {
            config_path,
            save_policy: if manual {
                SavePolicy::Manual
            } else {
                SavePolicy::Auto
            },
        })
    }
}
