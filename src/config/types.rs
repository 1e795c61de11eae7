//! In-memory form of the config document.

use std::path::Path;

use serde_json::{Map, Value};

use super::ConfigError;
use crate::constants::CUSTOM_MODELS_KEY;
use crate::model::ModelRecord;

/// The whole config document as a JSON object.
///
/// Keeps the raw top-level map so foreign keys and their order survive a
/// round trip. `custom_models` is decoded on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    root: Map<String, Value>,
}

impl ConfigDocument {
    /// Parses document text. `path` is only used in error messages.
    ///
    /// Only the top level is checked here. A bad `custom_models` value is
    /// reported by [`ConfigDocument::custom_models`], so the caller can keep
    /// the rest of the document.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let Value::Object(root) = value else {
            return Err(ConfigError::Shape {
                path: path.to_path_buf(),
                reason: "top level is not a JSON object".to_string(),
            });
        };

        Ok(Self { root })
    }

    /// Decodes the `custom_models` array. Missing or `null` means empty.
    pub fn custom_models(&self, path: &Path) -> Result<Vec<ModelRecord>, ConfigError> {
        match self.root.get(CUSTOM_MODELS_KEY) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value @ Value::Array(_)) => {
                serde_json::from_value(value.clone()).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })
            }
            Some(_) => Err(ConfigError::Shape {
                path: path.to_path_buf(),
                reason: format!("`{CUSTOM_MODELS_KEY}` is not an array"),
            }),
        }
    }

    /// Replaces the `custom_models` array, keeping its position if present.
    pub fn set_custom_models(&mut self, records: &[ModelRecord]) -> Result<(), ConfigError> {
        let value = serde_json::to_value(records).map_err(ConfigError::Serialize)?;
        self.root.insert(CUSTOM_MODELS_KEY.to_string(), value);
        Ok(())
    }

    /// Top-level keys other than `custom_models`, in document order.
    pub fn foreign_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.root
            .keys()
            .map(String::as_str)
            .filter(|k| *k != CUSTOM_MODELS_KEY)
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_pretty_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(&self.root).map_err(ConfigError::Serialize)
    }
}
