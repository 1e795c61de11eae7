//! Record types for the custom model registry.
//!
//! Defines [`ModelRecord`], the on-disk shape of one `custom_models` entry,
//! the [`Provider`] enumeration and the in-memory [`RecordId`] handle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::constants::DEFAULT_MAX_TOKENS;

/// Identifies which API flavour a custom model speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provider {
    /// Anthropic Messages API.
    #[default]
    Anthropic,
    /// OpenAI API.
    OpenAI,
    /// Any OpenAI-compatible chat completions endpoint.
    GenericChatCompletion,
}

impl Provider {
    /// Every provider, in selector order.
    pub const ALL: [Provider; 3] = [
        Provider::Anthropic,
        Provider::OpenAI,
        Provider::GenericChatCompletion,
    ];

    /// The identifier written to the config file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAI => "openai",
            Self::GenericChatCompletion => "generic-chat-completion-api",
        }
    }

    /// Single-letter badge shown in the sidebar.
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Anthropic => "[A]",
            Self::OpenAI => "[O]",
            Self::GenericChatCompletion => "[G]",
        }
    }

    /// The provider after this one, wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// The provider before this one, wrapping around.
    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a provider string is not one of [`Provider::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider: {0}. Supported: anthropic, openai, generic-chat-completion-api")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    /// Matching is case-insensitive and ignores surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAI),
            "generic-chat-completion-api" => Ok(Self::GenericChatCompletion),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

impl Serialize for Provider {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Provider {
    /// Unknown provider strings, `null` and non-string values are coerced to
    /// the default rather than failing the whole document.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let provider = match Value::deserialize(deserializer)? {
            Value::Null => Provider::default(),
            Value::String(raw) => raw.parse().unwrap_or_else(|err: UnknownProvider| {
                tracing::warn!(provider = %err.0, "unrecognized provider, using anthropic");
                Provider::default()
            }),
            other => {
                tracing::warn!(provider = %other, "provider is not a string, using anthropic");
                Provider::default()
            }
        };
        Ok(provider)
    }
}

/// One `custom_models` entry.
///
/// Every key is optional on disk; missing keys take the defaults of
/// [`ModelRecord::default`]. Keys the editor does not know about are kept
/// in `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Name shown in the list. Required when editing.
    #[serde(default, deserialize_with = "lenient_string")]
    pub model_display_name: String,
    /// Provider-side model identifier.
    #[serde(default, deserialize_with = "lenient_string")]
    pub model: String,
    /// API endpoint override.
    #[serde(default, deserialize_with = "lenient_string")]
    pub base_url: String,
    /// API secret. Never logged.
    #[serde(default, deserialize_with = "lenient_string")]
    pub api_key: String,
    #[serde(default)]
    pub provider: Provider,
    /// Signed so that whatever integer the file holds is written back as is.
    /// The form only accepts non-negative values.
    #[serde(default = "default_max_tokens", deserialize_with = "lenient_max_tokens")]
    pub max_tokens: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_max_tokens() -> i64 {
    DEFAULT_MAX_TOKENS
}

/// `null` reads as an empty string and other scalars are stringified.
/// Arrays and objects are still an error.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        scalar @ (Value::Bool(_) | Value::Number(_)) => {
            tracing::warn!(value = %scalar, "expected a string, converting");
            Ok(scalar.to_string())
        }
        other => Err(serde::de::Error::custom(format!(
            "expected a string, found {other}"
        ))),
    }
}

/// Accepts any integer that fits in `i64`, integral floats and numeric
/// strings. `null` and anything else fall back to the default.
fn lenient_max_tokens<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => return Ok(DEFAULT_MAX_TOKENS),
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(parsed.unwrap_or_else(|| {
        tracing::warn!(max_tokens = %value, "unusable max_tokens, using default");
        DEFAULT_MAX_TOKENS
    }))
}

impl Default for ModelRecord {
    fn default() -> Self {
        Self {
            model_display_name: String::new(),
            model: String::new(),
            base_url: String::new(),
            api_key: String::new(),
            provider: Provider::default(),
            max_tokens: DEFAULT_MAX_TOKENS,
            extra: Map::new(),
        }
    }
}

impl ModelRecord {
    /// Label for list rows: display name, then model id, then a placeholder.
    pub fn label(&self) -> &str {
        if !self.model_display_name.is_empty() {
            &self.model_display_name
        } else if !self.model.is_empty() {
            &self.model
        } else {
            "(unnamed)"
        }
    }
}

/// Stable in-memory handle for a record.
///
/// Assigned when a record enters the registry and never persisted; the
/// position in the list is derived from it only at the presentation edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub(crate) u64);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_roundtrip_names() {
        for p in Provider::ALL {
            assert_eq!(p.as_str().parse::<Provider>().unwrap(), p);
        }
        assert_eq!(" OpenAI ".parse::<Provider>().unwrap(), Provider::OpenAI);
        assert!("ollama".parse::<Provider>().is_err());
    }

    #[test]
    fn test_provider_cycle() {
        assert_eq!(Provider::Anthropic.next(), Provider::OpenAI);
        assert_eq!(Provider::GenericChatCompletion.next(), Provider::Anthropic);
        assert_eq!(Provider::Anthropic.prev(), Provider::GenericChatCompletion);
    }

    #[test]
    fn test_record_missing_keys_use_defaults() {
        let record: ModelRecord = serde_json::from_value(json!({"model": "gpt-4o"})).unwrap();
        assert_eq!(record.model, "gpt-4o");
        assert_eq!(record.model_display_name, "");
        assert_eq!(record.provider, Provider::Anthropic);
        assert_eq!(record.max_tokens, 8192);
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_unknown_provider_is_coerced() {
        let record: ModelRecord =
            serde_json::from_value(json!({"provider": "bedrock"})).unwrap();
        assert_eq!(record.provider, Provider::Anthropic);
    }

    #[test]
    fn test_record_keeps_unknown_keys() {
        let value = json!({
            "model_display_name": "Local",
            "provider": "generic-chat-completion-api",
            "max_tokens": 4096,
            "supports_images": true
        });
        let record: ModelRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.extra.get("supports_images"), Some(&json!(true)));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["supports_images"], json!(true));
        assert_eq!(back["provider"], json!("generic-chat-completion-api"));
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let value = json!({
            "model_display_name": "Local",
            "model": null,
            "base_url": null,
            "api_key": null,
            "provider": null,
            "max_tokens": null
        });
        let record: ModelRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.model_display_name, "Local");
        assert_eq!(record.base_url, "");
        assert_eq!(record.provider, Provider::Anthropic);
        assert_eq!(record.max_tokens, DEFAULT_MAX_TOKENS);
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_negative_max_tokens_is_kept() {
        let record: ModelRecord =
            serde_json::from_value(json!({"max_tokens": -1})).unwrap();
        assert_eq!(record.max_tokens, -1);
        assert_eq!(serde_json::to_value(&record).unwrap()["max_tokens"], json!(-1));
    }

    #[test]
    fn test_loose_max_tokens_values() {
        let cases = [
            (json!(4096.0), 4096),
            (json!("2048"), 2048),
            (json!(12.5), DEFAULT_MAX_TOKENS),
            (json!(u64::MAX), DEFAULT_MAX_TOKENS),
            (json!("lots"), DEFAULT_MAX_TOKENS),
            (json!([1]), DEFAULT_MAX_TOKENS),
        ];
        for (raw, expected) in cases {
            let record: ModelRecord =
                serde_json::from_value(json!({"max_tokens": raw.clone()})).unwrap();
            assert_eq!(record.max_tokens, expected, "max_tokens = {raw}");
        }
    }

    #[test]
    fn test_scalar_string_fields_are_stringified() {
        let record: ModelRecord =
            serde_json::from_value(json!({"model": 4, "api_key": true})).unwrap();
        assert_eq!(record.model, "4");
        assert_eq!(record.api_key, "true");
        assert!(serde_json::from_value::<ModelRecord>(json!({"model": ["x"]})).is_err());
    }

    #[test]
    fn test_label_fallbacks() {
        let mut record = ModelRecord::default();
        assert_eq!(record.label(), "(unnamed)");
        record.model = "gpt-4o".into();
        assert_eq!(record.label(), "gpt-4o");
        record.model_display_name = "GPT".into();
        assert_eq!(record.label(), "GPT");
    }
}
