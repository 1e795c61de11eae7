//! Editable form fields and validation.
//!
//! [`FormData`] is the text the user is typing. It only becomes a
//! [`ModelRecord`] through [`FormData::validate`].

use crate::constants::{DEFAULT_MAX_TOKENS, FIELD_CHAR_LIMIT};
use crate::model::{ModelRecord, Provider};

/// Fields of the form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    DisplayName,
    ModelId,
    BaseUrl,
    ApiKey,
    Provider,
    MaxTokens,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::DisplayName,
        Field::ModelId,
        Field::BaseUrl,
        Field::ApiKey,
        Field::Provider,
        Field::MaxTokens,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::DisplayName => "Display Name",
            Self::ModelId => "Model ID",
            Self::BaseUrl => "Base URL",
            Self::ApiKey => "API Key",
            Self::Provider => "Provider",
            Self::MaxTokens => "Max Tokens",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Self::DisplayName => "Name displayed in the list (required)",
            Self::ModelId => "Identifier, e.g. gpt-4-turbo",
            Self::BaseUrl => "API endpoint, usually ends in /v1",
            Self::ApiKey => "Provider API key (Ctrl+V to toggle)",
            Self::Provider => "\u{2190} \u{2192} to switch providers",
            Self::MaxTokens => "Maximum tokens per request",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::DisplayName => "Display Name (required)",
            Self::ModelId => "e.g. gpt-4, claude-3-opus",
            Self::BaseUrl => "https://api.example.com/v1",
            Self::ApiKey => "sk-...",
            Self::Provider => "",
            Self::MaxTokens => "e.g. 8192",
        }
    }

    /// The field after this one, wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// The field before this one, wrapping around.
    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Why a form could not be committed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Display Name is required")]
    EmptyDisplayName,
    #[error("Max Tokens must be a whole number, got {0:?}")]
    InvalidMaxTokens(String),
}

impl ValidationError {
    /// The field the error points at.
    pub fn field(&self) -> Field {
        match self {
            Self::EmptyDisplayName => Field::DisplayName,
            Self::InvalidMaxTokens(_) => Field::MaxTokens,
        }
    }
}

/// Current contents of the edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormData {
    pub display_name: String,
    pub model: String,
    pub base_url: String,
    pub api_key: String,
    pub provider: Provider,
    /// Kept as text so a bad value survives a failed validation.
    pub max_tokens: String,
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            model: String::new(),
            base_url: String::new(),
            api_key: String::new(),
            provider: Provider::default(),
            max_tokens: DEFAULT_MAX_TOKENS.to_string(),
        }
    }
}

impl FormData {
    pub fn from_record(record: &ModelRecord) -> Self {
        Self {
            display_name: record.model_display_name.clone(),
            model: record.model.clone(),
            base_url: record.base_url.clone(),
            api_key: record.api_key.clone(),
            provider: record.provider,
            max_tokens: record.max_tokens.to_string(),
        }
    }

    /// Text of a field. The provider field renders its identifier.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::DisplayName => &self.display_name,
            Field::ModelId => &self.model,
            Field::BaseUrl => &self.base_url,
            Field::ApiKey => &self.api_key,
            Field::Provider => self.provider.as_str(),
            Field::MaxTokens => &self.max_tokens,
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::DisplayName => Some(&mut self.display_name),
            Field::ModelId => Some(&mut self.model),
            Field::BaseUrl => Some(&mut self.base_url),
            Field::ApiKey => Some(&mut self.api_key),
            Field::Provider => None,
            Field::MaxTokens => Some(&mut self.max_tokens),
        }
    }

    /// Appends a character to a text field. Returns `false` if the field is
    /// not text or is full.
    pub fn push_char(&mut self, field: Field, c: char) -> bool {
        match self.text_mut(field) {
            Some(text) if text.chars().count() < FIELD_CHAR_LIMIT => {
                text.push(c);
                true
            }
            _ => false,
        }
    }

    /// Removes the last character of a text field.
    pub fn pop_char(&mut self, field: Field) {
        if let Some(text) = self.text_mut(field) {
            text.pop();
        }
    }

    /// Empties a text field.
    pub fn clear_field(&mut self, field: Field) {
        if let Some(text) = self.text_mut(field) {
            text.clear();
        }
    }

    /// Checks the form and builds the record it describes.
    ///
    /// The display name must be non-empty after trimming and is stored
    /// trimmed; `max_tokens` must parse as a non-negative integer. Other
    /// fields are free text. `base` supplies the keys the form does not
    /// edit, so foreign per-record keys survive an overwrite.
    pub fn validate(&self, base: Option<&ModelRecord>) -> Result<ModelRecord, ValidationError> {
        let display_name = self.display_name.trim();
        if display_name.is_empty() {
            return Err(ValidationError::EmptyDisplayName);
        }

        let max_tokens = self
            .max_tokens
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|n| *n >= 0)
            .ok_or_else(|| ValidationError::InvalidMaxTokens(self.max_tokens.clone()))?;

        Ok(ModelRecord {
            model_display_name: display_name.to_string(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            provider: self.provider,
            max_tokens,
            extra: base.map(|r| r.extra.clone()).unwrap_or_default(),
        })
    }
}
