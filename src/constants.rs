//! Centralized constants for modelbook.
//!
//! All magic numbers, default strings, and configuration constants live here
//! so they can be changed in one place.

use std::time::Duration;

/// Application name used in CLI output, log file names and data paths.
pub const APP_NAME: &str = "modelbook";

/// Directory under the user's home that holds the edited config.
pub const CONFIG_DIR_NAME: &str = ".factory";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.json";

/// Top-level key of the document that the editor owns.
pub const CUSTOM_MODELS_KEY: &str = "custom_models";

/// Default token limit for new records and records missing the key.
pub const DEFAULT_MAX_TOKENS: i64 = 8192;

// --- Environment overrides ---

/// Overrides the config path when `--config` is not given.
pub const ENV_CONFIG_PATH: &str = "MODELBOOK_CONFIG";

/// Selects manual-save mode when set to `1` or `true`.
pub const ENV_MANUAL_SAVE: &str = "MODELBOOK_MANUAL_SAVE";

/// Tracing filter directive for the log file.
pub const ENV_LOG_FILTER: &str = "MODELBOOK_LOG";

/// Filter used when [`ENV_LOG_FILTER`] is unset.
pub const DEFAULT_LOG_FILTER: &str = "modelbook=info";

// --- Logging ---

/// Log filename inside the data directory.
pub const LOG_FILENAME: &str = "modelbook.log";

/// Size above which the log is rotated to `<name>.old` on startup.
pub const LOG_ROTATE_BYTES: u64 = 100 * 1024;

// --- Status line ---

/// Lifetime of success messages.
pub const STATUS_SUCCESS_TTL: Duration = Duration::from_secs(3);

/// Lifetime of informational messages.
pub const STATUS_INFO_TTL: Duration = Duration::from_secs(3);

/// Lifetime of warnings.
pub const STATUS_WARNING_TTL: Duration = Duration::from_secs(4);

/// Lifetime of error messages.
pub const STATUS_ERROR_TTL: Duration = Duration::from_secs(5);

// --- TUI ---

/// Render tick interval (~30 fps is plenty for a form editor).
pub const TICK_DURATION: Duration = Duration::from_millis(33);

/// Narrowest sidebar before the layout stacks vertically.
pub const MIN_SIDEBAR_WIDTH: u16 = 28;

/// Narrowest form panel before the layout stacks vertically.
pub const MIN_FORM_WIDTH: u16 = 44;

/// Maximum characters accepted by a single form field.
pub const FIELD_CHAR_LIMIT: usize = 256;
