//! Core error types for binday-core.
//!
//! The rule engine, projector and point engine are infallible. Everything
//! here is raised at the configuration boundary: loading, migrating,
//! validating and editing the settings snapshot.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for binday-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse errors
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Settings written by a newer build
    #[error("Settings schema version {found} is newer than supported version {supported}")]
    UnsupportedSchemaVersion { found: u32, supported: u32 },

    /// A migration step could not reshape the document
    #[error("Settings migration to v{version} failed: {message}")]
    MigrationFailed { version: u32, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Date key is not a `YYYY-MM-DD` local calendar date
    #[error("Invalid date key '{key}': expected YYYY-MM-DD")]
    InvalidDateKey { key: String },

    /// Rule has no weekdays and could never fire
    #[error("Rule '{rule_id}' has no weekdays")]
    EmptyWeekdays { rule_id: String },

    /// Weekday index outside 0 (Sunday) ..= 6 (Saturday)
    #[error("Rule '{rule_id}' has weekday {value}; expected 0 (Sunday) to 6 (Saturday)")]
    WeekdayOutOfRange { rule_id: String, value: u8 },

    /// Week-of-month index outside 1..=5
    #[error("Rule '{rule_id}' has week-of-month {value}; expected 1 to 5")]
    MonthWeekOutOfRange { rule_id: String, value: u8 },

    /// Two rules share an identifier
    #[error("Duplicate rule id '{0}'")]
    DuplicateRuleId(String),

    /// No rule with the given identifier
    #[error("No rule with id '{0}'")]
    UnknownRule(String),

    /// Notification time is not `HH:MM`
    #[error("Invalid notification time '{0}': expected HH:MM")]
    InvalidNotificationTime(String),

    /// History record filed under a different date than its own
    #[error("History entry '{key}' holds a record dated '{date}'")]
    HistoryDateMismatch { key: String, date: String },

    /// Year/month pair does not name a calendar month
    #[error("Invalid month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
