//! TOML-based household settings.
//!
//! Stores:
//! - Collection rules
//! - Completion history
//! - Reminder preferences (user name, notification times, alarm)
//!
//! Settings are stored at `~/.config/binday/settings.toml` and migrated to
//! the current schema on load.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::data_dir;
use super::migrations::{self, CURRENT_SCHEMA_VERSION};
use crate::error::{ConfigError, CoreError, Result, ValidationError};
use crate::history::{CompletionRecord, History};
use crate::rule::WasteRule;
use crate::snapshot::ConfigurationSnapshot;

/// Keys that cannot be changed through [`Settings::set`].
const READ_ONLY_KEYS: [&str; 3] = ["schema_version", "rules", "history"];

/// Household settings.
///
/// Serialized to/from TOML at `~/.config/binday/settings.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,
    #[serde(default = "default_user_name")]
    pub user_name: String,
    /// `HH:MM` local times at which reminders fire.
    #[serde(default = "default_notification_times")]
    pub notification_times: Vec<String>,
    #[serde(default = "default_true")]
    pub alarm_enabled: bool,
    #[serde(default = "default_rules")]
    pub rules: Vec<WasteRule>,
    #[serde(default)]
    pub history: History,
}

// Default functions
fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}
fn default_user_name() -> String {
    "User".into()
}
fn default_notification_times() -> Vec<String> {
    vec!["08:00".into()]
}
fn default_true() -> bool {
    true
}
fn default_rules() -> Vec<WasteRule> {
    vec![
        WasteRule::weekly("1", "burnable", &[1, 4]),
        WasteRule::weekly("2", "plastic", &[3]),
    ]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            user_name: default_user_name(),
            notification_times: default_notification_times(),
            alarm_enabled: true,
            rules: default_rules(),
            history: History::default(),
        }
    }
}

impl Settings {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default settings path under the data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("settings.toml"))
    }

    /// Load from the default path, writing defaults if the file is missing.
    ///
    /// # Errors
    /// See [`Settings::load_from`].
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, migrating and validating. A missing file yields
    /// the defaults, which are written back to `path`.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, parsed,
    /// migrated or validated, or if the defaults cannot be written.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content).map_err(|e| match e {
                CoreError::TomlDe(err) => CoreError::Config(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                }),
                other => other,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no settings file, writing defaults");
                let settings = Self::default();
                settings.save_to(path)?;
                Ok(settings)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Read only the completion history from `path`, ignoring every other
    /// setting. A missing file or table yields an empty history.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or the history
    /// table itself is malformed.
    pub fn load_history_from(path: &Path) -> Result<History> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(History::new()),
            Err(e) => return Err(load_failed(e.to_string()).into()),
        };
        let mut doc: toml::Table = content.parse().map_err(|e: toml::de::Error| load_failed(e.to_string()))?;
        let history = match doc.remove("history") {
            Some(table) => History::deserialize(table).map_err(|e| load_failed(e.to_string()))?,
            None => History::new(),
        };
        history.validate()?;
        Ok(history)
    }

    /// Parse a settings document, running any pending migrations first.
    ///
    /// # Errors
    /// Returns an error if the document is not TOML, cannot be migrated, or
    /// fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut doc: toml::Table = content.parse()?;
        migrations::migrate(&mut doc)?;
        let settings = Settings::deserialize(toml::Value::Table(doc))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Persist to the default path.
    ///
    /// # Errors
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`, creating parent directories as needed.
    ///
    /// # Errors
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = self.to_toml_string()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Configuration-boundary validation of everything the engine consumes.
    ///
    /// # Errors
    /// Returns the first invalid rule, duplicate rule id, malformed
    /// notification time, or history record filed under the wrong date.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            rule.validate()?;
            if !seen.insert(rule.id.as_str()) {
                return Err(ValidationError::DuplicateRuleId(rule.id.clone()));
            }
        }
        for time in &self.notification_times {
            validate_notification_time(time)?;
        }
        self.history.validate()
    }

    /// Immutable view handed to the engine for one query.
    pub fn snapshot(&self) -> ConfigurationSnapshot<'_> {
        ConfigurationSnapshot::new(&self.rules, &self.history)
    }

    /// Get a value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key. Rules and history are edited
    /// through their own operations, not here.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or read-only, or the new value
    /// does not parse or validate. On error `self` is unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let root = key.split('.').next().unwrap_or_default();
        if READ_ONLY_KEYS.contains(&root) {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "read-only key".into(),
            }
            .into());
        }
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Settings = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Add a rule after validating it.
    ///
    /// # Errors
    /// Returns an error if the rule is invalid or its id is already used.
    pub fn add_rule(&mut self, rule: WasteRule) -> Result<(), ValidationError> {
        rule.validate()?;
        if self.rules.iter().any(|r| r.id == rule.id) {
            return Err(ValidationError::DuplicateRuleId(rule.id));
        }
        tracing::debug!(rule_id = %rule.id, category = %rule.category, "rule added");
        self.rules.push(rule);
        Ok(())
    }

    /// Remove the rule with `id`.
    ///
    /// # Errors
    /// Returns an error if no rule has that id.
    pub fn remove_rule(&mut self, id: &str) -> Result<WasteRule, ValidationError> {
        let idx = self
            .rules
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ValidationError::UnknownRule(id.to_string()))?;
        Ok(self.rules.remove(idx))
    }

    /// Record a completion, replacing any record already on that date.
    pub fn record_completion(&mut self, record: CompletionRecord) -> Option<CompletionRecord> {
        tracing::debug!(date = %record.date, "completion recorded");
        self.history.upsert(record)
    }

    /// Bulk-clear the completion history.
    pub fn clear_history(&mut self) -> usize {
        let removed = self.history.clear();
        tracing::info!(removed, "completion history cleared");
        removed
    }
}

fn validate_notification_time(time: &str) -> Result<(), ValidationError> {
    let well_formed = time.len() == 5 && NaiveTime::parse_from_str(time, "%H:%M").is_ok();
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::InvalidNotificationTime(time.to_string()))
    }
}
