//! Settings schema migrations for binday.
//!
//! Migrations are versioned and applied once, when a settings document is
//! loaded and before it is deserialized. The document's `schema_version` key
//! tracks the current version; a missing key means version 0.

use toml::{Table, Value};

use crate::error::ConfigError;

/// Current schema version.
///
/// Increment this when adding new migrations.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

const VERSION_KEY: &str = "schema_version";

/// Apply all pending migrations to bring `doc` to the current schema version.
/// Returns the version the document was at before migrating.
///
/// # Errors
/// Returns an error if the document is from a newer schema or a step cannot
/// reshape it.
pub fn migrate(doc: &mut Table) -> Result<u32, ConfigError> {
    let current_version = get_schema_version(doc)?;
    if current_version > CURRENT_SCHEMA_VERSION {
        return Err(ConfigError::UnsupportedSchemaVersion {
            found: current_version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }

    // Apply migrations sequentially
    if current_version < 1 {
        migrate_v1(doc)?;
    }
    if current_version < 2 {
        migrate_v2(doc)?;
    }

    if current_version < CURRENT_SCHEMA_VERSION {
        tracing::info!(
            from = current_version,
            to = CURRENT_SCHEMA_VERSION,
            "migrated settings schema"
        );
    }
    Ok(current_version)
}

/// Read the schema version. Returns 0 if no version is set.
fn get_schema_version(doc: &Table) -> Result<u32, ConfigError> {
    match doc.get(VERSION_KEY) {
        None => Ok(0),
        Some(Value::Integer(v)) => u32::try_from(*v).map_err(|_| ConfigError::InvalidValue {
            key: VERSION_KEY.into(),
            message: format!("{v} is not a valid schema version"),
        }),
        Some(other) => Err(ConfigError::InvalidValue {
            key: VERSION_KEY.into(),
            message: format!("expected integer, found {}", other.type_str()),
        }),
    }
}

fn set_schema_version(doc: &mut Table, version: u32) {
    doc.insert(VERSION_KEY.into(), Value::Integer(i64::from(version)));
}

/// Migration v1: a single `notification_time` becomes `notification_times`.
fn migrate_v1(doc: &mut Table) -> Result<(), ConfigError> {
    if let Some(single) = doc.remove("notification_time") {
        if !doc.contains_key("notification_times") {
            let times = match single {
                Value::String(_) => vec![single],
                Value::Array(items) => items,
                other => {
                    return Err(ConfigError::MigrationFailed {
                        version: 1,
                        message: format!(
                            "notification_time must be a string, found {}",
                            other.type_str()
                        ),
                    })
                }
            };
            doc.insert("notification_times".into(), Value::Array(times));
        }
    }
    set_schema_version(doc, 1);
    Ok(())
}

/// Migration v2: rule fields move to their current names.
///
/// - a single `weekday` becomes the `weekdays` list
/// - legacy `daysOfWeek` / `weeksOfMonth` / `customLabel` / `type` are
///   renamed to `weekdays` / `month_weeks` / `label` / `category`
fn migrate_v2(doc: &mut Table) -> Result<(), ConfigError> {
    if let Some(rules) = doc.get_mut("rules") {
        let rules = rules.as_array_mut().ok_or_else(|| ConfigError::MigrationFailed {
            version: 2,
            message: "rules must be an array".into(),
        })?;
        for rule in rules.iter_mut() {
            let rule = rule.as_table_mut().ok_or_else(|| ConfigError::MigrationFailed {
                version: 2,
                message: "each rule must be a table".into(),
            })?;
            rename(rule, "daysOfWeek", "weekdays");
            rename(rule, "weeksOfMonth", "month_weeks");
            rename(rule, "customLabel", "label");
            rename(rule, "type", "category");
            if let Some(single) = rule.remove("weekday") {
                if !rule.contains_key("weekdays") {
                    rule.insert("weekdays".into(), Value::Array(vec![single]));
                }
            }
        }
    }
    set_schema_version(doc, 2);
    Ok(())
}

fn rename(table: &mut Table, from: &str, to: &str) {
    if let Some(value) = table.remove(from) {
        table.entry(to).or_insert(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Table {
        s.parse().unwrap()
    }

    /// Test migration from scratch (v0 -> v2)
    #[test]
    fn test_migrate_from_scratch() {
        let mut doc = parse(
            r#"
            user_name = "Aki"
            notification_time = "07:45"

            [[rules]]
            id = "1"
            type = "burnable"
            weekday = 1

            [[rules]]
            id = "2"
            category = "paper"
            daysOfWeek = [3]
            weeksOfMonth = [2, 4]
            customLabel = "Cardboard"
            "#,
        );

        assert_eq!(migrate(&mut doc).unwrap(), 0);
        assert_eq!(doc["schema_version"].as_integer(), Some(2));
        assert!(doc.get("notification_time").is_none());
        assert_eq!(
            doc["notification_times"].as_array().unwrap(),
            &vec![Value::String("07:45".into())]
        );

        let rules = doc["rules"].as_array().unwrap();
        let first = rules[0].as_table().unwrap();
        assert_eq!(first["category"].as_str(), Some("burnable"));
        assert_eq!(first["weekdays"].as_array().unwrap(), &vec![Value::Integer(1)]);
        assert!(first.get("weekday").is_none());

        let second = rules[1].as_table().unwrap();
        assert_eq!(second["weekdays"].as_array().unwrap().len(), 1);
        assert_eq!(second["month_weeks"].as_array().unwrap().len(), 2);
        assert_eq!(second["label"].as_str(), Some("Cardboard"));
    }

    /// Test that migrations are idempotent on a current document
    #[test]
    fn test_migrate_current_is_noop() {
        let source = r#"
            schema_version = 2
            notification_times = ["08:00"]
            "#;
        let mut doc = parse(source);
        assert_eq!(migrate(&mut doc).unwrap(), 2);
        assert_eq!(doc, parse(source));
    }

    #[test]
    fn test_migrate_preserves_existing_list() {
        let mut doc = parse(
            r#"
            notification_time = "06:00"
            notification_times = ["08:00", "09:00"]
            "#,
        );
        migrate(&mut doc).unwrap();
        assert_eq!(doc["notification_times"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_rejects_newer_schema() {
        let mut doc = parse("schema_version = 99");
        assert!(matches!(
            migrate(&mut doc),
            Err(ConfigError::UnsupportedSchemaVersion { found: 99, supported: 2 })
        ));
    }

    #[test]
    fn test_rejects_malformed_rules() {
        let mut doc = parse("rules = 3");
        assert!(matches!(
            migrate(&mut doc),
            Err(ConfigError::MigrationFailed { version: 2, .. })
        ));
    }
}
