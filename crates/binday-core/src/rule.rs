//! Collection rules and the rule engine.
//!
//! A [`WasteRule`] fires on a set of weekdays, optionally restricted to
//! certain weeks of the month ("Wednesday of weeks 2 and 4"). Weeks are the
//! rows of a Sunday-first month grid, see [`week_of_month`]. Rule matching
//! is total and infallible: malformed rules are rejected by
//! [`WasteRule::validate`] at the configuration boundary and otherwise
//! simply never match.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::error::ValidationError;

/// Highest weekday index (Saturday).
pub const MAX_WEEKDAY: u8 = 6;
/// Highest week-of-month index.
pub const MAX_MONTH_WEEK: u8 = 5;

/// A recurring collection of one waste category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasteRule {
    pub id: String,
    /// Opaque category label, e.g. "burnable". Never interpreted.
    pub category: String,
    /// Display override for the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub weekdays: Vec<u8>, // 0=Sun ... 6=Sat
    /// 1-based weeks of the month, as [`week_of_month`]. Empty = every week.
    #[serde(default)]
    pub month_weeks: Vec<u8>,
}

impl WasteRule {
    /// A rule firing every week on `weekdays`.
    pub fn weekly(id: impl Into<String>, category: impl Into<String>, weekdays: &[u8]) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            label: None,
            weekdays: weekdays.to_vec(),
            month_weeks: Vec::new(),
        }
    }

    /// Restrict the rule to the given weeks of the month.
    pub fn on_weeks(mut self, month_weeks: &[u8]) -> Self {
        self.month_weeks = month_weeks.to_vec();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.category)
    }

    /// Configuration-boundary check.
    ///
    /// # Errors
    /// Returns the first problem found: empty `weekdays`, a weekday above 6,
    /// or a week-of-month outside 1..=5.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.weekdays.is_empty() {
            return Err(ValidationError::EmptyWeekdays {
                rule_id: self.id.clone(),
            });
        }
        if let Some(&value) = self.weekdays.iter().find(|&&d| d > MAX_WEEKDAY) {
            return Err(ValidationError::WeekdayOutOfRange {
                rule_id: self.id.clone(),
                value,
            });
        }
        if let Some(&value) = self
            .month_weeks
            .iter()
            .find(|&&w| w == 0 || w > MAX_MONTH_WEEK)
        {
            return Err(ValidationError::MonthWeekOutOfRange {
                rule_id: self.id.clone(),
                value,
            });
        }
        Ok(())
    }

    /// Whether this rule is active on `date`.
    pub fn applies_on(&self, date: DateKey) -> bool {
        if !self.weekdays.contains(&date.weekday_index()) {
            return false;
        }
        if self.month_weeks.is_empty() {
            return true;
        }
        self.month_weeks.contains(&week_of_month(date))
    }
}

/// Week of the month: `ceil((day + weekday_of_first) / 7)`, i.e. the row of
/// `date` in a Sunday-first month grid whose first row holds the 1st.
///
/// In 1..=6. A month starting late in the week can spill into a sixth row;
/// rules only name weeks 1..=5, so those dates match no week-restricted rule.
/// A weekday absent from the first row starts counting at 2.
pub fn week_of_month(date: DateKey) -> u8 {
    let day = date.date().day();
    let first_offset = (u32::from(date.weekday_index()) + 7 - date.date().day0() % 7) % 7;
    ((day + first_offset + 6) / 7) as u8
}

/// Rules active on `date`, in input order.
pub fn active_rules(rules: &[WasteRule], date: DateKey) -> Vec<&WasteRule> {
    rules.iter().filter(|rule| rule.applies_on(date)).collect()
}
