//! Forward-looking schedule projection.

use serde::Serialize;

use crate::date_key::DateKey;
use crate::rule::{active_rules, WasteRule};

/// A date with at least one active rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledDay<'a> {
    pub date: DateKey,
    pub rules: Vec<&'a WasteRule>,
}

impl ScheduledDay<'_> {
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.display_name())
    }
}

/// Due dates from `start` through `start + horizon_days`, inclusive, in
/// chronological order. Dates with nothing due are left out, so a horizon
/// of 0 yields at most the entry for `start`.
pub fn upcoming(rules: &[WasteRule], start: DateKey, horizon_days: u32) -> Vec<ScheduledDay<'_>> {
    let Some(end) = start.add_days(u64::from(horizon_days)) else {
        return Vec::new();
    };
    start
        .days_through(end)
        .filter_map(|date| {
            let rules = active_rules(rules, date);
            (!rules.is_empty()).then_some(ScheduledDay { date, rules })
        })
        .collect()
}

/// First date on or after `start`, within `horizon_days`, on which `rule`
/// fires.
pub fn next_occurrence(rule: &WasteRule, start: DateKey, horizon_days: u32) -> Option<DateKey> {
    let end = start.add_days(u64::from(horizon_days))?;
    start.days_through(end).find(|date| rule.applies_on(*date))
}
