//! Read-only view of the settings the engine works from.

use crate::date_key::DateKey;
use crate::history::History;
use crate::points::{replay, score, PointSummary, ReplayStep};
use crate::projector::{upcoming, ScheduledDay};
use crate::rule::{active_rules, WasteRule};

/// Rules and completion history borrowed for the length of one query.
#[derive(Debug, Clone, Copy)]
pub struct ConfigurationSnapshot<'a> {
    pub rules: &'a [WasteRule],
    pub history: &'a History,
}

impl<'a> ConfigurationSnapshot<'a> {
    pub fn new(rules: &'a [WasteRule], history: &'a History) -> Self {
        Self { rules, history }
    }

    pub fn active_rules(&self, date: DateKey) -> Vec<&'a WasteRule> {
        active_rules(self.rules, date)
    }

    pub fn upcoming(&self, start: DateKey, horizon_days: u32) -> Vec<ScheduledDay<'a>> {
        upcoming(self.rules, start, horizon_days)
    }

    pub fn score(&self, today: DateKey) -> PointSummary {
        score(self.rules, self.history, today)
    }

    pub fn replay(&self, today: DateKey) -> Vec<ReplayStep> {
        replay(self.rules, self.history, today)
    }
}
