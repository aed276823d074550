//! Streak points with two-miss forgiveness.
//!
//! The score is rebuilt from scratch on every call by replaying each due
//! date from the first recorded date through today:
//!
//! - a completed due date earns a point and clears the miss streak,
//! - today's due date is pending until the day is over, never a miss,
//! - a past due date without a completion extends the miss streak, and once
//!   two misses are back to back the points drop to zero and stay there
//!   until the next completion.
//!
//! Dates with no active rule are skipped entirely.

use serde::Serialize;

use crate::date_key::DateKey;
use crate::history::History;
use crate::rule::{active_rules, WasteRule};

/// Consecutive past misses that forfeit the accumulated points.
pub const FORGIVENESS_THRESHOLD: u32 = 2;

/// Final result of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PointSummary {
    pub points: u32,
    pub forfeited: bool,
}

/// The two observable streak states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreState {
    Ok,
    Forfeited,
}

impl PointSummary {
    pub fn state(&self) -> ScoreState {
        if self.forfeited {
            ScoreState::Forfeited
        } else {
            ScoreState::Ok
        }
    }
}

/// What a single due date contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueOutcome {
    Completed,
    /// Due today and not yet completed.
    Pending,
    Missed,
}

/// One due date of the replay, with the running state after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayStep {
    pub date: DateKey,
    pub outcome: DueOutcome,
    pub points: u32,
    pub miss_streak: u32,
}

#[derive(Debug, Default)]
struct Tally {
    points: u32,
    miss_streak: u32,
}

impl Tally {
    fn apply(&mut self, outcome: DueOutcome) {
        match outcome {
            DueOutcome::Completed => {
                self.points += 1;
                self.miss_streak = 0;
            }
            DueOutcome::Pending => {}
            DueOutcome::Missed => {
                self.miss_streak += 1;
                if self.miss_streak >= FORGIVENESS_THRESHOLD {
                    self.points = 0;
                }
            }
        }
    }
}

/// Due dates from the earliest history record through `today`, with their
/// outcomes. Empty when the history is empty.
pub fn replay(rules: &[WasteRule], history: &History, today: DateKey) -> Vec<ReplayStep> {
    let Some(earliest) = history.earliest() else {
        return Vec::new();
    };

    let mut tally = Tally::default();
    earliest
        .days_through(today)
        .filter(|date| !active_rules(rules, *date).is_empty())
        .map(|date| {
            let outcome = if history.is_completed(date) {
                DueOutcome::Completed
            } else if date == today {
                DueOutcome::Pending
            } else {
                DueOutcome::Missed
            };
            tally.apply(outcome);
            ReplayStep {
                date,
                outcome,
                points: tally.points,
                miss_streak: tally.miss_streak,
            }
        })
        .collect()
}

/// Current points and whether they have been forfeited.
pub fn score(rules: &[WasteRule], history: &History, today: DateKey) -> PointSummary {
    let steps = replay(rules, history, today);
    let summary = steps.last().map_or_else(PointSummary::default, |last| PointSummary {
        points: last.points,
        forfeited: last.miss_streak >= FORGIVENESS_THRESHOLD,
    });
    tracing::debug!(
        due_dates = steps.len(),
        points = summary.points,
        forfeited = summary.forfeited,
        %today,
        "replayed completion history"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::CompletionRecord;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    fn history(dates: &[&str]) -> History {
        dates
            .iter()
            .map(|d| CompletionRecord::completed(key(d)))
            .collect()
    }

    /// Monday and Thursday.
    fn mon_thu() -> Vec<WasteRule> {
        vec![WasteRule::weekly("1", "burnable", &[1, 4])]
    }

    #[test]
    fn empty_history_scores_zero() {
        let summary = score(&mon_thu(), &History::new(), key("2024-04-30"));
        assert_eq!(summary, PointSummary { points: 0, forfeited: false });
    }

    #[test]
    fn single_past_miss_is_forgiven() {
        // Due: 04-01 (done), 04-04 (missed), 04-08 = today (pending).
        let summary = score(&mon_thu(), &history(&["2024-04-01"]), key("2024-04-08"));
        assert_eq!(summary, PointSummary { points: 1, forfeited: false });
        assert_eq!(summary.state(), ScoreState::Ok);
    }

    #[test]
    fn two_consecutive_misses_forfeit() {
        // Due: 04-01 (done), 04-04 and 04-08 (missed), 04-11 = today.
        let summary = score(&mon_thu(), &history(&["2024-04-01"]), key("2024-04-11"));
        assert_eq!(summary, PointSummary { points: 0, forfeited: true });
        assert_eq!(summary.state(), ScoreState::Forfeited);
    }

    #[test]
    fn completion_after_forfeit_restarts_from_one() {
        let summary = score(
            &mon_thu(),
            &history(&["2024-04-01", "2024-04-04", "2024-04-15"]),
            key("2024-04-15"),
        );
        assert_eq!(summary, PointSummary { points: 1, forfeited: false });
    }

    #[test]
    fn completed_today_counts() {
        let summary = score(&mon_thu(), &history(&["2024-04-01", "2024-04-04"]), key("2024-04-04"));
        assert_eq!(summary, PointSummary { points: 2, forfeited: false });
    }

    #[test]
    fn non_due_dates_are_skipped() {
        // Completions on non-due days are neither earned nor do they start
        // a miss; only 04-04 is a due date between 04-02 and 04-06.
        let steps = replay(&mon_thu(), &history(&["2024-04-02", "2024-04-04"]), key("2024-04-06"));
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].date, key("2024-04-04"));
        assert_eq!(steps[0].outcome, DueOutcome::Completed);
    }

    #[test]
    fn replay_records_running_state() {
        let steps = replay(&mon_thu(), &history(&["2024-04-01"]), key("2024-04-11"));
        let trace: Vec<(DueOutcome, u32, u32)> = steps
            .iter()
            .map(|s| (s.outcome, s.points, s.miss_streak))
            .collect();
        assert_eq!(
            trace,
            [
                (DueOutcome::Completed, 1, 0),
                (DueOutcome::Missed, 1, 1),
                (DueOutcome::Missed, 0, 2),
                (DueOutcome::Pending, 0, 2),
            ]
        );
    }

    #[test]
    fn misses_keep_accumulating_while_forfeited() {
        let steps = replay(&mon_thu(), &history(&["2024-04-01"]), key("2024-04-16"));
        let last = steps.last().unwrap();
        assert_eq!(last.miss_streak, 4);
        assert_eq!(last.points, 0);
    }

    #[test]
    fn history_after_today_scores_zero() {
        let summary = score(&mon_thu(), &history(&["2024-05-01"]), key("2024-04-01"));
        assert_eq!(summary, PointSummary::default());
    }

    #[test]
    fn score_is_deterministic() {
        let rules = mon_thu();
        let h = history(&["2024-04-01", "2024-04-08", "2024-04-11"]);
        let a = score(&rules, &h, key("2024-04-22"));
        let b = score(&rules, &h, key("2024-04-22"));
        assert_eq!(a, b);
    }
}
