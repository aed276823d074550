//! Integration tests for the rule engine, projector and point engine working
//! from one settings snapshot.

use binday_core::{
    week_of_month, CompletionRecord, DateKey, FixedClock, Clock, PointSummary, ScoreState,
    Settings, WasteRule,
};
use proptest::prelude::*;

fn key(s: &str) -> DateKey {
    DateKey::parse(s).unwrap()
}

fn household() -> Settings {
    Settings {
        rules: vec![
            WasteRule::weekly("burn", "burnable", &[1, 4]),
            WasteRule::weekly("recycle", "recyclable", &[3]).on_weeks(&[2, 4]),
        ],
        ..Settings::default()
    }
}

#[test]
fn april_2024_due_dates() {
    let settings = household();
    let snapshot = settings.snapshot();
    let due: Vec<(String, Vec<String>)> = snapshot
        .upcoming(key("2024-04-01"), 29)
        .into_iter()
        .map(|day| {
            (
                day.date.to_string(),
                day.rules.iter().map(|r| r.id.clone()).collect(),
            )
        })
        .collect();

    let expected: Vec<(String, Vec<String>)> = [
        ("2024-04-01", vec!["burn"]),
        ("2024-04-04", vec!["burn"]),
        ("2024-04-08", vec!["burn"]),
        ("2024-04-10", vec!["recycle"]),
        ("2024-04-11", vec!["burn"]),
        ("2024-04-15", vec!["burn"]),
        ("2024-04-18", vec!["burn"]),
        ("2024-04-22", vec!["burn"]),
        ("2024-04-24", vec!["recycle"]),
        ("2024-04-25", vec!["burn"]),
        ("2024-04-29", vec!["burn"]),
    ]
    .into_iter()
    .map(|(d, ids)| (d.to_string(), ids.into_iter().map(String::from).collect()))
    .collect();

    assert_eq!(due, expected);
}

#[test]
fn week_of_month_for_april_wednesdays() {
    let weeks: Vec<u8> = ["2024-04-03", "2024-04-10", "2024-04-17", "2024-04-24"]
        .iter()
        .map(|d| week_of_month(key(d)))
        .collect();
    assert_eq!(weeks, [1, 2, 3, 4]);
}

#[test]
fn streak_through_a_month_of_reports() {
    let mut settings = household();
    let clock = FixedClock(key("2024-04-10"));

    // Reported: 04-01, 04-04. Missed: 04-08. Today (04-10, recyclables) pending.
    for day in ["2024-04-01", "2024-04-04"] {
        settings.record_completion(CompletionRecord::completed(key(day)));
    }
    let summary = settings.snapshot().score(clock.today());
    assert_eq!(summary, PointSummary { points: 2, forfeited: false });

    // Reporting today counts immediately.
    settings.record_completion(CompletionRecord::completed(clock.today()).with_evidence("img-0410"));
    assert_eq!(settings.snapshot().score(clock.today()).points, 3);

    // Nothing more reported: 04-11 and 04-15 go by.
    let later = FixedClock(key("2024-04-16"));
    let summary = settings.snapshot().score(later.today());
    assert_eq!(summary, PointSummary { points: 0, forfeited: true });
    assert_eq!(summary.state(), ScoreState::Forfeited);
}

#[test]
fn reporting_twice_on_one_day_is_idempotent() {
    let mut settings = household();
    settings.record_completion(CompletionRecord::completed(key("2024-04-01")));
    settings.record_completion(CompletionRecord::completed(key("2024-04-01")).with_evidence("retake"));
    assert_eq!(settings.history.len(), 1);
    assert_eq!(settings.snapshot().score(key("2024-04-01")).points, 1);
}

#[test]
fn clearing_history_resets_score() {
    let mut settings = household();
    settings.record_completion(CompletionRecord::completed(key("2024-04-01")));
    settings.clear_history();
    assert_eq!(settings.snapshot().score(key("2024-04-30")), PointSummary::default());
}

proptest! {
    #[test]
    fn score_is_replay_stable(
        completed in proptest::collection::vec(0u64..60, 0..20),
        offset in 0u64..90,
    ) {
        let start = key("2024-03-01");
        let mut settings = household();
        for d in &completed {
            settings.record_completion(CompletionRecord::completed(start.add_days(*d).unwrap()));
        }
        let today = start.add_days(offset).unwrap();
        let first = settings.snapshot().score(today);
        let second = settings.snapshot().score(today);
        prop_assert_eq!(first, second);
        prop_assert!(!first.forfeited || first.points == 0);
    }
}
