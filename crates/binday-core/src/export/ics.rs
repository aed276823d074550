//! iCalendar (RFC 5545) rendering.
//!
//! One VEVENT per rule and notification time. Every-week rules recur
//! `FREQ=WEEKLY`. Week-of-month rules count grid rows, which no RRULE can
//! express, so they list each date of the coming year explicitly with
//! `RDATE`.

use chrono::{NaiveDateTime, NaiveTime};

use crate::date_key::DateKey;
use crate::rule::WasteRule;
use crate::storage::Settings;

const BYDAY: [&str; 7] = ["SU", "MO", "TU", "WE", "TH", "FR", "SA"];
/// Span searched for occurrences, and listed for week-of-month rules.
const HORIZON_DAYS: u64 = 366;

#[derive(Debug, Clone)]
pub struct IcsOptions<'a> {
    /// First date an event may start on.
    pub start: DateKey,
    /// `DTSTAMP` value, UTC.
    pub stamp: NaiveDateTime,
    /// IANA zone written into `TZID`.
    pub timezone: &'a str,
}

/// Render the whole calendar. Lines end in CRLF.
pub fn render(settings: &Settings, options: &IcsOptions<'_>) -> String {
    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".into(),
        "VERSION:2.0".into(),
        "PRODID:-//binday//EN".into(),
        "CALSCALE:GREGORIAN".into(),
        "METHOD:PUBLISH".into(),
        "X-WR-CALNAME:binday collection schedule".into(),
        format!("X-WR-TIMEZONE:{}", options.timezone),
    ];

    let stamp = options.stamp.format("%Y%m%dT%H%M%SZ").to_string();
    let window: Vec<DateKey> = options
        .start
        .add_days(HORIZON_DAYS - 1)
        .map(|end| options.start.days_through(end).collect())
        .unwrap_or_default();

    for rule in &settings.rules {
        let Some(byday) = byday(rule) else {
            continue;
        };
        let dates: Vec<DateKey> = window.iter().copied().filter(|d| rule.applies_on(*d)).collect();
        let Some((first, rest)) = dates.split_first() else {
            tracing::warn!(rule_id = %rule.id, "rule never occurs, skipped in calendar export");
            continue;
        };
        let name = escape_text(rule.display_name());

        for (n, time) in settings.notification_times.iter().enumerate() {
            let Ok(time) = NaiveTime::parse_from_str(time, "%H:%M") else {
                tracing::warn!(%time, "unparseable notification time, skipped");
                continue;
            };
            let at = |date: &DateKey| date.date().and_time(time).format("%Y%m%dT%H%M%S").to_string();
            lines.extend([
                "BEGIN:VEVENT".to_string(),
                format!("UID:rule-{}-{}@binday", rule.id, n),
                format!("DTSTAMP:{stamp}"),
                format!("DTSTART;TZID={}:{}", options.timezone, at(first)),
                format!("SUMMARY:Collection: {name}"),
                format!(
                    "DESCRIPTION:{}\\, time to put out the {}!",
                    escape_text(&settings.user_name),
                    name
                ),
            ]);
            if rule.month_weeks.is_empty() {
                lines.push(format!("RRULE:FREQ=WEEKLY;BYDAY={byday}"));
            } else {
                lines.extend(
                    rest.iter()
                        .map(|date| format!("RDATE;TZID={}:{}", options.timezone, at(date))),
                );
            }
            lines.extend([
                "BEGIN:VALARM".to_string(),
                "ACTION:DISPLAY".to_string(),
                format!("DESCRIPTION:Collection time: {name}"),
                "TRIGGER:-PT0M".to_string(),
                "END:VALARM".to_string(),
                "END:VEVENT".to_string(),
            ]);
        }
    }

    lines.push("END:VCALENDAR".into());
    let mut out = lines.join("\r\n");
    out.push_str("\r\n");
    out
}

/// `BYDAY` list for the rule's weekdays, `None` when it has none.
fn byday(rule: &WasteRule) -> Option<String> {
    let days: Vec<&str> = rule
        .weekdays
        .iter()
        .filter_map(|&d| BYDAY.get(usize::from(d)).copied())
        .collect();
    (!days.is_empty()).then(|| days.join(","))
}

/// Escape a TEXT value.
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}
