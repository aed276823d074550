//! Canonical local-calendar date keys and the injected clock.
//!
//! Every date the engine sees is a [`DateKey`]: a calendar date with no time
//! and no offset, written `YYYY-MM-DD`. Keys are taken from the user's local
//! calendar, never from UTC, so a completion reported at 23:50 lands on the
//! same day the user sees on the wall.

use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

const KEY_FORMAT: &str = "%Y-%m-%d";

/// A local calendar date, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a key from year, month (1-12) and day (1-31).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse the canonical `YYYY-MM-DD` form. Unpadded or otherwise
    /// non-canonical spellings are rejected.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidDateKey { key: s.to_string() };
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(invalid());
        }
        if !bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
        {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(s, KEY_FORMAT)
            .map(Self)
            .map_err(|_| invalid())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Weekday index, 0 = Sunday ... 6 = Saturday.
    pub fn weekday_index(&self) -> u8 {
        self.0.weekday().num_days_from_sunday() as u8
    }

    /// The following calendar day. `None` only at the end of chrono's range.
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    pub fn add_days(&self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).map(Self)
    }

    /// Every date from `self` through `end`, inclusive. Empty when `end`
    /// precedes `self`.
    pub fn days_through(&self, end: DateKey) -> DaysThrough {
        DaysThrough {
            next: (*self <= end).then_some(*self),
            end,
        }
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DateKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Inclusive chronological iterator returned by [`DateKey::days_through`].
#[derive(Debug, Clone)]
pub struct DaysThrough {
    next: Option<DateKey>,
    end: DateKey,
}

impl Iterator for DaysThrough {
    type Item = DateKey;

    fn next(&mut self) -> Option<DateKey> {
        let current = self.next?;
        self.next = if current < self.end { current.succ() } else { None };
        Some(current)
    }
}

/// Source of "today". Injected so nothing in the engine reads a global clock.
pub trait Clock {
    fn today(&self) -> DateKey;
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DateKey {
        DateKey(Local::now().date_naive())
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateKey);

impl Clock for FixedClock {
    fn today(&self) -> DateKey {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    #[test]
    fn parse_and_display_are_canonical() {
        let k = key("2024-04-01");
        assert_eq!(k.to_string(), "2024-04-01");
        assert_eq!(k.weekday_index(), 1); // Monday
    }

    #[test]
    fn parse_rejects_non_canonical_forms() {
        for bad in ["2024-4-1", "2024/04/01", "2024-04-01T00:00:00Z", "", "2024-02-30", "+024-04-01"] {
            assert!(DateKey::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn ordering_is_chronological() {
        assert!(key("2023-12-31") < key("2024-01-01"));
        assert!(key("2024-01-09") < key("2024-01-10"));
    }

    #[test]
    fn days_through_is_inclusive() {
        let days: Vec<String> = key("2024-02-27")
            .days_through(key("2024-03-01"))
            .map(|d| d.to_string())
            .collect();
        assert_eq!(days, ["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01"]);
    }

    #[test]
    fn days_through_backwards_is_empty() {
        assert_eq!(key("2024-03-02").days_through(key("2024-03-01")).count(), 0);
        assert_eq!(key("2024-03-01").days_through(key("2024-03-01")).count(), 1);
    }

    #[test]
    fn serde_uses_string_form() {
        let json = serde_json::to_string(&key("2024-04-10")).unwrap();
        assert_eq!(json, "\"2024-04-10\"");
        let back: DateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key("2024-04-10"));
        assert!(serde_json::from_str::<DateKey>("\"04/10/2024\"").is_err());
    }

    #[test]
    fn fixed_clock_returns_pinned_date() {
        let clock = FixedClock(key("2024-04-29"));
        assert_eq!(clock.today(), key("2024-04-29"));
    }
}
