//! Monthly stamp card: which days were due and which earned a stamp.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::date_key::DateKey;
use crate::error::ValidationError;
use crate::history::History;
use crate::rule::{active_rules, week_of_month, WasteRule};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardDay {
    pub date: DateKey,
    /// Row in a Sunday-first grid, 1-based; equal to the week of the month.
    pub row: u8,
    pub due: bool,
    pub stamped: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCard {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st in a Sunday-first grid.
    pub leading_blanks: u8,
    pub days: Vec<CardDay>,
    /// Stamps across the whole history, not just this month.
    pub stamped_total: usize,
}

impl MonthCard {
    pub fn stamped_this_month(&self) -> usize {
        self.days.iter().filter(|d| d.stamped).count()
    }

    pub fn due_this_month(&self) -> usize {
        self.days.iter().filter(|d| d.due).count()
    }
}

/// Build the card for `year`-`month`.
///
/// # Errors
/// Returns [`ValidationError::InvalidMonth`] if `month` is not 1..=12 or the
/// year is outside chrono's range.
pub fn month_card(
    rules: &[WasteRule],
    history: &History,
    year: i32,
    month: u32,
    today: DateKey,
) -> Result<MonthCard, ValidationError> {
    let invalid = || ValidationError::InvalidMonth { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(invalid)?;

    let days = DateKey::new(first)
        .days_through(DateKey::new(last))
        .map(|date| CardDay {
            date,
            row: week_of_month(date),
            due: !active_rules(rules, date).is_empty(),
            stamped: history.is_completed(date),
            is_today: date == today,
        })
        .collect();

    Ok(MonthCard {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday() as u8,
        days,
        stamped_total: history.completed_count(),
    })
}
