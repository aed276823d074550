//! Command handlers. Each takes the shared [`Context`] and its parsed args.

pub mod card;
pub mod config;
pub mod done;
pub mod export;
pub mod history;
pub mod points;
pub mod rule;
pub mod today;
pub mod upcoming;

use std::path::PathBuf;

use binday_core::{Clock, CoreError, DateKey, FixedClock, Settings, SystemClock};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Global options resolved once per invocation.
pub struct Context {
    pub settings_path: PathBuf,
    pub json: bool,
    clock: Box<dyn Clock>,
}

impl Context {
    pub fn new(config: Option<PathBuf>, today: Option<DateKey>, json: bool) -> Result<Self, CoreError> {
        let settings_path = match config {
            Some(path) => path,
            None => Settings::path()?,
        };
        let clock: Box<dyn Clock> = match today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        };
        tracing::debug!(path = %settings_path.display(), fixed_today = today.is_some(), "resolved context");
        Ok(Self {
            settings_path,
            json,
            clock,
        })
    }

    pub fn today(&self) -> DateKey {
        self.clock.today()
    }

    pub fn load(&self) -> Result<Settings, CoreError> {
        Settings::load_from(&self.settings_path)
    }

    pub fn save(&self, settings: &Settings) -> Result<(), CoreError> {
        settings.save_to(&self.settings_path)
    }

    /// Print `value` as pretty JSON.
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> CmdResult {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Accepts `0`-`6` or a day name (`sun`, `Monday`, ...).
pub fn parse_weekday(s: &str) -> Result<u8, String> {
    if let Ok(n) = s.parse::<u8>() {
        return if n <= 6 {
            Ok(n)
        } else {
            Err(format!("weekday {n} out of range 0 (Sun) to 6 (Sat)"))
        };
    }
    const FULL_NAMES: [&str; 7] = [
        "sunday", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday",
    ];
    let lower = s.to_ascii_lowercase();
    FULL_NAMES
        .iter()
        .position(|name| lower.len() >= 3 && name.starts_with(&lower))
        .map(|i| i as u8)
        .ok_or_else(|| format!("unknown weekday '{s}'"))
}

pub fn weekday_list(days: &[u8]) -> String {
    days.iter()
        .map(|&d| WEEKDAY_NAMES.get(usize::from(d)).copied().unwrap_or("?"))
        .collect::<Vec<_>>()
        .join(",")
}
