//! # binday Core Library
//!
//! Collection-day reminders for a household, with a forgiving streak score.
//! All logic lives here; the CLI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Rule Engine**: decides whether a recurrence rule fires on a date
//!   (weekday set, optionally limited to certain weeks of the month)
//! - **Schedule Projector**: lists due dates over a bounded horizon
//! - **Point Engine**: replays completion history into a score that forgives
//!   one missed collection and forfeits on two in a row
//! - **Storage**: TOML settings with versioned schema migration
//!
//! Every query is a pure function of rules, history and an injected "today".
//!
//! ## Key Components
//!
//! - [`WasteRule`]: a recurrence rule
//! - [`ConfigurationSnapshot`]: immutable view the engine reads from
//! - [`score`]: streak points with two-miss forgiveness
//! - [`Settings`]: persisted household settings

pub mod date_key;
pub mod rule;
pub mod history;
pub mod snapshot;
pub mod projector;
pub mod points;
pub mod stamp_card;
pub mod reminder;
pub mod export;
pub mod storage;
pub mod error;

pub use date_key::{Clock, DateKey, FixedClock, SystemClock};
pub use rule::{active_rules, week_of_month, WasteRule};
pub use history::{CompletionRecord, CompletionStatus, History};
pub use snapshot::ConfigurationSnapshot;
pub use projector::{next_occurrence, upcoming, ScheduledDay};
pub use points::{replay, score, DueOutcome, PointSummary, ReplayStep, ScoreState, FORGIVENESS_THRESHOLD};
pub use stamp_card::{month_card, CardDay, MonthCard};
pub use reminder::Reminder;
pub use storage::Settings;
pub use error::{ConfigError, CoreError, ValidationError};
