//! Calendar-file export of the collection rules.

pub mod ics;

pub use ics::{render as render_ics, IcsOptions};
