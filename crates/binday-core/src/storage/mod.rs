mod config;
pub mod migrations;

pub use config::Settings;

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/binday[-dev]/` based on BINDAY_ENV.
///
/// Set BINDAY_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("BINDAY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("binday-dev")
    } else {
        base_dir.join("binday")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
