use binday_core::Settings;
use clap::Subcommand;

use super::{CmdResult, Context};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "user_name", "alarm_enabled")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value (JSON for lists, e.g. '["07:00","19:00"]')
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults, keeping the completion history
    Reset,
    /// Print the settings file path
    Path,
}

pub fn run(ctx: &Context, action: ConfigAction) -> CmdResult {
    match action {
        ConfigAction::Get { key } => {
            let settings = ctx.load()?;
            match settings.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut settings = ctx.load()?;
            settings.set(&key, &value)?;
            ctx.save(&settings)?;
            println!("ok");
        }
        ConfigAction::List => {
            let settings = ctx.load()?;
            if ctx.json {
                return ctx.print_json(&settings);
            }
            print!("{}", settings.to_toml_string()?);
        }
        ConfigAction::Reset => {
            let history = match ctx.load() {
                Ok(settings) => settings.history,
                Err(e) => {
                    tracing::warn!(error = %e, "settings unreadable, keeping completion history only");
                    Settings::load_history_from(&ctx.settings_path)?
                }
            };
            let settings = Settings {
                history,
                ..Settings::default()
            };
            ctx.save(&settings)?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => println!("{}", ctx.settings_path.display()),
    }
    Ok(())
}
