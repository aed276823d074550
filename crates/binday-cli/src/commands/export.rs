use std::path::PathBuf;

use binday_core::export::{render_ics, IcsOptions};
use binday_core::DateKey;
use clap::Subcommand;

use super::{CmdResult, Context};

#[derive(Subcommand)]
pub enum ExportAction {
    /// Write an iCalendar (.ics) file of the collection rules
    Ics {
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
        /// IANA time zone for event times
        #[arg(long, default_value = "UTC")]
        timezone: String,
        /// First day events may start on (defaults to tomorrow)
        #[arg(long)]
        start: Option<DateKey>,
    },
}

pub fn run(ctx: &Context, action: ExportAction) -> CmdResult {
    match action {
        ExportAction::Ics {
            out,
            timezone,
            start,
        } => {
            let settings = ctx.load()?;
            let start = match start {
                Some(date) => date,
                None => ctx.today().succ().ok_or("no day after today")?,
            };
            let options = IcsOptions {
                start,
                stamp: chrono::Utc::now().naive_utc(),
                timezone: &timezone,
            };
            let ics = render_ics(&settings, &options);
            match out {
                Some(path) => {
                    std::fs::write(&path, ics)?;
                    println!("calendar written to {}", path.display());
                }
                None => print!("{ics}"),
            }
        }
    }
    Ok(())
}
