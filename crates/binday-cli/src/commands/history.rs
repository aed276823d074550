use clap::Subcommand;

use super::{CmdResult, Context};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List completion records
    List,
    /// Delete every completion record
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(ctx: &Context, action: HistoryAction) -> CmdResult {
    match action {
        HistoryAction::List => {
            let settings = ctx.load()?;
            if ctx.json {
                return ctx.print_json(&settings.history);
            }
            if settings.history.is_empty() {
                println!("No completions recorded.");
            }
            for record in settings.history.iter() {
                match &record.evidence {
                    Some(evidence) => println!("{}  completed  {evidence}", record.date),
                    None => println!("{}  completed", record.date),
                }
            }
        }
        HistoryAction::Clear { yes } => {
            if !yes {
                return Err("refusing to clear history without --yes".into());
            }
            let mut settings = ctx.load()?;
            let removed = settings.clear_history();
            ctx.save(&settings)?;
            println!("removed {removed} record(s)");
        }
    }
    Ok(())
}
