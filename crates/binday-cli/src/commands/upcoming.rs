use binday_core::DateKey;
use clap::Args;

use super::{CmdResult, Context};

#[derive(Args)]
pub struct UpcomingArgs {
    /// Days to look ahead (the start day plus this many)
    #[arg(long, default_value_t = 7)]
    pub days: u32,
    /// First day to include (defaults to today)
    #[arg(long)]
    pub from: Option<DateKey>,
}

pub fn run(ctx: &Context, args: UpcomingArgs) -> CmdResult {
    let settings = ctx.load()?;
    let start = args.from.unwrap_or_else(|| ctx.today());
    let due = settings.snapshot().upcoming(start, args.days);

    if ctx.json {
        return ctx.print_json(&due);
    }

    if due.is_empty() {
        println!("Nothing due between {start} and the next {} days.", args.days);
        return Ok(());
    }
    for day in &due {
        let names: Vec<&str> = day.categories().collect();
        println!(
            "{} {}  {}",
            day.date,
            super::WEEKDAY_NAMES[usize::from(day.date.weekday_index())],
            names.join(", ")
        );
    }
    Ok(())
}
