use binday_core::{CompletionRecord, DateKey};
use clap::Args;

use super::{CmdResult, Context};

#[derive(Args)]
pub struct DoneArgs {
    /// Day to mark (defaults to today)
    #[arg(long)]
    pub date: Option<DateKey>,
    /// Reference to the evidence, e.g. a photo path
    #[arg(long)]
    pub evidence: Option<String>,
}

pub fn run(ctx: &Context, args: DoneArgs) -> CmdResult {
    let mut settings = ctx.load()?;
    let date = args.date.unwrap_or_else(|| ctx.today());

    let mut record = CompletionRecord::completed(date);
    if let Some(evidence) = args.evidence {
        record = record.with_evidence(evidence);
    }
    let replaced = settings.record_completion(record);
    ctx.save(&settings)?;

    let summary = settings.snapshot().score(ctx.today());
    if ctx.json {
        return ctx.print_json(&summary);
    }
    if replaced.is_some() {
        println!("{date} updated.");
    } else {
        println!("{date} recorded.");
    }
    if settings.snapshot().active_rules(date).is_empty() {
        println!("Note: nothing was due on {date}; it does not earn a point.");
    }
    println!("{} point(s)", summary.points);
    Ok(())
}
