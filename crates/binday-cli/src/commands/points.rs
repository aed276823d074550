use binday_core::{DueOutcome, ScoreState};
use clap::Args;
use serde::Serialize;

use super::{CmdResult, Context};

#[derive(Args)]
pub struct PointsArgs {
    /// Show every due date that went into the score
    #[arg(long)]
    pub explain: bool,
}

#[derive(Serialize)]
struct PointsView<'a> {
    points: u32,
    forfeited: bool,
    state: ScoreState,
    #[serde(skip_serializing_if = "Option::is_none")]
    replay: Option<&'a [binday_core::ReplayStep]>,
}

pub fn run(ctx: &Context, args: PointsArgs) -> CmdResult {
    let settings = ctx.load()?;
    let today = ctx.today();
    let snapshot = settings.snapshot();
    let summary = snapshot.score(today);
    let steps = if args.explain { snapshot.replay(today) } else { Vec::new() };

    if ctx.json {
        return ctx.print_json(&PointsView {
            points: summary.points,
            forfeited: summary.forfeited,
            state: summary.state(),
            replay: args.explain.then_some(steps.as_slice()),
        });
    }

    for step in &steps {
        let outcome = match step.outcome {
            DueOutcome::Completed => "done",
            DueOutcome::Pending => "pending",
            DueOutcome::Missed => "missed",
        };
        println!(
            "{}  {:<8} points={} misses={}",
            step.date, outcome, step.points, step.miss_streak
        );
    }
    match summary.state() {
        ScoreState::Ok => println!("{} point(s)", summary.points),
        ScoreState::Forfeited => println!(
            "0 points: two collections in a row were missed. Report the next one to start over."
        ),
    }
    Ok(())
}
