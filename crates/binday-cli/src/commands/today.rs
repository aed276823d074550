//! `binday today`: what is due, whether it is reported, and the reminder.

use binday_core::Reminder;
use serde::Serialize;

use super::{CmdResult, Context};

#[derive(Serialize)]
struct TodayView<'a> {
    date: String,
    due: Vec<&'a str>,
    completed: bool,
    reminder: Option<String>,
}

pub fn run(ctx: &Context) -> CmdResult {
    let settings = ctx.load()?;
    let today = ctx.today();
    let snapshot = settings.snapshot();
    let due = snapshot.active_rules(today);
    let reminder = Reminder::for_date(snapshot.rules, today, &settings.user_name);

    let view = TodayView {
        date: today.to_string(),
        due: due.iter().map(|r| r.display_name()).collect(),
        completed: settings.history.is_completed(today),
        reminder: reminder.as_ref().map(Reminder::title),
    };

    if ctx.json {
        return ctx.print_json(&view);
    }

    match reminder {
        None => println!("{today}: nothing to put out today."),
        Some(reminder) => {
            println!("{today}: {}", reminder.title());
            if view.completed {
                println!("Reported. Nice work!");
            } else {
                println!("{}", reminder.body());
            }
        }
    }
    Ok(())
}
