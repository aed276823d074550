use binday_core::month_card;
use chrono::Datelike;
use clap::Args;

use super::{CmdResult, Context, WEEKDAY_NAMES};

#[derive(Args)]
pub struct CardArgs {
    /// Month as YYYY-MM (defaults to the current month)
    #[arg(long, value_parser = parse_month)]
    pub month: Option<YearMonth>,
}

#[derive(Debug, Clone, Copy)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

fn parse_month(s: &str) -> Result<YearMonth, String> {
    let (year, month) = s
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got '{s}'"))?;
    let year = year.parse::<i32>().map_err(|e| e.to_string())?;
    let month = month.parse::<u32>().map_err(|e| e.to_string())?;
    Ok(YearMonth { year, month })
}

pub fn run(ctx: &Context, args: CardArgs) -> CmdResult {
    let settings = ctx.load()?;
    let today = ctx.today();
    let YearMonth { year, month } = args.month.unwrap_or(YearMonth {
        year: today.date().year(),
        month: today.date().month(),
    });
    let card = month_card(&settings.rules, &settings.history, year, month, today)?;

    if ctx.json {
        return ctx.print_json(&card);
    }

    println!("{year}-{month:02}");
    println!("{}", WEEKDAY_NAMES.map(|d| format!("{d:>4}")).concat());
    let mut line = "    ".repeat(usize::from(card.leading_blanks));
    let mut row = 1;
    for day in &card.days {
        if day.row != row {
            println!("{line}");
            line.clear();
            row = day.row;
        }
        let mark = match (day.stamped, day.due) {
            (true, _) => '*',
            (false, true) => '.',
            (false, false) => ' ',
        };
        let today_mark = if day.is_today { '>' } else { ' ' };
        line.push_str(&format!("{today_mark}{:>2}{mark}", day.date.date().day()));
    }
    println!("{line}");
    println!(
        "stamps this month: {}/{}  total: {}",
        card.stamped_this_month(),
        card.due_this_month(),
        card.stamped_total
    );
    Ok(())
}
