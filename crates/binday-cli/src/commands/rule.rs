//! Collection rule management commands for CLI.

use binday_core::{next_occurrence, WasteRule};
use clap::Subcommand;
use uuid::Uuid;

use super::{parse_weekday, weekday_list, CmdResult, Context};

/// How far `rule list` looks for each rule's next date.
const NEXT_DATE_HORIZON_DAYS: u32 = 62;

#[derive(Subcommand)]
pub enum RuleAction {
    /// List rules with their next collection date
    List,
    /// Add a rule
    Add {
        /// Waste category, e.g. "burnable"
        category: String,
        /// Weekdays, comma separated (0-6 or names: mon,thu)
        #[arg(long, required = true, value_delimiter = ',', value_parser = parse_weekday)]
        weekdays: Vec<u8>,
        /// Weeks of the month, comma separated (1-5). Omit for every week.
        #[arg(long, value_delimiter = ',')]
        weeks: Vec<u8>,
        /// Display label
        #[arg(long)]
        label: Option<String>,
        /// Rule id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// Remove a rule by id
    Remove {
        id: String,
    },
}

pub fn run(ctx: &Context, action: RuleAction) -> CmdResult {
    match action {
        RuleAction::List => {
            let settings = ctx.load()?;
            if ctx.json {
                return ctx.print_json(&settings.rules);
            }
            let today = ctx.today();
            for rule in &settings.rules {
                let weeks = if rule.month_weeks.is_empty() {
                    "every week".to_string()
                } else {
                    format!(
                        "weeks {}",
                        rule.month_weeks
                            .iter()
                            .map(u8::to_string)
                            .collect::<Vec<_>>()
                            .join(",")
                    )
                };
                let next = next_occurrence(rule, today, NEXT_DATE_HORIZON_DAYS)
                    .map_or_else(|| "-".to_string(), |d| d.to_string());
                println!(
                    "{}  {}  {} ({})  next: {}",
                    rule.id,
                    rule.display_name(),
                    weekday_list(&rule.weekdays),
                    weeks,
                    next
                );
            }
        }
        RuleAction::Add {
            category,
            weekdays,
            weeks,
            label,
            id,
        } => {
            let mut settings = ctx.load()?;
            let mut rule = WasteRule::weekly(
                id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                category,
                &weekdays,
            )
            .on_weeks(&weeks);
            if let Some(label) = label {
                rule = rule.with_label(label);
            }
            let id = rule.id.clone();
            settings.add_rule(rule)?;
            ctx.save(&settings)?;
            println!("Rule added: {id}");
        }
        RuleAction::Remove { id } => {
            let mut settings = ctx.load()?;
            let removed = settings.remove_rule(&id)?;
            ctx.save(&settings)?;
            println!("Rule removed: {} ({})", removed.id, removed.display_name());
        }
    }
    Ok(())
}
