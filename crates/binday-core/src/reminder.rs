//! Reminder text for a collection day. Delivery is up to the caller.

use serde::Serialize;

use crate::date_key::DateKey;
use crate::rule::{active_rules, WasteRule};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub date: DateKey,
    pub user_name: String,
    /// Display names of the due rules, in rule order.
    pub categories: Vec<String>,
}

impl Reminder {
    /// `None` when nothing is due on `date`.
    pub fn for_date(rules: &[WasteRule], date: DateKey, user_name: &str) -> Option<Self> {
        let categories: Vec<String> = active_rules(rules, date)
            .into_iter()
            .map(|r| r.display_name().to_string())
            .collect();
        if categories.is_empty() {
            return None;
        }
        Some(Self {
            date,
            user_name: user_name.to_string(),
            categories,
        })
    }

    pub fn title(&self) -> String {
        format!("Collection day: {}", self.categories.join(", "))
    }

    pub fn body(&self) -> String {
        format!(
            "Good morning, {}. Put out the {} and report it to keep your streak going!",
            self.user_name,
            self.categories.join(" and ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reminder_lists_due_categories_in_rule_order() {
        let rules = vec![
            WasteRule::weekly("1", "burnable", &[1, 4]),
            WasteRule::weekly("2", "plastic", &[1]).with_label("PET bottles"),
        ];
        let monday = DateKey::parse("2024-04-01").unwrap();
        let reminder = Reminder::for_date(&rules, monday, "Aki").unwrap();
        assert_eq!(reminder.title(), "Collection day: burnable, PET bottles");
        assert!(reminder.body().starts_with("Good morning, Aki."));
    }

    #[test]
    fn no_reminder_without_due_rules() {
        let rules = vec![WasteRule::weekly("1", "burnable", &[1])];
        let sunday = DateKey::parse("2024-04-07").unwrap();
        assert!(Reminder::for_date(&rules, sunday, "Aki").is_none());
    }
}
