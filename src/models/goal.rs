use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: Option<i64>,
    pub category_id: i64,
    pub target: Decimal,
    pub due_date: NaiveDate,
}

impl Goal {
    pub fn new(category_id: i64, target: Decimal, due_date: NaiveDate) -> Self {
        Self {
            id: None,
            category_id,
            target,
            due_date,
        }
    }

    /// e.g. `Achieve £500.00 in Travel by 2024-12-31.`
    pub fn describe(&self, category_name: &str, currency: &str) -> String {
        format!(
            "Achieve {currency}{:.2} in {category_name} by {}.",
            super::to_cents(self.target),
            self.due_date
        )
    }
}
