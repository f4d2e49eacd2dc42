use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: Option<i64>,
    pub category_id: i64,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Budget {
    pub fn new(
        category_id: i64,
        amount: Decimal,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            category_id,
            amount,
            start_date,
            end_date,
        }
    }

    /// e.g. `£300.00 for period 2024-01-01 to 2024-01-31.`
    pub fn describe(&self, currency: &str) -> String {
        format!(
            "{currency}{:.2} for period {} to {}.",
            super::to_cents(self.amount),
            self.start_date,
            self.end_date
        )
    }
}
