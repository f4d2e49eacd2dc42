use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Some(Self::Expense),
            "income" => Some(Self::Income),
            _ => None,
        }
    }

    /// Who the other side of the movement is: "recipient" or "payer".
    pub fn counterparty_word(&self) -> &'static str {
        match self {
            Self::Expense => "recipient",
            Self::Income => "payer",
        }
    }

    fn action_word(&self) -> &'static str {
        match self {
            Self::Expense => "to",
            Self::Income => "by",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        Self::parse(s)
            .ok_or_else(|| FromSqlError::Other(format!("unknown transaction type: {s}").into()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Option<i64>,
    pub recipient_or_payer: String,
    pub amount: Decimal,
    pub kind: TransactionType,
    pub date: NaiveDate,
    pub category_id: Option<i64>,
}

impl Transaction {
    pub fn new(
        recipient_or_payer: String,
        amount: Decimal,
        kind: TransactionType,
        date: NaiveDate,
        category_id: Option<i64>,
    ) -> Self {
        Self {
            id: None,
            recipient_or_payer,
            amount,
            kind,
            date,
            category_id,
        }
    }

    /// e.g. `£120.00 to PowerCo on 2024-01-10.`
    pub fn describe(&self, currency: &str) -> String {
        format!(
            "{currency}{:.2} {} {} on {}.",
            super::to_cents(self.amount),
            self.kind.action_word(),
            self.recipient_or_payer,
            self.date
        )
    }
}
