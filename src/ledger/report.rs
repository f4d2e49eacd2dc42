use rust_decimal::Decimal;

use super::{BudgetTracker, CategoryRegistry, TransactionLedger};
use crate::db::Database;
use crate::error::Result;
use crate::models::{to_cents, TransactionType};

pub(crate) const UNCATEGORIZED: &str = "Uncategorized";

/// Format an amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` with `£` → `"£1,234,567.89"`
pub(crate) fn format_money(val: Decimal, currency: &str) -> String {
    let abs = to_cents(val.abs());
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO {
        format!("-{currency}{with_commas}.{dec_part}")
    } else {
        format!("{currency}{with_commas}.{dec_part}")
    }
}

/// Checked Σ of `values`; `None` once the total leaves the `Decimal` range.
pub(crate) fn checked_total(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Totals for one category row of the summary. `category_id` is `None` for
/// transactions whose category was deleted.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategorySummary {
    pub(crate) category_id: Option<i64>,
    pub(crate) name: String,
    pub(crate) expenses: Decimal,
    pub(crate) income: Decimal,
    pub(crate) budget: Decimal,
}

impl CategorySummary {
    pub(crate) fn net(&self) -> Decimal {
        self.income - self.expenses
    }
}

/// One row per category in id order, plus a trailing uncategorised row
/// when any transaction has lost its category.
pub(crate) fn category_summaries(db: &Database) -> Result<Vec<CategorySummary>> {
    let ledger = TransactionLedger::new(db);
    let budgets = BudgetTracker::new(db);

    let mut rows = Vec::new();
    for (id, name) in CategoryRegistry::new(db).snapshot()? {
        rows.push(CategorySummary {
            category_id: Some(id),
            name,
            expenses: ledger.sum_by(TransactionType::Expense, id)?,
            income: ledger.sum_by(TransactionType::Income, id)?,
            budget: budgets.budget_sum(id)?,
        });
    }

    let expenses = ledger.sum_uncategorized(TransactionType::Expense)?;
    let income = ledger.sum_uncategorized(TransactionType::Income)?;
    if !expenses.is_zero() || !income.is_zero() {
        rows.push(CategorySummary {
            category_id: None,
            name: UNCATEGORIZED.to_string(),
            expenses,
            income,
            budget: Decimal::ZERO,
        });
    }
    Ok(rows)
}
