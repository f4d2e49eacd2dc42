use rusqlite::params;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::transactions::{ensure_non_negative, TransactionLedger};
use crate::db::{decimal_column, Database};
use crate::error::{LedgerError, Result, StoreContext};
use crate::models::{Budget, TransactionType};

/// Share of the summed budget past which a notice is raised (90%).
pub(crate) const THRESHOLD_RATIO: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// Raised when a category's transaction total for one type is strictly
/// above [`THRESHOLD_RATIO`] of its summed budgets.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ThresholdNotice {
    pub(crate) kind: TransactionType,
    pub(crate) category_id: i64,
    pub(crate) transaction_sum: Decimal,
    pub(crate) budget_sum: Decimal,
}

impl ThresholdNotice {
    pub(crate) fn message(&self, category_name: &str) -> String {
        match self.kind {
            TransactionType::Expense => format!(
                "***WARNING*** You have spent more than 90% of your {category_name} Budget."
            ),
            TransactionType::Income => {
                format!("You have received more than 90% of your {category_name} Budget.")
            }
        }
    }
}

/// Pure threshold rule: strict `>` against 90% of a positive budget sum.
pub(crate) fn check_threshold(
    kind: TransactionType,
    category_id: i64,
    transaction_sum: Decimal,
    budget_sum: Decimal,
) -> Option<ThresholdNotice> {
    if budget_sum <= Decimal::ZERO {
        return None;
    }
    (transaction_sum > budget_sum * THRESHOLD_RATIO).then_some(ThresholdNotice {
        kind,
        category_id,
        transaction_sum,
        budget_sum,
    })
}

pub(crate) struct BudgetTracker<'a> {
    db: &'a Database,
}

impl<'a> BudgetTracker<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub(crate) fn add(&self, budget: &Budget) -> Result<i64> {
        ensure_non_negative(budget.amount)?;
        if budget.end_date < budget.start_date {
            return Err(LedgerError::Validation(format!(
                "End date {} cannot be before start date {}",
                budget.end_date, budget.start_date
            )));
        }

        let id = self.db.write("add budget", |conn| {
            conn.execute(
                "INSERT INTO budgets (category_id, budget_amount, start_date, end_date)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    budget.category_id,
                    budget.amount.to_string(),
                    budget.start_date,
                    budget.end_date,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        info!(id, category_id = budget.category_id, "added budget");
        Ok(id)
    }

    /// Every budget period recorded for a category, oldest first.
    pub(crate) fn list(&self, category_id: i64) -> Result<Vec<Budget>> {
        let mut stmt = self
            .db
            .conn()
            .prepare_cached(
                "SELECT budget_id, category_id, budget_amount, start_date, end_date
                 FROM budgets WHERE category_id = ?1 ORDER BY budget_id",
            )
            .store("list budgets")?;
        let rows = stmt
            .query_map(params![category_id], |row| {
                Ok(Budget {
                    id: Some(row.get(0)?),
                    category_id: row.get(1)?,
                    amount: decimal_column(row, 2)?,
                    start_date: row.get(3)?,
                    end_date: row.get(4)?,
                })
            })
            .store("list budgets")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .store("list budgets")
    }

    /// Σ of every budget for the category. Overlapping periods are not
    /// reconciled; they simply add up.
    pub(crate) fn budget_sum(&self, category_id: i64) -> Result<Decimal> {
        self.db
            .sum_amounts(
                "SELECT budget_amount FROM budgets WHERE category_id = ?1",
                params![category_id],
            )
            .store("sum budgets")
    }

    /// Read-only: compares the (type, category) transaction total against
    /// the category's summed budgets.
    pub(crate) fn threshold_notice(
        &self,
        kind: TransactionType,
        category_id: i64,
    ) -> Result<Option<ThresholdNotice>> {
        let transaction_sum = TransactionLedger::new(self.db).sum_by(kind, category_id)?;
        let budget_sum = self.budget_sum(category_id)?;
        let notice = check_threshold(kind, category_id, transaction_sum, budget_sum);
        match &notice {
            Some(n) => info!(
                kind = %n.kind,
                category_id = n.category_id,
                transaction_sum = %n.transaction_sum,
                budget_sum = %n.budget_sum,
                "budget threshold crossed"
            ),
            None => debug!(category_id, %transaction_sum, %budget_sum, "under budget threshold"),
        }
        Ok(notice)
    }
}
