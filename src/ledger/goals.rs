use chrono::NaiveDate;
use rusqlite::params;
use rust_decimal::Decimal;
use tracing::info;

use super::transactions::{ensure_non_negative, TransactionLedger};
use crate::db::{decimal_column, Database};
use crate::error::{LedgerError, Result, StoreContext};
use crate::models::{to_cents, Goal, TransactionType};

/// Derived, never stored. `days_left` is negative once the due date has
/// passed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ProgressReport {
    NoTransactions,
    InProgress { percent: Decimal, days_left: i64 },
    Achieved,
    Deficit { amount: Decimal, days_left: i64 },
}

impl ProgressReport {
    pub(crate) fn message(&self, category_name: &str, currency: &str) -> String {
        match self {
            Self::NoTransactions => format!("No transactions were found in {category_name}."),
            Self::Achieved => format!("You have achieved your {category_name} Goal!"),
            Self::InProgress { percent, days_left } => format!(
                "You are {percent}% of the way to achieving your {category_name} Goal and {}.",
                time_remaining(*days_left)
            ),
            Self::Deficit { amount, days_left } => format!(
                "You are {currency}{:.2} away from reaching your {category_name} Goal and {}.",
                to_cents(*amount),
                time_remaining(*days_left)
            ),
        }
    }
}

fn time_remaining(days_left: i64) -> String {
    match days_left {
        d if d < 0 => format!("the due date passed {} days ago", -d),
        1 => "you have 1 day left".to_string(),
        d => format!("you have {d} days left"),
    }
}

/// Progress from signed category sums: net = income − expense.
pub(crate) fn compute_progress(
    income_sum: Decimal,
    expense_sum: Decimal,
    target: Decimal,
    due_date: NaiveDate,
    today: NaiveDate,
) -> ProgressReport {
    if income_sum.is_zero() && expense_sum.is_zero() {
        return ProgressReport::NoTransactions;
    }

    let net = income_sum - expense_sum;
    let days_left = (due_date - today).num_days();

    if net < Decimal::ZERO {
        // Past the representable range the shortfall is shown as the maximum.
        let amount = net.checked_sub(target).map_or(Decimal::MAX, |d| d.abs());
        return ProgressReport::Deficit { amount, days_left };
    }

    // A zero target is met by any non-negative net.
    if target.is_zero() {
        return ProgressReport::Achieved;
    }

    // An overflowing ratio can only come from net far above target.
    match net
        .checked_div(target)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    {
        Some(percent) if percent < Decimal::ONE_HUNDRED => ProgressReport::InProgress {
            percent: percent.round(),
            days_left,
        },
        _ => ProgressReport::Achieved,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GoalProgress {
    pub(crate) goal: Goal,
    pub(crate) report: ProgressReport,
}

pub(crate) struct GoalTracker<'a> {
    db: &'a Database,
}

impl<'a> GoalTracker<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub(crate) fn add(&self, goal: &Goal, today: NaiveDate) -> Result<i64> {
        ensure_non_negative(goal.target)?;
        if goal.due_date < today {
            return Err(LedgerError::Validation(format!(
                "Due date {} cannot be in the past",
                goal.due_date
            )));
        }

        let id = self.db.write("add goal", |conn| {
            conn.execute(
                "INSERT INTO goals (category_id, goal_target, due_date) VALUES (?1, ?2, ?3)",
                params![goal.category_id, goal.target.to_string(), goal.due_date],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        info!(id, category_id = goal.category_id, "added goal");
        Ok(id)
    }

    pub(crate) fn list(&self, category_id: i64) -> Result<Vec<Goal>> {
        let mut stmt = self
            .db
            .conn()
            .prepare_cached(
                "SELECT goal_id, category_id, goal_target, due_date
                 FROM goals WHERE category_id = ?1 ORDER BY goal_id",
            )
            .store("list goals")?;
        let rows = stmt
            .query_map(params![category_id], |row| {
                Ok(Goal {
                    id: Some(row.get(0)?),
                    category_id: row.get(1)?,
                    target: decimal_column(row, 2)?,
                    due_date: row.get(3)?,
                })
            })
            .store("list goals")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .store("list goals")
    }

    /// One report per goal in the category. All goals are measured against
    /// the same category totals.
    pub(crate) fn progress(
        &self,
        category_id: i64,
        today: NaiveDate,
    ) -> Result<Vec<GoalProgress>> {
        let goals = self.list(category_id)?;
        if goals.is_empty() {
            return Ok(Vec::new());
        }

        let ledger = TransactionLedger::new(self.db);
        let income_sum = ledger.sum_by(TransactionType::Income, category_id)?;
        let expense_sum = ledger.sum_by(TransactionType::Expense, category_id)?;

        Ok(goals
            .into_iter()
            .map(|goal| {
                let report =
                    compute_progress(income_sum, expense_sum, goal.target, goal.due_date, today);
                GoalProgress { goal, report }
            })
            .collect())
    }
}
