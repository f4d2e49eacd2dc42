//! The ledger core: category registry, transaction ledger, budget and goal
//! tracking. Each component borrows the store handle it is built with.

mod budgets;
mod categories;
mod goals;
pub(crate) mod report;
mod transactions;

pub(crate) use budgets::BudgetTracker;
pub(crate) use categories::CategoryRegistry;
pub(crate) use goals::GoalTracker;
pub(crate) use transactions::TransactionLedger;


#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
