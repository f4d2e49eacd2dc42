mod budget;
mod category;
mod goal;
mod transaction;

pub use budget::Budget;
pub use category::{Category, DEFAULT_CATEGORIES};
pub use goal::Goal;
pub use transaction::{Transaction, TransactionType};

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to whole cents, half away from zero. Used wherever an amount is
/// shown or exported.
pub fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests;
