#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// ── TransactionType ───────────────────────────────────────────

#[test]
fn test_transaction_type_parse() {
    assert_eq!(TransactionType::parse("expense"), Some(TransactionType::Expense));
    assert_eq!(TransactionType::parse("EXPENSE"), Some(TransactionType::Expense));
    assert_eq!(TransactionType::parse(" Income "), Some(TransactionType::Income));
    assert_eq!(TransactionType::parse("transfer"), None);
    assert_eq!(TransactionType::parse(""), None);
}

#[test]
fn test_transaction_type_roundtrip() {
    for t in [TransactionType::Expense, TransactionType::Income] {
        let s = t.as_str();
        assert_eq!(TransactionType::parse(s), Some(t), "Roundtrip failed for {s}");
    }
}

#[test]
fn test_transaction_type_display() {
    assert_eq!(format!("{}", TransactionType::Expense), "Expense");
    assert_eq!(format!("{}", TransactionType::Income), "Income");
}

#[test]
fn test_counterparty_word() {
    assert_eq!(TransactionType::Expense.counterparty_word(), "recipient");
    assert_eq!(TransactionType::Income.counterparty_word(), "payer");
}

// ── Transaction ───────────────────────────────────────────────

#[test]
fn test_transaction_new() {
    let txn = Transaction::new(
        "PowerCo".into(),
        dec!(120.00),
        TransactionType::Expense,
        date("2024-01-10"),
        Some(5),
    );
    assert!(txn.id.is_none());
    assert_eq!(txn.category_id, Some(5));
    assert_eq!(txn.amount, dec!(120.00));
}

#[test]
fn test_transaction_describe_expense() {
    let txn = Transaction::new(
        "PowerCo".into(),
        dec!(120),
        TransactionType::Expense,
        date("2024-01-10"),
        None,
    );
    assert_eq!(txn.describe("£"), "£120.00 to PowerCo on 2024-01-10.");
}

#[test]
fn test_transaction_describe_income() {
    let txn = Transaction::new(
        "Acme Ltd".into(),
        dec!(2500.5),
        TransactionType::Income,
        date("2024-02-01"),
        Some(2),
    );
    assert_eq!(txn.describe("$"), "$2500.50 by Acme Ltd on 2024-02-01.");
}

#[test]
fn test_describe_rounds_to_cents() {
    let txn = Transaction::new(
        "X".into(),
        dec!(2.999),
        TransactionType::Expense,
        date("2024-01-10"),
        None,
    );
    assert_eq!(txn.describe("£"), "£3.00 to X on 2024-01-10.");

    let budget = Budget::new(1, dec!(300.005), date("2024-01-01"), date("2024-01-31"));
    assert_eq!(
        budget.describe("£"),
        "£300.01 for period 2024-01-01 to 2024-01-31."
    );

    let goal = Goal::new(3, dec!(499.994), date("2024-12-31"));
    assert_eq!(goal.describe("Travel", "£"), "Achieve £499.99 in Travel by 2024-12-31.");
}

#[test]
fn test_to_cents_half_away_from_zero() {
    assert_eq!(to_cents(dec!(2.005)), dec!(2.01));
    assert_eq!(to_cents(dec!(-2.005)), dec!(-2.01));
    assert_eq!(to_cents(dec!(2.004)), dec!(2.00));
    assert_eq!(to_cents(dec!(7)), dec!(7));
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_display() {
    let cat = Category::new(1, "Bills".into());
    assert_eq!(format!("{cat}"), "Bills");
}

#[test]
fn test_default_categories_have_fixed_ids() {
    let ids: Vec<i64> = DEFAULT_CATEGORIES.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(DEFAULT_CATEGORIES[3].1, "Food");
}

// ── Budget / Goal ─────────────────────────────────────────────

#[test]
fn test_budget_describe() {
    let budget = Budget::new(1, dec!(300), date("2024-01-01"), date("2024-01-31"));
    assert!(budget.id.is_none());
    assert_eq!(
        budget.describe("£"),
        "£300.00 for period 2024-01-01 to 2024-01-31."
    );
}

#[test]
fn test_goal_describe() {
    let goal = Goal::new(3, dec!(500), date("2024-12-31"));
    assert!(goal.id.is_none());
    assert_eq!(goal.describe("Travel", "£"), "Achieve £500.00 in Travel by 2024-12-31.");
}
