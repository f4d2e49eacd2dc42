#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::report::*;
use super::{BudgetTracker, CategoryRegistry, TransactionLedger};
use crate::db::Database;
use crate::models::{Budget, Transaction, TransactionType};

// ── format_money ──────────────────────────────────────────────

#[test]
fn test_format_money_basic() {
    assert_eq!(format_money(dec!(120), "£"), "£120.00");
    assert_eq!(format_money(dec!(0.5), "$"), "$0.50");
}

#[test]
fn test_format_money_thousands() {
    assert_eq!(format_money(dec!(1234567.891), "£"), "£1,234,567.89");
    assert_eq!(format_money(dec!(1000), "£"), "£1,000.00");
    assert_eq!(format_money(dec!(999.99), "£"), "£999.99");
}

#[test]
fn test_format_money_negative() {
    assert_eq!(format_money(dec!(-42.5), "£"), "-£42.50");
}

#[test]
fn test_format_money_rounds_to_cents() {
    assert_eq!(format_money(dec!(2.999), "£"), "£3.00");
    assert_eq!(format_money(dec!(999.995), "£"), "£1,000.00");
    assert_eq!(format_money(dec!(-0.125), "$"), "-$0.13");
}

#[test]
fn test_checked_total() {
    assert_eq!(checked_total([dec!(1.5), dec!(2.25)]), Some(dec!(3.75)));
    assert_eq!(checked_total(Vec::new()), Some(rust_decimal::Decimal::ZERO));
    assert_eq!(
        checked_total([rust_decimal::Decimal::MAX, dec!(1)]),
        None
    );
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
}

// ── category_summaries ────────────────────────────────────────

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_summaries_cover_every_category() {
    let db = Database::open_in_memory().unwrap();
    let rows = category_summaries(&db).unwrap();
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.expenses.is_zero() && r.income.is_zero()));
    assert!(rows.iter().all(|r| r.name != UNCATEGORIZED));
}

#[test]
fn test_summaries_totals_and_uncategorized_row() {
    let db = Database::open_in_memory().unwrap();
    let registry = CategoryRegistry::new(&db);
    let ledger = TransactionLedger::new(&db);
    let pets = registry.create("Pets").unwrap();

    let txn = |who: &str, amount, kind, category_id| {
        Transaction::new(who.into(), amount, kind, date("2024-03-01"), category_id)
    };
    ledger
        .insert(&txn("Tesco", dec!(40), TransactionType::Expense, Some(4)))
        .unwrap();
    ledger
        .insert(&txn("Market", dec!(2.5), TransactionType::Expense, Some(4)))
        .unwrap();
    ledger
        .insert(&txn("Refund", dec!(10), TransactionType::Income, Some(4)))
        .unwrap();
    ledger
        .insert(&txn("Vet", dec!(70), TransactionType::Expense, Some(pets)))
        .unwrap();
    BudgetTracker::new(&db)
        .add(&Budget::new(4, dec!(200), date("2024-03-01"), date("2024-03-31")))
        .unwrap();

    registry.delete(pets).unwrap();
    ledger.null_category(pets).unwrap();

    let rows = category_summaries(&db).unwrap();
    let food = rows.iter().find(|r| r.category_id == Some(4)).unwrap();
    assert_eq!(food.expenses, dec!(42.5));
    assert_eq!(food.income, dec!(10));
    assert_eq!(food.budget, dec!(200));
    assert_eq!(food.net(), dec!(-32.5));

    let last = rows.last().unwrap();
    assert_eq!(last.category_id, None);
    assert_eq!(last.name, UNCATEGORIZED);
    assert_eq!(last.expenses, dec!(70));
    assert!(!rows.iter().any(|r| r.name == "Pets"));
}
