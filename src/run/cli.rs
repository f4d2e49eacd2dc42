use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

use super::{BudgetCommand, CategoryCommand, EntryCommand, GoalCommand, Session};
use crate::error::LedgerError;
use crate::ledger::report::{
    category_summaries, checked_total, format_money, truncate, UNCATEGORIZED,
};
use crate::ledger::{BudgetTracker, CategoryRegistry, GoalTracker, TransactionLedger};
use crate::models::{Budget, Goal, Transaction, TransactionType};

const BREAK_MARKER: &str = "────────────────────────────────────────────";

// ── Transactions ──────────────────────────────────────────────

pub(super) fn entry(
    session: &Session<'_>,
    kind: TransactionType,
    cmd: EntryCommand,
    out: &mut dyn Write,
) -> Result<()> {
    match cmd {
        EntryCommand::Add {
            counterparty,
            amount,
            date,
            category,
            new_category,
        } => {
            let registry = CategoryRegistry::new(session.db);
            let category = match (category, new_category) {
                (_, Some(name)) => {
                    let id = registry.create(&name)?;
                    writeln!(out, "Category {name} added.")?;
                    Some((id, name))
                }
                (Some(id), None) => Some((id, registry.require(id)?.name)),
                (None, None) => None,
            };

            let txn = Transaction::new(
                counterparty,
                amount,
                kind,
                date.unwrap_or(session.today),
                category.as_ref().map(|(id, _)| *id),
            );
            TransactionLedger::new(session.db).insert(&txn)?;

            let described = txn.describe(&session.config.currency);
            match &category {
                Some((id, name)) => {
                    writeln!(out, "New {kind} added in {name}: {described}")?;
                    print_threshold_notice(session, kind, *id, name, out)?;
                }
                None => writeln!(out, "New {kind} added: {described}")?,
            }
            Ok(())
        }
        EntryCommand::List { category } => list_entries(session, kind, category, out),
        EntryCommand::Update { id, amount } => {
            let ledger = TransactionLedger::new(session.db);
            // The id has to belong to the type the user is working with.
            match ledger.get(id)? {
                Some(txn) if txn.kind == kind => {}
                _ => return Err(LedgerError::transaction_not_found(id).into()),
            }

            let updated = ledger.update_amount(id, amount)?;
            writeln!(
                out,
                "Amount for transaction {id} updated to: {}.",
                format_money(updated.amount, &session.config.currency)
            )?;
            if let Some(category_id) = updated.category_id {
                if let Some(category) = CategoryRegistry::new(session.db).get(category_id)? {
                    print_threshold_notice(session, kind, category_id, &category.name, out)?;
                }
            }
            Ok(())
        }
    }
}

fn list_entries(
    session: &Session<'_>,
    kind: TransactionType,
    category: Option<i64>,
    out: &mut dyn Write,
) -> Result<()> {
    let currency = &session.config.currency;
    let ledger = TransactionLedger::new(session.db);

    if let Some(category_id) = category {
        let name = CategoryRegistry::new(session.db).require(category_id)?.name;
        let txns = ledger.list_by(kind, Some(category_id))?;
        if txns.is_empty() {
            writeln!(out, "No {kind} transactions found in {name}.")?;
            return Ok(());
        }
        writeln!(out, "All {kind} transactions in {name}:")?;
        writeln!(out)?;
        for txn in &txns {
            writeln!(out, "#{:<4} {}", txn.id.unwrap_or(0), txn.describe(currency))?;
        }
        return Ok(());
    }

    let txns = ledger.list_by(kind, None)?;
    if txns.is_empty() {
        writeln!(out, "No {kind} transactions found.")?;
        return Ok(());
    }
    let categories = CategoryRegistry::new(session.db).snapshot()?;
    writeln!(out, "All {kind} transactions:")?;
    writeln!(out)?;
    for txn in &txns {
        let label = txn
            .category_id
            .and_then(|id| categories.get(&id))
            .map(String::as_str)
            .unwrap_or(UNCATEGORIZED);
        writeln!(
            out,
            "#{:<4} {:<16} {}",
            txn.id.unwrap_or(0),
            truncate(label, 16),
            txn.describe(currency)
        )?;
    }
    Ok(())
}

fn print_threshold_notice(
    session: &Session<'_>,
    kind: TransactionType,
    category_id: i64,
    category_name: &str,
    out: &mut dyn Write,
) -> Result<()> {
    if let Some(notice) = BudgetTracker::new(session.db).threshold_notice(kind, category_id)? {
        writeln!(out)?;
        writeln!(out, "{}", notice.message(category_name))?;
    }
    Ok(())
}

// ── Categories ────────────────────────────────────────────────

pub(super) fn category(
    session: &Session<'_>,
    cmd: CategoryCommand,
    out: &mut dyn Write,
) -> Result<()> {
    let registry = CategoryRegistry::new(session.db);
    match cmd {
        CategoryCommand::List => {
            for category in registry.list()? {
                writeln!(out, "{}. {category}", category.id)?;
            }
        }
        CategoryCommand::Add { name } => {
            let id = registry.create(&name)?;
            writeln!(out, "Category {name} added with id {id}.")?;
        }
        CategoryCommand::Delete { id } => {
            let name = registry.require(id)?.name;
            registry.delete(id)?;
            let cleared = TransactionLedger::new(session.db).null_category(id)?;
            writeln!(out, "{name} was deleted from the database.")?;
            if cleared > 0 {
                writeln!(out, "{cleared} transaction(s) are now {UNCATEGORIZED}.")?;
            }
        }
    }
    Ok(())
}

// ── Budgets ───────────────────────────────────────────────────

pub(super) fn budget(
    session: &Session<'_>,
    cmd: BudgetCommand,
    out: &mut dyn Write,
) -> Result<()> {
    let currency = &session.config.currency;
    let tracker = BudgetTracker::new(session.db);
    match cmd {
        BudgetCommand::Set {
            category,
            amount,
            start,
            end,
        } => {
            let name = CategoryRegistry::new(session.db).require(category)?.name;
            let budget = Budget::new(category, amount, start, end);
            tracker.add(&budget)?;
            writeln!(out, "{name} Budget set: {}", budget.describe(currency))?;
        }
        BudgetCommand::List { category } => {
            let name = CategoryRegistry::new(session.db).require(category)?.name;
            let budgets = tracker.list(category)?;
            if budgets.is_empty() {
                writeln!(out, "No Budgets found in {name}.")?;
                return Ok(());
            }
            writeln!(out, "{name} Budget:")?;
            writeln!(out)?;
            for budget in &budgets {
                writeln!(out, "{}", budget.describe(currency))?;
            }
            writeln!(out, "{BREAK_MARKER}")?;
            writeln!(
                out,
                "Total: {}",
                format_money(tracker.budget_sum(category)?, currency)
            )?;
        }
    }
    Ok(())
}

// ── Goals ─────────────────────────────────────────────────────

pub(super) fn goal(
    session: &Session<'_>,
    cmd: GoalCommand,
    out: &mut dyn Write,
) -> Result<()> {
    let currency = &session.config.currency;
    let tracker = GoalTracker::new(session.db);
    match cmd {
        GoalCommand::Set {
            category,
            target,
            due,
        } => {
            let name = CategoryRegistry::new(session.db).require(category)?.name;
            let goal = Goal::new(category, target, due);
            tracker.add(&goal, session.today)?;
            writeln!(out, "Goal added: {}", goal.describe(&name, currency))?;
        }
        GoalCommand::Progress { category } => {
            let name = CategoryRegistry::new(session.db).require(category)?.name;
            let progress = tracker.progress(category, session.today)?;
            if progress.is_empty() {
                writeln!(out, "No Goals set in {name}.")?;
                return Ok(());
            }
            writeln!(out, "All Goals in {name}:")?;
            writeln!(out)?;
            for entry in &progress {
                writeln!(
                    out,
                    "{} {}",
                    entry.goal.describe(&name, currency),
                    entry.report.message(&name, currency)
                )?;
            }
        }
    }
    Ok(())
}

// ── Reports ───────────────────────────────────────────────────

pub(super) fn summary(session: &Session<'_>, out: &mut dyn Write) -> Result<()> {
    let currency = &session.config.currency;
    let rows = category_summaries(session.db)?;
    let txn_count = TransactionLedger::new(session.db).count()?;

    writeln!(out, "FinTrack — {}", session.today)?;
    writeln!(out, "{BREAK_MARKER}")?;
    writeln!(
        out,
        "  {:<20} {:>12} {:>12} {:>12}",
        "Category", "Expenses", "Income", "Budget"
    )?;
    for row in &rows {
        let label = match row.category_id {
            Some(id) => format!("{id}. {}", row.name),
            None => row.name.clone(),
        };
        writeln!(
            out,
            "  {:<20} {:>12} {:>12} {:>12}",
            truncate(&label, 20),
            format_money(row.expenses, currency),
            format_money(row.income, currency),
            format_money(row.budget, currency),
        )?;
    }

    let too_large = || anyhow::anyhow!("Summary totals are too large to display");
    let expenses = checked_total(rows.iter().map(|r| r.expenses)).ok_or_else(too_large)?;
    let income = checked_total(rows.iter().map(|r| r.income)).ok_or_else(too_large)?;
    let net = checked_total(rows.iter().map(|r| r.net())).ok_or_else(too_large)?;
    writeln!(out, "{BREAK_MARKER}")?;
    writeln!(out, "  Expenses:   {}", format_money(expenses, currency))?;
    writeln!(out, "  Income:     {}", format_money(income, currency))?;
    writeln!(out, "  Net:        {}", format_money(net, currency))?;
    writeln!(out, "  Total Txns: {txn_count}")?;
    Ok(())
}

pub(super) fn export(
    session: &Session<'_>,
    path: Option<PathBuf>,
    kind: Option<TransactionType>,
    out: &mut dyn Write,
) -> Result<()> {
    let path = path.unwrap_or_else(|| {
        let home = directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        home.join(format!("fintrack-export-{}.csv", session.today))
    });

    let count = crate::export::export_transactions(session.db, &path, kind)?;
    if count == 0 {
        writeln!(out, "No transactions to export; no file written")?;
    } else {
        writeln!(out, "Exported {count} transactions to {}", path.display())?;
    }
    Ok(())
}
