//! Terminal surface: clap command definitions, primitive-value validation,
//! and dispatch into the ledger core.

mod cli;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::Config;
use crate::db::Database;
use crate::models::TransactionType;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Record, list or correct expenses
    #[command(subcommand)]
    Expense(EntryCommand),

    /// Record, list or correct income
    #[command(subcommand)]
    Income(EntryCommand),

    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Set or view budgets for a category
    #[command(subcommand)]
    Budget(BudgetCommand),

    /// Set financial goals or view progress towards them
    #[command(subcommand)]
    Goal(GoalCommand),

    /// Print expense, income and budget totals per category
    #[command(alias = "s")]
    Summary,

    /// Export transactions to CSV
    Export {
        /// Output file (default: ~/fintrack-export-<today>.csv)
        path: Option<PathBuf>,
        /// Only export one transaction type
        #[arg(long = "type", value_enum)]
        kind: Option<KindArg>,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum EntryCommand {
    /// Add a new transaction
    Add {
        /// Recipient (expense) or payer (income)
        #[arg(value_parser = parse_name)]
        counterparty: String,
        /// Amount, e.g. 12.50
        #[arg(value_parser = parse_amount)]
        amount: Decimal,
        /// Transaction date (YYYY-MM-DD, default: today)
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Existing category id
        #[arg(short, long, conflicts_with = "new_category")]
        category: Option<i64>,
        /// Create a category with this name and use it
        #[arg(long, value_parser = parse_name)]
        new_category: Option<String>,
    },
    /// List transactions, optionally for one category
    #[command(alias = "ls")]
    List {
        #[arg(short, long)]
        category: Option<i64>,
    },
    /// Correct the amount of a transaction
    Update {
        id: i64,
        #[arg(value_parser = parse_amount)]
        amount: Decimal,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum CategoryCommand {
    /// List every category with its id
    #[command(alias = "ls")]
    List,
    /// Add a category
    Add {
        #[arg(value_parser = parse_name)]
        name: String,
    },
    /// Delete a category; its transactions become uncategorized
    #[command(alias = "rm")]
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub(crate) enum BudgetCommand {
    /// Set a budget for a category over a date range
    Set {
        category: i64,
        #[arg(value_parser = parse_amount)]
        amount: Decimal,
        #[arg(value_parser = parse_date)]
        start: NaiveDate,
        #[arg(value_parser = parse_date)]
        end: NaiveDate,
    },
    /// Show every budget recorded for a category
    #[command(alias = "ls")]
    List { category: i64 },
}

#[derive(Debug, Subcommand)]
pub(crate) enum GoalCommand {
    /// Set a target net amount for a category by a due date
    Set {
        category: i64,
        #[arg(value_parser = parse_amount)]
        target: Decimal,
        #[arg(value_parser = parse_date)]
        due: NaiveDate,
    },
    /// Show progress towards each goal in a category
    Progress { category: i64 },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum KindArg {
    Expense,
    Income,
}

impl From<KindArg> for TransactionType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Expense => TransactionType::Expense,
            KindArg::Income => TransactionType::Income,
        }
    }
}

/// Everything a command needs: the store, resolved configuration, and the
/// date treated as "today".
pub(crate) struct Session<'a> {
    pub(crate) db: &'a Database,
    pub(crate) config: &'a Config,
    pub(crate) today: NaiveDate,
}

pub(crate) fn execute(command: Command, session: &Session<'_>, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Expense(cmd) => cli::entry(session, TransactionType::Expense, cmd, out),
        Command::Income(cmd) => cli::entry(session, TransactionType::Income, cmd, out),
        Command::Category(cmd) => cli::category(session, cmd, out),
        Command::Budget(cmd) => cli::budget(session, cmd, out),
        Command::Goal(cmd) => cli::goal(session, cmd, out),
        Command::Summary => cli::summary(session, out),
        Command::Export { path, kind } => cli::export(session, path, kind.map(Into::into), out),
    }
}

// ── Value parsers ─────────────────────────────────────────────

fn parse_amount(s: &str) -> Result<Decimal, String> {
    let cleaned = s.replace(['£', '$', '€', ','], "");
    let amount = Decimal::from_str(cleaned.trim())
        .map_err(|_| format!("'{s}' is not a valid amount"))?;
    if amount < Decimal::ZERO {
        return Err("Amount cannot be negative".into());
    }
    Ok(amount)
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{s}'. Please use YYYY-MM-DD"))
}

fn parse_name(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Value cannot be blank".into());
    }
    Ok(trimmed.to_string())
}
