mod config;
mod db;
mod error;
mod export;
mod ledger;
mod logging;
mod models;
mod run;

use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "fintrack",
    version,
    about = "FinTrack - personal finance ledger with category budgets and savings goals",
    arg_required_else_help = true
)]
struct Cli {
    /// Path to the ledger database
    #[arg(long, global = true, env = "FINTRACK_DB", value_name = "PATH")]
    db: Option<PathBuf>,

    /// Currency symbol used when printing amounts
    #[arg(long, global = true, env = "FINTRACK_CURRENCY", value_name = "SYMBOL")]
    currency: Option<String>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: run::Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let config = config::Config::resolve(cli.db, cli.currency)?;
    let db = db::Database::open(&config.db_path)?;
    let session = run::Session {
        db: &db,
        config: &config,
        today: chrono::Local::now().date_naive(),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run::execute(cli.command, &session, &mut out)
}
