use anyhow::{Context, Result};
use std::path::Path;

use crate::db::Database;
use crate::ledger::{CategoryRegistry, TransactionLedger};
use crate::models::{to_cents, TransactionType};

const HEADER: [&str; 6] = ["id", "recipient_or_payer", "amount", "type", "date", "category"];

/// Write the ledger to a CSV file, optionally limited to one transaction
/// type. Returns the number of rows written. Nothing is created when there
/// are no rows.
pub(crate) fn export_transactions(
    db: &Database,
    path: &Path,
    kind: Option<TransactionType>,
) -> Result<usize> {
    let ledger = TransactionLedger::new(db);
    let txns = match kind {
        Some(kind) => ledger.list_by(kind, None)?,
        None => ledger.list_all()?,
    };
    if txns.is_empty() {
        return Ok(0);
    }
    let categories = CategoryRegistry::new(db).snapshot()?;

    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    wtr.write_record(HEADER)?;
    for txn in &txns {
        let category = txn
            .category_id
            .and_then(|id| categories.get(&id))
            .map(String::as_str)
            .unwrap_or("");
        wtr.write_record([
            txn.id.map(|id| id.to_string()).unwrap_or_default(),
            txn.recipient_or_payer.clone(),
            format!("{:.2}", to_cents(txn.amount)),
            txn.kind.as_str().to_string(),
            txn.date.to_string(),
            category.to_string(),
        ])?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    tracing::info!(rows = txns.len(), path = %path.display(), "exported transactions");
    Ok(txns.len())
}
