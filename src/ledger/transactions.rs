use rusqlite::{params, Row};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::db::{decimal_column, Database};
use crate::error::{LedgerError, Result, StoreContext};
use crate::models::{Transaction, TransactionType};

const SELECT_TRANSACTION: &str =
    "SELECT id, recipient_or_payer, amount, type, date, category_id FROM transactions";

/// Dated, typed, categorised money movements.
pub(crate) struct TransactionLedger<'a> {
    db: &'a Database,
}

impl<'a> TransactionLedger<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub(crate) fn insert(&self, txn: &Transaction) -> Result<i64> {
        ensure_non_negative(txn.amount)?;
        if txn.recipient_or_payer.trim().is_empty() {
            return Err(LedgerError::Validation(format!(
                "{} cannot be blank",
                txn.kind.counterparty_word()
            )));
        }

        let id = self.db.write("add transaction", |conn| {
            conn.execute(
                "INSERT INTO transactions (recipient_or_payer, amount, type, date, category_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    txn.recipient_or_payer.trim(),
                    txn.amount.to_string(),
                    txn.kind,
                    txn.date,
                    txn.category_id,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        debug!(id, kind = %txn.kind, category_id = ?txn.category_id, "inserted transaction");
        Ok(id)
    }

    pub(crate) fn get(&self, id: i64) -> Result<Option<Transaction>> {
        let result = self.db.conn().query_row(
            &format!("{SELECT_TRANSACTION} WHERE id = ?1"),
            params![id],
            map_transaction,
        );
        match result {
            Ok(t) => Ok(Some(t)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).store("look up transaction"),
        }
    }

    /// Overwrite the amount of one row, whatever its type, and return the
    /// row as stored afterwards.
    pub(crate) fn update_amount(&self, id: i64, new_amount: Decimal) -> Result<Transaction> {
        ensure_non_negative(new_amount)?;
        let affected = self.db.write("update transaction amount", |conn| {
            conn.execute(
                "UPDATE transactions SET amount = ?1 WHERE id = ?2",
                params![new_amount.to_string(), id],
            )
        })?;
        if affected == 0 {
            return Err(LedgerError::transaction_not_found(id));
        }
        debug!(id, %new_amount, "updated transaction amount");
        self.get(id)?
            .ok_or_else(|| LedgerError::transaction_not_found(id))
    }

    /// Disassociate every transaction from a deleted category. Returns the
    /// number of rows touched; no row is removed.
    pub(crate) fn null_category(&self, deleted_category_id: i64) -> Result<usize> {
        let affected = self.db.write("clear deleted category", |conn| {
            conn.execute(
                "UPDATE transactions SET category_id = NULL WHERE category_id = ?1",
                params![deleted_category_id],
            )
        })?;
        info!(
            category_id = deleted_category_id,
            affected, "cleared category from transactions"
        );
        Ok(affected)
    }

    /// All rows of one type, optionally narrowed to a category, in
    /// insertion order.
    pub(crate) fn list_by(
        &self,
        kind: TransactionType,
        category_id: Option<i64>,
    ) -> Result<Vec<Transaction>> {
        match category_id {
            Some(cid) => self.query(
                &format!("{SELECT_TRANSACTION} WHERE type = ?1 AND category_id = ?2 ORDER BY id"),
                params![kind, cid],
            ),
            None => self.query(
                &format!("{SELECT_TRANSACTION} WHERE type = ?1 ORDER BY id"),
                params![kind],
            ),
        }
    }

    pub(crate) fn list_all(&self) -> Result<Vec<Transaction>> {
        self.query(&format!("{SELECT_TRANSACTION} ORDER BY id"), [])
    }

    pub(crate) fn count(&self) -> Result<i64> {
        self.db
            .conn()
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))
            .store("count transactions")
    }

    /// Σ amount for one (type, category) pair; zero when nothing matches.
    pub(crate) fn sum_by(&self, kind: TransactionType, category_id: i64) -> Result<Decimal> {
        self.db
            .sum_amounts(
                "SELECT amount FROM transactions WHERE type = ?1 AND category_id = ?2",
                params![kind, category_id],
            )
            .store("sum transactions")
    }

    /// Σ amount for one type over rows whose category was cleared.
    pub(crate) fn sum_uncategorized(&self, kind: TransactionType) -> Result<Decimal> {
        self.db
            .sum_amounts(
                "SELECT amount FROM transactions WHERE type = ?1 AND category_id IS NULL",
                params![kind],
            )
            .store("sum transactions")
    }

    fn query<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Transaction>> {
        let mut stmt = self
            .db
            .conn()
            .prepare_cached(sql)
            .store("list transactions")?;
        let rows = stmt
            .query_map(params, map_transaction)
            .store("list transactions")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .store("list transactions")
    }
}

fn map_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: Some(row.get(0)?),
        recipient_or_payer: row.get(1)?,
        amount: decimal_column(row, 2)?,
        kind: row.get(3)?,
        date: row.get(4)?,
        category_id: row.get(5)?,
    })
}

pub(crate) fn ensure_non_negative(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::Validation(format!(
            "Amount cannot be negative: {amount}"
        )));
    }
    Ok(())
}
