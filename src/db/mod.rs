mod schema;

use anyhow::{Context, Result};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Params, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::{LedgerError, StoreContext};
use crate::models::DEFAULT_CATEGORIES;

/// Handle to the relational store. Every ledger component borrows one of
/// these; nothing above this layer keeps copies of stored rows.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        info!(path = %path.display(), "opened ledger store");
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        db.seed_default_categories()
            .context("Failed to seed default categories")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        db.seed_default_categories()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            info!(version = schema::CURRENT_VERSION, "creating ledger schema");
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                info!(from_version, "applying migration");
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    fn seed_default_categories(&mut self) -> crate::error::Result<()> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))
            .store("count categories")?;
        if count > 0 {
            return Ok(());
        }

        self.write("seed default categories", |conn| {
            for (id, name) in DEFAULT_CATEGORIES {
                conn.execute(
                    "INSERT INTO categories (category_id, category_type) VALUES (?1, ?2)",
                    params![id, name],
                )?;
            }
            Ok(())
        })?;
        info!(count = DEFAULT_CATEGORIES.len(), "seeded default categories");
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    #[cfg(test)]
    pub(crate) fn schema_version(&self) -> Result<i32> {
        Ok(self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })?)
    }

    /// Run `f` inside its own SQLite transaction. The transaction commits
    /// only if `f` succeeds; on any error it is dropped, which rolls back.
    pub(crate) fn write<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> crate::error::Result<T> {
        let tx = self.conn.unchecked_transaction().store(operation)?;
        match f(&tx) {
            Ok(value) => {
                tx.commit().store(operation)?;
                debug!(operation, "committed");
                Ok(value)
            }
            Err(source) => {
                warn!(operation, error = %source, "write rolled back");
                Err(LedgerError::Store { operation, source })
            }
        }
    }

    /// Sum the decimal amounts returned in the first column of `sql`.
    /// Zero when no rows match; a total past `Decimal::MAX` is an error.
    pub(crate) fn sum_amounts<P: Params>(&self, sql: &str, params: P) -> rusqlite::Result<Decimal> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let mut rows = stmt.query(params)?;
        let mut total = Decimal::ZERO;
        while let Some(row) = rows.next()? {
            total = total
                .checked_add(decimal_column(row, 0)?)
                .ok_or_else(|| {
                    rusqlite::Error::FromSqlConversionFailure(
                        0,
                        Type::Text,
                        "sum of amounts overflowed".into(),
                    )
                })?;
        }
        Ok(total)
    }
}

/// Amounts are stored as TEXT so they survive the round trip exactly.
pub(crate) fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(raw.trim())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
