use rusqlite::params;
use std::collections::BTreeMap;
use tracing::info;

use crate::db::Database;
use crate::error::{LedgerError, Result, StoreContext};
use crate::models::Category;

/// Owns the id → name mapping for categories. Reads always go back to the
/// store, so a snapshot taken after a create/delete reflects it.
pub(crate) struct CategoryRegistry<'a> {
    db: &'a Database,
}

impl<'a> CategoryRegistry<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Every category keyed by id, in ascending id order.
    pub(crate) fn snapshot(&self) -> Result<BTreeMap<i64, String>> {
        Ok(self
            .list()?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect())
    }

    pub(crate) fn list(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .db
            .conn()
            .prepare_cached(
                "SELECT category_id, category_type FROM categories ORDER BY category_id",
            )
            .store("list categories")?;
        let rows = stmt
            .query_map([], |row| Ok(Category::new(row.get(0)?, row.get(1)?)))
            .store("list categories")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .store("list categories")
    }

    pub(crate) fn get(&self, id: i64) -> Result<Option<Category>> {
        let result = self.db.conn().query_row(
            "SELECT category_id, category_type FROM categories WHERE category_id = ?1",
            params![id],
            |row| Ok(Category::new(row.get(0)?, row.get(1)?)),
        );
        match result {
            Ok(c) => Ok(Some(c)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).store("look up category"),
        }
    }

    /// Like [`get`](Self::get) but a missing id is an error.
    pub(crate) fn require(&self, id: i64) -> Result<Category> {
        self.get(id)?
            .ok_or_else(|| LedgerError::category_not_found(id))
    }

    /// Case-insensitive exact match on the name.
    pub(crate) fn exists(&self, name: &str) -> Result<bool> {
        self.db
            .conn()
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM categories WHERE LOWER(category_type) = LOWER(?1))",
                params![name.trim()],
                |row| row.get(0),
            )
            .store("check category name")
    }

    pub(crate) fn create(&self, name: &str) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation(
                "Category name cannot be blank".into(),
            ));
        }
        if self.exists(name)? {
            return Err(LedgerError::DuplicateCategory { name: name.into() });
        }

        let id = self.db.write("add category", |conn| {
            conn.execute(
                "INSERT INTO categories (category_type) VALUES (?1)",
                params![name],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        info!(id, name, "created category");
        Ok(id)
    }

    /// Remove the row only. Transactions that point at it are left for
    /// [`TransactionLedger::null_category`](super::TransactionLedger::null_category).
    pub(crate) fn delete(&self, id: i64) -> Result<()> {
        let affected = self.db.write("delete category", |conn| {
            conn.execute(
                "DELETE FROM categories WHERE category_id = ?1",
                params![id],
            )
        })?;
        if affected == 0 {
            return Err(LedgerError::category_not_found(id));
        }
        info!(id, "deleted category");
        Ok(())
    }
}
