//! Error taxonomy for the ledger core.

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    /// The store could not execute or commit a statement. Any in-flight
    /// write has already been rolled back when this is returned.
    #[error("Failed to {operation}: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Category already exists: {name}")]
    DuplicateCategory { name: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl LedgerError {
    pub(crate) fn category_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Category",
            id,
        }
    }

    pub(crate) fn transaction_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Transaction",
            id,
        }
    }
}

pub(crate) type Result<T> = std::result::Result<T, LedgerError>;

/// Attach an operation label to a raw store result.
pub(crate) trait StoreContext<T> {
    fn store(self, operation: &'static str) -> Result<T>;
}

impl<T> StoreContext<T> for rusqlite::Result<T> {
    fn store(self, operation: &'static str) -> Result<T> {
        self.map_err(|source| LedgerError::Store { operation, source })
    }
}
