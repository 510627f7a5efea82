//! Store error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while opening or reading the observations store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened
    #[error("Failed to open store at {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },

    /// A declared table is absent from the store
    #[error("Store is missing table '{0}'")]
    MissingTable(String),

    /// A declared column is absent from its table
    #[error("Table '{table}' is missing column '{column}'")]
    MissingColumn { table: String, column: String },

    /// A query failed
    #[error("Query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// A stored date is not in `YYYY-MM-DD` form
    #[error("Invalid stored date: '{0}'")]
    InvalidDate(String),
}

impl StoreError {
    /// Whether the error was detected before the store started serving
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            StoreError::Open { .. } | StoreError::MissingTable(_) | StoreError::MissingColumn { .. }
        )
    }
}
