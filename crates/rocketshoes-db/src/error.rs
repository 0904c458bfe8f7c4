//! # Storage Errors
//!
//! What can go wrong between the cart and its SQLite file.
//!
//! ## Where They End Up
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  sqlx::Error / MigrateError                                            │
//! │       │ From                                                            │
//! │       ▼                                                                 │
//! │  DbError            CLI startup: printed, exit code 1                  │
//! │       │ From                                                            │
//! │       ▼                                                                 │
//! │  CoreError::StorageFailed                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStore: cart left as it was, generic "failed to ..." notification  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rocketshoes_core::CoreError;
use thiserror::Error;

/// Key-value storage errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// A row that had to exist did not.
    #[error("No row for {what}")]
    NotFound { what: String },

    /// The database file could not be opened.
    ///
    /// ## Typical Causes
    /// - Parent directory missing or not writable
    /// - Pool already closed
    #[error("Cannot open database: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected a statement (constraint, lock timeout, disk full).
    #[error("Statement failed: {0}")]
    QueryFailed(String),

    /// No pooled connection became free in time.
    #[error("Timed out waiting for a database connection")]
    PoolExhausted,

    #[error("Storage error: {0}")]
    Internal(String),
}

/// ## Mapping
/// ```text
/// RowNotFound    → NotFound
/// Database(e)    → QueryFailed(e.message())
/// PoolTimedOut   → PoolExhausted
/// PoolClosed     → ConnectionFailed
/// anything else  → Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                what: "query".to_string(),
            },
            sqlx::Error::Database(e) => DbError::QueryFailed(e.message().to_string()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        CoreError::storage(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_becomes_storage_failure() {
        let core: CoreError = DbError::PoolExhausted.into();
        assert!(matches!(
            core,
            CoreError::StorageFailed(ref m) if m == "Timed out waiting for a database connection"
        ));
    }

    #[test]
    fn test_sqlx_error_mapping() {
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
    }
}
