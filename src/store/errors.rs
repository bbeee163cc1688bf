//! # Store Errors
//!
//! Failures at the unit-of-work boundary.

use std::time::Duration;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Pool could not be built from configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// No connection could be acquired
    #[error("Pool: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// Statement failed in the database
    #[error("Database: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// Caller-side timer fired first
    #[error("{operation} timed out after {}ms", .after.as_millis())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// Background task died
    #[error("Task failed: {0}")]
    Task(String),

    /// Store unreachable or refused the operation
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Row did not have the expected shape
    #[error("Unexpected row shape: {0}")]
    RowShape(String),

    /// Initialization script could not be read
    #[error("Script error: {0}")]
    Script(String),
}

impl StoreError {
    /// Best-effort human-readable message.
    ///
    /// Prefers the database's own message (e.g. the constraint violation
    /// text). Not a stable contract.
    pub fn hint(&self) -> String {
        match self {
            StoreError::Postgres(e) => e
                .as_db_error()
                .map(|db| db.message().to_string())
                .unwrap_or_else(|| e.to_string()),
            other => other.to_string(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, StoreError::Timeout { .. })
    }
}
