//! # Persistence Access
//!
//! Every handler reaches the database through the `Store` trait. The
//! PostgreSQL implementation checks a connection out of the pool per call
//! and returns it on every exit path; `RecordingStore` stands in for tests.
//!
//! Rows come back as JSON objects keyed by column name, ready to render.

pub mod config;
pub mod errors;
pub mod memory;
pub mod postgres;
pub mod timeout;
pub mod value;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

pub use config::StoreConfig;
pub use errors::{StoreError, StoreResult};
pub use memory::{RecordedCall, RecordingStore, Scripted};
pub use postgres::PgStore;
pub use timeout::race;
pub use value::SqlValue;

/// One result row, keyed by (lowercase) column name
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Outcome of running the initialization script
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptReport {
    /// Statements that ran successfully
    pub executed: usize,
    /// DROP statements skipped because the table did not exist
    pub skipped_drops: usize,
}

/// Connection-backed statement execution
#[async_trait]
pub trait Store: Send + Sync {
    /// Acquire and release a connection
    async fn ping(&self) -> StoreResult<()>;

    /// Run a query and return its rows as JSON objects
    async fn query_rows(&self, sql: &str, params: &[SqlValue]) -> StoreResult<Vec<Row>>;

    /// Run a statement in autocommit mode, returning rows affected
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> StoreResult<u64>;

    /// Run statements in one transaction, racing the commit against
    /// `commit_timeout`
    async fn run_script(
        &self,
        statements: &[String],
        commit_timeout: Duration,
    ) -> StoreResult<ScriptReport>;
}

/// Split a script on `;`, dropping blank statements
pub fn split_statements(script: &str) -> Vec<String> {
    script
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// True for statements whose failure on a missing table is tolerated
pub fn is_drop(statement: &str) -> bool {
    statement
        .get(..4)
        .is_some_and(|head| head.eq_ignore_ascii_case("drop"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_statements() {
        let script = "DROP TABLE Carrier;\n\nCREATE TABLE Carrier (userID INT);  ;\n";
        assert_eq!(
            split_statements(script),
            vec![
                "DROP TABLE Carrier".to_string(),
                "CREATE TABLE Carrier (userID INT)".to_string()
            ]
        );
    }

    #[test]
    fn test_is_drop() {
        assert!(is_drop("DROP TABLE x"));
        assert!(is_drop("drop table x"));
        assert!(!is_drop("CREATE TABLE x"));
        assert!(!is_drop("DR"));
    }
}
