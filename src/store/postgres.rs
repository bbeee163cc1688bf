//! # PostgreSQL Store
//!
//! deadpool-managed connections. A checked-out `Object` goes back to the
//! pool when dropped, so every early return releases its connection.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_postgres::{
    Config, ManagerConfig, Object, Pool, PoolConfig, RecyclingMethod, Runtime, Timeouts,
};
use serde_json::Value;
use tokio_postgres::error::SqlState;
use tokio_postgres::types::ToSql;
use tokio_postgres::NoTls;

use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};
use super::value::SqlValue;
use super::{is_drop, Row, ScriptReport, Store};

/// Pooled PostgreSQL store
#[derive(Clone)]
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    /// Build the pool. No connection is opened yet; see `warm_up`.
    pub fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let mut cfg = Config::new();
        cfg.host = Some(config.host.clone());
        cfg.port = Some(config.port);
        cfg.dbname = Some(config.dbname.clone());
        cfg.user = Some(config.user.clone());
        cfg.password = Some(config.password.clone());
        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        cfg.pool = Some(PoolConfig {
            max_size: config.pool_max,
            timeouts: Timeouts {
                wait: Some(config.pool_timeout()),
                create: Some(config.pool_timeout()),
                recycle: None,
            },
            ..Default::default()
        });

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| StoreError::Config(format!("Failed to create pool: {}", e)))?;

        Ok(Self { pool })
    }

    /// Open `count` connections up front so the pool starts at its minimum
    pub async fn warm_up(&self, count: usize) -> StoreResult<()> {
        let mut held = Vec::with_capacity(count);
        for _ in 0..count {
            held.push(self.connection().await?);
        }
        tracing::info!(event = "POOL_STARTED", connections = held.len());
        Ok(())
    }

    /// Stop handing out connections and drop idle ones
    pub fn close(&self) {
        self.pool.close();
        tracing::info!(event = "POOL_CLOSED");
    }

    async fn connection(&self) -> StoreResult<Object> {
        self.pool.get().await.map_err(StoreError::from)
    }
}

fn as_params(params: &[SqlValue]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(|p| p as &(dyn ToSql + Sync)).collect()
}

/// Wrap a query so each row arrives as one JSON object
fn json_rows_sql(sql: &str) -> String {
    format!("SELECT row_to_json(q) FROM ({}) q", sql)
}

fn into_row(value: Value) -> StoreResult<Row> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::RowShape(format!("expected object, got {}", other))),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        let conn = self.connection().await?;
        conn.simple_query("SELECT 1").await?;
        Ok(())
    }

    async fn query_rows(&self, sql: &str, params: &[SqlValue]) -> StoreResult<Vec<Row>> {
        let conn = self.connection().await?;
        let rows = conn.query(&json_rows_sql(sql), &as_params(params)).await?;

        rows.into_iter()
            .map(|row| into_row(row.try_get::<_, Value>(0)?))
            .collect()
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> StoreResult<u64> {
        let conn = self.connection().await?;
        Ok(conn.execute(sql, &as_params(params)).await?)
    }

    async fn run_script(
        &self,
        statements: &[String],
        commit_timeout: Duration,
    ) -> StoreResult<ScriptReport> {
        let mut conn = self.connection().await?;
        // Dropping `tx` without commit rolls back.
        let mut tx = conn.transaction().await?;
        let mut report = ScriptReport::default();

        for statement in statements {
            if is_drop(statement) {
                let savepoint = tx.savepoint("drop_guard").await?;
                match savepoint.batch_execute(statement).await {
                    Ok(()) => {
                        savepoint.commit().await?;
                        report.executed += 1;
                    }
                    Err(e) if e.code() == Some(&SqlState::UNDEFINED_TABLE) => {
                        savepoint.rollback().await?;
                        tracing::info!(
                            event = "INIT_DROP_SKIPPED",
                            statement = statement.as_str(),
                            "table does not exist"
                        );
                        report.skipped_drops += 1;
                    }
                    Err(e) => {
                        tracing::error!(
                            event = "INIT_STATEMENT_FAILED",
                            statement = statement.as_str(),
                            error = %e
                        );
                        return Err(e.into());
                    }
                }
                continue;
            }

            if let Err(e) = tx.batch_execute(statement).await {
                tracing::error!(
                    event = "INIT_STATEMENT_FAILED",
                    statement = statement.as_str(),
                    error = %e
                );
                return Err(e.into());
            }
            report.executed += 1;
        }

        // A commit already sent may still land after the timer fires.
        match tokio::time::timeout(commit_timeout, tx.commit()).await {
            Ok(committed) => committed?,
            Err(_) => {
                return Err(StoreError::Timeout {
                    operation: "commit",
                    after: commit_timeout,
                })
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_rows_wrapping() {
        assert_eq!(
            json_rows_sql("SELECT * FROM Carrier"),
            "SELECT row_to_json(q) FROM (SELECT * FROM Carrier) q"
        );
    }

    #[test]
    fn test_into_row_rejects_scalars() {
        assert!(into_row(serde_json::json!({"name": "A"})).is_ok());
        assert!(matches!(
            into_row(serde_json::json!(3)),
            Err(StoreError::RowShape(_))
        ));
    }

    #[tokio::test]
    async fn test_connect_does_not_dial() {
        // Nothing listens on port 1; building the pool must still succeed.
        let config = StoreConfig {
            port: 1,
            ..StoreConfig::default()
        };
        assert!(PgStore::connect(&config).is_ok());
    }
}
