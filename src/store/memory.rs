//! In-memory store for tests.
//!
//! Records every statement with its bound values and answers from a queue
//! of scripted responses. An empty queue yields no rows, zero rows affected
//! and a successful ping.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::errors::{StoreError, StoreResult};
use super::value::SqlValue;
use super::{Row, ScriptReport, Store};

/// A canned response
#[derive(Debug, Clone)]
pub enum Scripted {
    Rows(Vec<Row>),
    Affected(u64),
    /// Fail with `StoreError::Unavailable`
    Fail(String),
    /// Sleep, then answer with the inner response
    Delayed(Duration, Box<Scripted>),
}

/// A scripted response with its delays already served
enum Answer {
    Rows(Vec<Row>),
    Affected(u64),
    Fail(String),
}

/// One observed call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Store that records calls instead of talking to a database
#[derive(Debug, Default)]
pub struct RecordingStore {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<Scripted>>,
    offline: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose ping fails
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Queue a response for the next call
    pub fn respond(self, response: Scripted) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(response);
        self
    }

    /// Queue rows built from JSON objects
    pub fn respond_rows(self, rows: Vec<serde_json::Value>) -> Self {
        let rows = rows
            .into_iter()
            .filter_map(|row| match row {
                serde_json::Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        self.respond(Scripted::Rows(rows))
    }

    /// Everything executed so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record(&self, sql: &str, params: &[SqlValue]) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedCall {
                sql: sql.to_string(),
                params: params.to_vec(),
            });
    }

    async fn next_response(&self) -> Option<Answer> {
        let mut next = self
            .responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()?;

        loop {
            match next {
                Scripted::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    next = *inner;
                }
                Scripted::Rows(rows) => return Some(Answer::Rows(rows)),
                Scripted::Affected(n) => return Some(Answer::Affected(n)),
                Scripted::Fail(message) => return Some(Answer::Fail(message)),
            }
        }
    }
}

#[async_trait]
impl Store for RecordingStore {
    async fn ping(&self) -> StoreResult<()> {
        if self.offline {
            return Err(StoreError::Unavailable("offline".to_string()));
        }
        Ok(())
    }

    async fn query_rows(&self, sql: &str, params: &[SqlValue]) -> StoreResult<Vec<Row>> {
        self.record(sql, params);
        match self.next_response().await {
            None => Ok(Vec::new()),
            Some(Answer::Rows(rows)) => Ok(rows),
            Some(Answer::Affected(_)) => Err(StoreError::RowShape(
                "scripted rows-affected for a query".to_string(),
            )),
            Some(Answer::Fail(message)) => Err(StoreError::Unavailable(message)),
        }
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> StoreResult<u64> {
        self.record(sql, params);
        match self.next_response().await {
            None => Ok(0),
            Some(Answer::Affected(n)) => Ok(n),
            Some(Answer::Rows(rows)) => Ok(rows.len() as u64),
            Some(Answer::Fail(message)) => Err(StoreError::Unavailable(message)),
        }
    }

    async fn run_script(
        &self,
        statements: &[String],
        _commit_timeout: Duration,
    ) -> StoreResult<ScriptReport> {
        for statement in statements {
            self.record(statement, &[]);
        }
        match self.next_response().await {
            Some(Answer::Fail(message)) => Err(StoreError::Unavailable(message)),
            _ => Ok(ScriptReport {
                executed: statements.len(),
                skipped_drops: 0,
            }),
        }
    }
}
