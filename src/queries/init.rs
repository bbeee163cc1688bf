//! Schema initialization script runner.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::store::{race, split_statements, ScriptReport, Store, StoreError, StoreResult};

/// Read the script, then run it with a commit timeout, the whole run raced
/// against `init_timeout`.
///
/// On timeout the run keeps going in the background and may still commit.
pub async fn initialize_tables(
    store: Arc<dyn Store>,
    script: &Path,
    init_timeout: Duration,
    commit_timeout: Duration,
) -> StoreResult<ScriptReport> {
    let text = tokio::fs::read_to_string(script)
        .await
        .map_err(|e| StoreError::Script(format!("{}: {}", script.display(), e)))?;
    let statements = split_statements(&text);

    tracing::info!(
        event = "INIT_STARTED",
        script = %script.display(),
        statements = statements.len()
    );

    let report = race("initialization", init_timeout, async move {
        store.run_script(&statements, commit_timeout).await
    })
    .await?;

    tracing::info!(
        event = "INIT_COMPLETE",
        executed = report.executed,
        skipped_drops = report.skipped_drops
    );
    Ok(report)
}
