//! Caller-side timeouts.
//!
//! `race` resolves with whichever finishes first: the operation or the
//! timer. The operation runs on its own task and is NOT aborted when the
//! timer wins. It may still complete, and mutate the store, after the
//! caller has already reported a timeout.

use std::future::Future;
use std::time::Duration;

use super::errors::{StoreError, StoreResult};

/// Race `operation` against a timer of `limit`.
pub async fn race<F, T>(operation: &'static str, limit: Duration, work: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::spawn(work);

    tokio::select! {
        joined = handle => joined.map_err(|e| StoreError::Task(e.to_string()))?,
        _ = tokio::time::sleep(limit) => {
            tracing::warn!(
                event = "OPERATION_TIMED_OUT",
                operation,
                after_ms = limit.as_millis() as u64,
                "operation abandoned by caller; it may still complete"
            );
            Err(StoreError::Timeout { operation, after: limit })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_operation_wins() {
        let result = race("fast", Duration::from_secs(5), async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_error_passes_through() {
        let result: StoreResult<()> = race("failing", Duration::from_secs(5), async {
            Err(StoreError::Unavailable("down".into()))
        })
        .await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_wins_and_loser_keeps_running() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();

        let result = race("slow", Duration::from_millis(100), async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            flag.store(true, Ordering::SeqCst);
            Ok(())
        })
        .await;

        assert!(matches!(
            result,
            Err(StoreError::Timeout { operation: "slow", .. })
        ));
        assert!(!finished.load(Ordering::SeqCst));

        // The abandoned operation still runs to completion.
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(finished.load(Ordering::SeqCst));
    }
}
