//! Deadline-bounded query execution on the blocking pool.

use super::query::{FactQuery, FactStore, Row};
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;

/// Runs a query on the blocking pool, bounded by an optional deadline.
///
/// A query that outlives its deadline keeps running on its worker thread, but the
/// caller gets [`Error::Timeout`] immediately and moves on.
///
/// # Errors
///
/// Returns the store's error, [`Error::Timeout`] when the deadline expires, or
/// [`Error::OperationFailed`] if the worker panicked.
pub async fn query_with_deadline(
    store: &Arc<dyn FactStore>,
    query: FactQuery,
    deadline: Option<Duration>,
) -> Result<Vec<Row>> {
    let operation = format!("query:{}", query.table);
    let store = Arc::clone(store);
    let task = tokio::task::spawn_blocking(move || store.query(&query));

    let joined = match deadline {
        Some(deadline) => tokio::time::timeout(deadline, task)
            .await
            .map_err(|_| Error::Timeout {
                operation: operation.clone(),
                deadline_ms: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
            })?,
        None => task.await,
    };

    joined.map_err(|e| Error::OperationFailed {
        operation,
        cause: e.to_string(),
    })?
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowStore(Duration);

    impl FactStore for SlowStore {
        fn backend_name(&self) -> &'static str {
            "slow"
        }

        fn query(&self, _query: &FactQuery) -> Result<Vec<Row>> {
            std::thread::sleep(self.0);
            Ok(vec![Row::new()])
        }
    }

    #[tokio::test]
    async fn test_returns_rows_within_deadline() {
        let store: Arc<dyn FactStore> = Arc::new(SlowStore(Duration::from_millis(1)));
        let rows = query_with_deadline(
            &store,
            FactQuery::table("frameworks"),
            Some(Duration::from_secs(5)),
        )
        .await
        .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_times_out() {
        let store: Arc<dyn FactStore> = Arc::new(SlowStore(Duration::from_millis(300)));
        let result = query_with_deadline(
            &store,
            FactQuery::table("frameworks"),
            Some(Duration::from_millis(20)),
        )
        .await;
        assert!(matches!(result, Err(Error::Timeout { deadline_ms: 20, .. })));
    }

    #[tokio::test]
    async fn test_no_deadline_waits() {
        let store: Arc<dyn FactStore> = Arc::new(SlowStore(Duration::from_millis(30)));
        let rows = query_with_deadline(&store, FactQuery::table("frameworks"), None)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }
}
