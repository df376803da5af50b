//! Connection setup and lock handling for the `SQLite` fact store.

use crate::{Error, Result};
use rusqlite::Connection;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// How long a query waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Locks a mutex, recovering the guard if a previous holder panicked.
///
/// Shared by the store connection and the freshness cache; neither holds
/// state a panic could leave half-written.
pub fn acquire_lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Mutex was poisoned, recovering");
        metrics::counter!("sqlite_mutex_poison_recovery_total").increment(1);
        poisoned.into_inner()
    })
}

/// Prepares a file-backed connection for concurrent readers.
///
/// Fact tables are loaded in bulk and read per request, so the connection uses
/// WAL journaling with relaxed syncs and waits out writer locks.
pub fn configure_connection(conn: &Connection) -> Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)
        .map_err(|e| Error::OperationFailed {
            operation: "configure_connection".to_string(),
            cause: e.to_string(),
        })?;
    // Read-only media cannot switch to WAL; the default journal still works.
    let _ = conn.pragma_update(None, "journal_mode", "WAL");
    let _ = conn.pragma_update(None, "synchronous", "NORMAL");
    Ok(())
}
