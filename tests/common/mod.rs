//! Shared fixtures for integration tests.
#![allow(dead_code, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use workfacts::storage::{FactQuery, Row};
use workfacts::{Error, FactStore, Lookups, Result, SqliteFactStore};

/// Freshness rows for every fact table.
pub const FRESHNESS: &str = include_str!("../fixtures/freshness.sql");

/// Iowa-centered fact rows.
pub const FACTS: &str = include_str!("../fixtures/facts.sql");

/// In-memory store with freshness and facts loaded.
pub fn seeded_store() -> Arc<SqliteFactStore> {
    let store = SqliteFactStore::in_memory().expect("in-memory store");
    store.execute_batch(FRESHNESS).expect("seed freshness");
    store.execute_batch(FACTS).expect("seed facts");
    Arc::new(store)
}

/// In-memory store with facts but no freshness rows.
pub fn uncited_store() -> Arc<SqliteFactStore> {
    let store = SqliteFactStore::in_memory().expect("in-memory store");
    store.execute_batch(FACTS).expect("seed facts");
    Arc::new(store)
}

/// Lookups over the seeded store.
pub fn seeded_lookups() -> Lookups {
    Lookups::new(seeded_store())
}

/// Store that delays queries against one table and delegates the rest.
pub struct SlowTableStore {
    inner: Arc<SqliteFactStore>,
    table: &'static str,
    delay: Duration,
}

impl SlowTableStore {
    pub fn new(table: &'static str, delay: Duration) -> Self {
        Self {
            inner: seeded_store(),
            table,
            delay,
        }
    }
}

impl FactStore for SlowTableStore {
    fn backend_name(&self) -> &'static str {
        "slow"
    }

    fn query(&self, query: &FactQuery) -> Result<Vec<Row>> {
        if query.table == self.table {
            std::thread::sleep(self.delay);
        }
        self.inner.query(query)
    }
}

/// Store whose fact queries fail while freshness reads succeed.
pub struct FailingFactStore {
    inner: Arc<SqliteFactStore>,
    pub failures: AtomicUsize,
}

impl FailingFactStore {
    pub fn new() -> Self {
        Self {
            inner: seeded_store(),
            failures: AtomicUsize::new(0),
        }
    }
}

impl FactStore for FailingFactStore {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    fn query(&self, query: &FactQuery) -> Result<Vec<Row>> {
        if query.table == "data_freshness" {
            return self.inner.query(query);
        }
        self.failures.fetch_add(1, Ordering::SeqCst);
        Err(Error::OperationFailed {
            operation: format!("query:{}", query.table),
            cause: "connection reset by peer".to_string(),
        })
    }
}

/// Seeded store that counts queries per table.
pub struct CountingStore {
    inner: Arc<SqliteFactStore>,
    counts: Mutex<HashMap<String, usize>>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self {
            inner: seeded_store(),
            counts: Mutex::new(HashMap::new()),
        }
    }

    /// Queries issued against `table` so far.
    pub fn queries(&self, table: &str) -> usize {
        self.counts
            .lock()
            .expect("counts lock")
            .get(table)
            .copied()
            .unwrap_or(0)
    }
}

impl FactStore for CountingStore {
    fn backend_name(&self) -> &'static str {
        "counting"
    }

    fn query(&self, query: &FactQuery) -> Result<Vec<Row>> {
        *self
            .counts
            .lock()
            .expect("counts lock")
            .entry(query.table.clone())
            .or_default() += 1;
        self.inner.query(query)
    }
}
