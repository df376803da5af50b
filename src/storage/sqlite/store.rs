//! `SQLite` fact store.

use super::connection::{acquire_lock, configure_connection};
use super::metrics::record_query_metrics;
use super::schema::FACT_SCHEMA;
use super::sql::build_select;
use crate::storage::query::{FactQuery, FactStore, Row};
use crate::{Error, Result};
use rusqlite::Connection;
use rusqlite::types::ValueRef;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

/// Fact store backed by a `SQLite` database.
///
/// Uses a `Mutex<Connection>` for thread-safe access. Lookups run queries on the
/// blocking pool, so the mutex serializes them without stalling the runtime.
pub struct SqliteFactStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl SqliteFactStore {
    /// Opens (or creates) a database file and ensures the schema exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema cannot be
    /// created.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| Error::OperationFailed {
                operation: "create_db_dir".to_string(),
                cause: e.to_string(),
            })?;
        }

        let conn = Connection::open(db_path).map_err(|e| Error::OperationFailed {
            operation: "open_fact_store".to_string(),
            cause: format!("{}: {e}", db_path.display()),
        })?;
        configure_connection(&conn)?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path: Some(db_path.to_path_buf()),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Creates an in-memory store with the schema applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::OperationFailed {
            operation: "open_fact_store".to_string(),
            cause: e.to_string(),
        })?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path: None,
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Returns the database path, if file-backed.
    #[must_use]
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Executes a batch of SQL statements (seeding, maintenance).
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        let conn = acquire_lock(&self.conn);
        conn.execute_batch(sql).map_err(|e| Error::OperationFailed {
            operation: "execute_batch".to_string(),
            cause: e.to_string(),
        })
    }

    fn initialize_schema(&self) -> Result<()> {
        self.execute_batch(FACT_SCHEMA)
    }

    fn run_query(&self, query: &FactQuery) -> Result<Vec<Row>> {
        let (sql, params) = build_select(query)?;
        let conn = acquire_lock(&self.conn);

        let mut stmt = conn.prepare(&sql).map_err(|e| query_error(query, &e))?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| (*c).to_string()).collect();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(|e| query_error(query, &e))?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(|e| query_error(query, &e))? {
            let mut map = Row::new();
            for (index, column) in columns.iter().enumerate() {
                let value = row.get_ref(index).map_err(|e| query_error(query, &e))?;
                map.insert(column.clone(), value_to_json(value));
            }
            out.push(map);
        }

        Ok(out)
    }
}

impl FactStore for SqliteFactStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn query(&self, query: &FactQuery) -> Result<Vec<Row>> {
        let start = Instant::now();
        let result = self.run_query(query);
        let status = if result.is_ok() { "success" } else { "error" };
        record_query_metrics(self.backend_name(), &query.table, start, status);
        result
    }
}

fn query_error(query: &FactQuery, e: &rusqlite::Error) -> Error {
    Error::OperationFailed {
        operation: format!("query:{}", query.table),
        cause: e.to_string(),
    }
}

fn value_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::String(format!("<{} bytes>", bytes.len())),
    }
}
