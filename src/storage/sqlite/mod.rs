//! `SQLite` fact store.
//!
//! ## Module Structure
//!
//! - [`connection`]: Connection handling (`Mutex<Connection>`, lock acquisition, configuration)
//! - [`sql`]: Query translation (identifier validation, LIKE escaping, parameter binding)
//! - [`schema`]: Fact table and freshness registry schema
//! - [`metrics`]: Query metrics recording

mod connection;
mod metrics;
mod schema;
mod sql;
mod store;

pub use connection::{acquire_lock, configure_connection};
pub use metrics::record_query_metrics;
pub use schema::{FACT_SCHEMA, FRESHNESS_TABLE};
pub use sql::{build_select, escape_like_wildcards, is_valid_identifier, to_sql_value};
pub use store::SqliteFactStore;
