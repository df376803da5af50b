//! Fact store access.
//!
//! The [`FactStore`] trait is the only way this crate reads facts. The bundled
//! backend is [`SqliteFactStore`]; ingestion jobs outside this crate populate it.

mod blocking;
mod query;
pub mod sqlite;

pub use blocking::query_with_deadline;
pub use query::{Direction, FactQuery, FactStore, OrderBy, Predicate, Row};
pub use sqlite::SqliteFactStore;
