//! # Workfacts
//!
//! Resolves loosely specified workforce questions (an occupation, a state, an
//! institution) into verified, citable facts drawn from independently sourced
//! fact tables.
//!
//! The same facts are consumable two ways:
//!
//! - as a formatted, section-labeled text block for prompt injection
//!   ([`ContextBuilder`]), with an assembled sources section
//! - as individually callable tools for an LLM agent ([`ToolRegistry`]), optionally
//!   served over stdio JSON-RPC ([`mcp::McpServer`])
//!
//! ## Guarantees
//!
//! - Every lookup returns a [`LookupResult`] envelope. A missing record, a failed
//!   query, and an expired deadline all produce the canonical not-found envelope.
//! - Citation text always comes from the [`FreshnessRegistry`].
//! - Aggregates degrade per missing part; they never fail as a whole.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use workfacts::{ContextBuilder, ContextOptions, Lookups, ProjectDescriptor};
//! use workfacts::storage::SqliteFactStore;
//!
//! let store = Arc::new(SqliteFactStore::open("facts.db")?);
//! let lookups = Lookups::new(store);
//! let builder = ContextBuilder::new(lookups);
//! let bundle = builder
//!     .build(&ProjectDescriptor::new().with_geography("Cedar Rapids, IA"), &ContextOptions::default())
//!     .await;
//! println!("{}", bundle.prompt_block);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod aggregators;
pub mod config;
pub mod context;
pub mod freshness;
pub mod lookups;
pub mod mcp;
pub mod models;
pub mod observability;
pub mod resolution;
pub mod storage;
pub mod tools;

pub use aggregators::{AvailabilityRule, Aggregators};
pub use config::WorkfactsConfig;
pub use context::{ContextBuilder, ContextBundle, ContextOptions};
pub use freshness::{FreshnessRegistry, generate_citations};
pub use lookups::{LookupDiagnostics, Lookups};
pub use models::{DataContext, FactTable, Freshness, LookupResult, ProjectDescriptor};
pub use storage::{FactStore, SqliteFactStore};
pub use tools::{ToolDefinition, ToolRegistry};

/// Error type for workfacts operations.
///
/// These errors stay inside the crate: the store, the freshness registry and the
/// configuration loader raise them, and every lookup boundary converts them into
/// a not-found envelope.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Malformed query identifiers, bad tool arguments, bad config values |
/// | `OperationFailed` | `SQLite` errors, worker join failures, I/O failures |
/// | `Timeout` | A lookup exceeded its deadline |
/// | `NotFound` | A named resource (config file, freshness row) does not exist |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// An operation exceeded its deadline.
    #[error("operation '{operation}' timed out after {deadline_ms}ms")]
    Timeout {
        /// The operation that timed out.
        operation: String,
        /// The deadline that expired.
        deadline_ms: u64,
    },

    /// A named resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Result type alias for workfacts operations.
pub type Result<T> = std::result::Result<T, Error>;
