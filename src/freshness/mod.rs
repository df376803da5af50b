//! Freshness and citation metadata.
//!
//! [`FreshnessRegistry`] is the only place citation text comes from.
//! [`generate_citations`] turns a list of used tables into a sources section.

mod citations;
mod registry;

pub use citations::{SOURCES_HEADING, generate_citations};
pub use registry::FreshnessRegistry;
