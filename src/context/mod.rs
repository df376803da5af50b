//! Prompt context assembly.
//!
//! A [`ContextBuilder`] turns a [`ProjectDescriptor`](crate::models::ProjectDescriptor)
//! into a [`ContextBundle`]: a section-labeled text block of verified facts,
//! the deduplicated list of fact tables behind it, the structured sub-results,
//! and a sources section built from the freshness registry.
//!
//! Sections appear in a fixed order:
//!
//! | Section | Tables |
//! |---------|--------|
//! | Occupation | wages, projections, skills, visa demand, state priority |
//! | Wage Gap | wages |
//! | Institution | institutions |
//! | Service Area Economy | service-area counties, demographics, industries, employers |
//! | Program Completions | completions |
//! | State Demographics | state demographics (only without county figures) |
//! | State Statutes | statutes |
//! | Credential Requirements | credentials |
//! | Frameworks | frameworks |
//! | Sources | freshness registry |
//!
//! When no table contributes, the block still carries [`NO_VERIFIED_DATA`] so a
//! downstream consumer knows to fall back and mark its figures as unverified.

mod builder;
pub mod format;
mod options;

pub use builder::{ContextBuilder, NO_VERIFIED_DATA};
pub use options::{ContextBundle, ContextOptions, ContextRaw};
