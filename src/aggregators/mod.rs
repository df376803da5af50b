//! Aggregators: views composed from several lookups.
//!
//! Independent legs run concurrently with `tokio::join!`; dependent legs are
//! sequenced. Each leg is bounded by the lookup deadline, so a slow source
//! degrades that leg to not-found without stalling its siblings. A derived
//! field is only filled when the lookups it derives from were found.

mod brief;
mod instructors;
mod reconcile;
mod service_area;
mod wage_gap;

pub use crate::models::AvailabilityRule;
pub use instructors::instructor_for;
pub use reconcile::DISCREPANCY_THRESHOLD;

use crate::lookups::Lookups;

/// Aggregation service over a [`Lookups`] instance.
#[derive(Clone)]
pub struct Aggregators {
    lookups: Lookups,
}

impl Aggregators {
    /// Creates an aggregation service.
    #[must_use]
    pub const fn new(lookups: Lookups) -> Self {
        Self { lookups }
    }

    /// Returns the underlying lookups.
    #[must_use]
    pub const fn lookups(&self) -> &Lookups {
        &self.lookups
    }
}

/// Rounds to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
