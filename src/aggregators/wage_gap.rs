//! Wage gap between two occupations.

use super::Aggregators;
use crate::lookups::NATIONAL;
use crate::models::{LookupResult, WageGap};
use tracing::instrument;

impl Aggregators {
    /// Compares median wages of two occupations in the same area.
    ///
    /// Both wage lookups run concurrently. The gap is not-found unless both are
    /// found and `b`'s median is positive. `gap_percent` is
    /// `round(|median_a - median_b| / median_b * 100)`.
    #[instrument(skip(self))]
    pub async fn wage_gap(
        &self,
        occupation_a: &str,
        occupation_b: &str,
        state: Option<&str>,
    ) -> LookupResult<WageGap> {
        let (a, b) = tokio::join!(
            self.lookups.wages(occupation_a, state),
            self.lookups.wages(occupation_b, state)
        );
        let Some(b) = b.into_data() else {
            return LookupResult::not_found();
        };
        if !a.is_found() || b.median_annual <= 0.0 {
            return LookupResult::not_found();
        }

        a.map(|a| {
            let gap = (a.median_annual - b.median_annual).abs();
            WageGap {
                gap_percent: gap_percent(gap, b.median_annual),
                a_pays_more: a.median_annual > b.median_annual,
                area: state.map_or_else(|| NATIONAL.to_string(), |s| s.trim().to_uppercase()),
                occupation_a: a.soc_code,
                occupation_b: b.soc_code,
                title_a: a.occupation_title,
                title_b: b.occupation_title,
                median_a: a.median_annual,
                median_b: b.median_annual,
                gap,
            }
        })
    }
}

#[allow(clippy::cast_possible_truncation)]
fn gap_percent(gap: f64, median_b: f64) -> i64 {
    (gap / median_b * 100.0).round() as i64
}
