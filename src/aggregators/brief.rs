//! Full occupation brief.

use super::Aggregators;
use super::instructors::instructor_for;
use crate::models::{AvailabilityRule, FactTable, LookupResult, OccupationBrief};
use tracing::instrument;

impl Aggregators {
    /// Everything known about an occupation, in a state or nationally.
    ///
    /// Wages, projections, skills, visa demand and state priority are fetched
    /// concurrently, together with the instructor wage gap when a pairing is
    /// known. State priority needs a state and is not-found without one.
    ///
    /// `tables_used` lists exactly the tables whose sub-lookup was found.
    #[instrument(skip(self))]
    pub async fn occupation_brief(
        &self,
        soc_code: &str,
        state: Option<&str>,
        rule: AvailabilityRule,
    ) -> OccupationBrief {
        let instructor_soc = instructor_for(soc_code);
        let lookups = &self.lookups;

        let (wages, projections, skills, visa_demand, state_priority, wage_gap) = tokio::join!(
            lookups.wages(soc_code, state),
            lookups.projections(soc_code, state),
            lookups.skills(soc_code, None),
            lookups.visa_demand(soc_code, state),
            async {
                match state {
                    Some(state) => lookups.state_priority(soc_code, state).await,
                    None => LookupResult::not_found(),
                }
            },
            async {
                match instructor_soc {
                    Some(instructor) => Some(self.wage_gap(soc_code, instructor, state).await),
                    None => None,
                }
            }
        );

        let tables_used = [
            (wages.is_found(), FactTable::OccupationWages),
            (projections.is_found(), FactTable::OccupationProjections),
            (skills.is_found(), FactTable::OccupationSkills),
            (visa_demand.is_found(), FactTable::VisaDemand),
            (state_priority.is_found(), FactTable::StatePriorityOccupations),
        ]
        .into_iter()
        .filter_map(|(found, table)| found.then_some(table))
        .collect();

        OccupationBrief {
            soc_code: soc_code.trim().to_string(),
            state_code: state.map(|s| s.trim().to_uppercase()),
            available: rule.evaluate(wages.is_found(), projections.is_found()),
            availability_rule: rule,
            instructor_soc: instructor_soc.map(ToString::to_string),
            wage_gap,
            wages,
            projections,
            skills,
            visa_demand,
            state_priority,
            tables_used,
        }
    }
}
