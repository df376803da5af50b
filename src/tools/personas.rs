//! Per-persona tool subsets.
//!
//! Subsetting only bounds prompt size; any tool stays callable by name.

/// Tools every persona receives.
pub const COMMON_TOOLS: &[&str] = &["get_occupation_brief", "lookup_wages", "search_frameworks"];

/// Persona keys and their additional tools.
pub const PERSONAS: &[(&str, &[&str])] = &[
    (
        "labor_market_analyst",
        &[
            "lookup_projections",
            "lookup_skills",
            "lookup_visa_demand",
            "check_state_priority",
            "compare_wages",
            "get_county_demographics",
        ],
    ),
    (
        "compliance_reviewer",
        &[
            "check_state_priority",
            "search_statutes",
            "get_credential_requirements",
        ],
    ),
    (
        "program_designer",
        &[
            "lookup_skills",
            "get_program_completions",
            "get_credential_requirements",
            "resolve_project",
        ],
    ),
    (
        "institutional_researcher",
        &[
            "get_institution_profile",
            "search_institutions",
            "get_program_completions",
            "get_service_area_economy",
            "get_county_demographics",
        ],
    ),
];

/// Returns the persona-specific tools, or `None` for an unknown persona.
#[must_use]
pub fn persona_tools(persona: &str) -> Option<&'static [&'static str]> {
    let persona = persona.trim();
    PERSONAS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(persona))
        .map(|(_, tools)| *tools)
}

/// Returns true if a tool is offered to a persona.
#[must_use]
pub fn is_offered(persona: &str, tool: &str) -> bool {
    COMMON_TOOLS.contains(&tool) || persona_tools(persona).is_some_and(|tools| tools.contains(&tool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_lookup() {
        assert!(persona_tools("compliance_reviewer").is_some());
        assert!(persona_tools(" Program_Designer ").is_some());
        assert!(persona_tools("astronaut").is_none());
    }

    #[test]
    fn test_common_tools_always_offered() {
        for tool in COMMON_TOOLS {
            assert!(is_offered("astronaut", tool));
            assert!(is_offered("compliance_reviewer", tool));
        }
        assert!(!is_offered("astronaut", "search_statutes"));
        assert!(is_offered("compliance_reviewer", "search_statutes"));
    }
}
