//! Tool schema definitions.
//!
//! Each schema mirrors the parameters of the lookup or aggregator it dispatches to.

use super::ToolDefinition;
use serde_json::{Value, json};

fn tool(name: &str, description: &str, input_schema: Value) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

fn soc_property() -> Value {
    json!({
        "type": "string",
        "description": "SOC occupation code, e.g. 29-2052",
        "pattern": "^\\d{2}-\\d{4}(\\.\\d{2})?$"
    })
}

fn state_property(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description,
        "minLength": 2,
        "maxLength": 2
    })
}

/// Defines the wage lookup tool.
pub fn lookup_wages_tool() -> ToolDefinition {
    tool(
        "lookup_wages",
        "Median and percentile annual wages for an occupation in a state, or nationally when no state is given. A state lookup never falls back to national figures.",
        json!({
            "type": "object",
            "properties": {
                "soc_code": soc_property(),
                "state": state_property("Two-letter state code; omit for national")
            },
            "required": ["soc_code"]
        }),
    )
}

/// Defines the projections lookup tool.
pub fn lookup_projections_tool() -> ToolDefinition {
    tool(
        "lookup_projections",
        "Ten-year employment projections for an occupation: base and projected employment, percent change and annual openings.",
        json!({
            "type": "object",
            "properties": {
                "soc_code": soc_property(),
                "state": state_property("Two-letter state code; omit for national")
            },
            "required": ["soc_code"]
        }),
    )
}

/// Defines the skills lookup tool.
pub fn lookup_skills_tool() -> ToolDefinition {
    tool(
        "lookup_skills",
        "Most important skills, knowledge areas and abilities for an occupation, ranked by importance.",
        json!({
            "type": "object",
            "properties": {
                "soc_code": soc_property(),
                "category": {
                    "type": "string",
                    "description": "Restrict to one category",
                    "enum": ["skill", "knowledge", "ability"]
                }
            },
            "required": ["soc_code"]
        }),
    )
}

/// Defines the visa demand lookup tool.
pub fn lookup_visa_demand_tool() -> ToolDefinition {
    tool(
        "lookup_visa_demand",
        "Foreign labor certification volume by fiscal year for an occupation, a signal of unmet domestic demand.",
        json!({
            "type": "object",
            "properties": {
                "soc_code": soc_property(),
                "state": state_property("Two-letter state code; omit for national")
            },
            "required": ["soc_code"]
        }),
    )
}

/// Defines the state priority tool.
pub fn check_state_priority_tool() -> ToolDefinition {
    tool(
        "check_state_priority",
        "Whether a state designates an occupation as in-demand, with WIOA eligibility and ETPL listing flags.",
        json!({
            "type": "object",
            "properties": {
                "soc_code": soc_property(),
                "state": state_property("Two-letter state code")
            },
            "required": ["soc_code", "state"]
        }),
    )
}

/// Defines the occupation brief tool.
pub fn get_occupation_brief_tool() -> ToolDefinition {
    tool(
        "get_occupation_brief",
        "Everything known about an occupation in one call: wages, projections, skills, visa demand, state priority and the wage gap to its postsecondary instructor occupation.",
        json!({
            "type": "object",
            "properties": {
                "soc_code": soc_property(),
                "state": state_property("Two-letter state code; omit for national"),
                "availability_rule": {
                    "type": "string",
                    "description": "Whether wages OR projections (any) or wages AND projections (all) make the brief available. Default: any",
                    "enum": ["any", "all"]
                }
            },
            "required": ["soc_code"]
        }),
    )
}

/// Defines the wage comparison tool.
pub fn compare_wages_tool() -> ToolDefinition {
    tool(
        "compare_wages",
        "Compares median wages of two occupations in the same area, e.g. an industry role against its instructor role.",
        json!({
            "type": "object",
            "properties": {
                "occupation_a": soc_property(),
                "occupation_b": soc_property(),
                "state": state_property("Two-letter state code; omit for national")
            },
            "required": ["occupation_a", "occupation_b"]
        }),
    )
}

/// Defines the institution profile tool.
pub fn get_institution_profile_tool() -> ToolDefinition {
    tool(
        "get_institution_profile",
        "Profile of one institution: location, sector and enrollment.",
        json!({
            "type": "object",
            "properties": {
                "institution_id": {
                    "type": "integer",
                    "description": "Institution identifier"
                }
            },
            "required": ["institution_id"]
        }),
    )
}

/// Defines the institution search tool.
pub fn search_institutions_tool() -> ToolDefinition {
    tool(
        "search_institutions",
        "Finds institutions whose name contains a fragment, optionally within one state.",
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Name fragment, case-insensitive"
                },
                "state": state_property("Two-letter state code")
            },
            "required": ["name"]
        }),
    )
}

/// Defines the program completions tool.
pub fn get_program_completions_tool() -> ToolDefinition {
    tool(
        "get_program_completions",
        "Program completions reported by an institution, largest first.",
        json!({
            "type": "object",
            "properties": {
                "institution_id": {
                    "type": "integer",
                    "description": "Institution identifier"
                },
                "cip_prefix": {
                    "type": "string",
                    "description": "CIP code prefix, e.g. 51. for health programs"
                }
            },
            "required": ["institution_id"]
        }),
    )
}

/// Defines the service area economy tool.
pub fn get_service_area_economy_tool() -> ToolDefinition {
    tool(
        "get_service_area_economy",
        "Economic rollup of an institution's service-area counties: population, income, top industries and largest employers.",
        json!({
            "type": "object",
            "properties": {
                "institution_id": {
                    "type": "integer",
                    "description": "Institution identifier"
                }
            },
            "required": ["institution_id"]
        }),
    )
}

/// Defines the county demographics tool.
pub fn get_county_demographics_tool() -> ToolDefinition {
    tool(
        "get_county_demographics",
        "Population, income, poverty and unemployment for a list of counties in one state.",
        json!({
            "type": "object",
            "properties": {
                "state": state_property("Two-letter state code"),
                "county_fips": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Five-digit county FIPS codes"
                }
            },
            "required": ["state", "county_fips"]
        }),
    )
}

/// Defines the statute search tool.
pub fn search_statutes_tool() -> ToolDefinition {
    tool(
        "search_statutes",
        "State statutes relevant to workforce education, optionally filtered by category keyword.",
        json!({
            "type": "object",
            "properties": {
                "state": state_property("Two-letter state code"),
                "category": {
                    "type": "string",
                    "description": "Category keyword, e.g. workforce training"
                }
            },
            "required": ["state"]
        }),
    )
}

/// Defines the credential requirements tool.
pub fn get_credential_requirements_tool() -> ToolDefinition {
    tool(
        "get_credential_requirements",
        "Licenses, registrations and certifications a state requires, optionally for one occupation.",
        json!({
            "type": "object",
            "properties": {
                "state": state_property("Two-letter state code"),
                "soc_code": soc_property()
            },
            "required": ["state"]
        }),
    )
}

/// Defines the framework search tool.
pub fn search_frameworks_tool() -> ToolDefinition {
    tool(
        "search_frameworks",
        "Competency and skills frameworks matching any of the given keywords.",
        json!({
            "type": "object",
            "properties": {
                "keywords": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": 1,
                    "description": "Keywords matched against framework names, descriptions and tags"
                }
            },
            "required": ["keywords"]
        }),
    )
}

/// Defines the project resolution tool.
pub fn resolve_project_tool() -> ToolDefinition {
    tool(
        "resolve_project",
        "Resolves free-text geography and program names to a state code and SOC code. Use before other tools when only names are known.",
        json!({
            "type": "object",
            "properties": {
                "geography": {
                    "type": "string",
                    "description": "Free-text place, e.g. Cedar Rapids, Iowa"
                },
                "program_name": {
                    "type": "string",
                    "description": "Program or occupation name"
                },
                "soc_code": soc_property(),
                "institution_state": state_property("State of the institution, used when geography names none")
            }
        }),
    )
}

/// All tool definitions in catalogue order.
pub fn all() -> Vec<ToolDefinition> {
    vec![
        lookup_wages_tool(),
        lookup_projections_tool(),
        lookup_skills_tool(),
        lookup_visa_demand_tool(),
        check_state_priority_tool(),
        get_occupation_brief_tool(),
        compare_wages_tool(),
        get_institution_profile_tool(),
        search_institutions_tool(),
        get_program_completions_tool(),
        get_service_area_economy_tool(),
        get_county_demographics_tool(),
        search_statutes_tool(),
        get_credential_requirements_tool(),
        search_frameworks_tool(),
        resolve_project_tool(),
    ]
}
