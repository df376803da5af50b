//! Tool bridge: lookups exposed as callable tools for an LLM agent.
//!
//! # Module Structure
//!
//! - [`definitions`]: tool schemas (JSON Schema for input validation)
//! - `handlers`: dispatch targets and plain-text rendering
//! - [`personas`]: per-persona tool subsets
//!
//! Every call runs against a fresh freshness registry, so no state carries over
//! between calls. Execution never fails: unknown tools and bad arguments come
//! back as explanatory text.

mod args;
pub mod definitions;
mod handlers;
pub mod personas;

pub use personas::{COMMON_TOOLS, PERSONAS, persona_tools};

use crate::Error;
use crate::aggregators::Aggregators;
use crate::lookups::Lookups;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::Instrument;

/// Definition of a callable tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: String,
    /// Tool description.
    pub description: String,
    /// JSON Schema for input validation.
    pub input_schema: Value,
}

/// Registry of workfacts tools.
#[derive(Clone)]
pub struct ToolRegistry {
    lookups: Lookups,
    tools: Vec<ToolDefinition>,
}

impl ToolRegistry {
    /// Creates a registry with the full tool catalogue.
    #[must_use]
    pub fn new(lookups: Lookups) -> Self {
        Self {
            lookups,
            tools: definitions::all(),
        }
    }

    /// Returns all tool definitions in catalogue order.
    #[must_use]
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Gets a tool definition by name.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    /// Returns the common tools plus the persona's own tools, in catalogue
    /// order. Unknown personas get the common tools only.
    #[must_use]
    pub fn get_tools_for_agent(&self, persona: &str) -> Vec<&ToolDefinition> {
        self.tools
            .iter()
            .filter(|tool| personas::is_offered(persona, &tool.name))
            .collect()
    }

    /// Executes a tool and renders its result as text.
    ///
    /// Unknown tool names yield `Unknown tool: {name}`; malformed or missing
    /// arguments yield `Invalid input: ...`.
    pub async fn execute(&self, name: &str, input: &Value) -> String {
        let span = tracing::info_span!("tool.call", tool = name);
        let start = Instant::now();

        let (status, text) = async {
            let aggregators = Aggregators::new(self.lookups.scoped());
            let outcome = match name {
                "lookup_wages" => handlers::lookup_wages(&aggregators, input).await,
                "lookup_projections" => handlers::lookup_projections(&aggregators, input).await,
                "lookup_skills" => handlers::lookup_skills(&aggregators, input).await,
                "lookup_visa_demand" => handlers::lookup_visa_demand(&aggregators, input).await,
                "check_state_priority" => handlers::check_state_priority(&aggregators, input).await,
                "get_occupation_brief" => handlers::get_occupation_brief(&aggregators, input).await,
                "compare_wages" => handlers::compare_wages(&aggregators, input).await,
                "get_institution_profile" => {
                    handlers::get_institution_profile(&aggregators, input).await
                },
                "search_institutions" => handlers::search_institutions(&aggregators, input).await,
                "get_program_completions" => {
                    handlers::get_program_completions(&aggregators, input).await
                },
                "get_service_area_economy" => {
                    handlers::get_service_area_economy(&aggregators, input).await
                },
                "get_county_demographics" => {
                    handlers::get_county_demographics(&aggregators, input).await
                },
                "search_statutes" => handlers::search_statutes(&aggregators, input).await,
                "get_credential_requirements" => {
                    handlers::get_credential_requirements(&aggregators, input).await
                },
                "search_frameworks" => handlers::search_frameworks(&aggregators, input).await,
                "resolve_project" => handlers::resolve_project(input),
                _ => {
                    tracing::warn!(tool = name, "Unknown tool requested");
                    return ("unknown", format!("Unknown tool: {name}"));
                },
            };

            match outcome {
                Ok(text) => ("success", text),
                Err(Error::InvalidInput(msg)) => {
                    tracing::debug!(error = %msg, "Rejected tool input");
                    ("invalid_input", format!("Invalid input: {msg}"))
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Tool call failed");
                    ("error", format!("Tool {name} failed: {e}"))
                },
            }
        }
        .instrument(span)
        .await;

        metrics::counter!(
            "tool_calls_total",
            "tool" => name.to_string(),
            "status" => status
        )
        .increment(1);
        metrics::histogram!("tool_call_duration_ms", "tool" => name.to_string())
            .record(start.elapsed().as_secs_f64() * 1000.0);

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookups::testing::seeded_store;
    use serde_json::json;
    use std::collections::HashSet;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(Lookups::new(seeded_store()))
    }

    #[test]
    fn test_catalogue() {
        let registry = registry();
        assert_eq!(registry.definitions().len(), 16);

        let names: HashSet<&str> = registry.definitions().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), 16);
        for tool in registry.definitions() {
            assert_eq!(tool.input_schema["type"], json!("object"));
            assert!(!tool.description.is_empty());
        }
        let wages = registry.get_tool("lookup_wages").unwrap();
        assert_eq!(wages.input_schema["required"], json!(["soc_code"]));
    }

    #[test]
    fn test_persona_tools_reference_catalogue() {
        let registry = registry();
        for (_, tools) in PERSONAS {
            for tool in tools.iter().chain(COMMON_TOOLS) {
                assert!(registry.get_tool(tool).is_some(), "{tool}");
            }
        }
    }

    #[test]
    fn test_tools_for_agent() {
        let registry = registry();

        let unknown: Vec<&str> = registry
            .get_tools_for_agent("astronaut")
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(unknown, ["lookup_wages", "get_occupation_brief", "search_frameworks"]);

        let compliance: Vec<&str> = registry
            .get_tools_for_agent("compliance_reviewer")
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(
            compliance,
            [
                "lookup_wages",
                "check_state_priority",
                "get_occupation_brief",
                "search_statutes",
                "get_credential_requirements",
                "search_frameworks",
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let text = registry().execute("lookup_weather", &json!({})).await;
        assert_eq!(text, "Unknown tool: lookup_weather");
    }

    #[tokio::test]
    async fn test_missing_required_input() {
        let text = registry().execute("check_state_priority", &json!({"soc_code": "29-2052"})).await;
        assert!(text.starts_with("Invalid input:"), "{text}");
        assert!(text.contains("state"));
    }

    #[tokio::test]
    async fn test_wrong_type_input() {
        let text = registry().execute("get_institution_profile", &json!({"institution_id": "one"})).await;
        assert!(text.starts_with("Invalid input:"), "{text}");
    }

    #[tokio::test]
    async fn test_calls_do_not_share_registry() {
        let registry = registry();
        let first = registry.execute("search_statutes", &json!({"state": "IA"})).await;
        let second = registry.execute("search_statutes", &json!({"state": "IA"})).await;
        assert_eq!(first, second);
        assert_eq!(registry.lookups.registry().cached_len(), 0);
    }

    #[tokio::test]
    async fn test_every_tool_answers_with_text() {
        let registry = registry();
        let inputs = [
            ("lookup_wages", json!({"soc_code": "29-2052"})),
            ("lookup_projections", json!({"soc_code": "29-2052", "state": "IA"})),
            ("lookup_skills", json!({"soc_code": "29-2052", "category": "skill"})),
            ("lookup_visa_demand", json!({"soc_code": "29-2052"})),
            ("check_state_priority", json!({"soc_code": "29-2052", "state": "IA"})),
            ("get_occupation_brief", json!({"soc_code": "29-2052"})),
            ("compare_wages", json!({"occupation_a": "29-2052", "occupation_b": "25-1071"})),
            ("get_institution_profile", json!({"institution_id": 1})),
            ("search_institutions", json!({"name": "community", "state": "IA"})),
            ("get_program_completions", json!({"institution_id": 1, "cip_prefix": "51."})),
            ("get_service_area_economy", json!({"institution_id": 1})),
            ("get_county_demographics", json!({"state": "IA", "county_fips": ["19113"]})),
            ("search_statutes", json!({"state": "IA", "category": "workforce"})),
            ("get_credential_requirements", json!({"state": "IA", "soc_code": "47-2111"})),
            ("search_frameworks", json!({"keywords": ["manufacturing"]})),
            ("resolve_project", json!({"geography": "Omaha, NE"})),
        ];
        assert_eq!(inputs.len(), registry.definitions().len());

        for (name, input) in inputs {
            let text = registry.execute(name, &input).await;
            assert!(!text.starts_with("No verified data"), "{name}: {text}");
            assert!(!text.starts_with("Invalid input"), "{name}: {text}");
            assert!(!text.starts_with("Unknown tool"), "{name}: {text}");
        }
    }
}
