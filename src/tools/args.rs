//! Argument types for tool calls.
//!
//! All argument types use `#[serde(deny_unknown_fields)]` so a misspelled
//! parameter is reported instead of silently widening the query.

use crate::{Error, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parses tool input into an argument struct.
///
/// A `null` input is treated as an empty object.
pub fn parse<T: DeserializeOwned>(input: &Value) -> Result<T> {
    let input = if input.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        input.clone()
    };
    serde_json::from_value(input).map_err(|e| Error::InvalidInput(e.to_string()))
}

/// Rejects blank required strings.
pub fn required<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(value)
}

/// SOC code with an optional state.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OccupationArgs {
    /// SOC code, e.g. `29-2052`.
    pub soc_code: String,
    /// Two-letter state code; national when omitted.
    pub state: Option<String>,
}

/// Skills lookup arguments.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillsArgs {
    /// SOC code.
    pub soc_code: String,
    /// Element category: `skill`, `knowledge` or `ability`.
    pub category: Option<String>,
}

/// State priority arguments.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriorityArgs {
    /// SOC code.
    pub soc_code: String,
    /// Two-letter state code.
    pub state: String,
}

/// Occupation brief arguments.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BriefArgs {
    /// SOC code.
    pub soc_code: String,
    /// Two-letter state code.
    pub state: Option<String>,
    /// `any` (default) or `all`.
    pub availability_rule: Option<String>,
}

/// Wage comparison arguments.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompareWagesArgs {
    /// First SOC code.
    pub occupation_a: String,
    /// Second SOC code.
    pub occupation_b: String,
    /// Two-letter state code.
    pub state: Option<String>,
}

/// Institution id arguments.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstitutionArgs {
    /// Institution identifier.
    pub institution_id: i64,
}

/// Institution search arguments.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchInstitutionsArgs {
    /// Name fragment.
    pub name: String,
    /// Two-letter state code.
    pub state: Option<String>,
}

/// Program completions arguments.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompletionsArgs {
    /// Institution identifier.
    pub institution_id: i64,
    /// CIP code prefix, e.g. `51.`.
    pub cip_prefix: Option<String>,
}

/// County demographics arguments.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountyArgs {
    /// Two-letter state code.
    pub state: String,
    /// County FIPS codes.
    pub county_fips: Vec<String>,
}

/// Statute search arguments.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatuteArgs {
    /// Two-letter state code.
    pub state: String,
    /// Category keyword.
    pub category: Option<String>,
}

/// Credential requirement arguments.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialArgs {
    /// Two-letter state code.
    pub state: String,
    /// SOC code.
    pub soc_code: Option<String>,
}

/// Framework search arguments.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameworkArgs {
    /// Keywords; a framework matches if any keyword matches.
    pub keywords: Vec<String>,
}

/// Project resolution arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolveArgs {
    /// Free-text geography.
    pub geography: Option<String>,
    /// Program name.
    pub program_name: Option<String>,
    /// Explicit SOC code.
    pub soc_code: Option<String>,
    /// Institution state.
    pub institution_state: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_required_field() {
        let err = parse::<PriorityArgs>(&json!({"soc_code": "29-2052"})).unwrap_err();
        assert!(err.to_string().contains("state"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = parse::<OccupationArgs>(&json!({"soc_code": "29-2052", "county": "x"}));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_null_is_empty_object() {
        let args: ResolveArgs = parse(&Value::Null).unwrap();
        assert!(args.geography.is_none());
    }

    #[test]
    fn test_required_rejects_blank() {
        assert!(required("  ", "name").is_err());
        assert_eq!(required(" Kirk ", "name").unwrap(), "Kirk");
    }
}
