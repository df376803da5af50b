//! Query resolution: free-text project metadata to canonical keys.
//!
//! Every function here is pure and table-driven. Anything the tables do not
//! cover resolves to `None`, which callers treat as "no scope", never as an
//! error. The tables are versioned ([`STATE_TABLE_VERSION`],
//! [`OCCUPATION_TABLE_VERSION`]) and covered entry by entry in tests.

mod occupations;
mod states;

pub use occupations::{
    OCCUPATION_TABLE_VERSION, OCCUPATIONS, PROGRAM_SUFFIXES, match_program, normalize_program_name,
};
pub use states::{STATE_ALIASES, STATE_TABLE_VERSION, STATES, is_known_state_code, state_name};

use crate::lookups::is_valid_soc;
use crate::models::ProjectDescriptor;
use serde::Serialize;
use std::sync::LazyLock;

/// Canonical keys resolved from a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Two-letter state code.
    pub state: Option<String>,
    /// SOC code.
    pub occupation: Option<String>,
}

impl Resolution {
    /// Returns true if nothing resolved.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.state.is_none() && self.occupation.is_none()
    }
}

/// Resolves both keys for a project.
#[must_use]
pub fn resolve(project: &ProjectDescriptor) -> Resolution {
    Resolution {
        state: extract_state_code(project),
        occupation: extract_occupation_code(project),
    }
}

/// State names and aliases as normalized phrases, longest first.
static STATE_PHRASES: LazyLock<Vec<(String, &'static str)>> = LazyLock::new(|| {
    let mut phrases: Vec<(String, &'static str)> = STATES
        .iter()
        .chain(STATE_ALIASES)
        .map(|(code, name)| (normalize_phrase(name), *code))
        .collect();
    phrases.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
    phrases
});

/// Resolves the project's state.
///
/// Tries, in order:
/// 1. an uppercase two-letter token in the geography that is a known code
/// 2. a state name or alias in the geography, case-insensitive, longest first
/// 3. the explicit institution state
///
/// # Examples
///
/// ```
/// use workfacts::ProjectDescriptor;
/// use workfacts::resolution::extract_state_code;
///
/// let project = ProjectDescriptor::new().with_geography("Cedar Rapids, IA");
/// assert_eq!(extract_state_code(&project).as_deref(), Some("IA"));
///
/// let project = ProjectDescriptor::new().with_geography("Ruritania");
/// assert_eq!(extract_state_code(&project), None);
/// ```
#[must_use]
pub fn extract_state_code(project: &ProjectDescriptor) -> Option<String> {
    let geography = project.geography.as_deref().unwrap_or_default();

    state_from_code_token(geography)
        .or_else(|| state_from_name(geography))
        .or_else(|| {
            project
                .institution_state
                .as_deref()
                .map(|s| s.trim().to_uppercase())
                .filter(|s| is_known_state_code(s))
        })
}

/// Resolves the project's occupation.
///
/// Tries an explicit, syntactically valid SOC code, then the program name
/// against [`OCCUPATIONS`].
///
/// # Examples
///
/// ```
/// use workfacts::ProjectDescriptor;
/// use workfacts::resolution::extract_occupation_code;
///
/// let project = ProjectDescriptor::new().with_program_name("Pharmacy Technician Certificate");
/// assert_eq!(extract_occupation_code(&project).as_deref(), Some("29-2052"));
/// ```
#[must_use]
pub fn extract_occupation_code(project: &ProjectDescriptor) -> Option<String> {
    if let Some(soc) = project
        .soc_code
        .as_deref()
        .map(str::trim)
        .filter(|s| is_valid_soc(s))
    {
        return Some(soc.to_string());
    }

    let program = project.program_name.as_deref()?;
    match_program(&normalize_program_name(program)).map(ToString::to_string)
}

fn state_from_code_token(text: &str) -> Option<String> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .find(|token| token.len() == 2 && is_known_state_code(token))
        .map(ToString::to_string)
}

fn state_from_name(text: &str) -> Option<String> {
    let padded = format!(" {} ", normalize_phrase(text));
    if padded.trim().is_empty() {
        return None;
    }
    STATE_PHRASES
        .iter()
        .find(|(phrase, _)| padded.contains(&format!(" {phrase} ")))
        .map(|(_, code)| (*code).to_string())
}

/// Lowercases and collapses every non-alphanumeric run to one space.
fn normalize_phrase(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn geo(text: &str) -> ProjectDescriptor {
        ProjectDescriptor::new().with_geography(text)
    }

    #[test_case("Cedar Rapids, IA", Some("IA") ; "city and code")]
    #[test_case("the state of Iowa", Some("IA") ; "full name in prose")]
    #[test_case("Ruritania", None ; "unknown place")]
    #[test_case("Charleston, West Virginia", Some("WV") ; "longer name wins")]
    #[test_case("Little Rock, Arkansas", Some("AR") ; "arkansas not kansas")]
    #[test_case("Washington DC metro", Some("DC") ; "dc alias")]
    #[test_case("Seattle, Washington", Some("WA") ; "washington state")]
    #[test_case("San Juan, Puerto Rico", Some("PR") ; "territory")]
    #[test_case("programs offered in the region", None ; "lowercase tokens are not codes")]
    #[test_case("Iowan farmland", None ; "name must be a whole word")]
    #[test_case("", None ; "empty")]
    fn test_extract_state_code(geography: &str, expected: Option<&str>) {
        assert_eq!(extract_state_code(&geo(geography)).as_deref(), expected);
    }

    #[test]
    fn test_code_token_beats_name() {
        assert_eq!(extract_state_code(&geo("Kansas City, MO")).as_deref(), Some("MO"));
    }

    #[test]
    fn test_institution_state_fallback() {
        let project = ProjectDescriptor::new()
            .with_geography("the county")
            .with_institution_state("ne");
        assert_eq!(extract_state_code(&project).as_deref(), Some("NE"));

        let bogus = ProjectDescriptor::new().with_institution_state("Ruritania");
        assert_eq!(extract_state_code(&bogus), None);
    }

    #[test]
    fn test_every_state_code_resolves() {
        for (code, _) in STATES {
            assert_eq!(extract_state_code(&geo(&format!("Somewhere, {code}"))).as_deref(), Some(*code));
        }
    }

    #[test]
    fn test_every_state_name_resolves() {
        for (code, name) in STATES {
            assert_eq!(
                extract_state_code(&geo(&format!("the state of {}", name.to_lowercase()))).as_deref(),
                Some(*code),
                "{name}"
            );
        }
    }

    #[test]
    fn test_every_alias_resolves() {
        for (code, alias) in STATE_ALIASES {
            assert_eq!(extract_state_code(&geo(alias)).as_deref(), Some(*code), "{alias}");
        }
    }

    #[test]
    fn test_every_occupation_entry_resolves() {
        for (key, soc) in OCCUPATIONS {
            let project = ProjectDescriptor::new().with_program_name(format!("{key} certificate"));
            assert_eq!(extract_occupation_code(&project).as_deref(), Some(*soc), "{key}");
        }
    }

    #[test_case(Some("29-2052"), None, Some("29-2052") ; "explicit code")]
    #[test_case(Some("bogus"), Some("Welding Diploma"), Some("51-4121") ; "invalid code falls through")]
    #[test_case(None, Some("Associate of Applied Science in Registered Nursing"), Some("29-1141") ; "long program title")]
    #[test_case(None, Some("Underwater Basket Weaving"), None ; "unmapped program")]
    #[test_case(None, None, None ; "nothing supplied")]
    fn test_extract_occupation_code(soc: Option<&str>, program: Option<&str>, expected: Option<&str>) {
        let mut project = ProjectDescriptor::new();
        project.soc_code = soc.map(ToString::to_string);
        project.program_name = program.map(ToString::to_string);
        assert_eq!(extract_occupation_code(&project).as_deref(), expected);
    }

    #[test]
    fn test_resolve_empty() {
        assert!(resolve(&ProjectDescriptor::new()).is_empty());
    }
}
