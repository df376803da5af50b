//! Key validation shared by the lookups.

use crate::resolution::is_known_state_code;
use regex::Regex;
use std::sync::LazyLock;

/// Scope code used for national rows.
pub const NATIONAL: &str = "US";

static SOC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2}-\d{4}(\.\d{2})?$").unwrap_or_else(|_| unreachable!("static pattern"))
});

/// Returns true if `code` is a syntactically valid SOC code
/// (`NN-NNNN`, optionally `.NN`).
///
/// # Examples
///
/// ```
/// use workfacts::lookups::is_valid_soc;
///
/// assert!(is_valid_soc("29-2052"));
/// assert!(is_valid_soc("15-1252.00"));
/// assert!(!is_valid_soc("292052"));
/// ```
#[must_use]
pub fn is_valid_soc(code: &str) -> bool {
    SOC_PATTERN.is_match(code.trim())
}

/// Normalizes a SOC code, or `None` if it is invalid.
pub(crate) fn soc_key(code: &str) -> Option<String> {
    let code = code.trim();
    is_valid_soc(code).then(|| code.to_string())
}

/// Normalizes a state code, or `None` if it is not a known state.
pub(crate) fn state_key(code: &str) -> Option<String> {
    let code = code.trim().to_uppercase();
    is_known_state_code(&code).then_some(code)
}

/// Resolves an optional state to a scope: the state, or national when omitted.
///
/// Returns `None` when a state was supplied but is not recognized.
pub(crate) fn scope_key(state: Option<&str>) -> Option<String> {
    match state.map(str::trim).filter(|s| !s.is_empty()) {
        None => Some(NATIONAL.to_string()),
        Some(s) if s.eq_ignore_ascii_case(NATIONAL) => Some(NATIONAL.to_string()),
        Some(s) => state_key(s),
    }
}
