//! Caller-supplied project descriptor.

use serde::{Deserialize, Serialize};

/// Identifying data for one request.
///
/// Created by the caller, consumed once by query resolution, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDescriptor {
    /// Free-text geography, e.g. "Cedar Rapids, IA".
    pub geography: Option<String>,
    /// Free-text program or occupation name.
    pub program_name: Option<String>,
    /// Explicit SOC code.
    pub soc_code: Option<String>,
    /// Institution identifier.
    pub institution_id: Option<i64>,
    /// State of the institution, when known.
    pub institution_state: Option<String>,
}

impl ProjectDescriptor {
    /// Creates an empty descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text geography.
    #[must_use]
    pub fn with_geography(mut self, geography: impl Into<String>) -> Self {
        self.geography = Some(geography.into());
        self
    }

    /// Sets the program name.
    #[must_use]
    pub fn with_program_name(mut self, program_name: impl Into<String>) -> Self {
        self.program_name = Some(program_name.into());
        self
    }

    /// Sets an explicit SOC code.
    #[must_use]
    pub fn with_soc_code(mut self, soc_code: impl Into<String>) -> Self {
        self.soc_code = Some(soc_code.into());
        self
    }

    /// Sets the institution identifier.
    #[must_use]
    pub const fn with_institution_id(mut self, institution_id: i64) -> Self {
        self.institution_id = Some(institution_id);
        self
    }

    /// Sets the institution state.
    #[must_use]
    pub fn with_institution_state(mut self, state: impl Into<String>) -> Self {
        self.institution_state = Some(state.into());
        self
    }
}
