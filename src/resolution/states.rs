//! State code and name table.

/// Version of [`STATES`] and [`STATE_ALIASES`]. Bump on any change.
pub const STATE_TABLE_VERSION: u32 = 2;

/// Two-letter code and canonical name for every recognized state-level
/// jurisdiction: the 50 states, the District of Columbia and Puerto Rico.
pub const STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("PR", "Puerto Rico"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

/// Alternate spellings, matched like canonical names.
pub const STATE_ALIASES: &[(&str, &str)] = &[
    ("DC", "Washington DC"),
    ("DC", "Washington D.C."),
    ("DC", "D.C."),
    ("PR", "Commonwealth of Puerto Rico"),
];

/// Returns true if `code` is a recognized two-letter code (exact case).
#[must_use]
pub fn is_known_state_code(code: &str) -> bool {
    STATES.iter().any(|(known, _)| *known == code)
}

/// Returns the canonical name for a state code.
#[must_use]
pub fn state_name(code: &str) -> Option<&'static str> {
    let code = code.trim().to_uppercase();
    STATES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
}
