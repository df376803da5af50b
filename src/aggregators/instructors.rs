//! Industry occupation to postsecondary instructor pairings.

/// Exact SOC pairings, checked before [`MAJOR_GROUP_INSTRUCTORS`].
const EXACT_INSTRUCTORS: &[(&str, &str)] = &[
    ("29-1141", "25-1072"),
    ("29-2061", "25-1072"),
    ("31-1131", "25-1072"),
    ("13-2011", "25-1011"),
    ("43-3031", "25-1011"),
    ("23-2011", "25-1112"),
    ("25-2011", "25-1081"),
    ("33-3051", "25-1111"),
    ("33-2011", "25-1194"),
    ("15-2051", "25-1022"),
];

/// Two-digit SOC major group to instructor occupation.
const MAJOR_GROUP_INSTRUCTORS: &[(&str, &str)] = &[
    ("15", "25-1021"),
    ("29", "25-1071"),
    ("31", "25-1071"),
    ("35", "25-1194"),
    ("39", "25-1194"),
    ("47", "25-1194"),
    ("49", "25-1194"),
    ("51", "25-1194"),
    ("53", "25-1194"),
];

/// Returns the instructor occupation that teaches `soc_code`, if one is known.
///
/// Instructor occupations themselves (major group 25-1) have no pairing.
#[must_use]
pub fn instructor_for(soc_code: &str) -> Option<&'static str> {
    let soc = soc_code.trim();
    let base = soc.split('.').next().unwrap_or(soc);
    if base.starts_with("25-1") {
        return None;
    }
    if let Some((_, instructor)) = EXACT_INSTRUCTORS.iter().find(|(code, _)| *code == base) {
        return Some(instructor);
    }
    let group = base.get(..2)?;
    MAJOR_GROUP_INSTRUCTORS
        .iter()
        .find(|(prefix, _)| *prefix == group)
        .map(|(_, instructor)| *instructor)
}
