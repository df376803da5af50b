//! Program name to SOC code table.

/// Version of [`OCCUPATIONS`] and [`PROGRAM_SUFFIXES`]. Bump on any change.
pub const OCCUPATION_TABLE_VERSION: u32 = 3;

/// Words dropped from a program name before matching.
pub const PROGRAM_SUFFIXES: &[&str] = &[
    "aas",
    "apprenticeship",
    "associate",
    "associates",
    "certificate",
    "certification",
    "course",
    "degree",
    "diploma",
    "program",
    "programs",
    "training",
];

/// Normalized program keyword to SOC code.
///
/// Keys are lowercase words separated by single spaces, already free of
/// [`PROGRAM_SUFFIXES`].
pub const OCCUPATIONS: &[(&str, &str)] = &[
    ("accounting", "13-2011"),
    ("automotive", "49-3023"),
    ("automotive technology", "49-3023"),
    ("bookkeeping", "43-3031"),
    ("carpentry", "47-2031"),
    ("cdl", "53-3032"),
    ("cna", "31-1131"),
    ("cnc machining", "51-4041"),
    ("computer support", "15-1232"),
    ("construction management", "11-9021"),
    ("cosmetology", "39-5012"),
    ("criminal justice", "33-3051"),
    ("culinary arts", "35-1011"),
    ("cybersecurity", "15-1212"),
    ("data analytics", "15-2051"),
    ("dental assistant", "31-9091"),
    ("dental assisting", "31-9091"),
    ("dental hygiene", "29-1292"),
    ("diesel technology", "49-3031"),
    ("early childhood education", "25-2011"),
    ("electrical", "47-2111"),
    ("electrician", "47-2111"),
    ("emergency medical technician", "29-2042"),
    ("emt", "29-2042"),
    ("fire science", "33-2011"),
    ("health information technology", "29-2072"),
    ("hvac", "49-9021"),
    ("industrial maintenance", "49-9041"),
    ("it support", "15-1232"),
    ("law enforcement", "33-3051"),
    ("licensed practical nurse", "29-2061"),
    ("logistics", "13-1081"),
    ("lpn", "29-2061"),
    ("machining", "51-4041"),
    ("machinist", "51-4041"),
    ("medical assistant", "31-9092"),
    ("medical assisting", "31-9092"),
    ("medical coding", "29-2072"),
    ("network administration", "15-1244"),
    ("nurse aide", "31-1131"),
    ("nursing", "29-1141"),
    ("nursing assistant", "31-1131"),
    ("occupational therapy assistant", "31-2011"),
    ("paralegal", "23-2011"),
    ("paramedic", "29-2043"),
    ("pharmacy technician", "29-2052"),
    ("pharmacy technology", "29-2052"),
    ("phlebotomy", "31-9097"),
    ("physical therapist assistant", "31-2021"),
    ("plumbing", "47-2152"),
    ("practical nursing", "29-2061"),
    ("radiologic technology", "29-2034"),
    ("registered nurse", "29-1141"),
    ("registered nursing", "29-1141"),
    ("respiratory therapy", "29-1126"),
    ("software development", "15-1252"),
    ("supply chain", "13-1081"),
    ("surgical technology", "29-2055"),
    ("truck driving", "53-3032"),
    ("veterinary technician", "29-2056"),
    ("web development", "15-1254"),
    ("welding", "51-4121"),
];

/// Lowercases, splits on non-alphanumerics, and drops [`PROGRAM_SUFFIXES`].
#[must_use]
pub fn normalize_program_name(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty() && !PROGRAM_SUFFIXES.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Finds the SOC code for a normalized program name.
///
/// Exact key match first, then the longest key contained on word boundaries.
#[must_use]
pub fn match_program(normalized: &str) -> Option<&'static str> {
    if normalized.is_empty() {
        return None;
    }
    if let Some((_, soc)) = OCCUPATIONS.iter().find(|(key, _)| *key == normalized) {
        return Some(soc);
    }

    let padded = format!(" {normalized} ");
    OCCUPATIONS
        .iter()
        .filter(|(key, _)| padded.contains(&format!(" {key} ")))
        .max_by_key(|(key, _)| key.len())
        .map(|(_, soc)| *soc)
}
