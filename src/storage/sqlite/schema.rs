//! Fact table schema.
//!
//! Tables are populated by external ingestion jobs; this crate only reads them.
//! The schema is created idempotently so a fresh database (or a test store) is
//! always queryable.

/// Schema for all fact tables plus the freshness registry.
pub const FACT_SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS data_freshness (
    table_name TEXT PRIMARY KEY,
    period TEXT NOT NULL DEFAULT '',
    last_refreshed_at TEXT,
    is_stale INTEGER NOT NULL DEFAULT 0,
    citation_text TEXT NOT NULL DEFAULT '',
    citation_url TEXT
);

CREATE TABLE IF NOT EXISTS occupation_wages (
    soc_code TEXT NOT NULL,
    state_code TEXT NOT NULL DEFAULT 'US',
    occupation_title TEXT NOT NULL,
    median_annual REAL NOT NULL,
    mean_annual REAL,
    pct10_annual REAL,
    pct90_annual REAL,
    employment INTEGER,
    PRIMARY KEY (soc_code, state_code)
);

CREATE TABLE IF NOT EXISTS occupation_projections (
    soc_code TEXT NOT NULL,
    state_code TEXT NOT NULL DEFAULT 'US',
    occupation_title TEXT NOT NULL,
    base_year INTEGER NOT NULL,
    projected_year INTEGER NOT NULL,
    base_employment INTEGER,
    projected_employment INTEGER,
    percent_change REAL,
    annual_openings INTEGER,
    PRIMARY KEY (soc_code, state_code)
);

CREATE TABLE IF NOT EXISTS occupation_skills (
    soc_code TEXT NOT NULL,
    element_id TEXT NOT NULL,
    element_name TEXT NOT NULL,
    category TEXT NOT NULL,
    importance REAL NOT NULL,
    level REAL,
    PRIMARY KEY (soc_code, element_id)
);

CREATE TABLE IF NOT EXISTS visa_demand (
    soc_code TEXT NOT NULL,
    state_code TEXT NOT NULL DEFAULT 'US',
    fiscal_year INTEGER NOT NULL,
    certified_applications INTEGER NOT NULL,
    median_offered_wage REAL,
    PRIMARY KEY (soc_code, state_code, fiscal_year)
);

CREATE TABLE IF NOT EXISTS state_priority_occupations (
    soc_code TEXT NOT NULL,
    state_code TEXT NOT NULL,
    priority_level TEXT NOT NULL,
    designation_source TEXT NOT NULL,
    wioa_eligible INTEGER NOT NULL DEFAULT 0,
    etpl_listed INTEGER NOT NULL DEFAULT 0,
    notes TEXT,
    PRIMARY KEY (soc_code, state_code)
);

CREATE TABLE IF NOT EXISTS institutions (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    city TEXT,
    state_code TEXT NOT NULL,
    ipeds_unit_id TEXT,
    sector TEXT,
    total_enrollment INTEGER,
    website TEXT
);

CREATE TABLE IF NOT EXISTS institution_counties (
    institution_id INTEGER NOT NULL,
    county_fips TEXT NOT NULL,
    county_name TEXT NOT NULL,
    state_code TEXT NOT NULL,
    PRIMARY KEY (institution_id, county_fips)
);

CREATE TABLE IF NOT EXISTS program_completions (
    institution_id INTEGER NOT NULL,
    cip_code TEXT NOT NULL,
    program_title TEXT NOT NULL,
    award_level TEXT NOT NULL,
    completions INTEGER NOT NULL,
    academic_year TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS regional_employers (
    state_code TEXT NOT NULL,
    county_fips TEXT NOT NULL,
    employer_name TEXT NOT NULL,
    naics_code TEXT NOT NULL,
    employees INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS county_industry_employment (
    state_code TEXT NOT NULL,
    county_fips TEXT NOT NULL,
    naics_code TEXT NOT NULL,
    industry_title TEXT NOT NULL,
    establishments INTEGER,
    employees INTEGER NOT NULL,
    PRIMARY KEY (county_fips, naics_code)
);

CREATE TABLE IF NOT EXISTS county_demographics (
    county_fips TEXT PRIMARY KEY,
    state_code TEXT NOT NULL,
    county_name TEXT NOT NULL,
    population INTEGER NOT NULL,
    median_household_income REAL,
    poverty_rate REAL,
    bachelors_or_higher_pct REAL,
    unemployment_rate REAL
);

CREATE TABLE IF NOT EXISTS state_demographics (
    state_code TEXT PRIMARY KEY,
    population INTEGER NOT NULL,
    median_household_income REAL,
    poverty_rate REAL,
    bachelors_or_higher_pct REAL,
    unemployment_rate REAL
);

CREATE TABLE IF NOT EXISTS state_statutes (
    state_code TEXT NOT NULL,
    citation TEXT NOT NULL,
    title TEXT NOT NULL,
    category TEXT NOT NULL,
    summary TEXT,
    effective_date TEXT
);

CREATE TABLE IF NOT EXISTS credential_requirements (
    state_code TEXT NOT NULL,
    soc_code TEXT,
    occupation_title TEXT NOT NULL,
    credential_name TEXT NOT NULL,
    credential_type TEXT NOT NULL,
    issuing_agency TEXT,
    renewal_period TEXT
);

CREATE TABLE IF NOT EXISTS frameworks (
    framework_name TEXT NOT NULL,
    framework_type TEXT NOT NULL,
    description TEXT,
    keywords TEXT,
    source_organization TEXT,
    url TEXT
);

CREATE INDEX IF NOT EXISTS idx_skills_soc ON occupation_skills(soc_code);
CREATE INDEX IF NOT EXISTS idx_visa_soc ON visa_demand(soc_code, state_code);
CREATE INDEX IF NOT EXISTS idx_completions_institution ON program_completions(institution_id);
CREATE INDEX IF NOT EXISTS idx_employers_state ON regional_employers(state_code, county_fips);
CREATE INDEX IF NOT EXISTS idx_industry_state ON county_industry_employment(state_code);
CREATE INDEX IF NOT EXISTS idx_statutes_state ON state_statutes(state_code);
CREATE INDEX IF NOT EXISTS idx_credentials_state ON credential_requirements(state_code);
";

/// Name of the freshness registry table.
pub const FRESHNESS_TABLE: &str = "data_freshness";
