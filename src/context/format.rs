//! Plain-text rendering of lookup results.
//!
//! Shared by the context builder and the tool bridge. Output is deterministic:
//! the same records always render to the same text.

use crate::models::{
    CompletionRecord, CountyDemographics, CredentialRecord, FrameworkRecord, InstitutionRecord,
    OccupationBrief, PriorityRecord, ProjectionRecord, ServiceAreaEconomy, SkillRecord, StateDemographics,
    StatuteRecord, VisaDemandRecord, WageGap, WageRecord,
};
use std::fmt::Write as _;

/// Formats a whole-dollar amount with thousands separators, e.g. `$40,300`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn money(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}${}", thousands(rounded.unsigned_abs()))
}

/// Formats an integer count with thousands separators.
#[must_use]
pub fn count(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}{}", thousands(value.unsigned_abs()))
}

fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}%"))
}

/// One line of wage estimates.
#[must_use]
pub fn wage_line(wage: &WageRecord) -> String {
    let mut line = format!(
        "{} ({}) in {}: median {}",
        wage.occupation_title,
        wage.soc_code,
        wage.state_code,
        money(wage.median_annual)
    );
    if let (Some(p10), Some(p90)) = (wage.pct10_annual, wage.pct90_annual) {
        let _ = write!(line, ", 10th-90th percentile {}-{}", money(p10), money(p90));
    }
    if let Some(employment) = wage.employment {
        let _ = write!(line, ", employment {}", count(employment));
    }
    line
}

/// One line of projections.
#[must_use]
pub fn projection_line(projection: &ProjectionRecord) -> String {
    let mut line = format!(
        "Projected {}-{} in {}",
        projection.base_year, projection.projected_year, projection.state_code
    );
    if let Some(change) = projection.percent_change {
        let _ = write!(line, ": {change:+.1}% change");
    }
    if let Some(openings) = projection.annual_openings {
        let _ = write!(line, ", {} annual openings", count(openings));
    }
    line
}

/// A comma-separated skills line.
#[must_use]
pub fn skills_line(skills: &[SkillRecord]) -> String {
    let names: Vec<String> = skills
        .iter()
        .map(|s| format!("{} ({:.1})", s.element_name, s.importance))
        .collect();
    format!("Top skills: {}", names.join(", "))
}

/// One line per fiscal year of visa demand.
#[must_use]
pub fn visa_lines(rows: &[VisaDemandRecord]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let mut line = format!(
                "FY{} labor certifications ({}): {}",
                row.fiscal_year,
                row.state_code,
                count(row.certified_applications)
            );
            if let Some(wage) = row.median_offered_wage {
                let _ = write!(line, ", median offered wage {}", money(wage));
            }
            line
        })
        .collect()
}

/// The occupation section body.
#[must_use]
pub fn occupation_section(brief: &OccupationBrief) -> String {
    let mut lines = Vec::new();
    if let Some(wage) = brief.wages.data() {
        lines.push(format!("- {}", wage_line(wage)));
    }
    if let Some(projection) = brief.projections.data() {
        lines.push(format!("- {}", projection_line(projection)));
    }
    if let Some(skills) = brief.skills.data() {
        lines.push(format!("- {}", skills_line(skills)));
    }
    if let Some(rows) = brief.visa_demand.data() {
        lines.extend(visa_lines(rows).into_iter().map(|l| format!("- {l}")));
    }
    if let Some(priority) = brief.state_priority.data() {
        lines.push(format!("- {}", priority_line(priority)));
    }
    lines.join("\n")
}

/// One line of state priority designation.
#[must_use]
pub fn priority_line(priority: &PriorityRecord) -> String {
    let mut line = format!(
        "{} priority in {} ({})",
        priority.priority_level, priority.state_code, priority.designation_source
    );
    if priority.wioa_eligible {
        line.push_str(", WIOA eligible");
    }
    if priority.etpl_listed {
        line.push_str(", ETPL listed");
    }
    line
}

/// The wage gap section body.
#[must_use]
pub fn wage_gap_line(gap: &WageGap) -> String {
    let (higher, lower) = if gap.a_pays_more {
        (&gap.title_a, &gap.title_b)
    } else {
        (&gap.title_b, &gap.title_a)
    };
    format!(
        "{higher} earn {} ({}%) more than {lower} in {} (medians {} vs {})",
        money(gap.gap),
        gap.gap_percent,
        gap.area,
        money(gap.median_a),
        money(gap.median_b)
    )
}

/// One line describing an institution.
#[must_use]
pub fn institution_line(institution: &InstitutionRecord) -> String {
    let mut line = format!("{} (id {})", institution.name, institution.id);
    match &institution.city {
        Some(city) => {
            let _ = write!(line, ", {city}, {}", institution.state_code);
        },
        None => {
            let _ = write!(line, ", {}", institution.state_code);
        },
    }
    if let Some(sector) = &institution.sector {
        let _ = write!(line, "; {sector}");
    }
    if let Some(enrollment) = institution.total_enrollment {
        let _ = write!(line, "; enrollment {}", count(enrollment));
    }
    line
}

/// The service area section body.
#[must_use]
pub fn service_area_section(economy: &ServiceAreaEconomy) -> String {
    let names: Vec<&str> = economy.counties.iter().map(|c| c.county_name.as_str()).collect();
    let mut lines = vec![format!(
        "- Counties ({}): {}",
        economy.counties.len(),
        names.join(", ")
    )];
    if economy.has_demographics() {
        lines.push(format!(
            "- Population {} across {} reporting counties; median household income {}",
            count(economy.total_population),
            economy.counties_with_demographics,
            economy
                .avg_median_household_income
                .map_or_else(|| "n/a".to_string(), money)
        ));
        lines.push(format!(
            "- Poverty {}, bachelor's or higher {}, unemployment {}",
            percent(economy.avg_poverty_rate),
            percent(economy.avg_bachelors_or_higher_pct),
            percent(economy.avg_unemployment_rate)
        ));
    }
    for industry in &economy.top_industries {
        lines.push(format!(
            "- {} (NAICS {}): {} employees",
            industry.industry_title,
            industry.naics_code,
            count(industry.employees)
        ));
    }
    if !economy.top_industries.is_empty() {
        lines.push(format!(
            "- Total employees in listed industries: {}",
            count(economy.total_employees)
        ));
    }
    if !economy.top_employers.is_empty() {
        let employers: Vec<String> = economy
            .top_employers
            .iter()
            .map(|e| format!("{} ({})", e.employer_name, count(e.employees)))
            .collect();
        lines.push(format!("- Largest employers: {}", employers.join(", ")));
    }
    lines.join("\n")
}

/// One line per completions row.
#[must_use]
pub fn completion_lines(rows: &[CompletionRecord]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            format!(
                "{} (CIP {}, {}): {} completions in {}",
                row.program_title,
                row.cip_code,
                row.award_level,
                count(row.completions),
                row.academic_year
            )
        })
        .collect()
}

/// One line of county demographics.
#[must_use]
pub fn county_line(row: &CountyDemographics) -> String {
    format!(
        "{} County ({}): population {}, median household income {}, poverty {}, unemployment {}",
        row.county_name,
        row.county_fips,
        count(row.population),
        row.median_household_income.map_or_else(|| "n/a".to_string(), money),
        percent(row.poverty_rate),
        percent(row.unemployment_rate)
    )
}

/// One line of state demographics.
#[must_use]
pub fn state_demographics_line(row: &StateDemographics) -> String {
    format!(
        "{}: population {}, median household income {}, poverty {}, bachelor's or higher {}, unemployment {}",
        row.state_code,
        count(row.population),
        row.median_household_income.map_or_else(|| "n/a".to_string(), money),
        percent(row.poverty_rate),
        percent(row.bachelors_or_higher_pct),
        percent(row.unemployment_rate)
    )
}

/// One line per statute.
#[must_use]
pub fn statute_lines(rows: &[StatuteRecord]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let mut line = format!("{}: {} [{}]", row.citation, row.title, row.category);
            if let Some(summary) = &row.summary {
                let _ = write!(line, ". {summary}");
            }
            line
        })
        .collect()
}

/// One line per credential requirement.
#[must_use]
pub fn credential_lines(rows: &[CredentialRecord]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let mut line = format!(
                "{} ({}) for {}",
                row.credential_name, row.credential_type, row.occupation_title
            );
            if let Some(agency) = &row.issuing_agency {
                let _ = write!(line, ", issued by {agency}");
            }
            if let Some(renewal) = &row.renewal_period {
                let _ = write!(line, ", renew every {renewal}");
            }
            line
        })
        .collect()
}

/// One line per framework.
#[must_use]
pub fn framework_lines(rows: &[FrameworkRecord]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let mut line = format!("{} ({})", row.framework_name, row.framework_type);
            if let Some(org) = &row.source_organization {
                let _ = write!(line, " by {org}");
            }
            if let Some(description) = &row.description {
                let _ = write!(line, ": {description}");
            }
            line
        })
        .collect()
}

/// Prefixes each line with `- ` and joins them.
#[must_use]
pub fn bullets(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| format!("- {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
