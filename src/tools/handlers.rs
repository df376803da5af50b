//! Tool execution handlers.
//!
//! Each handler parses its arguments, runs one lookup or aggregator and renders
//! the result as plain text. Found results end with their source line; misses
//! say so explicitly so the caller can look elsewhere.

use super::args::{
    BriefArgs, CompareWagesArgs, CompletionsArgs, CountyArgs, CredentialArgs, FrameworkArgs,
    InstitutionArgs, OccupationArgs, PriorityArgs, ResolveArgs, SearchInstitutionsArgs,
    SkillsArgs, StatuteArgs, parse, required,
};
use crate::aggregators::Aggregators;
use crate::context::format;
use crate::freshness::generate_citations;
use crate::models::{AvailabilityRule, FactTable, LookupResult, ProjectDescriptor};
use crate::resolution::{resolve, state_name};
use crate::{Error, Result};
use serde_json::Value;
use std::fmt::Write as _;

fn scope(state: Option<&str>) -> String {
    state
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| "national".to_string(), str::to_uppercase)
}

fn not_found(what: &str) -> String {
    format!("No verified data found for {what}.")
}

fn source_line<T>(result: &LookupResult<T>) -> String {
    let mut line = format!("Source: {}", result.citation());
    let freshness = result.freshness();
    if !freshness.period.is_empty() {
        let _ = write!(line, " ({})", freshness.period);
    }
    if freshness.is_stale {
        line.push_str(" [stale]");
    }
    line
}

fn render<T>(result: &LookupResult<T>, what: &str, body: impl FnOnce(&T) -> String) -> String {
    result.data().map_or_else(
        || not_found(what),
        |data| format!("{}\n\n{}", body(data), source_line(result)),
    )
}

/// Executes `lookup_wages`.
pub async fn lookup_wages(aggregators: &Aggregators, input: &Value) -> Result<String> {
    let args: OccupationArgs = parse(input)?;
    let soc = required(&args.soc_code, "soc_code")?;
    let state = args.state.as_deref();
    let result = aggregators.lookups().wages(soc, state).await;
    Ok(render(&result, &format!("wages for {soc} ({})", scope(state)), format::wage_line))
}

/// Executes `lookup_projections`.
pub async fn lookup_projections(aggregators: &Aggregators, input: &Value) -> Result<String> {
    let args: OccupationArgs = parse(input)?;
    let soc = required(&args.soc_code, "soc_code")?;
    let state = args.state.as_deref();
    let result = aggregators.lookups().projections(soc, state).await;
    Ok(render(
        &result,
        &format!("projections for {soc} ({})", scope(state)),
        |projection| format!("{}: {}", projection.occupation_title, format::projection_line(projection)),
    ))
}

/// Executes `lookup_skills`.
pub async fn lookup_skills(aggregators: &Aggregators, input: &Value) -> Result<String> {
    let args: SkillsArgs = parse(input)?;
    let soc = required(&args.soc_code, "soc_code")?;
    let result = aggregators.lookups().skills(soc, args.category.as_deref()).await;
    Ok(render(&result, &format!("skills for {soc}"), |skills| {
        let lines: Vec<String> = skills
            .iter()
            .map(|s| format!("{} [{}]: importance {:.1}", s.element_name, s.category, s.importance))
            .collect();
        format::bullets(&lines)
    }))
}

/// Executes `lookup_visa_demand`.
pub async fn lookup_visa_demand(aggregators: &Aggregators, input: &Value) -> Result<String> {
    let args: OccupationArgs = parse(input)?;
    let soc = required(&args.soc_code, "soc_code")?;
    let state = args.state.as_deref();
    let result = aggregators.lookups().visa_demand(soc, state).await;
    Ok(render(
        &result,
        &format!("visa demand for {soc} ({})", scope(state)),
        |rows| format::bullets(&format::visa_lines(rows)),
    ))
}

/// Executes `check_state_priority`.
pub async fn check_state_priority(aggregators: &Aggregators, input: &Value) -> Result<String> {
    let args: PriorityArgs = parse(input)?;
    let soc = required(&args.soc_code, "soc_code")?;
    let state = required(&args.state, "state")?;
    let result = aggregators.lookups().state_priority(soc, state).await;
    Ok(render(
        &result,
        &format!("a priority designation of {soc} in {}", scope(Some(state))),
        format::priority_line,
    ))
}

/// Executes `get_occupation_brief`.
pub async fn get_occupation_brief(aggregators: &Aggregators, input: &Value) -> Result<String> {
    let args: BriefArgs = parse(input)?;
    let soc = required(&args.soc_code, "soc_code")?;
    let rule = match args.availability_rule.as_deref() {
        Some(raw) => AvailabilityRule::parse(raw)
            .ok_or_else(|| Error::InvalidInput(format!("unknown availability_rule: {raw}")))?,
        None => AvailabilityRule::default(),
    };
    let state = args.state.as_deref();
    let brief = aggregators.occupation_brief(soc, state, rule).await;

    if brief.tables_used.is_empty() {
        return Ok(not_found(&format!("occupation {soc} ({})", scope(state))));
    }

    let mut text = format::occupation_section(&brief);
    let mut tables = brief.tables_used.clone();
    if let Some(gap) = brief.wage_gap.as_ref().and_then(LookupResult::data) {
        let _ = write!(text, "\n- {}", format::wage_gap_line(gap));
        if !tables.contains(&FactTable::OccupationWages) {
            tables.push(FactTable::OccupationWages);
        }
    }
    let _ = write!(
        text,
        "\n- Available: {}",
        if brief.available { "yes" } else { "no" }
    );

    let citations = generate_citations(aggregators.lookups().registry(), &tables).await;
    if !citations.is_empty() {
        let _ = write!(text, "\n\n{citations}");
    }
    Ok(text)
}

/// Executes `compare_wages`.
pub async fn compare_wages(aggregators: &Aggregators, input: &Value) -> Result<String> {
    let args: CompareWagesArgs = parse(input)?;
    let a = required(&args.occupation_a, "occupation_a")?;
    let b = required(&args.occupation_b, "occupation_b")?;
    let state = args.state.as_deref();
    let result = aggregators.wage_gap(a, b, state).await;
    Ok(render(
        &result,
        &format!("a wage comparison of {a} and {b} ({})", scope(state)),
        format::wage_gap_line,
    ))
}

/// Executes `get_institution_profile`.
pub async fn get_institution_profile(aggregators: &Aggregators, input: &Value) -> Result<String> {
    let args: InstitutionArgs = parse(input)?;
    let result = aggregators.lookups().institution(args.institution_id).await;
    Ok(render(
        &result,
        &format!("institution {}", args.institution_id),
        |institution| {
            let mut line = format::institution_line(institution);
            if let Some(website) = &institution.website {
                let _ = write!(line, "; {website}");
            }
            line
        },
    ))
}

/// Executes `search_institutions`.
pub async fn search_institutions(aggregators: &Aggregators, input: &Value) -> Result<String> {
    let args: SearchInstitutionsArgs = parse(input)?;
    let name = required(&args.name, "name")?;
    let result = aggregators
        .lookups()
        .find_institutions(name, args.state.as_deref())
        .await;
    Ok(render(&result, &format!("institutions matching \"{name}\""), |rows| {
        let lines: Vec<String> = rows.iter().map(format::institution_line).collect();
        format::bullets(&lines)
    }))
}

/// Executes `get_program_completions`.
pub async fn get_program_completions(aggregators: &Aggregators, input: &Value) -> Result<String> {
    let args: CompletionsArgs = parse(input)?;
    let result = aggregators
        .lookups()
        .program_completions(args.institution_id, args.cip_prefix.as_deref())
        .await;
    Ok(render(
        &result,
        &format!("program completions at institution {}", args.institution_id),
        |rows| format::bullets(&format::completion_lines(rows)),
    ))
}

/// Executes `get_service_area_economy`.
pub async fn get_service_area_economy(aggregators: &Aggregators, input: &Value) -> Result<String> {
    let args: InstitutionArgs = parse(input)?;
    let result = aggregators.service_area_economy(args.institution_id).await;
    let Some(economy) = result.data() else {
        return Ok(not_found(&format!(
            "the service area of institution {}",
            args.institution_id
        )));
    };

    let mut text = format!(
        "{} service area\n{}",
        economy.institution_name,
        format::service_area_section(economy)
    );
    let citations = generate_citations(aggregators.lookups().registry(), &economy.tables_used).await;
    if !citations.is_empty() {
        let _ = write!(text, "\n\n{citations}");
    }
    Ok(text)
}

/// Executes `get_county_demographics`.
pub async fn get_county_demographics(aggregators: &Aggregators, input: &Value) -> Result<String> {
    let args: CountyArgs = parse(input)?;
    let state = required(&args.state, "state")?;
    if args.county_fips.iter().all(|f| f.trim().is_empty()) {
        return Err(Error::InvalidInput("county_fips must not be empty".to_string()));
    }
    let result = aggregators
        .lookups()
        .county_demographics(state, &args.county_fips)
        .await;
    Ok(render(
        &result,
        &format!("county demographics in {}", scope(Some(state))),
        |rows| {
            let lines: Vec<String> = rows.iter().map(format::county_line).collect();
            format::bullets(&lines)
        },
    ))
}

/// Executes `search_statutes`.
pub async fn search_statutes(aggregators: &Aggregators, input: &Value) -> Result<String> {
    let args: StatuteArgs = parse(input)?;
    let state = required(&args.state, "state")?;
    let result = aggregators
        .lookups()
        .statutes(state, args.category.as_deref())
        .await;
    Ok(render(
        &result,
        &format!("statutes in {}", scope(Some(state))),
        |rows| format::bullets(&format::statute_lines(rows)),
    ))
}

/// Executes `get_credential_requirements`.
pub async fn get_credential_requirements(aggregators: &Aggregators, input: &Value) -> Result<String> {
    let args: CredentialArgs = parse(input)?;
    let state = required(&args.state, "state")?;
    let result = aggregators
        .lookups()
        .credential_requirements(state, args.soc_code.as_deref())
        .await;
    Ok(render(
        &result,
        &format!("credential requirements in {}", scope(Some(state))),
        |rows| format::bullets(&format::credential_lines(rows)),
    ))
}

/// Executes `search_frameworks`.
pub async fn search_frameworks(aggregators: &Aggregators, input: &Value) -> Result<String> {
    let args: FrameworkArgs = parse(input)?;
    let keywords: Vec<&str> = args
        .keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        return Err(Error::InvalidInput("keywords must not be empty".to_string()));
    }
    let result = aggregators.lookups().frameworks(&keywords).await;
    Ok(render(
        &result,
        &format!("frameworks matching {}", keywords.join(", ")),
        |rows| format::bullets(&format::framework_lines(rows)),
    ))
}

/// Executes `resolve_project`. Pure; touches no fact table.
pub fn resolve_project(input: &Value) -> Result<String> {
    let args: ResolveArgs = parse(input)?;
    let project = ProjectDescriptor {
        geography: args.geography,
        program_name: args.program_name,
        soc_code: args.soc_code,
        institution_id: None,
        institution_state: args.institution_state,
    };
    let resolution = resolve(&project);

    let state = resolution.state.as_deref().map_or_else(
        || "unresolved".to_string(),
        |code| state_name(code).map_or_else(|| code.to_string(), |name| format!("{code} ({name})")),
    );
    let occupation = resolution.occupation.as_deref().unwrap_or("unresolved");
    Ok(format!("State: {state}\nOccupation: {occupation}"))
}
