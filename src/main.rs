//! Binary entry point for workfacts.
//!
//! This binary provides the CLI interface for verified workforce facts.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use workfacts::mcp::McpServer;
use workfacts::observability::{self, InitOptions};
use workfacts::{
    Aggregators, AvailabilityRule, ContextBuilder, ContextOptions, FactTable, FreshnessRegistry,
    Lookups, ProjectDescriptor, SqliteFactStore, ToolRegistry, WorkfactsConfig,
    generate_citations,
};

/// Workfacts - verified, citable workforce facts for prompts and agents.
#[derive(Parser)]
#[command(name = "workfacts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the fact database (overrides configuration).
    #[arg(long, global = true, env = "WORKFACTS_DB_PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Build the verified-fact context block for a project.
    Context {
        /// Free-text geography, e.g. "Cedar Rapids, IA".
        #[arg(short, long)]
        geography: Option<String>,

        /// Program or occupation name.
        #[arg(short, long)]
        program: Option<String>,

        /// Explicit SOC code.
        #[arg(long)]
        soc: Option<String>,

        /// Institution identifier.
        #[arg(long)]
        institution_id: Option<i64>,

        /// State of the institution.
        #[arg(long)]
        institution_state: Option<String>,

        /// Occupation availability rule: any or all.
        #[arg(long, default_value = "any")]
        rule: String,

        /// Print the full bundle as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Execute one tool with JSON input.
    Tool {
        /// Tool name.
        name: String,

        /// Tool input as a JSON object.
        #[arg(default_value = "{}")]
        input: String,
    },

    /// List tools, optionally for one persona.
    Tools {
        /// Persona key.
        #[arg(long)]
        persona: Option<String>,
    },

    /// Show freshness and citations for fact tables.
    Freshness {
        /// Table names; all tables when omitted.
        tables: Vec<String>,
    },

    /// Reconcile industry employment against employer records.
    Reconcile {
        /// Two-letter state code.
        #[arg(long)]
        state: String,

        /// County FIPS codes; statewide when omitted.
        #[arg(long = "county")]
        counties: Vec<String>,
    },

    /// Start the MCP server on stdio.
    Serve {
        /// Persona whose tool subset is advertised.
        #[arg(long)]
        persona: Option<String>,
    },

    /// Create the fact database and schema.
    InitDb,
}

/// Main entry point.
#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match WorkfactsConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };
    let config = match &cli.db {
        Some(path) => config.with_database_path(path),
        None => config,
    };

    let expose_metrics = matches!(cli.command, Commands::Serve { .. });
    let _observability = match observability::init_from_config(
        &config.observability,
        InitOptions {
            verbose: cli.verbose,
            metrics_expose: expose_metrics,
        },
    ) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize observability: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
async fn run_command(cli: Cli, config: WorkfactsConfig) -> Result<(), Box<dyn std::error::Error>> {
    if matches!(cli.command, Commands::InitDb) {
        return cmd_init_db(&config);
    }

    let store = Arc::new(SqliteFactStore::open(&config.database_path)?);
    let lookups = Lookups::from_config(store, &config);

    match cli.command {
        Commands::Context {
            geography,
            program,
            soc,
            institution_id,
            institution_state,
            rule,
            json,
        } => {
            let project = ProjectDescriptor {
                geography,
                program_name: program,
                soc_code: soc,
                institution_id,
                institution_state,
            };
            cmd_context(lookups, &config, project, &rule, json).await
        },

        Commands::Tool { name, input } => cmd_tool(lookups, &name, &input).await,

        Commands::Tools { persona } => cmd_tools(lookups, persona.as_deref()),

        Commands::Freshness { tables } => cmd_freshness(&lookups, tables).await,

        Commands::Reconcile { state, counties } => cmd_reconcile(lookups, &state, &counties).await,

        Commands::Serve { persona } => cmd_serve(lookups, persona).await,

        Commands::InitDb => Ok(()),
    }
}

/// Context command.
async fn cmd_context(
    lookups: Lookups,
    config: &WorkfactsConfig,
    project: ProjectDescriptor,
    rule: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let availability_rule = AvailabilityRule::parse(rule)
        .ok_or_else(|| format!("unknown availability rule: {rule} (expected any or all)"))?;
    let options = ContextOptions {
        availability_rule,
        ..ContextOptions::default()
    };

    let builder = ContextBuilder::from_config(lookups.clone(), config);
    let bundle = builder.build(&project, &options).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        println!("{}", bundle.prompt_block);
    }

    let diagnostics = lookups.diagnostics().snapshot();
    if diagnostics.total() > 0 {
        eprintln!(
            "Warning: {} lookup errors were suppressed (transport {}, decode {}, timeout {}, missing citation {})",
            diagnostics.total(),
            diagnostics.transport,
            diagnostics.decode,
            diagnostics.timeout,
            diagnostics.missing_citation
        );
    }

    Ok(())
}

/// Tool command.
async fn cmd_tool(lookups: Lookups, name: &str, input: &str) -> Result<(), Box<dyn std::error::Error>> {
    let input: serde_json::Value = serde_json::from_str(input)?;
    let registry = ToolRegistry::new(lookups);
    println!("{}", registry.execute(name, &input).await);
    Ok(())
}

/// Tools command.
fn cmd_tools(lookups: Lookups, persona: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let registry = ToolRegistry::new(lookups);
    let tools = match persona {
        Some(persona) => registry.get_tools_for_agent(persona),
        None => registry.definitions().iter().collect(),
    };

    for tool in tools {
        println!("{}\n    {}", tool.name, tool.description);
    }
    Ok(())
}

/// Freshness command.
async fn cmd_freshness(lookups: &Lookups, tables: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let tables: Vec<String> = if tables.is_empty() {
        FactTable::all().iter().map(ToString::to_string).collect()
    } else {
        tables
    };

    let registry: &FreshnessRegistry = lookups.registry();
    for table in &tables {
        if FactTable::parse(table).is_none() {
            eprintln!("Warning: {table} is not a known fact table");
        }
        let entry = registry.get(table).await;
        let refreshed = entry
            .last_refreshed_at
            .map_or_else(|| "never".to_string(), |ts| ts.to_rfc3339());
        println!(
            "{table}: period {}, refreshed {refreshed}{}",
            if entry.period.is_empty() { "n/a" } else { entry.period.as_str() },
            if entry.is_stale { ", STALE" } else { "" }
        );
    }

    let citations = generate_citations(registry, &tables).await;
    if !citations.is_empty() {
        println!("\n{citations}");
    }
    Ok(())
}

/// Reconcile command.
async fn cmd_reconcile(
    lookups: Lookups,
    state: &str,
    counties: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let aggregators = Aggregators::new(lookups);
    let result = aggregators.reconcile_industry_employment(state, counties).await;

    let Some(reconciliation) = result.data() else {
        println!("No industry employment data found for {state}.");
        return Ok(());
    };

    for industry in &reconciliation.industries {
        println!(
            "{} (NAICS {}): reported {}, employers {}, coverage {:.1}%{}",
            industry.industry_title,
            industry.naics_code,
            industry.reported_employees,
            industry.employer_employees,
            industry.coverage_percent,
            if industry.discrepancy { " DISCREPANCY" } else { "" }
        );
    }
    println!(
        "Total: reported {}, employers {}, coverage {:.1}%, {} discrepancies",
        reconciliation.reported_total,
        reconciliation.employer_total,
        reconciliation.coverage_percent,
        reconciliation.discrepancy_count
    );
    println!("Source: {}", result.citation());
    Ok(())
}

/// Serve command.
async fn cmd_serve(lookups: Lookups, persona: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let server = McpServer::new(ToolRegistry::new(lookups));
    let server = match persona {
        Some(persona) => server.with_persona(persona),
        None => server,
    };

    server.run_stdio().await?;
    Ok(())
}

/// Init-db command.
fn cmd_init_db(config: &WorkfactsConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteFactStore::open(&config.database_path)?;
    let path = store
        .db_path()
        .map_or_else(|| "in-memory".to_string(), |p| p.display().to_string());
    println!("Fact database ready at {path}");
    Ok(())
}
