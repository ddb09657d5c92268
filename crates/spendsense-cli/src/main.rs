//! Operator CLI for the SpendSenseAI recommendation pipeline.

mod fixture;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use chrono::NaiveDate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spendsense_catalog::{validate_catalog, validate_config, Catalog, SpendSenseConfig};
use spendsense_core::{ConsentScope, OverrideAction};
use spendsense_eval::{EvaluationHarness, HumanSummaryGenerator, JsonReportGenerator, ReportGenerator};
use spendsense_pipeline::{InMemoryConsentStore, Pipeline};
use spendsense_trace::{FileTraceStore, TraceStore};

#[derive(Parser)]
#[command(name = "spendsense")]
#[command(about = "Deterministic, auditable personal-finance recommendation pipeline")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate recommendations for one or more customers against a fixture
    /// datastore.
    Run {
        /// Path to a JSON fixture file (accounts/transactions/liabilities).
        #[arg(short, long)]
        fixture: PathBuf,

        /// Customer id to process; may be repeated.
        #[arg(short, long = "customer", required = true)]
        customers: Vec<String>,

        /// Directory the file-backed trace store writes into.
        #[arg(short, long, default_value = "./traces")]
        trace_dir: PathBuf,

        /// Optional catalog file (JSON or YAML); defaults to the built-in
        /// catalog.
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Optional pipeline config file (YAML); defaults to
        /// `SpendSenseConfig::default()`.
        #[arg(long)]
        config: Option<PathBuf>,

        /// As-of date for canonical window computation, `YYYY-MM-DD`;
        /// defaults to today.
        #[arg(long)]
        now: Option<NaiveDate>,

        /// Pre-grant `recommendations` consent for every listed customer
        /// before running (the in-memory consent store starts every
        /// customer `pending` each process invocation).
        #[arg(long)]
        grant_consent: bool,
    },

    /// Validate a catalog and config file without running the pipeline.
    ValidateCatalog {
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run the evaluation harness over previously written traces.
    Eval {
        #[arg(short, long, default_value = "./traces")]
        trace_dir: PathBuf,

        #[arg(short, long = "customer", required = true)]
        customers: Vec<String>,

        /// Observed latency samples in milliseconds, one per completed run.
        #[arg(long = "latency-ms")]
        latencies_ms: Vec<f64>,

        #[arg(long, value_enum, default_value = "human")]
        format: ReportFormat,
    },

    /// Print a single decision trace as pretty JSON.
    ShowTrace {
        #[arg(short, long, default_value = "./traces")]
        trace_dir: PathBuf,

        #[arg(long)]
        trace_id: String,
    },

    /// Record an operator override of a prior decision trace.
    Override {
        #[arg(short, long, default_value = "./traces")]
        trace_dir: PathBuf,

        #[arg(long)]
        trace_id: String,

        #[arg(long)]
        operator_id: String,

        #[arg(long, value_enum)]
        action: CliOverrideAction,

        #[arg(long)]
        reason: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Human,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliOverrideAction {
    Approve,
    Reject,
    Flag,
    Replace,
}

impl From<CliOverrideAction> for OverrideAction {
    fn from(action: CliOverrideAction) -> Self {
        match action {
            CliOverrideAction::Approve => OverrideAction::Approve,
            CliOverrideAction::Reject => OverrideAction::Reject,
            CliOverrideAction::Flag => OverrideAction::Flag,
            CliOverrideAction::Replace => OverrideAction::Replace,
        }
    }
}

fn load_catalog(path: &Option<PathBuf>) -> Result<Catalog> {
    match path {
        None => Ok(Catalog::default_catalog()),
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading catalog file {}", path.display()))?;
            let catalog = if path.extension().and_then(|e| e.to_str()) == Some("json") {
                Catalog::from_json_str(&content)?
            } else {
                Catalog::from_yaml_str(&content)?
            };
            Ok(catalog)
        }
    }
}

fn load_config(path: &Option<PathBuf>) -> Result<SpendSenseConfig> {
    match path {
        None => Ok(SpendSenseConfig::default()),
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            let config: SpendSenseConfig = serde_yaml::from_str(&content)?;
            Ok(config)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().json())
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    match cli.command {
        Commands::Run {
            fixture,
            customers,
            trace_dir,
            catalog,
            config,
            now,
            grant_consent,
        } => run(fixture, customers, trace_dir, catalog, config, now, grant_consent),
        Commands::ValidateCatalog { catalog, config } => validate_catalog_cmd(catalog, config),
        Commands::Eval {
            trace_dir,
            customers,
            latencies_ms,
            format,
        } => eval(trace_dir, customers, latencies_ms, format),
        Commands::ShowTrace { trace_dir, trace_id } => show_trace(trace_dir, trace_id),
        Commands::Override {
            trace_dir,
            trace_id,
            operator_id,
            action,
            reason,
        } => record_override(trace_dir, trace_id, operator_id, action, reason),
    }
}

fn run(
    fixture_path: PathBuf,
    customers: Vec<String>,
    trace_dir: PathBuf,
    catalog_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    now: Option<NaiveDate>,
    grant_consent: bool,
) -> Result<()> {
    let datastore = fixture::load(&fixture_path)?;
    let catalog = load_catalog(&catalog_path)?;
    let config = load_config(&config_path)?;
    validate_config(&config)?;
    validate_catalog(&catalog, &config)?;

    let consent_store = InMemoryConsentStore::new();
    if grant_consent {
        for customer_id in &customers {
            consent_store.grant(customer_id, ConsentScope::Recommendations, chrono::Utc::now())?;
        }
    }

    let trace_store = FileTraceStore::new(trace_dir)?;
    let now = now.unwrap_or_else(|| chrono::Utc::now().date_naive());

    let pipeline = Pipeline {
        datastore: &datastore,
        catalog: &catalog,
        config: &config,
        consent_store: &consent_store,
        trace_store: &trace_store,
        collaborator: None,
    };

    for (customer_id, result) in pipeline.generate_recommendations_parallel(&customers, now) {
        match result {
            Ok(result) => {
                println!(
                    "customer={customer_id} trace_id={} persona_180d={:?} education={} offers={}",
                    result.trace_id,
                    result.persona_180d.primary.persona_type,
                    result.education.len(),
                    result.offers.len(),
                );
            }
            Err(err) => {
                tracing::warn!(customer_id, error = %err, "pipeline run failed");
            }
        }
    }

    Ok(())
}

fn validate_catalog_cmd(catalog_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let catalog = load_catalog(&catalog_path)?;
    let config = load_config(&config_path)?;
    validate_config(&config)?;
    validate_catalog(&catalog, &config)?;
    println!("catalog and config are valid");
    Ok(())
}

fn eval(trace_dir: PathBuf, customers: Vec<String>, latencies_ms: Vec<f64>, format: ReportFormat) -> Result<()> {
    let trace_store = FileTraceStore::new(trace_dir)?;
    let harness = EvaluationHarness::new(&trace_store);
    let report = harness.evaluate(&customers, &latencies_ms)?;

    let text = match format {
        ReportFormat::Human => HumanSummaryGenerator.generate(&report)?,
        ReportFormat::Json => JsonReportGenerator::default().generate(&report)?,
    };
    println!("{text}");
    Ok(())
}

fn show_trace(trace_dir: PathBuf, trace_id: String) -> Result<()> {
    let trace_store = FileTraceStore::new(trace_dir)?;
    let trace = trace_store.read(&trace_id)?;
    println!("{}", serde_json::to_string_pretty(&trace)?);
    Ok(())
}

fn record_override(
    trace_dir: PathBuf,
    trace_id: String,
    operator_id: String,
    action: CliOverrideAction,
    reason: String,
) -> Result<()> {
    let trace_store = FileTraceStore::new(trace_dir)?;
    let original = trace_store.read(&trace_id)?;

    let mut override_trace = original;
    let at = chrono::Utc::now();
    override_trace.timestamp = at;
    override_trace.operator_action = Some(spendsense_core::OperatorAction {
        override_id: spendsense_trace::allocate_trace_id(&operator_id, at),
        trace_id: trace_id.clone(),
        operator_id,
        action: action.into(),
        reason,
        replacement: None,
        at,
    });

    let new_trace_id = trace_store.record_override(override_trace)?;
    println!("recorded override as new trace {new_trace_id}");
    Ok(())
}
