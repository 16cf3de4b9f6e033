//! Biomarkers - candidate protein biomarker discovery CLI
//!
//! Command-line interface for the basic, diagnosis, and monitoring flows.

use biomarker_discovery::error::Result;
use biomarker_discovery::flow::{
    find_diagnosis_biomarkers, find_monitoring_biomarkers, run_basic_comparison, DiscoverySummary,
};
use biomarker_discovery::ingest::load_cohort;
use biomarker_discovery::reconcile::DiscardLedger;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Which discovery flow to run.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Compare two conditions within one subtype
    Basic,
    /// Within-subtype then cross-subtype discovery
    Diagnosis,
    /// Cross-subtype-only discovery
    Monitoring,
}

/// Summary output format.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Candidate protein biomarker discovery
#[derive(Parser)]
#[command(name = "biomarkers")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cohort root directory: one subdirectory per subtype, one CSV export
    /// per condition
    #[arg(short, long)]
    input: PathBuf,

    /// Subtype to find biomarkers for
    #[arg(short, long, default_value = "Subtype1")]
    subtype: String,

    /// Condition to find biomarkers for
    #[arg(short = 'c', long, default_value = "Condition1")]
    condition1: String,

    /// Other condition in the subtype to compare against (basic and
    /// diagnosis modes)
    #[arg(short = 'k', long, default_value = "Condition2")]
    condition2: String,

    /// Other subtypes to compare against (diagnosis and monitoring modes)
    #[arg(long, value_delimiter = ',')]
    other_subtypes: Vec<String>,

    /// Condition names to collect from the other subtypes
    #[arg(long, value_delimiter = ',')]
    other_conditions: Vec<String>,

    /// Output path for the biomarker report (derived from subtype/condition
    /// names when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Discovery flow to run
    #[arg(short, long, value_enum, default_value = "basic")]
    mode: Mode,

    /// Summary output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    eprintln!("Loading cohort from {:?}...", cli.input);
    let mut cohort = load_cohort(&cli.input)?;
    eprintln!(
        "Loaded cohort '{}' with {} subtypes",
        cohort.name(),
        cohort.subtypes().len()
    );

    let output = cli.output.as_deref();
    let mut ledger = DiscardLedger::new();

    let summary: DiscoverySummary = match cli.mode {
        Mode::Basic => {
            eprintln!(
                "Comparing {} against {} in {}...",
                cli.condition1, cli.condition2, cli.subtype
            );
            run_basic_comparison(&cohort, &cli.subtype, &cli.condition1, &cli.condition2, output)?
        }
        Mode::Diagnosis => {
            eprintln!("Running diagnosis biomarker discovery for {}...", cli.subtype);
            find_diagnosis_biomarkers(
                &mut cohort,
                &cli.subtype,
                &cli.condition1,
                &cli.condition2,
                &cli.other_subtypes,
                &cli.other_conditions,
                &mut ledger,
                output,
            )?
        }
        Mode::Monitoring => {
            eprintln!("Running monitoring biomarker discovery for {}...", cli.subtype);
            find_monitoring_biomarkers(
                &mut cohort,
                &cli.subtype,
                &cli.condition1,
                &cli.other_subtypes,
                &cli.other_conditions,
                &mut ledger,
                output,
            )?
        }
    };

    match cli.format {
        Format::Text => eprint!("{}", summary),
        Format::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}
