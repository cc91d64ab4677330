use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use notaval_core::{CertificateIntent, ExtractionResult};
use notaval_engine::{analyze, resolve, validate, validate_at};

mod display;
mod snapshot;

#[derive(Parser)]
#[command(name = "notaval", version, about = "Notarial certificate pre-issuance validation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a certificate intent into its legal requirement checklist.
    Resolve {
        /// Path to the intent JSON.
        #[arg(long)]
        intent: PathBuf,
        /// Print the raw JSON artifact instead of the summary.
        #[arg(long)]
        json: bool,
        /// Snapshot the artifact to this path.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Validate extracted evidence against the resolved requirements.
    Validate {
        #[arg(long)]
        intent: PathBuf,
        /// Path to the extraction result JSON.
        #[arg(long)]
        extraction: PathBuf,
        /// Evaluate expiry at this date instead of today (YYYY-MM-DD).
        #[arg(long)]
        reference_date: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Run the full pipeline and print the prioritised action plan.
    Gaps {
        #[arg(long)]
        intent: PathBuf,
        #[arg(long)]
        extraction: PathBuf,
        #[arg(long)]
        reference_date: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Resolve { intent, json, out } => {
            let intent: CertificateIntent = snapshot::load_json(&intent)?;
            let requirements = resolve(&intent)?;
            if let Some(path) = out {
                snapshot::save_json(&path, &requirements)?;
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&requirements)?);
            } else {
                display::print_requirements(&requirements);
            }
        }
        Command::Validate { intent, extraction, reference_date, json, out } => {
            let matrix = run_validation(&intent, &extraction, reference_date)?;
            if let Some(path) = out {
                snapshot::save_json(&path, &matrix)?;
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&matrix)?);
            } else {
                display::print_matrix(&matrix);
            }
        }
        Command::Gaps { intent, extraction, reference_date, json, out } => {
            let matrix = run_validation(&intent, &extraction, reference_date)?;
            let report = analyze(&matrix);
            if let Some(path) = out {
                snapshot::save_json(&path, &report)?;
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                display::print_report(&matrix, &report);
            }
        }
    }

    Ok(())
}

fn run_validation(
    intent_path: &PathBuf,
    extraction_path: &PathBuf,
    reference_date: Option<NaiveDate>,
) -> Result<notaval_engine::ValidationMatrix> {
    let intent: CertificateIntent = snapshot::load_json(intent_path)?;
    let extraction: ExtractionResult = snapshot::load_json(extraction_path)?;
    let requirements = resolve(&intent)?;
    let matrix = match reference_date {
        Some(date) => validate_at(&requirements, &extraction, date),
        None => validate(&requirements, &extraction),
    };
    Ok(matrix)
}
