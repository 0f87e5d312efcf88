//! Hobart CLI binary.
//!
//! Thin JSON shuttle around the Hobart allocation models: input shapes are
//! read from files, one model is invoked, and the `ModelResult` is printed
//! as pretty JSON. Persistence, validation, and identity belong to the
//! surrounding application, not here.

use clap::{Parser, Subcommand};
use hobart::{
    AdditionalFactors, IndustryScore, MacroTimingModel, MultiFactorModel, SecurityFactors,
    SectorRotationModel,
};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("failed to render result: {0}")]
    Render(#[from] serde_json::Error),
}

#[derive(Parser)]
#[command(name = "hobart")]
#[command(about = "Hobart: heuristic allocation and ranking models", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend an asset-class allocation from macro inputs
    Macro {
        /// Economic cycle label (recovery, overheating, stagflation, recession)
        #[arg(long)]
        cycle: String,

        /// Market sentiment label (optimistic, neutral, pessimistic)
        #[arg(long)]
        sentiment: String,

        /// JSON file with additional macro factors
        #[arg(long)]
        factors: Option<PathBuf>,
    },

    /// Recommend an industry allocation from prosperity scores
    Sector {
        /// JSON file with an ordered array of {industry, score} objects
        #[arg(long)]
        scores: PathBuf,

        /// JSON file mapping industry to fund flow
        #[arg(long)]
        flows: Option<PathBuf>,

        /// JSON file with additional factors (policy_support, seasonal_factor)
        #[arg(long)]
        factors: Option<PathBuf>,
    },

    /// Rank securities by weighted factor composite
    Rank {
        /// JSON file with an array of security factor records
        #[arg(long)]
        securities: PathBuf,

        /// JSON file mapping factor name to weight
        #[arg(long)]
        weights: Option<PathBuf>,

        /// Market regime label (bull, bear, sideways)
        #[arg(long)]
        regime: Option<String>,

        /// Derive auxiliary factors from the input batch
        #[arg(long)]
        discover: bool,
    },
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn load_factors(path: Option<&PathBuf>) -> Result<AdditionalFactors, CliError> {
    path.map_or_else(|| Ok(AdditionalFactors::new()), |p| load_json(p))
}

fn run(cli: Cli) -> Result<(), CliError> {
    let rendered = match cli.command {
        Commands::Macro {
            cycle,
            sentiment,
            factors,
        } => {
            let factors = load_factors(factors.as_ref())?;
            let result = MacroTimingModel::default().allocate(&cycle, &sentiment, &factors);
            serde_json::to_string_pretty(&result)?
        }
        Commands::Sector {
            scores,
            flows,
            factors,
        } => {
            let scores: Vec<IndustryScore> = load_json(&scores)?;
            let flows: BTreeMap<String, f64> = flows
                .as_ref()
                .map_or_else(|| Ok(BTreeMap::new()), |p| load_json(p))?;
            let factors = load_factors(factors.as_ref())?;
            let result = SectorRotationModel::default().allocate(&scores, &flows, &factors);
            serde_json::to_string_pretty(&result)?
        }
        Commands::Rank {
            securities,
            weights,
            regime,
            discover,
        } => {
            let securities: Vec<SecurityFactors> = load_json(&securities)?;
            let weights: Option<BTreeMap<String, f64>> =
                weights.as_ref().map(|p| load_json(p)).transpose()?;
            let result = MultiFactorModel::default().rank(
                &securities,
                weights.as_ref(),
                regime.as_deref(),
                discover,
            );
            serde_json::to_string_pretty(&result)?
        }
    };

    println!("{rendered}");
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}
