//! Command-line interface for `catboost-predict`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Score feature batches with a CatBoost model.
#[derive(Parser, Debug)]
#[command(name = "catboost-predict")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict every sample of a JSON feature batch.
    Predict {
        /// Path to the .cbm model file (overrides the config file).
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Path to the input batch: {"float_features": [[..]], "cat_features": [[..]]}.
        #[arg(short, long)]
        input: PathBuf,

        /// Prediction kind (raw, probability); overrides the config file.
        #[arg(short, long)]
        kind: Option<String>,

        /// Output format (json, pretty).
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Path to an optional YAML config file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the feature layout of a model.
    Info {
        /// Path to the .cbm model file.
        #[arg(short, long)]
        model: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
