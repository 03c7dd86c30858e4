//! CLI entry point for catboost-predict.

use anyhow::{Context, Result};
use std::fs;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use catboost_rust::cli::{Cli, Commands};
use catboost_rust::config::Config;
use catboost_rust::{FeatureBatch, Model, PredictionKind};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Logs go to stderr so stdout carries only the JSON result
    FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Predict {
            model,
            input,
            kind,
            format,
            config,
        } => {
            let config = if let Some(config_path) = config {
                Config::from_yaml_file(&config_path)
                    .with_context(|| format!("Failed to load config: {}", config_path.display()))?
            } else {
                Config::default()
            };

            let model_path = model
                .or(config.model.path)
                .context("No model given: pass --model or set model.path in the config")?;
            let kind: PredictionKind = match kind {
                Some(kind) => kind.parse()?,
                None => config.prediction.kind,
            };

            info!("Loading model: {}", model_path.display());
            let model = Model::load(&model_path)
                .with_context(|| format!("Failed to load model: {}", model_path.display()))?;

            info!("Loading input: {}", input.display());
            let batch: FeatureBatch = serde_json::from_str(
                &fs::read_to_string(&input)
                    .with_context(|| format!("Failed to read input: {}", input.display()))?,
            )
            .with_context(|| format!("Invalid feature batch: {}", input.display()))?;

            let predictions =
                model.predict_batch_as(kind, &batch.float_features, &batch.cat_features)?;
            info!("Scored {} samples ({})", predictions.len(), kind);

            let output = serde_json::json!({
                "kind": kind.to_string(),
                "num_samples": predictions.len(),
                "predictions": predictions,
            });

            if format == "pretty" {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", serde_json::to_string(&output)?);
            }

            model.close();
        }

        Commands::Info { model } => {
            println!("catboost-rust v{}", env!("CARGO_PKG_VERSION"));
            println!("Model: {}", model.display());

            let model = Model::load(&model)
                .with_context(|| format!("Failed to load model: {}", model.display()))?;
            println!("Float features: {}", model.float_features_count());
            println!("Categorical features: {}", model.cat_features_count());
            println!("Trees: {}", model.tree_count());
            println!("Dimensions: {}", model.dimensions_count());
        }
    }

    Ok(())
}
