//! Configuration for the `catboost-predict` binary.

use crate::transform::PredictionKind;
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Model configuration.
    #[serde(default)]
    pub model: ModelConfig,

    /// Prediction configuration.
    #[serde(default)]
    pub prediction: PredictionConfig,
}

/// Model configuration.
#[derive(Debug, Default, Deserialize)]
pub struct ModelConfig {
    /// Path to the `.cbm` model file.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Prediction configuration.
#[derive(Debug, Default, Deserialize)]
pub struct PredictionConfig {
    /// Raw margins or sigmoid probabilities.
    #[serde(default)]
    pub kind: PredictionKind,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> crate::error::CatBoostResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> crate::error::CatBoostResult<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatBoostError;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml_str("{}").unwrap();
        assert!(config.model.path.is_none());
        assert_eq!(config.prediction.kind, PredictionKind::Raw);
    }

    #[test]
    fn test_full_config() {
        let yaml = "model:\n  path: models/churn.cbm\nprediction:\n  kind: probability\n";
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.model.path, Some(PathBuf::from("models/churn.cbm")));
        assert_eq!(config.prediction.kind, PredictionKind::Probability);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = Config::from_yaml_str("prediction:\n  kind: logit\n").unwrap_err();
        assert!(matches!(err, CatBoostError::Yaml(_)));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prediction:\n  kind: probability").unwrap();
        let config = Config::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.prediction.kind, PredictionKind::Probability);

        let err = Config::from_yaml_file("/nonexistent/catboost.yaml").unwrap_err();
        assert!(matches!(err, CatBoostError::Io(_)));
    }
}
