use crate::error::CatBoostError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Logistic function mapping a raw margin to a (0, 1) probability.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Which value a prediction call returns per sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionKind {
    /// Unscaled model output.
    #[default]
    Raw,
    /// Raw margin passed through [`sigmoid`].
    Probability,
}

impl PredictionKind {
    pub(crate) fn apply(self, raw: f64) -> f64 {
        match self {
            Self::Raw => raw,
            Self::Probability => sigmoid(raw),
        }
    }
}

impl FromStr for PredictionKind {
    type Err = CatBoostError;

    /// Parse "raw" or "probability" (also "proba").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "probability" | "proba" => Ok(Self::Probability),
            other => Err(CatBoostError::config(format!(
                "Invalid prediction kind: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for PredictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => write!(f, "raw"),
            Self::Probability => write!(f, "probability"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sigmoid_midpoint() {
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn test_sigmoid_is_monotonic_and_bounded() {
        let xs = [-30.0, -2.5, -0.1, 0.0, 0.1, 2.5, 30.0];
        for pair in xs.windows(2) {
            assert!(sigmoid(pair[0]) < sigmoid(pair[1]));
        }
        assert!(xs.iter().all(|&x| (0.0..=1.0).contains(&sigmoid(x))));
    }

    #[test]
    fn test_sigmoid_symmetry() {
        for x in [0.3, 1.0, 4.2] {
            assert_abs_diff_eq!(sigmoid(x) + sigmoid(-x), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_prediction_kind_parse() {
        assert_eq!("raw".parse::<PredictionKind>().unwrap(), PredictionKind::Raw);
        assert_eq!(
            " Probability ".parse::<PredictionKind>().unwrap(),
            PredictionKind::Probability
        );
        assert_eq!(
            "proba".parse::<PredictionKind>().unwrap(),
            PredictionKind::Probability
        );
        assert!("logit".parse::<PredictionKind>().is_err());
    }

    #[test]
    fn test_prediction_kind_apply() {
        assert_eq!(PredictionKind::Raw.apply(1.5), 1.5);
        assert_eq!(PredictionKind::Probability.apply(0.0), 0.5);
        assert_eq!(PredictionKind::Probability.to_string(), "probability");
    }
}
