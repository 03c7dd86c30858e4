//! Rust bindings for CatBoost model inference.
//!
//! Loads a trained CatBoost model through the native `libcatboostmodel`
//! library and scores batches of float and categorical features with it.
//!
//! ```no_run
//! use catboost_rust::Model;
//!
//! let model = Model::load("model.cbm")?;
//! let floats = vec![vec![1.0f32, 2.0, 3.0]];
//! let cats = vec![vec!["red"]];
//!
//! let raw = model.predict_batch(&floats, &cats)?;
//! let proba = model.predict_batch_proba(&floats, &cats)?;
//! println!("raw: {:?}, probability: {:?}", raw, proba);
//! # Ok::<(), catboost_rust::CatBoostError>(())
//! ```

// Include the CatBoost C API bindings
mod sys;

mod calcer;
mod marshal;

mod error;
pub use crate::error::{CatBoostError, CatBoostResult};

mod model;
pub use crate::model::Model;

mod transform;
pub use crate::marshal::FeatureBatch;
pub use crate::transform::{sigmoid, PredictionKind};

pub mod cli;
pub mod config;

#[cfg(feature = "polars-support")]
mod dataframe;
