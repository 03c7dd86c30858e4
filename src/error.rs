use crate::sys;
use std::ffi::{CStr, NulError};
use thiserror::Error;

pub type CatBoostResult<T> = std::result::Result<T, CatBoostError>;

/// Errors produced by the CatBoost binding.
#[derive(Debug, Error)]
pub enum CatBoostError {
    /// A batch call had no samples, or no features in its first rows.
    #[error("empty samples")]
    EmptySamples,

    /// A single-sample call had neither float nor categorical features.
    #[error("empty sample")]
    EmptySample,

    /// The native engine reported a failure; the message is its last error string.
    #[error("{0}")]
    Native(String),

    /// The engine could not allocate a model calcer.
    #[error("failed to allocate model calcer")]
    Allocation,

    #[error("path contains invalid UTF-8 characters: {0}")]
    InvalidPath(String),

    /// A path or categorical value contained an interior NUL byte.
    #[error("string contains NUL byte: {0}")]
    NulByte(#[from] NulError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "polars-support")]
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl CatBoostError {
    /// Check the return value from a CatBoost FFI call, and return the last error message on error.
    ///
    /// Must be called inside the engine critical section, immediately after the
    /// failing call, so no other boundary call can overwrite the error string.
    pub(crate) fn check_return_value(ok: bool) -> CatBoostResult<()> {
        if ok {
            Ok(())
        } else {
            Err(CatBoostError::fetch_catboost_error())
        }
    }

    /// Fetch current error message from CatBoost.
    fn fetch_catboost_error() -> Self {
        let ptr = unsafe { sys::GetErrorString() };
        if ptr.is_null() {
            return CatBoostError::Native("Unknown error".to_string());
        }
        let c_str = unsafe { CStr::from_ptr(ptr) };
        CatBoostError::Native(c_str.to_string_lossy().into_owned())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The native engine message, if this error came from the engine.
    pub fn native_message(&self) -> Option<&str> {
        match self {
            Self::Native(msg) => Some(msg),
            _ => None,
        }
    }
}
