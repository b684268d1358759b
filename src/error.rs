//! Error type shared by every stage of the pipeline.
//!
//! Per-feature computations never return these errors: they degrade the
//! affected value to `None` instead. Errors are reserved for whole-pipeline
//! precondition violations and for failures of external resources (artifact
//! files, the inference backend).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GaitError>;

#[derive(Debug, Error)]
pub enum GaitError {
    /// Not enough valid samples to compute a requested quantity.
    #[error("missing data: {0}")]
    MissingData(String),

    /// A formula would divide by zero or take the log of a non-positive value.
    ///
    /// Kept for the error taxonomy. The built-in stages degrade such features
    /// to `None` and never construct it; host-side stages may.
    #[error("numerically degenerate input: {0}")]
    NumericDegenerate(String),

    /// A feature vector did not have the canonical number of entries.
    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    /// Scoring was requested before initialization or after release.
    #[error("scorer is not ready (state: {0})")]
    NotReady(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The externally supplied inference backend failed.
    #[error("model inference failed: {0}")]
    Model(String),
}

impl GaitError {
    /// Coarse category used in logs and diagnostics.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GaitError::MissingData(_) => ErrorKind::MissingData,
            GaitError::NumericDegenerate(_) => ErrorKind::NumericDegenerate,
            GaitError::FeatureCount { .. }
            | GaitError::NotReady(_)
            | GaitError::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            GaitError::Io { .. } | GaitError::Parse { .. } | GaitError::Model(_) => {
                ErrorKind::ExternalResourceFailure
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    MissingData,
    NumericDegenerate,
    InvalidConfiguration,
    ExternalResourceFailure,
}
