use crate::error::{GaitError, Result};
use crate::scoring::normalize::RawStats;
use crate::scoring::{NormalizationStats, ScoringConfig};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Model configuration artifact; only the scoring block is read.
#[derive(Debug, Default, Deserialize)]
struct ModelConfig {
    scoring: Option<ScoringConfig>,
}

/// Reads and deserializes a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|source| GaitError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| GaitError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads `{ "mean": [9], "std": [9] }`.
pub fn load_normalization_stats(path: &Path) -> Result<NormalizationStats> {
    let raw: RawStats = load_json(path)?;
    NormalizationStats::new(&raw.mean, &raw.std)
}

/// Loads the `scoring` block of a model configuration artifact.
pub fn load_scoring_config(path: &Path) -> Result<ScoringConfig> {
    let config: ModelConfig = load_json(path)?;
    config.scoring.ok_or_else(|| {
        GaitError::InvalidConfiguration(format!("{} has no scoring block", path.display()))
    })
}

/// Like [`load_scoring_config`], falling back to the default calibration
/// when no path is given or the artifact is unusable.
pub fn load_scoring_config_or_default(path: Option<&Path>) -> ScoringConfig {
    let Some(path) = path else {
        return ScoringConfig::default();
    };
    match load_scoring_config(path) {
        Ok(config) => config,
        Err(err) => {
            warn!("using default scoring config: {err}");
            ScoringConfig::default()
        }
    }
}
