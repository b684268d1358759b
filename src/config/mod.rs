//! JSON configuration: model artifacts and the report binary's runtime
//! settings.

pub mod artifacts;
pub mod runtime;

pub use artifacts::{
    load_json, load_normalization_stats, load_scoring_config, load_scoring_config_or_default,
};
pub use runtime::{load_config, ArtifactConfig, OutputConfig, OutputFormat, RuntimeConfig};
