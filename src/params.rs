//! Parameter types configuring the pipeline stages.
//!
//! Defaults reproduce the reference extraction pipeline the scoring model was
//! trained against. Changing any of them changes numeric results, so overrides
//! should come from the same artifact that accompanies the model.
//!
//! Every struct deserializes with `#[serde(default)]`: an override artifact
//! only needs to list the knobs it changes.

use crate::error::{GaitError, Result};
use serde::{Deserialize, Serialize};

/// Pipeline-wide parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaitParams {
    pub pose: PoseParams,
    pub cleaning: CleaningParams,
    pub features: FeatureParams,
    pub quality: QualityParams,
}

impl GaitParams {
    /// Rejects parameter combinations the algorithms cannot honour.
    pub fn validate(&self) -> Result<()> {
        let c = &self.cleaning;
        if !(c.sigma_thresh.is_finite() && c.sigma_thresh > 0.0) {
            return Err(GaitError::InvalidConfiguration(format!(
                "sigma_thresh must be positive, got {}",
                c.sigma_thresh
            )));
        }
        if !(c.max_gap_time_s.is_finite() && c.max_gap_time_s >= 0.0) {
            return Err(GaitError::InvalidConfiguration(format!(
                "max_gap_time_s must be non-negative, got {}",
                c.max_gap_time_s
            )));
        }
        if c.smoothing_window == 0 {
            return Err(GaitError::InvalidConfiguration(
                "smoothing_window must be at least 1".into(),
            ));
        }
        let f = &self.features;
        let in_range = |p: f32| (0.0..=100.0).contains(&p);
        if !in_range(f.percentile_low) || !in_range(f.percentile_high) {
            return Err(GaitError::InvalidConfiguration(format!(
                "percentiles must lie in [0, 100], got {} / {}",
                f.percentile_low, f.percentile_high
            )));
        }
        if f.percentile_low >= f.percentile_high {
            return Err(GaitError::InvalidConfiguration(format!(
                "percentile_low ({}) must be below percentile_high ({})",
                f.percentile_low, f.percentile_high
            )));
        }
        let q = &self.quality;
        if q.tier_low > q.tier_fair {
            return Err(GaitError::InvalidConfiguration(format!(
                "tier_low ({}) must not exceed tier_fair ({})",
                q.tier_low, q.tier_fair
            )));
        }
        Ok(())
    }
}

/// Landmark gating applied when reducing pose frames to samples.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseParams {
    /// Minimum visibility and presence for a landmark to be used.
    pub conf_thresh: f32,
}

impl Default for PoseParams {
    fn default() -> Self {
        Self { conf_thresh: 0.5 }
    }
}

/// Spike rejection, gap interpolation and smoothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningParams {
    /// Values further than `sigma_thresh · std` from the mean are masked.
    pub sigma_thresh: f32,
    /// Longest gap (seconds) bridged by linear interpolation.
    pub max_gap_time_s: f32,
    /// Centred moving-average window (odd).
    pub smoothing_window: usize,
}

impl Default for CleaningParams {
    fn default() -> Self {
        Self {
            sigma_thresh: 3.0,
            max_gap_time_s: 0.15,
            smoothing_window: 5,
        }
    }
}

/// Percentile and LDJ settings used by the feature extractor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureParams {
    pub percentile_low: f32,
    pub percentile_high: f32,
    /// Minimum valid frames for an LDJ value.
    pub ldj_min_frames: usize,
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self {
            percentile_low: 5.0,
            percentile_high: 95.0,
            ldj_min_frames: 30,
        }
    }
}

/// Recording quality gates reported by the diagnostics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityParams {
    /// Minimum valid frames for a recording to be considered analysable.
    pub min_valid_frames: usize,
    /// Detection rate below which the recording is `low` quality.
    pub tier_low: f32,
    /// Detection rate at or above which the recording is `ok` quality.
    pub tier_fair: f32,
}

impl Default for QualityParams {
    fn default() -> Self {
        Self {
            min_valid_frames: 30,
            tier_low: 0.30,
            tier_fair: 0.50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let p = GaitParams::default();
        assert_eq!(p.pose.conf_thresh, 0.5);
        assert_eq!(p.cleaning.sigma_thresh, 3.0);
        assert_eq!(p.cleaning.max_gap_time_s, 0.15);
        assert_eq!(p.cleaning.smoothing_window, 5);
        assert_eq!(p.features.percentile_low, 5.0);
        assert_eq!(p.features.percentile_high, 95.0);
        assert_eq!(p.features.ldj_min_frames, 30);
        assert_eq!(p.quality.min_valid_frames, 30);
        assert_eq!(p.quality.tier_low, 0.30);
        assert_eq!(p.quality.tier_fair, 0.50);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let p: GaitParams =
            serde_json::from_str(r#"{ "cleaning": { "smoothing_window": 7 } }"#).unwrap();
        assert_eq!(p.cleaning.smoothing_window, 7);
        assert_eq!(p.cleaning.sigma_thresh, 3.0);
        assert_eq!(p.features, FeatureParams::default());
    }

    #[test]
    fn inverted_percentiles_are_rejected() {
        let mut p = GaitParams::default();
        p.features.percentile_low = 95.0;
        p.features.percentile_high = 5.0;
        assert!(matches!(
            p.validate(),
            Err(GaitError::InvalidConfiguration(_))
        ));
    }
}
