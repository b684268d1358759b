//! Reconstruction error → 0–100 gait score.
//!
//! Errors at or below the impairment threshold map linearly from 100 (perfect
//! reconstruction) down to 70; above it the score decays hyperbolically from
//! 70 towards 0 with rate `k`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Score at the impairment threshold.
const THRESHOLD_SCORE: f32 = 70.0;

/// Calibration of the score mapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Reconstruction error separating normal from impaired gait.
    pub threshold: f32,
    /// Smallest error seen on the training set.
    pub min_error: f32,
    /// Largest error seen on the training set.
    pub max_error: f32,
    /// Decay rate above the threshold.
    pub k: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            threshold: 0.232,
            min_error: 0.022,
            max_error: 5.29,
            k: 2.5,
        }
    }
}

impl ScoringConfig {
    pub fn score(&self, error: f32) -> u8 {
        gait_score(error, self.threshold, self.k)
    }

    pub fn is_impaired(&self, error: f32) -> bool {
        is_impaired(error, self.threshold)
    }
}

/// Maps a reconstruction error to an integer score in `[0, 100]`.
///
/// A non-finite error scores 0.
pub fn gait_score(error: f32, threshold: f32, k: f32) -> u8 {
    if !error.is_finite() {
        return 0;
    }
    let score = if error <= threshold {
        let fraction = if threshold > 0.0 { error / threshold } else { 0.0 };
        100.0 - (100.0 - THRESHOLD_SCORE) * fraction
    } else {
        THRESHOLD_SCORE / (1.0 + k * (error - threshold))
    };
    score.round().clamp(0.0, 100.0) as u8
}

/// True when the error lies strictly above the threshold.
pub fn is_impaired(error: f32, threshold: f32) -> bool {
    error > threshold
}

/// Verbal category of a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaitLabel {
    Excellent,
    Good,
    Fair,
    MildImpairment,
    ModerateImpairment,
    SevereImpairment,
}

impl GaitLabel {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => GaitLabel::Excellent,
            80..=89 => GaitLabel::Good,
            70..=79 => GaitLabel::Fair,
            50..=69 => GaitLabel::MildImpairment,
            30..=49 => GaitLabel::ModerateImpairment,
            _ => GaitLabel::SevereImpairment,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GaitLabel::Excellent => "Excellent",
            GaitLabel::Good => "Good",
            GaitLabel::Fair => "Fair",
            GaitLabel::MildImpairment => "Mild Impairment",
            GaitLabel::ModerateImpairment => "Moderate Impairment",
            GaitLabel::SevereImpairment => "Severe Impairment",
        }
    }
}

impl fmt::Display for GaitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: f32 = 0.232;

    #[test]
    fn anchor_points() {
        assert_eq!(gait_score(0.0, T, 2.5), 100);
        assert_eq!(gait_score(T, T, 2.5), 70);
        assert_eq!(gait_score(1e9, T, 2.5), 0);
        assert_eq!(gait_score(f32::NAN, T, 2.5), 0);
    }

    #[test]
    fn half_threshold_is_85() {
        assert_eq!(gait_score(T / 2.0, T, 2.5), 85);
    }

    #[test]
    fn decay_above_threshold() {
        // 70 / (1 + 2.5 · 0.4) = 35
        assert_eq!(gait_score(T + 0.4, T, 2.5), 35);
        assert!(gait_score(T + 0.1, T, 2.5) > gait_score(T + 0.2, T, 2.5));
    }

    #[test]
    fn impairment_is_strictly_above_threshold() {
        assert!(!is_impaired(T, T));
        assert!(is_impaired(T + 1e-4, T));
        assert!(!is_impaired(0.0, T));
    }

    #[test]
    fn labels_follow_bands() {
        assert_eq!(GaitLabel::from_score(100), GaitLabel::Excellent);
        assert_eq!(GaitLabel::from_score(90), GaitLabel::Excellent);
        assert_eq!(GaitLabel::from_score(89), GaitLabel::Good);
        assert_eq!(GaitLabel::from_score(70), GaitLabel::Fair);
        assert_eq!(GaitLabel::from_score(69), GaitLabel::MildImpairment);
        assert_eq!(GaitLabel::from_score(30), GaitLabel::ModerateImpairment);
        assert_eq!(GaitLabel::from_score(29), GaitLabel::SevereImpairment);
        assert_eq!(GaitLabel::MildImpairment.to_string(), "Mild Impairment");
    }

    #[test]
    fn config_defaults() {
        let c = ScoringConfig::default();
        assert_eq!(c.threshold, 0.232);
        assert_eq!(c.min_error, 0.022);
        assert_eq!(c.max_error, 5.29);
        assert_eq!(c.k, 2.5);
        assert_eq!(c.score(0.0), 100);
    }
}
