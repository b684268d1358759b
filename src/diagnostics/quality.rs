use crate::cleaning::CleanedSignals;
use crate::params::QualityParams;
use crate::signal::SignalKind;
use serde::Serialize;
use std::fmt;

/// Coarse recording quality derived from the pose detection rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Low,
    Fair,
    Ok,
}

impl QualityTier {
    pub fn from_detection_rate(rate: f32, params: &QualityParams) -> Self {
        if rate >= params.tier_fair {
            QualityTier::Ok
        } else if rate >= params.tier_low {
            QualityTier::Fair
        } else {
            QualityTier::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualityTier::Low => "low",
            QualityTier::Fair => "fair",
            QualityTier::Ok => "ok",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fraction of frames with a detected pose; 0 for an empty recording.
pub fn detection_rate(detected: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        detected as f32 / total as f32
    }
}

/// Cleaning counters summed over the joint-angle signals.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningStats {
    pub total_spikes_rejected: usize,
    pub total_gaps_filled: usize,
    /// Spikes as a percentage of all angle samples.
    pub spike_pct: f32,
    /// Interpolated frames as a percentage of all angle samples.
    pub interpolation_pct: f32,
    pub knee_left_valid: usize,
    pub knee_right_valid: usize,
    pub hip_valid: usize,
}

impl CleaningStats {
    pub fn from_cleaned(cleaned: &CleanedSignals) -> Self {
        let mut stats = CleaningStats::default();
        let mut samples = 0usize;
        for kind in SignalKind::ANGLES {
            let s = cleaned.get(kind);
            stats.total_spikes_rejected += s.spikes_rejected;
            stats.total_gaps_filled += s.gaps_filled;
            samples += s.len();
        }
        if samples > 0 {
            stats.spike_pct = 100.0 * stats.total_spikes_rejected as f32 / samples as f32;
            stats.interpolation_pct = 100.0 * stats.total_gaps_filled as f32 / samples as f32;
        }
        stats.knee_left_valid = cleaned.knee_left.valid_frames;
        stats.knee_right_valid = cleaned.knee_right.valid_frames;
        stats.hip_valid = cleaned.hip.valid_frames;
        stats
    }

    /// True when the left knee retains enough valid frames for analysis.
    pub fn meets_min_valid_frames(&self, params: &QualityParams) -> bool {
        self.knee_left_valid >= params.min_valid_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaning::clean_all;
    use crate::params::CleaningParams;
    use crate::signal::RawSignals;

    #[test]
    fn tiers_follow_detection_rate() {
        let q = QualityParams::default();
        assert_eq!(QualityTier::from_detection_rate(0.29, &q), QualityTier::Low);
        assert_eq!(QualityTier::from_detection_rate(0.30, &q), QualityTier::Fair);
        assert_eq!(QualityTier::from_detection_rate(0.49, &q), QualityTier::Fair);
        assert_eq!(QualityTier::from_detection_rate(0.50, &q), QualityTier::Ok);
        assert_eq!(QualityTier::Ok.to_string(), "ok");
    }

    #[test]
    fn empty_recording_has_zero_rate() {
        assert_eq!(detection_rate(0, 0), 0.0);
        assert_eq!(detection_rate(3, 4), 0.75);
    }

    #[test]
    fn stats_sum_angle_signals_only() {
        let mut ramp: Vec<_> = (0..40).map(|i| Some(i as f32)).collect();
        ramp[10] = Some(500.0);
        ramp[20] = None;
        let raw = RawSignals {
            knee_left: ramp.clone(),
            knee_right: ramp.clone(),
            hip: vec![Some(1.0); 40],
            // not an angle: never counted
            inter_ankle: ramp,
            ..Default::default()
        };
        let cleaned = clean_all(&raw, 30.0, &CleaningParams::default());
        let stats = CleaningStats::from_cleaned(&cleaned);
        assert_eq!(stats.total_spikes_rejected, 2);
        assert_eq!(stats.total_gaps_filled, 4);
        assert!((stats.spike_pct - 100.0 * 2.0 / 120.0).abs() < 1e-4);
        assert_eq!(stats.knee_left_valid, 40);
        assert_eq!(stats.hip_valid, 40);
        assert!(stats.meets_min_valid_frames(&QualityParams::default()));
    }
}
