use super::vector::FeatureVector9;
use crate::cleaning::process_signal;
use crate::params::{CleaningParams, FeatureParams};
use crate::signal::{valid, RawSignals, Sample, SignalSet};
use crate::stats::{compute_ldj, compute_max, compute_rom, nan_percentile};
use log::debug;

/// Peak inter-ankle distance normalised by the mean leg length.
///
/// The leg length of a frame is the average of both sides and only counts
/// when both are present; frames beyond the shorter leg signal are ignored.
pub fn stride_amp_norm(
    inter_ankle: &[Sample],
    leg_left: &[Sample],
    leg_right: &[Sample],
    p_high: f32,
) -> Option<f32> {
    let Some(peak) = nan_percentile(inter_ankle, p_high) else {
        debug!("stride_amp_norm: no valid inter-ankle samples");
        return None;
    };

    let (sum, count) = leg_left
        .iter()
        .zip(leg_right)
        .filter_map(|(&l, &r)| Some(0.5 * (valid(l)? as f64 + valid(r)? as f64)))
        .fold((0.0f64, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        debug!("stride_amp_norm: no frame with both leg lengths");
        return None;
    }
    let mean_leg = sum / count as f64;
    if mean_leg <= 0.0 {
        debug!("stride_amp_norm: non-positive mean leg length {mean_leg}");
        return None;
    }
    Some((peak as f64 / mean_leg) as f32)
}

/// Builds the canonical feature vector from cleaned signals.
///
/// Accepts any per-signal storage that derefs to samples, so both
/// [`CleanedSignals`](crate::cleaning::CleanedSignals) and plain sample
/// vectors work. Entries whose inputs cannot support the computation are
/// left missing.
pub fn extract_features<S: AsRef<[Sample]>>(
    cleaned: &SignalSet<S>,
    fps: f32,
    params: &FeatureParams,
) -> FeatureVector9 {
    let (lo, hi) = (params.percentile_low, params.percentile_high);
    let knee_left = cleaned.knee_left.as_ref();
    let knee_right = cleaned.knee_right.as_ref();
    let hip = cleaned.hip.as_ref();
    let ldj = |theta: &[Sample]| compute_ldj(theta, fps, params.ldj_min_frames, lo, hi);

    let features = FeatureVector9 {
        stride_amp_norm: stride_amp_norm(
            cleaned.inter_ankle.as_ref(),
            cleaned.leg_length_left.as_ref(),
            cleaned.leg_length_right.as_ref(),
            hi,
        ),
        knee_left_rom: compute_rom(knee_left, lo, hi),
        knee_right_rom: compute_rom(knee_right, lo, hi),
        knee_left_max: compute_max(knee_left, hi),
        knee_right_max: compute_max(knee_right, hi),
        hip_rom: compute_rom(hip, lo, hi),
        ldj_knee_left: ldj(knee_left),
        ldj_knee_right: ldj(knee_right),
        ldj_hip: ldj(hip),
    };

    for (name, value) in features.named() {
        if value.is_none() {
            debug!("feature {name} unavailable");
        }
    }
    features
}

/// Cleans every raw signal, then extracts features.
pub fn extract_features_from_raw(
    raw: &RawSignals,
    fps: f32,
    cleaning: &CleaningParams,
    params: &FeatureParams,
) -> FeatureVector9 {
    let cleaned = raw.map(|_, s| process_signal(s, fps, cleaning));
    extract_features(&cleaned, fps, params)
}
