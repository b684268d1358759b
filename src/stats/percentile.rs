//! Missing-aware order statistics.
//!
//! Percentiles use linear interpolation between the two closest ranks
//! (`index = p/100 · (n − 1)`), which is the default method of the reference
//! pipeline. Every function ignores missing and non-finite samples and returns
//! `None` when nothing is left to summarise.

use crate::signal::{valid_values, Sample};

/// Percentile `p` (0–100) of the valid samples.
pub fn nan_percentile(values: &[Sample], p: f32) -> Option<f32> {
    let mut sorted = valid_values(values);
    percentile_of(&mut sorted, p)
}

/// Same as [`nan_percentile`] for a buffer already free of missing samples.
/// Non-finite values are still dropped.
pub fn percentile_dense(values: &[f32], p: f32) -> Option<f32> {
    let mut sorted: Vec<f32> = values.iter().copied().filter(|v| v.is_finite()).collect();
    percentile_of(&mut sorted, p)
}

fn percentile_of(sorted: &mut [f32], p: f32) -> Option<f32> {
    if sorted.is_empty() {
        return None;
    }
    if sorted.len() == 1 {
        return Some(sorted[0]);
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let index = (p as f64 / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
    let lower = index.floor() as usize;
    let upper = (lower + 1).min(n - 1);
    let fraction = (index - lower as f64) as f32;
    Some(sorted[lower] + fraction * (sorted[upper] - sorted[lower]))
}

/// Range of motion: `P(p_high) − P(p_low)`.
pub fn compute_rom(signal: &[Sample], p_low: f32, p_high: f32) -> Option<f32> {
    let low = nan_percentile(signal, p_low)?;
    let high = nan_percentile(signal, p_high)?;
    Some(high - low)
}

/// Spike-robust maximum, reported as a high percentile.
pub fn compute_max(signal: &[Sample], p: f32) -> Option<f32> {
    nan_percentile(signal, p)
}

/// Arithmetic mean of the valid samples, accumulated in f64.
pub fn nan_mean(values: &[Sample]) -> Option<f32> {
    let valid = valid_values(values);
    if valid.is_empty() {
        return None;
    }
    let sum: f64 = valid.iter().map(|&v| v as f64).sum();
    Some((sum / valid.len() as f64) as f32)
}
