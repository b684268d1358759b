use crate::signal::{valid, valid_values, Sample};

/// Masks values further than `sigma_thresh` population standard deviations
/// from the global mean of the valid samples.
///
/// Signals with fewer than two valid samples, or with zero spread, are
/// returned unchanged.
pub fn mask_spikes(signal: &[Sample], sigma_thresh: f32) -> Vec<Sample> {
    let values = valid_values(signal);
    if values.len() < 2 {
        return signal.to_vec();
    }

    let n = values.len() as f64;
    let mean = (values.iter().map(|&v| v as f64).sum::<f64>() / n) as f32;
    let variance = values
        .iter()
        .map(|&v| {
            let d = (v - mean) as f64;
            d * d
        })
        .sum::<f64>()
        / n;
    let std = variance.sqrt() as f32;
    if std == 0.0 {
        return signal.to_vec();
    }

    let threshold = sigma_thresh * std;
    signal
        .iter()
        .map(|&s| match valid(s) {
            Some(v) if (v - mean).abs() > threshold => None,
            _ => s,
        })
        .collect()
}
