use crate::signal::{valid, Sample};

/// Centred moving average that ignores missing samples.
///
/// The window shrinks at the edges instead of padding. An index whose window
/// holds no valid sample stays missing. Signals shorter than `window` are
/// returned unchanged.
pub fn smooth_moving_average(signal: &[Sample], window: usize) -> Vec<Sample> {
    let n = signal.len();
    if n < window {
        return signal.to_vec();
    }
    let half = window / 2;
    (0..n)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(n);
            let (sum, count) = signal[start..end]
                .iter()
                .filter_map(|&s| valid(s))
                .fold((0.0f64, 0usize), |(sum, count), v| (sum + v as f64, count + 1));
            (count > 0).then(|| (sum / count as f64) as f32)
        })
        .collect()
}
