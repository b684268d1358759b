use crate::signal::{is_valid, valid, Sample};

/// Longest missing run (in frames) bridged for the given duration and frame rate.
pub fn max_gap_frames(max_gap_time_s: f32, fps: f32) -> usize {
    ((max_gap_time_s * fps).floor().max(0.0) as usize).max(1)
}

/// Fills short interior gaps by linear interpolation.
///
/// A maximal missing run is filled only when it is at most
/// `max_gap_frames(max_gap_time_s, fps)` long and has a valid neighbour on both
/// sides. Runs touching either end of the signal stay missing.
pub fn interpolate_gaps(signal: &[Sample], max_gap_time_s: f32, fps: f32) -> Vec<Sample> {
    let max_gap = max_gap_frames(max_gap_time_s, fps);
    let n = signal.len();
    let mut out = signal.to_vec();

    let mut i = 0;
    while i < n {
        if is_valid(signal[i]) {
            i += 1;
            continue;
        }
        let start = i;
        while i < n && !is_valid(signal[i]) {
            i += 1;
        }
        let end = i;
        let len = end - start;
        if len > max_gap || start == 0 || end == n {
            continue;
        }
        let (Some(before), Some(after)) = (valid(signal[start - 1]), valid(signal[end])) else {
            continue;
        };
        for (offset, slot) in out[start..end].iter_mut().enumerate() {
            let t = (offset + 1) as f32 / (len + 1) as f32;
            *slot = Some(before + t * (after - before));
        }
    }
    out
}
