//! Signal cleaning: spike rejection → gap interpolation → smoothing.
//!
//! Each stage is a pure function returning a new sequence of the same length.
//! The stage order is fixed; reordering changes numeric results and breaks
//! parity with the reference pipeline.
//!
//! - [`mask_spikes`] – global σ-rule outlier masking.
//! - [`interpolate_gaps`] – linear bridging of short interior gaps.
//! - [`smooth_moving_average`] – centred, missing-aware moving average.
//! - [`process_signal`] / [`clean_signal`] – the full chain, the latter with
//!   per-stage counters for diagnostics.
//! - [`clean_all`] – [`clean_signal`] over every signal of a recording.

mod gaps;
mod smooth;
mod spikes;

pub use gaps::{interpolate_gaps, max_gap_frames};
pub use smooth::smooth_moving_average;
pub use spikes::mask_spikes;

use crate::params::CleaningParams;
use crate::signal::{is_valid, valid_count, RawSignals, Sample, SignalSet};
use serde::Serialize;

/// Cleaned samples together with the counters collected along the way.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedSignal {
    pub data: Vec<Sample>,
    /// Valid samples masked by the spike stage.
    pub spikes_rejected: usize,
    /// Missing samples filled by the interpolation stage.
    pub gaps_filled: usize,
    /// Valid samples after smoothing.
    pub valid_frames: usize,
}

impl CleanedSignal {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.data
    }
}

impl AsRef<[Sample]> for CleanedSignal {
    fn as_ref(&self) -> &[Sample] {
        &self.data
    }
}

/// Cleaned counterparts of a recording's [`RawSignals`].
pub type CleanedSignals = SignalSet<CleanedSignal>;

/// Cleans every signal of a recording.
pub fn clean_all(raw: &RawSignals, fps: f32, params: &CleaningParams) -> CleanedSignals {
    raw.map(|_, s| clean_signal(s, fps, params))
}

/// Runs the full cleaning chain.
pub fn process_signal(raw: &[Sample], fps: f32, params: &CleaningParams) -> Vec<Sample> {
    let masked = mask_spikes(raw, params.sigma_thresh);
    let filled = interpolate_gaps(&masked, params.max_gap_time_s, fps);
    smooth_moving_average(&filled, params.smoothing_window)
}

/// Runs the full cleaning chain and counts what each stage changed.
pub fn clean_signal(raw: &[Sample], fps: f32, params: &CleaningParams) -> CleanedSignal {
    let masked = mask_spikes(raw, params.sigma_thresh);
    let spikes_rejected = raw
        .iter()
        .zip(&masked)
        .filter(|(&before, &after)| is_valid(before) && !is_valid(after))
        .count();

    let filled = interpolate_gaps(&masked, params.max_gap_time_s, fps);
    let gaps_filled = masked
        .iter()
        .zip(&filled)
        .filter(|(&before, &after)| !is_valid(before) && is_valid(after))
        .count();

    let data = smooth_moving_average(&filled, params.smoothing_window);
    let valid_frames = valid_count(&data);
    CleanedSignal {
        data,
        spikes_rejected,
        gaps_filled,
        valid_frames,
    }
}
