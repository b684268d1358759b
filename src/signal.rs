//! Frame-indexed sample sequences with explicit missing values.
//!
//! A sample is `Option<f32>`: `None` means the detector had no confident
//! observation for that frame or the geometry was undefined. Algorithms treat a
//! non-finite `Some` as missing as well, so values produced by degenerate math
//! upstream can never leak into statistics.

use serde::{Deserialize, Serialize};

/// One frame of a signal.
pub type Sample = Option<f32>;

/// The six per-frame signals the feature extractor reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    KneeLeft,
    KneeRight,
    Hip,
    InterAnkle,
    LegLengthLeft,
    LegLengthRight,
}

impl SignalKind {
    pub const ALL: [SignalKind; 6] = [
        SignalKind::KneeLeft,
        SignalKind::KneeRight,
        SignalKind::Hip,
        SignalKind::InterAnkle,
        SignalKind::LegLengthLeft,
        SignalKind::LegLengthRight,
    ];

    /// Joint-angle signals, in degrees.
    pub const ANGLES: [SignalKind; 3] = [
        SignalKind::KneeLeft,
        SignalKind::KneeRight,
        SignalKind::Hip,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SignalKind::KneeLeft => "knee_left",
            SignalKind::KneeRight => "knee_right",
            SignalKind::Hip => "hip",
            SignalKind::InterAnkle => "inter_ankle",
            SignalKind::LegLengthLeft => "leg_length_left",
            SignalKind::LegLengthRight => "leg_length_right",
        }
    }
}

/// One value of `S` per [`SignalKind`].
///
/// `SignalSet<Vec<Sample>>` holds raw recordings, `SignalSet<CleanedSignal>`
/// the output of the cleaning chain.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalSet<S> {
    pub knee_left: S,
    pub knee_right: S,
    pub hip: S,
    pub inter_ankle: S,
    pub leg_length_left: S,
    pub leg_length_right: S,
}

impl<S> SignalSet<S> {
    pub fn get(&self, kind: SignalKind) -> &S {
        match kind {
            SignalKind::KneeLeft => &self.knee_left,
            SignalKind::KneeRight => &self.knee_right,
            SignalKind::Hip => &self.hip,
            SignalKind::InterAnkle => &self.inter_ankle,
            SignalKind::LegLengthLeft => &self.leg_length_left,
            SignalKind::LegLengthRight => &self.leg_length_right,
        }
    }

    pub fn get_mut(&mut self, kind: SignalKind) -> &mut S {
        match kind {
            SignalKind::KneeLeft => &mut self.knee_left,
            SignalKind::KneeRight => &mut self.knee_right,
            SignalKind::Hip => &mut self.hip,
            SignalKind::InterAnkle => &mut self.inter_ankle,
            SignalKind::LegLengthLeft => &mut self.leg_length_left,
            SignalKind::LegLengthRight => &mut self.leg_length_right,
        }
    }

    /// Applies `f` to every signal, keeping the kind association.
    pub fn map<T>(&self, mut f: impl FnMut(SignalKind, &S) -> T) -> SignalSet<T> {
        SignalSet {
            knee_left: f(SignalKind::KneeLeft, &self.knee_left),
            knee_right: f(SignalKind::KneeRight, &self.knee_right),
            hip: f(SignalKind::Hip, &self.hip),
            inter_ankle: f(SignalKind::InterAnkle, &self.inter_ankle),
            leg_length_left: f(SignalKind::LegLengthLeft, &self.leg_length_left),
            leg_length_right: f(SignalKind::LegLengthRight, &self.leg_length_right),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SignalKind, &S)> {
        SignalKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

/// Raw per-frame samples of one recording.
pub type RawSignals = SignalSet<Vec<Sample>>;

impl RawSignals {
    /// Length of the longest signal.
    pub fn frame_count(&self) -> usize {
        self.iter().map(|(_, s)| s.len()).max().unwrap_or(0)
    }
}

/// Returns the value of `s` when it is present and finite.
#[inline]
pub fn valid(s: Sample) -> Option<f32> {
    s.filter(|v| v.is_finite())
}

/// True when `s` holds a finite value.
#[inline]
pub fn is_valid(s: Sample) -> bool {
    valid(s).is_some()
}

/// Collects the finite values of `signal` in frame order.
pub fn valid_values(signal: &[Sample]) -> Vec<f32> {
    signal.iter().filter_map(|&s| valid(s)).collect()
}

/// Number of finite samples in `signal`.
pub fn valid_count(signal: &[Sample]) -> usize {
    signal.iter().filter(|&&s| is_valid(s)).count()
}

/// Converts a float buffer that uses NaN as the missing marker.
pub fn from_f32_lossy(values: &[f32]) -> Vec<Sample> {
    values
        .iter()
        .map(|&v| if v.is_finite() { Some(v) } else { None })
        .collect()
}

/// Converts samples back to a NaN-marked buffer for export boundaries.
pub fn to_f32_nan(signal: &[Sample]) -> Vec<f32> {
    signal.iter().map(|&s| valid(s).unwrap_or(f32::NAN)).collect()
}
