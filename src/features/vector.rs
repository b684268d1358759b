use crate::error::{GaitError, Result};
use serde::{Deserialize, Serialize};

/// Number of features consumed by the scoring model.
pub const FEATURE_COUNT: usize = 9;

/// Feature names in canonical model order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "stride_amp_norm",
    "knee_left_rom",
    "knee_right_rom",
    "knee_left_max",
    "knee_right_max",
    "hip_rom",
    "ldj_knee_left",
    "ldj_knee_right",
    "ldj_hip",
];

/// The nine gait features in canonical order.
///
/// Each entry is `None` when its source signal could not support the
/// computation. The order of fields matches [`FEATURE_NAMES`] and the order of
/// the normalization statistics; it must never change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector9 {
    pub stride_amp_norm: Option<f32>,
    pub knee_left_rom: Option<f32>,
    pub knee_right_rom: Option<f32>,
    pub knee_left_max: Option<f32>,
    pub knee_right_max: Option<f32>,
    pub hip_rom: Option<f32>,
    pub ldj_knee_left: Option<f32>,
    pub ldj_knee_right: Option<f32>,
    pub ldj_hip: Option<f32>,
}

impl FeatureVector9 {
    /// A vector with every feature missing.
    pub fn missing() -> Self {
        Self::default()
    }

    /// Entries in canonical order.
    pub fn values(&self) -> [Option<f32>; FEATURE_COUNT] {
        [
            self.stride_amp_norm,
            self.knee_left_rom,
            self.knee_right_rom,
            self.knee_left_max,
            self.knee_right_max,
            self.hip_rom,
            self.ldj_knee_left,
            self.ldj_knee_right,
            self.ldj_hip,
        ]
    }

    /// Builds a vector from entries in canonical order. Non-finite values are
    /// stored as missing.
    pub fn from_values(values: [Option<f32>; FEATURE_COUNT]) -> Self {
        let v = values.map(|x| x.filter(|f| f.is_finite()));
        Self {
            stride_amp_norm: v[0],
            knee_left_rom: v[1],
            knee_right_rom: v[2],
            knee_left_max: v[3],
            knee_right_max: v[4],
            hip_rom: v[5],
            ldj_knee_left: v[6],
            ldj_knee_right: v[7],
            ldj_hip: v[8],
        }
    }

    /// Flat array with NaN marking missing entries, as exchanged with the
    /// reference pipeline.
    pub fn to_array(&self) -> [f32; FEATURE_COUNT] {
        self.values().map(|x| x.unwrap_or(f32::NAN))
    }

    /// Inverse of [`to_array`](Self::to_array).
    pub fn from_array(arr: [f32; FEATURE_COUNT]) -> Self {
        Self::from_values(arr.map(Some))
    }

    /// Length-checked variant of [`from_array`](Self::from_array).
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        let arr: [f32; FEATURE_COUNT] =
            values.try_into().map_err(|_| GaitError::FeatureCount {
                expected: FEATURE_COUNT,
                actual: values.len(),
            })?;
        Ok(Self::from_array(arr))
    }

    /// `(name, value)` pairs in canonical order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, Option<f32>)> {
        FEATURE_NAMES.into_iter().zip(self.values())
    }

    /// Owned `(name, value)` pairs, for export.
    pub fn to_named(&self) -> Vec<(&'static str, Option<f32>)> {
        self.named().collect()
    }

    /// Looks a feature up by its canonical name.
    pub fn get(&self, name: &str) -> Option<f32> {
        self.named().find(|(n, _)| *n == name).and_then(|(_, v)| v)
    }

    /// Number of features that are present (0–9).
    pub fn valid_count(&self) -> usize {
        self.values().iter().filter(|v| v.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.valid_count() == FEATURE_COUNT
    }
}
