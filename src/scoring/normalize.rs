use crate::error::{GaitError, Result};
use crate::features::{FeatureVector9, FEATURE_COUNT};
use nalgebra::SVector;
use serde::{Deserialize, Serialize};

/// Dense feature vector as seen by the model.
pub type Features = SVector<f32, FEATURE_COUNT>;

/// Lower bound applied to every standard deviation before dividing.
pub const STD_FLOOR: f32 = 1e-6;

/// Per-feature training statistics used for z-scoring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStats", into = "RawStats")]
pub struct NormalizationStats {
    mean: Features,
    std: Features,
}

/// Artifact layout: `{ "mean": [9], "std": [9] }`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct RawStats {
    pub(crate) mean: Vec<f32>,
    pub(crate) std: Vec<f32>,
}

impl TryFrom<RawStats> for NormalizationStats {
    type Error = GaitError;

    fn try_from(raw: RawStats) -> Result<Self> {
        NormalizationStats::new(&raw.mean, &raw.std)
    }
}

impl From<NormalizationStats> for RawStats {
    fn from(stats: NormalizationStats) -> Self {
        RawStats {
            mean: stats.mean.iter().copied().collect(),
            std: stats.std.iter().copied().collect(),
        }
    }
}

impl NormalizationStats {
    /// Validates and stores the statistics. Both slices must hold exactly
    /// [`FEATURE_COUNT`] finite values.
    pub fn new(mean: &[f32], std: &[f32]) -> Result<Self> {
        for (name, values) in [("mean", mean), ("std", std)] {
            if values.len() != FEATURE_COUNT {
                return Err(GaitError::InvalidConfiguration(format!(
                    "normalization {name} has {} entries, expected {FEATURE_COUNT}",
                    values.len()
                )));
            }
            if let Some(i) = values.iter().position(|v| !v.is_finite()) {
                return Err(GaitError::InvalidConfiguration(format!(
                    "normalization {name}[{i}] is not finite"
                )));
            }
        }
        Ok(Self {
            mean: Features::from_column_slice(mean),
            std: Features::from_column_slice(std),
        })
    }

    pub fn mean(&self) -> &Features {
        &self.mean
    }

    pub fn std(&self) -> &Features {
        &self.std
    }
}

/// Z-scores `raw` with the training statistics.
///
/// Missing or non-finite entries take the feature's training mean and
/// therefore normalise to exactly 0.
pub fn normalize_features(raw: &FeatureVector9, stats: &NormalizationStats) -> Features {
    let values = raw.values();
    Features::from_fn(|i, _| {
        let mean = stats.mean[i];
        let x = values[i].filter(|v| v.is_finite()).unwrap_or(mean);
        (x - mean) / stats.std[i].max(STD_FLOOR)
    })
}

/// Mean squared error over all dimensions.
pub fn reconstruction_error(original: &Features, reconstructed: &Features) -> f32 {
    let sq: f64 = (original - reconstructed)
        .iter()
        .map(|&d| (d as f64) * (d as f64))
        .sum();
    (sq / FEATURE_COUNT as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> NormalizationStats {
        NormalizationStats::new(
            &[1.0, 50.0, 50.0, 70.0, 70.0, 30.0, -20.0, -20.0, -20.0],
            &[0.5, 10.0, 10.0, 5.0, 5.0, 8.0, 2.0, 2.0, 0.0],
        )
        .unwrap()
    }

    #[test]
    fn z_scores_each_dimension() {
        let raw = FeatureVector9::from_array([
            2.0, 60.0, 40.0, 70.0, 75.0, 30.0, -18.0, -22.0, -20.0,
        ]);
        let z = normalize_features(&raw, &stats());
        let expected = [2.0, 1.0, -1.0, 0.0, 1.0, 0.0, 1.0, -1.0, 0.0];
        for (got, want) in z.iter().zip(expected) {
            assert!((got - want).abs() < 1e-5, "{got} vs {want}");
        }
    }

    #[test]
    fn missing_features_normalize_to_zero() {
        let z = normalize_features(&FeatureVector9::missing(), &stats());
        assert!(z.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn non_finite_features_take_the_mean() {
        let mut raw = FeatureVector9::missing();
        raw.hip_rom = Some(f32::NAN);
        raw.knee_left_max = Some(f32::INFINITY);
        let z = normalize_features(&raw, &stats());
        assert!(z.iter().all(|&v| v == 0.0), "{z:?}");
    }

    #[test]
    fn zero_std_is_floored() {
        let mut arr = [f32::NAN; 9];
        arr[8] = -19.0;
        let z = normalize_features(&FeatureVector9::from_array(arr), &stats());
        assert!(z[8].is_finite());
        assert!((z[8] - 1.0 / STD_FLOOR).abs() / (1.0 / STD_FLOOR) < 1e-3);
    }

    #[test]
    fn artifact_json_is_validated() {
        let ok: NormalizationStats =
            serde_json::from_str(r#"{"mean":[0,0,0,0,0,0,0,0,0],"std":[1,1,1,1,1,1,1,1,1]}"#)
                .unwrap();
        assert_eq!(ok.std()[4], 1.0);
        let short = serde_json::from_str::<NormalizationStats>(r#"{"mean":[0],"std":[1]}"#);
        assert!(short.is_err());
    }

    #[test]
    fn mse_of_identical_vectors_is_zero() {
        let a = Features::from_element(0.3);
        assert_eq!(reconstruction_error(&a, &a), 0.0);
        let b = Features::from_element(1.3);
        assert!((reconstruction_error(&a, &b) - 1.0).abs() < 1e-6);
    }
}
