//! Anomaly scoring of feature vectors.
//!
//! Features are z-scored with the training statistics, passed through an
//! externally supplied autoencoder ([`Reconstructor`]) and the mean squared
//! reconstruction error is calibrated into a 0–100 score. Healthy gait
//! reconstructs well; the further a recording sits from the training
//! distribution, the larger the error and the lower the score.

pub mod calibration;
pub mod model;
pub mod normalize;
pub mod scorer;

pub use calibration::{gait_score, is_impaired, GaitLabel, ScoringConfig};
pub use model::{FnReconstructor, Reconstructor};
pub use normalize::{normalize_features, reconstruction_error, Features, NormalizationStats};
pub use scorer::{GaitResult, Scorer, ScorerState};
