//! Feature extraction: cleaned signals → the canonical 9-feature vector.
//!
//! | index | name              | source                                   |
//! |-------|-------------------|------------------------------------------|
//! | 0     | `stride_amp_norm` | P95(inter-ankle) / mean leg length       |
//! | 1–2   | `knee_*_rom`      | P95 − P05 of each knee angle             |
//! | 3–4   | `knee_*_max`      | P95 of each knee angle                   |
//! | 5     | `hip_rom`         | P95 − P05 of the hip angle               |
//! | 6–8   | `ldj_*`           | log dimensionless jerk of knees and hip  |

mod extractor;
mod vector;

pub use extractor::{extract_features, extract_features_from_raw, stride_amp_norm};
pub use vector::{FeatureVector9, FEATURE_COUNT, FEATURE_NAMES};
