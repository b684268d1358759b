//! Pose landmarks and their reduction to per-frame joint angles and
//! distances.

mod geometry;
mod landmark;

pub use geometry::{anatomical_angle, distance, normalize_point, FrameSample};
pub use landmark::{Landmark, LandmarkKind, PoseFrame};
