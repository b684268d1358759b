//! Order statistics and smoothness metrics over cleaned signals.
//!
//! - [`percentile`] – missing-aware percentile, range of motion, robust max.
//! - [`jerk`] – central differences and Log Dimensionless Jerk.

pub mod jerk;
pub mod percentile;

pub use jerk::{central_difference, compute_ldj, jerk_central};
pub use percentile::{compute_max, compute_rom, nan_mean, nan_percentile, percentile_dense};
