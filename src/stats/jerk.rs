//! Derivatives and the Log Dimensionless Jerk smoothness metric.
//!
//! LDJ for an angle series `θ` sampled at `fps`:
//! - `jerk` = third central difference of `θ` (edges use one-sided steps),
//!   with 2 samples trimmed from each end when more than 6 remain;
//! - `J = dt · Σ jerk²`, `A = P95(θ) − P05(θ)`, `T = n · dt`;
//! - `LDJ = −ln(T⁵ / A² · J)`.
//!
//! Jerkier motion raises `J` and therefore drives the LDJ further below zero;
//! a smooth cycle sits closer to zero than the same cycle with added noise.

use super::percentile::percentile_dense;
use crate::signal::{valid_values, Sample};
use log::debug;

/// Samples trimmed from each end of the jerk sequence.
const JERK_EDGE_TRIM: usize = 2;

/// First derivative by central differences.
///
/// Interior points use `(x[i+1] − x[i−1]) / 2dt`; index 0 uses a forward step
/// and the last index a backward step. Inputs shorter than 2 samples yield an
/// empty vector.
pub fn central_difference(signal: &[f32], dt: f32) -> Vec<f32> {
    let n = signal.len();
    if n < 2 {
        return Vec::new();
    }
    let mut out = vec![0.0f32; n];
    out[0] = (signal[1] - signal[0]) / dt;
    for i in 1..n - 1 {
        out[i] = (signal[i + 1] - signal[i - 1]) / (2.0 * dt);
    }
    out[n - 1] = (signal[n - 1] - signal[n - 2]) / dt;
    out
}

/// Third derivative obtained by chaining [`central_difference`] three times.
pub fn jerk_central(signal: &[f32], dt: f32) -> Vec<f32> {
    let vel = central_difference(signal, dt);
    let acc = central_difference(&vel, dt);
    central_difference(&acc, dt)
}

/// Log Dimensionless Jerk of `theta`, or `None` when the series is too short
/// or degenerate.
pub fn compute_ldj(
    theta: &[Sample],
    fps: f32,
    min_frames: usize,
    p_low: f32,
    p_high: f32,
) -> Option<f32> {
    if !(fps.is_finite() && fps > 0.0) {
        debug!("LDJ: invalid fps {fps}");
        return None;
    }
    let theta = valid_values(theta);
    let n = theta.len();
    if n < min_frames {
        debug!("LDJ: {n} valid frames < minimum {min_frames}");
        return None;
    }

    let dt = 1.0f32 / fps;
    let jerk = jerk_central(&theta, dt);
    let jerk = if jerk.len() > 3 * JERK_EDGE_TRIM {
        &jerk[JERK_EDGE_TRIM..jerk.len() - JERK_EDGE_TRIM]
    } else {
        &jerk[..]
    };
    if jerk.is_empty() {
        return None;
    }

    let squared: f64 = jerk.iter().map(|&j| (j as f64) * (j as f64)).sum();
    let j_integral = squared * dt as f64;

    let amplitude = match (
        percentile_dense(&theta, p_high),
        percentile_dense(&theta, p_low),
    ) {
        (Some(hi), Some(lo)) => hi - lo,
        _ => return None,
    };
    if amplitude.is_nan() || amplitude <= 0.0 {
        debug!("LDJ: non-positive amplitude {amplitude}");
        return None;
    }

    let duration = n as f64 * dt as f64;
    let a2 = (amplitude as f64) * (amplitude as f64);
    let dimensionless = duration.powi(5) / a2 * j_integral;
    if !dimensionless.is_finite() || dimensionless <= 0.0 {
        debug!("LDJ: degenerate dimensionless jerk {dimensionless}");
        return None;
    }
    Some((-dimensionless.ln()) as f32)
}
