#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod error;
pub mod features;
pub mod params;
pub mod pose;
pub mod scoring;
pub mod session;
pub mod signal;

// Building blocks: still public, but most callers go through `session`.
pub mod cleaning;
pub mod config;
pub mod diagnostics;
pub mod io;
pub mod stats;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{ErrorKind, GaitError, Result};
pub use crate::features::{FeatureVector9, FEATURE_COUNT, FEATURE_NAMES};
pub use crate::params::GaitParams;
pub use crate::scoring::{GaitLabel, GaitResult, Reconstructor, Scorer};
pub use crate::session::{Analysis, AnalysisSession};
pub use crate::signal::{RawSignals, Sample};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use gait_score::prelude::*;
///
/// # fn main() -> gait_score::Result<()> {
/// let knee: Vec<Sample> = (0..90)
///     .map(|i| Some(40.0 + 25.0 * (i as f32 * std::f32::consts::TAU / 30.0).sin()))
///     .collect();
/// let raw = RawSignals {
///     knee_left: knee.clone(),
///     knee_right: knee,
///     ..Default::default()
/// };
///
/// let analysis = AnalysisSession::from_raw(30.0, raw)?.analyze(&GaitParams::default())?;
/// assert!(analysis.features.knee_left_rom.is_some());
/// assert!(analysis.features.hip_rom.is_none());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::scoring::{FnReconstructor, NormalizationStats, ScoringConfig};
    pub use crate::{
        AnalysisSession, FeatureVector9, GaitParams, GaitResult, RawSignals, Sample, Scorer,
    };
}

// --- Stage-level API (for tools & advanced users) ---------------------------

pub mod stages {
    // Stage functions in pipeline order.
    pub use crate::cleaning::{
        clean_all, clean_signal, interpolate_gaps, mask_spikes, process_signal,
        smooth_moving_average,
    };
    pub use crate::features::{extract_features, extract_features_from_raw, stride_amp_norm};
    pub use crate::scoring::{gait_score, is_impaired, normalize_features, reconstruction_error};
    pub use crate::stats::{compute_ldj, compute_max, compute_rom, nan_percentile};

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        CleaningStats, DiagnosticsReport, FrameRow, FrameValues, QualityTier, ReportSummary,
        StageTiming, TimingBreakdown,
    };
}
