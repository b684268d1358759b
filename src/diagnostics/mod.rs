//! Diagnostics collected alongside an analysis.
//!
//! `DiagnosticsReport` is the main entry point: it pairs a frame-by-frame trace
//! of raw and cleaned signals with a summary of cleaning counters, detection
//! quality and the extracted features, and renders to JSON (via serde) or CSV.

pub mod quality;
pub mod report;
pub mod timing;

pub use quality::{detection_rate, CleaningStats, QualityTier};
pub use report::{DiagnosticsReport, FrameRow, FrameValues, ReportInputs, ReportSummary};
pub use timing::{StageTiming, TimingBreakdown};
