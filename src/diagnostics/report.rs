use super::quality::{detection_rate, CleaningStats, QualityTier};
use super::timing::TimingBreakdown;
use crate::cleaning::CleanedSignals;
use crate::features::{FeatureVector9, FEATURE_COUNT};
use crate::params::QualityParams;
use crate::signal::{valid, RawSignals, Sample, SignalSet};
use serde::Serialize;
use std::fmt::Write as _;

/// The five per-frame quantities shown in the report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameValues {
    pub knee_left: Sample,
    pub knee_right: Sample,
    pub hip: Sample,
    pub inter_ankle: Sample,
    /// Mean of the available leg lengths.
    pub leg_length: Sample,
}

impl FrameValues {
    fn at<S: AsRef<[Sample]>>(signals: &SignalSet<S>, i: usize) -> Self {
        let at = |s: &S| s.as_ref().get(i).copied().and_then(valid);
        let leg_length = match (at(&signals.leg_length_left), at(&signals.leg_length_right)) {
            (Some(l), Some(r)) => Some(0.5 * (l + r)),
            (one, other) => one.or(other),
        };
        Self {
            knee_left: at(&signals.knee_left),
            knee_right: at(&signals.knee_right),
            hip: at(&signals.hip),
            inter_ankle: at(&signals.inter_ankle),
            leg_length,
        }
    }

    fn cells(&self) -> [Sample; 5] {
        [
            self.knee_left,
            self.knee_right,
            self.hip,
            self.inter_ankle,
            self.leg_length,
        ]
    }
}

/// Raw and cleaned values of one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRow {
    pub frame: usize,
    pub timestamp_s: f32,
    pub raw: FrameValues,
    pub cleaned: FrameValues,
}

/// Recording-level figures.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub fps: f32,
    pub total_frames: usize,
    pub detected_frames: usize,
    pub detection_rate: f32,
    pub quality_tier: QualityTier,
    /// Valid left-knee frames after cleaning.
    pub valid_frames: usize,
    pub meets_min_valid_frames: bool,
    pub cleaning: CleaningStats,
    pub features: FeatureVector9,
    pub missing_features: usize,
}

/// Frame-by-frame trace of one analysis plus its summary.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsReport {
    pub rows: Vec<FrameRow>,
    pub summary: ReportSummary,
    pub timing: TimingBreakdown,
}

/// Inputs collected by an analysis for [`DiagnosticsReport::build`].
pub struct ReportInputs<'a> {
    pub raw: &'a RawSignals,
    pub cleaned: &'a CleanedSignals,
    pub features: &'a FeatureVector9,
    pub fps: f32,
    pub total_frames: usize,
    pub detected_frames: usize,
}

const CSV_HEADER: &str = "frame,timestamp_s,\
raw_knee_left,raw_knee_right,raw_hip,raw_inter_ankle,raw_leg_length,\
clean_knee_left,clean_knee_right,clean_hip,clean_inter_ankle,clean_leg_length";

impl DiagnosticsReport {
    pub fn build(inputs: ReportInputs<'_>, quality: &QualityParams) -> Self {
        let ReportInputs {
            raw,
            cleaned,
            features,
            fps,
            total_frames,
            detected_frames,
        } = inputs;

        let rows = (0..total_frames)
            .map(|i| FrameRow {
                frame: i,
                timestamp_s: i as f32 / fps,
                raw: FrameValues::at(raw, i),
                cleaned: FrameValues::at(cleaned, i),
            })
            .collect();

        let rate = detection_rate(detected_frames, total_frames);
        let cleaning = CleaningStats::from_cleaned(cleaned);
        let summary = ReportSummary {
            fps,
            total_frames,
            detected_frames,
            detection_rate: rate,
            quality_tier: QualityTier::from_detection_rate(rate, quality),
            valid_frames: cleaning.knee_left_valid,
            meets_min_valid_frames: cleaning.meets_min_valid_frames(quality),
            cleaning,
            features: *features,
            missing_features: FEATURE_COUNT - features.valid_count(),
        };
        Self {
            rows,
            summary,
            timing: TimingBreakdown::default(),
        }
    }

    /// Renders the report as CSV: one row per frame, a blank line, then a
    /// `SUMMARY` block of `key,value` pairs. Missing values are empty cells.
    pub fn to_csv(&self) -> String {
        let mut out = String::with_capacity(64 * (self.rows.len() + 32));
        out.push_str(CSV_HEADER);
        out.push('\n');
        for row in &self.rows {
            let _ = write!(out, "{},{}", row.frame, fmt_f32(row.timestamp_s));
            for cell in row.raw.cells().into_iter().chain(row.cleaned.cells()) {
                out.push(',');
                out.push_str(&fmt_sample(cell));
            }
            out.push('\n');
        }

        let s = &self.summary;
        out.push_str("\nSUMMARY\n");
        let mut kv = |key: &str, value: String| {
            let _ = writeln!(out, "{key},{value}");
        };
        kv("fps", fmt_f32(s.fps));
        kv("total_frames", s.total_frames.to_string());
        kv("detected_frames", s.detected_frames.to_string());
        kv("valid_frames", s.valid_frames.to_string());
        kv("detection_rate", fmt_f32(s.detection_rate));
        kv("quality_tier", s.quality_tier.to_string());
        kv("spikes_rejected", s.cleaning.total_spikes_rejected.to_string());
        kv("gaps_filled", s.cleaning.total_gaps_filled.to_string());
        kv("spike_pct", fmt_f32(s.cleaning.spike_pct));
        kv("interpolation_pct", fmt_f32(s.cleaning.interpolation_pct));
        for (name, value) in s.features.named() {
            kv(name, fmt_sample(value));
        }
        kv("missing_features", s.missing_features.to_string());
        out
    }
}

fn fmt_f32(v: f32) -> String {
    format!("{v:.6}")
}

fn fmt_sample(s: Sample) -> String {
    valid(s).map(fmt_f32).unwrap_or_default()
}
