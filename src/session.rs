//! Per-recording analysis state.
//!
//! An [`AnalysisSession`] owns the raw signals of one recording while frames
//! arrive. [`AnalysisSession::analyze`] consumes it and runs the cleaning and
//! feature stages once; the resulting [`Analysis`] can then be scored.

use crate::cleaning::{clean_all, CleanedSignals};
use crate::diagnostics::{DiagnosticsReport, ReportInputs, TimingBreakdown};
use crate::error::{GaitError, Result};
use crate::features::{extract_features, FeatureVector9};
use crate::params::{GaitParams, PoseParams};
use crate::pose::{FrameSample, PoseFrame};
use crate::scoring::{GaitResult, Scorer};
use crate::signal::{is_valid, RawSignals, SignalKind};
use log::{debug, info};

/// Accumulates the raw signals of one recording.
#[derive(Clone, Debug)]
pub struct AnalysisSession {
    fps: f32,
    conf_thresh: f32,
    raw: RawSignals,
    total_frames: usize,
    detected_frames: usize,
}

impl AnalysisSession {
    pub fn new(fps: f32) -> Result<Self> {
        Self::with_pose_params(fps, &PoseParams::default())
    }

    pub fn with_pose_params(fps: f32, pose: &PoseParams) -> Result<Self> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(GaitError::InvalidConfiguration(format!(
                "fps must be positive, got {fps}"
            )));
        }
        Ok(Self {
            fps,
            conf_thresh: pose.conf_thresh,
            raw: RawSignals::default(),
            total_frames: 0,
            detected_frames: 0,
        })
    }

    /// Wraps signals recorded elsewhere. A frame counts as detected when its
    /// left-knee sample is present.
    pub fn from_raw(fps: f32, raw: RawSignals) -> Result<Self> {
        let mut session = Self::new(fps)?;
        session.total_frames = raw.frame_count();
        session.detected_frames = raw.knee_left.iter().filter(|&&s| is_valid(s)).count();
        session.raw = raw;
        Ok(session)
    }

    /// Appends one video frame; `None` means no pose was found.
    pub fn push_frame(&mut self, frame: Option<&PoseFrame>) {
        let sample = match frame {
            Some(f) => FrameSample::from_frame(f, self.conf_thresh),
            None => FrameSample::missing(),
        };
        self.push_sample(sample);
    }

    /// Appends a frame already reduced to signal values.
    pub fn push_sample(&mut self, sample: FrameSample) {
        // keep every signal aligned on the frame index
        for kind in SignalKind::ALL {
            let signal = self.raw.get_mut(kind);
            signal.resize(self.total_frames, None);
            signal.push(*sample.values.get(kind));
        }
        self.total_frames += 1;
        if sample.detected {
            self.detected_frames += 1;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    pub fn detected_frames(&self) -> usize {
        self.detected_frames
    }

    pub fn raw(&self) -> &RawSignals {
        &self.raw
    }

    /// Cleans every signal, extracts features and builds the diagnostics.
    ///
    /// Fails on invalid parameters or an empty recording; individual features
    /// that cannot be computed are reported as missing instead.
    pub fn analyze(self, params: &GaitParams) -> Result<Analysis> {
        params.validate()?;
        if self.total_frames == 0 {
            return Err(GaitError::MissingData("recording has no frames".into()));
        }
        let fps = self.fps;
        let mut timing = TimingBreakdown::default();

        let cleaned = timing.time("cleaning", || clean_all(&self.raw, fps, &params.cleaning));
        let features =
            timing.time("features", || extract_features(&cleaned, fps, &params.features));
        info!(
            "analyzed {} frames ({} detected): {} of 9 features",
            self.total_frames,
            self.detected_frames,
            features.valid_count()
        );

        let mut report = DiagnosticsReport::build(
            ReportInputs {
                raw: &self.raw,
                cleaned: &cleaned,
                features: &features,
                fps,
                total_frames: self.total_frames,
                detected_frames: self.detected_frames,
            },
            &params.quality,
        );
        report.timing = timing;
        if !report.summary.meets_min_valid_frames {
            debug!(
                "only {} valid left-knee frames (minimum {})",
                report.summary.valid_frames, params.quality.min_valid_frames
            );
        }

        Ok(Analysis {
            fps,
            raw: self.raw,
            cleaned,
            features,
            report,
        })
    }
}

/// Outcome of [`AnalysisSession::analyze`].
#[derive(Clone, Debug)]
pub struct Analysis {
    pub fps: f32,
    pub raw: RawSignals,
    pub cleaned: CleanedSignals,
    pub features: FeatureVector9,
    pub report: DiagnosticsReport,
}

impl Analysis {
    /// Scores the extracted features and records the scoring time.
    pub fn score(&mut self, scorer: &Scorer) -> Result<GaitResult> {
        let features = self.features;
        self.report
            .timing
            .time("scoring", || scorer.score_features(&features))
    }

    /// Fails with [`GaitError::MissingData`] when too few left-knee frames
    /// survived cleaning.
    pub fn ensure_analysable(&self) -> Result<()> {
        let summary = &self.report.summary;
        if summary.meets_min_valid_frames {
            Ok(())
        } else {
            Err(GaitError::MissingData(format!(
                "{} valid frames after cleaning",
                summary.valid_frames
            )))
        }
    }
}
