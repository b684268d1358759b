use super::calibration::{GaitLabel, ScoringConfig};
use super::model::{reconstruct, Reconstructor};
use super::normalize::{normalize_features, reconstruction_error, Features, NormalizationStats};
use crate::config::artifacts::{load_normalization_stats, load_scoring_config_or_default};
use crate::error::{GaitError, Result};
use crate::features::{FeatureVector9, FEATURE_COUNT};
use log::{debug, info};
use serde::Serialize;
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Distance from the threshold (in error units) at which confidence saturates.
const CONFIDENCE_SPAN: f32 = 0.5;

/// Outcome of scoring one recording.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GaitResult {
    pub raw_features: FeatureVector9,
    pub normalized_features: [f32; FEATURE_COUNT],
    pub reconstructed_features: [f32; FEATURE_COUNT],
    pub reconstruction_error: f32,
    pub score: u8,
    pub impaired: bool,
    pub label: GaitLabel,
    pub threshold: f32,
}

impl GaitResult {
    /// How far the error sits from the threshold, scaled to `[0, 1]`.
    pub fn confidence(&self) -> f32 {
        ((self.reconstruction_error - self.threshold).abs() / CONFIDENCE_SPAN).clamp(0.0, 1.0)
    }
}

/// Lifecycle stage of a [`Scorer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerState {
    Uninitialized,
    Ready,
    Released,
}

impl ScorerState {
    pub fn as_str(self) -> &'static str {
        match self {
            ScorerState::Uninitialized => "uninitialized",
            ScorerState::Ready => "ready",
            ScorerState::Released => "released",
        }
    }
}

struct Loaded {
    stats: NormalizationStats,
    config: ScoringConfig,
    model: Box<dyn Reconstructor>,
}

enum State {
    Uninitialized,
    Ready(Box<Loaded>),
    Released,
}

/// Anomaly scorer: normalise → reconstruct → error → calibrated score.
///
/// The scorer starts `Uninitialized`, becomes `Ready` after a successful
/// [`initialize`](Self::initialize) and ends `Released`. Scoring in any state
/// other than `Ready` fails with [`GaitError::NotReady`]. A ready scorer is
/// read-only and can be shared across threads.
pub struct Scorer {
    state: State,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer {
    pub fn new() -> Self {
        Self {
            state: State::Uninitialized,
        }
    }

    /// Loads the normalisation statistics, the calibration and the model.
    ///
    /// Fails, leaving the scorer untouched, when it is not `Uninitialized`
    /// or the calibration is unusable.
    pub fn initialize(
        &mut self,
        stats: NormalizationStats,
        config: ScoringConfig,
        model: impl Reconstructor + 'static,
    ) -> Result<()> {
        if !matches!(self.state, State::Uninitialized) {
            return Err(GaitError::InvalidConfiguration(format!(
                "scorer cannot be initialized from state {}",
                self.state().as_str()
            )));
        }
        if !(config.threshold.is_finite() && config.threshold > 0.0) {
            return Err(GaitError::InvalidConfiguration(format!(
                "scoring threshold must be positive, got {}",
                config.threshold
            )));
        }
        if !(config.k.is_finite() && config.k >= 0.0) {
            return Err(GaitError::InvalidConfiguration(format!(
                "scoring decay k must be non-negative, got {}",
                config.k
            )));
        }
        info!(
            "scorer ready: threshold={} k={} error range=[{}, {}]",
            config.threshold, config.k, config.min_error, config.max_error
        );
        self.state = State::Ready(Box::new(Loaded {
            stats,
            config,
            model: Box::new(model),
        }));
        Ok(())
    }

    /// Builds a ready scorer from the JSON artifacts that accompany a model.
    ///
    /// The normalisation artifact is required. The model configuration is
    /// optional; when absent or unreadable the default calibration is used.
    pub fn from_artifacts(
        normalization: &Path,
        model_config: Option<&Path>,
        model: impl Reconstructor + 'static,
    ) -> Result<Self> {
        let stats = load_normalization_stats(normalization)?;
        let config = load_scoring_config_or_default(model_config);
        let mut scorer = Self::new();
        scorer.initialize(stats, config, model)?;
        Ok(scorer)
    }

    pub fn state(&self) -> ScorerState {
        match self.state {
            State::Uninitialized => ScorerState::Uninitialized,
            State::Ready(_) => ScorerState::Ready,
            State::Released => ScorerState::Released,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    pub fn config(&self) -> Option<&ScoringConfig> {
        self.loaded().ok().map(|l| &l.config)
    }

    pub fn normalization(&self) -> Option<&NormalizationStats> {
        self.loaded().ok().map(|l| &l.stats)
    }

    fn loaded(&self) -> Result<&Loaded> {
        match &self.state {
            State::Ready(loaded) => Ok(loaded),
            _ => Err(GaitError::NotReady(self.state().as_str())),
        }
    }

    /// Scores a flat feature slice in canonical order (NaN marks missing).
    pub fn score(&self, raw: &[f32]) -> Result<GaitResult> {
        let features = FeatureVector9::from_slice(raw)?;
        self.score_features(&features)
    }

    /// Scores one feature vector. Missing features are imputed with their
    /// training mean.
    pub fn score_features(&self, features: &FeatureVector9) -> Result<GaitResult> {
        let loaded = self.loaded()?;
        let normalized = normalize_features(features, &loaded.stats);
        let input: [f32; FEATURE_COUNT] = normalized.into();
        let reconstructed = Features::from(reconstruct(loaded.model.as_ref(), &input)?);
        let error = reconstruction_error(&normalized, &reconstructed);

        let config = &loaded.config;
        let score = config.score(error);
        let result = GaitResult {
            raw_features: *features,
            normalized_features: input,
            reconstructed_features: reconstructed.into(),
            reconstruction_error: error,
            score,
            impaired: config.is_impaired(error),
            label: GaitLabel::from_score(score),
            threshold: config.threshold,
        };
        debug!(
            "scored: error={error:.4} score={score} label={} ({} of {FEATURE_COUNT} features imputed)",
            result.label,
            FEATURE_COUNT - features.valid_count()
        );
        Ok(result)
    }

    /// Scores several recordings against the same calibration.
    pub fn score_batch(&self, batch: &[FeatureVector9]) -> Vec<Result<GaitResult>> {
        #[cfg(feature = "parallel")]
        {
            batch.par_iter().map(|f| self.score_features(f)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            batch.iter().map(|f| self.score_features(f)).collect()
        }
    }

    /// Frees the model and moves to `Released`. Releasing twice is a no-op.
    pub fn release(&mut self) {
        if let State::Ready(mut loaded) = std::mem::replace(&mut self.state, State::Released) {
            loaded.model.release();
            info!("scorer released");
        }
    }
}

impl Drop for Scorer {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::FnReconstructor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn unit_stats() -> NormalizationStats {
        NormalizationStats::new(&[0.0; 9], &[1.0; 9]).unwrap()
    }

    fn identity() -> FnReconstructor<impl Fn(&[f32; 9]) -> Result<[f32; 9]> + Send + Sync> {
        FnReconstructor::new(|x: &[f32; 9]| Ok(*x))
    }

    fn ready() -> Scorer {
        let mut s = Scorer::new();
        s.initialize(unit_stats(), ScoringConfig::default(), identity())
            .unwrap();
        s
    }

    #[test]
    fn scoring_before_init_fails() {
        let s = Scorer::new();
        assert_eq!(s.state(), ScorerState::Uninitialized);
        let err = s.score(&[0.0; 9]).unwrap_err();
        assert!(matches!(err, GaitError::NotReady("uninitialized")));
    }

    #[test]
    fn perfect_reconstruction_scores_100() {
        let r = ready().score(&[0.5; 9]).unwrap();
        assert_eq!(r.reconstruction_error, 0.0);
        assert_eq!(r.score, 100);
        assert!(!r.impaired);
        assert_eq!(r.label, GaitLabel::Excellent);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = ready().score(&[0.0; 8]).unwrap_err();
        assert!(matches!(err, GaitError::FeatureCount { actual: 8, .. }));
    }

    #[test]
    fn missing_features_are_imputed() {
        let mut s = Scorer::new();
        let stats = NormalizationStats::new(&[3.0; 9], &[2.0; 9]).unwrap();
        s.initialize(stats, ScoringConfig::default(), identity())
            .unwrap();
        let r = s.score_features(&FeatureVector9::missing()).unwrap();
        assert_eq!(r.normalized_features, [0.0; 9]);
        assert!(r.normalized_features.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn non_finite_features_are_imputed_before_inference() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        let recording = FnReconstructor::new(move |x: &[f32; 9]| {
            log.lock().unwrap().push(*x);
            Ok(*x)
        });
        let mut s = Scorer::new();
        s.initialize(unit_stats(), ScoringConfig::default(), recording)
            .unwrap();

        let mut v = FeatureVector9::from_array([0.0; 9]);
        v.hip_rom = Some(f32::NAN);
        v.ldj_hip = Some(f32::NEG_INFINITY);
        let r = s.score_features(&v).unwrap();

        assert_eq!(seen.lock().unwrap().as_slice(), &[[0.0; 9]]);
        assert_eq!(r.normalized_features, [0.0; 9]);
        assert_eq!(r.reconstruction_error, 0.0);
        assert_eq!(r.score, 100);
    }

    #[test]
    fn zero_model_error_is_mean_square() {
        let mut s = Scorer::new();
        let zero = FnReconstructor::new(|_: &[f32; 9]| Ok([0.0; 9]));
        s.initialize(unit_stats(), ScoringConfig::default(), zero)
            .unwrap();
        let r = s.score(&[1.0; 9]).unwrap();
        assert!((r.reconstruction_error - 1.0).abs() < 1e-6);
        assert!(r.impaired);
        // 70 / (1 + 2.5 · 0.768) = 23.97
        assert_eq!(r.score, 24);
        assert_eq!(r.label, GaitLabel::SevereImpairment);
        assert!((r.confidence() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn confidence_is_zero_at_threshold() {
        let r = GaitResult {
            raw_features: FeatureVector9::missing(),
            normalized_features: [0.0; 9],
            reconstructed_features: [0.0; 9],
            reconstruction_error: 0.232,
            score: 70,
            impaired: false,
            label: GaitLabel::Fair,
            threshold: 0.232,
        };
        assert_eq!(r.confidence(), 0.0);
    }

    #[test]
    fn release_blocks_scoring_and_frees_model() {
        struct Counting(Arc<AtomicUsize>);
        impl Reconstructor for Counting {
            fn infer(&self, x: &[f32; 9]) -> Result<[f32; 9]> {
                Ok(*x)
            }
            fn release(&mut self) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let released = Arc::new(AtomicUsize::new(0));
        let mut s = Scorer::new();
        s.initialize(
            unit_stats(),
            ScoringConfig::default(),
            Counting(released.clone()),
        )
        .unwrap();
        s.release();
        s.release();
        assert_eq!(released.load(Ordering::SeqCst), 1);
        assert_eq!(s.state(), ScorerState::Released);
        assert!(matches!(
            s.score(&[0.0; 9]),
            Err(GaitError::NotReady("released"))
        ));
        assert!(s.initialize(unit_stats(), ScoringConfig::default(), identity()).is_err());
    }

    #[test]
    fn invalid_calibration_leaves_scorer_uninitialized() {
        let mut s = Scorer::new();
        let config = ScoringConfig {
            threshold: 0.0,
            ..Default::default()
        };
        assert!(s.initialize(unit_stats(), config, identity()).is_err());
        assert_eq!(s.state(), ScorerState::Uninitialized);
    }

    #[test]
    fn batch_matches_single_scoring() {
        let s = ready();
        let batch: Vec<_> = (0..8)
            .map(|i| FeatureVector9::from_array([i as f32; 9]))
            .collect();
        let results = s.score_batch(&batch);
        assert_eq!(results.len(), 8);
        for (f, r) in batch.iter().zip(&results) {
            assert_eq!(r.as_ref().unwrap(), &s.score_features(f).unwrap());
        }
    }

    #[test]
    fn scorer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Scorer>();
    }
}
