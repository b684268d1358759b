use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall-clock time of one pipeline stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Per-stage timings of one analysis (cleaning, features, scoring).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.total_ms += elapsed_ms;
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Runs `f`, records its duration under `label` and returns its output.
    pub fn time<T>(&mut self, label: impl Into<String>, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.push(label, start.elapsed().as_secs_f64() * 1000.0);
        out
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_accumulate_into_total() {
        let mut t = TimingBreakdown::default();
        t.push("cleaning", 1.5);
        let v = t.time("features", || 7);
        assert_eq!(v, 7);
        assert_eq!(t.stages.len(), 2);
        assert_eq!(t.stage_ms("cleaning"), Some(1.5));
        assert!(t.total_ms >= 1.5);
        assert!(t.stage_ms("scoring").is_none());
    }

    #[test]
    fn breakdowns_compare_by_value() {
        let mut a = TimingBreakdown::default();
        a.push("cleaning", 2.0);
        let mut b = a.clone();
        assert_eq!(a, b);
        b.push("features", 1.0);
        assert_ne!(a, b);
        assert_eq!(b.stages[1], StageTiming::new("features", 1.0));
    }
}
