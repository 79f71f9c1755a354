use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall-clock duration of one stage of a study run.
#[derive(Clone, Debug, Serialize, Deserialize)]
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

/// Stage timings in execution order plus their total.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
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

    /// Run `f`, recording its duration under `label`.
    pub fn time<T>(&mut self, label: impl Into<String>, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let value = f();
        self.push(label, start.elapsed().as_secs_f64() * 1000.0);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_accumulates_stage_durations() {
        let mut timing = TimingBreakdown::default();
        timing.push("load", 1.5);
        timing.push("render", 2.0);
        assert_eq!(timing.total_ms, 3.5);
        assert_eq!(timing.stages.len(), 2);
        assert_eq!(timing.stages[1].label, "render");
    }

    #[test]
    fn time_returns_closure_value() {
        let mut timing = TimingBreakdown::default();
        let v = timing.time("compute", || 41 + 1);
        assert_eq!(v, 42);
        assert_eq!(timing.stages[0].label, "compute");
        assert!(timing.stages[0].elapsed_ms >= 0.0);
    }
}
