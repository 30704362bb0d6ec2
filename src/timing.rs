// Repeated-trial timing.
//
// Collects per-run wall-clock durations and summarises them as mean and
// sample standard deviation.

use std::time::Duration;

/// Durations of repeated runs of the same comparison.
#[derive(Debug, Clone, Default)]
pub struct TrialSummary {
    runs: Vec<Duration>,
}

impl TrialSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, elapsed: Duration) {
        self.runs.push(elapsed);
    }

    pub fn runs(&self) -> &[Duration] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Mean run time in seconds (0 when no runs were recorded).
    pub fn mean_secs(&self) -> f64 {
        if self.runs.is_empty() {
            return 0.0;
        }
        let total: f64 = self.runs.iter().map(Duration::as_secs_f64).sum();
        total / self.runs.len() as f64
    }

    /// Sample standard deviation in seconds (0 with fewer than two runs).
    pub fn std_dev_secs(&self) -> f64 {
        let n = self.runs.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.mean_secs();
        let sum_sq: f64 = self
            .runs
            .iter()
            .map(|d| {
                let delta = d.as_secs_f64() - mean;
                delta * delta
            })
            .sum();
        (sum_sq / (n - 1) as f64).sqrt()
    }
}
