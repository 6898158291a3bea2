//! Rolling window of validated samples for the current training session.

use std::collections::VecDeque;

use crate::fmt;

/// Strict sliding-window capacity: the 100 most recent samples, in push
/// order.
pub const HISTORY_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub at_ms: f64,
    pub power: f64,
    pub cadence: f64,
    pub speed: f64,
}

/// Summary snapshot computed on demand when training stops. Not recomputed
/// incrementally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub avg_power: f64,
    pub max_power: f64,
}

impl SessionSummary {
    pub fn log_line(&self) -> String {
        format!(
            "Session summary: avgPower={} maxPower={}",
            fmt::fmt_f64_fixed(self.avg_power, 1),
            fmt::fmt_f64_fixed(self.max_power, 0)
        )
    }
}

#[derive(Debug, Default)]
pub struct SessionHistory {
    samples: VecDeque<Sample>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        if self.samples.len() > HISTORY_CAPACITY {
            self.samples.pop_front();
        }
    }

    /// Cleared exactly once per successful start action. Never cleared on
    /// stop: consumers read the window right after stopping to compute the
    /// summary, and the next start supersedes it.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn summary(&self) -> SessionSummary {
        let powers: Vec<f64> = self.samples.iter().map(|s| s.power).collect();
        SessionSummary {
            avg_power: fmt::average(&powers),
            max_power: fmt::max_of(&powers),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(power: f64) -> Sample {
        Sample {
            at_ms: 0.0,
            power,
            cadence: 90.0,
            speed: 30.0,
        }
    }

    #[test]
    fn window_holds_the_most_recent_hundred_in_push_order() {
        let mut history = SessionHistory::new();
        for i in 0..250 {
            history.push(sample(i as f64));
            assert!(history.len() <= HISTORY_CAPACITY);
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);

        let powers: Vec<f64> = history.samples().map(|s| s.power).collect();
        let expected: Vec<f64> = (150..250).map(|i| i as f64).collect();
        assert_eq!(powers, expected);
    }

    #[test]
    fn reset_empties_regardless_of_contents() {
        let mut history = SessionHistory::new();
        for i in 0..42 {
            history.push(sample(i as f64));
        }
        history.reset();
        assert!(history.is_empty());
        assert_eq!(history.summary().avg_power, 0.0);
    }

    #[test]
    fn summary_matches_the_window() {
        let mut history = SessionHistory::new();
        for p in [100.0, 200.0, 300.0] {
            history.push(sample(p));
        }
        let summary = history.summary();
        assert_eq!(summary.avg_power, 200.0);
        assert_eq!(summary.max_power, 300.0);
        assert_eq!(
            summary.log_line(),
            "Session summary: avgPower=200.0 maxPower=300"
        );
    }
}
