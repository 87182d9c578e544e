use serde::Serialize;

use crate::timing::ResponseTime;

/// Per-file digest of computed response times.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct FileSummary {
    pub file: String,
    pub questions: usize,

    // questions that had a save row
    pub answered: usize,

    // seconds, over answered questions only
    pub total_seconds: f64,
    pub mean_seconds: f64,
    pub stddev_seconds: f64,
    pub max_seconds: f64,
}

impl FileSummary {
    pub fn from_times(file: &str, times: &[ResponseTime]) -> Self {
        let spread = Spread::of(times);
        let recorded = || times.iter().filter_map(recorded_seconds);

        FileSummary {
            file: file.to_string(),
            questions: times.len(),
            answered: recorded().count(),
            total_seconds: recorded().sum(),
            mean_seconds: spread.mean,
            stddev_seconds: spread.stddev,
            max_seconds: recorded().fold(0.0, f64::max),
        }
    }

    pub fn answered_pct(&self) -> f64 {
        if self.questions == 0 {
            0.0
        } else {
            (self.answered as f64 / self.questions as f64) * 100.0
        }
    }
}

/// Mean and population standard deviation of recorded response times.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Spread {
    pub mean: f64,
    pub stddev: f64,
}

impl Spread {
    /// Missing questions are skipped; an attempt with nothing recorded has a
    /// zero spread.
    pub fn of(times: &[ResponseTime]) -> Self {
        let (count, sum) = times
            .iter()
            .filter_map(recorded_seconds)
            .fold((0usize, 0.0), |(n, total), s| (n + 1, total + s));
        if count == 0 {
            return Spread::default();
        }

        let mean = sum / count as f64;
        let squared_error: f64 = times
            .iter()
            .filter_map(recorded_seconds)
            .map(|s| (s - mean).powi(2))
            .sum();

        Spread {
            mean,
            stddev: (squared_error / count as f64).sqrt(),
        }
    }
}

fn recorded_seconds(time: &ResponseTime) -> Option<f64> {
    match time {
        ResponseTime::Recorded(s) => Some(*s),
        ResponseTime::Missing => None,
    }
}
