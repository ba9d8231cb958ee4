use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBin {
    pub bucket_start: f64,
    pub bucket_end: f64,
    pub count: usize,
    pub mean_predicted: f64,
    pub observed_rate: f64
}

impl CalibrationBin {
    pub fn gap(&self) -> f64 {
        (self.mean_predicted - self.observed_rate).abs()
    }
}

/// Aggregate forecast quality over a set of processed games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub games: usize,
    pub accuracy: f64,
    pub brier_score: f64,
    pub log_loss: f64,
    pub expected_calibration_error: f64,
    pub sharpness: f64,
    /// Only non-empty bins are reported
    pub calibration_bins: Vec<CalibrationBin>
}
