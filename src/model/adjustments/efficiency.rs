use crate::model::{constants::EFFICIENCY_POINTS_PER_UNIT, structures::adjustment_delta::AdjustmentDelta};

/// Maps a pre-aggregated efficiency impact score (red zone, down conversion, clock management,
/// situational, turnover) to rating points. Scores are roughly standardized, so 1.0 is one
/// standard deviation better than league average.
pub fn efficiency_points(impact: Option<f64>) -> f64 {
    impact.map_or(0.0, |i| i * EFFICIENCY_POINTS_PER_UNIT)
}

pub fn efficiency_adjustment(home: Option<f64>, away: Option<f64>) -> AdjustmentDelta {
    AdjustmentDelta::new(efficiency_points(home), efficiency_points(away))
}
