use crate::model::{constants::INJURY_POINTS_PER_UNIT, structures::adjustment_delta::AdjustmentDelta};

/// `impact` is the value of players ruled out for the game; more missing value costs more points.
pub fn injury_points(impact: Option<f64>) -> f64 {
    impact.map_or(0.0, |i| -i * INJURY_POINTS_PER_UNIT)
}

pub fn injury_adjustment(home: Option<f64>, away: Option<f64>) -> AdjustmentDelta {
    AdjustmentDelta::new(injury_points(home), injury_points(away))
}
