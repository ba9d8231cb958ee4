use crate::model::{
    adjustments::data::QbSignal,
    constants::{QB_BASELINE_RATING, QB_CHANGE_MAX_DELTA, QB_POINTS_PER_RATING_POINT},
    structures::adjustment_delta::AdjustmentDelta
};

/// Points for one team's quarterback relative to a league-average passer.
///
/// A new starter's rolling numbers come from a small sample, so the raw delta is held to
/// `±QB_CHANGE_MAX_DELTA` whenever the starter changed.
pub fn qb_points(signal: Option<&QbSignal>) -> f64 {
    let Some(qb) = signal else {
        return 0.0;
    };

    let points = (qb.rating - QB_BASELINE_RATING) * QB_POINTS_PER_RATING_POINT;
    if qb.starter_changed {
        points.clamp(-QB_CHANGE_MAX_DELTA, QB_CHANGE_MAX_DELTA)
    } else {
        points
    }
}

pub fn qb_adjustment(home: Option<&QbSignal>, away: Option<&QbSignal>) -> AdjustmentDelta {
    AdjustmentDelta::new(qb_points(home), qb_points(away))
}
