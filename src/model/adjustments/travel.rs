use crate::model::{
    adjustments::data::TravelSignal,
    constants::{
        MAX_REST_DAYS, MIN_REST_DAYS, REST_POINTS_PER_DAY, STANDARD_REST_DAYS, TIMEZONE_POINTS_PER_HOUR,
        TRAVEL_POINTS_PER_1000_MILES
    },
    structures::adjustment_delta::AdjustmentDelta
};

/// Rest and travel inputs for one side of a game
#[derive(Debug, Clone, Copy, Default)]
pub struct TravelInput<'a> {
    pub rest_days: Option<f64>,
    pub travel: Option<&'a TravelSignal>
}

/// Rest above a standard week earns points, short weeks cost points. Unknown rest is neutral.
pub fn rest_points(rest_days: Option<f64>) -> f64 {
    match rest_days {
        Some(days) => (days.clamp(MIN_REST_DAYS, MAX_REST_DAYS) - STANDARD_REST_DAYS) * REST_POINTS_PER_DAY,
        None => 0.0
    }
}

/// Distance and timezone change only ever cost points.
pub fn travel_points(travel: Option<&TravelSignal>) -> f64 {
    match travel {
        Some(t) => {
            -(t.miles.max(0.0) / 1000.0 * TRAVEL_POINTS_PER_1000_MILES
                + t.timezones.unsigned_abs() as f64 * TIMEZONE_POINTS_PER_HOUR)
        }
        None => 0.0
    }
}

/// Raw rest/travel delta for each side, before weighting and capping.
pub fn travel_adjustment(home: TravelInput, away: TravelInput) -> AdjustmentDelta {
    AdjustmentDelta::new(
        rest_points(home.rest_days) + travel_points(home.travel),
        rest_points(away.rest_days) + travel_points(away.travel)
    )
}
