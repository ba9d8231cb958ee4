// Model defaults
pub const BASE_RATING: f64 = 1500.0;
pub const K_FACTOR: f64 = 20.0;
pub const LOGISTIC_SCALE: f64 = 400.0;
pub const HOME_FIELD_ADVANTAGE: f64 = 48.0;
pub const PRESEASON_REGRESS: f64 = 0.67;
pub const MOV_A: f64 = 2.2;
pub const MOV_B: f64 = 0.001;
pub const MAX_RATING_SHIFT_PER_GAME: f64 = 100.0;
// Offense / defense split
pub const OFFDEF_K: f64 = 0.1;
pub const LEAGUE_AVERAGE_POINTS: f64 = 22.0;
pub const RATING_POINTS_PER_POINT: f64 = 25.0;
// Probabilities never reach exactly 0 or 1
pub const PROBABILITY_EPSILON: f64 = 1e-9;
pub const LOG_LOSS_FLOOR: f64 = 0.001;
pub const LOG_LOSS_CEILING: f64 = 0.999;
pub const CALIBRATION_BINS: usize = 10;
// Rest & travel
pub const STANDARD_REST_DAYS: f64 = 7.0;
pub const MIN_REST_DAYS: f64 = 4.0;
pub const MAX_REST_DAYS: f64 = 14.0;
pub const REST_POINTS_PER_DAY: f64 = 3.0;
pub const TRAVEL_POINTS_PER_1000_MILES: f64 = 4.0;
pub const TIMEZONE_POINTS_PER_HOUR: f64 = 3.0;
// Quarterback
pub const QB_BASELINE_RATING: f64 = 90.0;
pub const QB_POINTS_PER_RATING_POINT: f64 = 1.5;
pub const QB_CHANGE_MAX_DELTA: f64 = 15.0;
// Weather
pub const WEATHER_WIND_THRESHOLD_MPH: f64 = 15.0;
pub const WEATHER_WIND_SEVERE_MPH: f64 = 30.0;
pub const WEATHER_COLD_THRESHOLD_F: f64 = 32.0;
pub const WEATHER_COLD_SEVERE_F: f64 = 0.0;
pub const WEATHER_PRECIPITATION_SEVERITY: f64 = 0.3;
pub const WEATHER_HOME_EDGE: f64 = 10.0;
// Injury & efficiency impact scores
pub const INJURY_POINTS_PER_UNIT: f64 = 8.0;
pub const EFFICIENCY_POINTS_PER_UNIT: f64 = 5.0;
