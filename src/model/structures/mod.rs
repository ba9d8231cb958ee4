pub mod adjustment_delta;
pub mod adjustment_family;
pub mod backtest_result;
pub mod evaluation;
pub mod game;
pub mod game_prediction;
pub mod game_result;
pub mod split_rating;
