use serde::{Deserialize, Serialize};

use crate::model::structures::{adjustment_delta::AdjustmentDeltas, split_rating::SplitRating};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Home,
    Away,
    Tie
}

impl Winner {
    pub fn from_scores(home_score: u32, away_score: u32) -> Winner {
        match home_score.cmp(&away_score) {
            std::cmp::Ordering::Greater => Winner::Home,
            std::cmp::Ordering::Less => Winner::Away,
            std::cmp::Ordering::Equal => Winner::Tie
        }
    }

    /// Actual outcome from the home team's perspective
    pub fn home_actual(&self) -> f64 {
        match self {
            Winner::Home => 1.0,
            Winner::Away => 0.0,
            Winner::Tie => 0.5
        }
    }
}

/// One row of the backtest log: everything needed to audit a single processed game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub season: i32,
    pub week: i32,
    pub game_id: Option<String>,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub home_rating_before: f64,
    pub away_rating_before: f64,
    pub home_rating_after: f64,
    pub away_rating_after: f64,
    /// Home win probability computed before the game, from effective ratings
    pub home_win_probability: f64,
    pub winner: Winner,
    /// Home-field advantage applied to the home side (zero at neutral sites)
    pub home_field_advantage: f64,
    /// 1.0 when margin-of-victory scaling is disabled
    pub mov_multiplier: f64,
    pub adjustments: AdjustmentDeltas,
    /// Populated only when offense/defense ratings are enabled
    pub home_split_before: Option<SplitRating>,
    pub home_split_after: Option<SplitRating>,
    pub away_split_before: Option<SplitRating>,
    pub away_split_after: Option<SplitRating>
}

impl GameResult {
    pub fn home_delta(&self) -> f64 {
        self.home_rating_after - self.home_rating_before
    }

    pub fn away_delta(&self) -> f64 {
        self.away_rating_after - self.away_rating_before
    }

    pub fn home_actual(&self) -> f64 {
        self.winner.home_actual()
    }
}
