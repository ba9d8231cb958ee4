use serde::{Deserialize, Serialize};

/// Single-game forecast from the currently loaded ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub home_team: String,
    pub away_team: String,
    pub home_win_probability: f64,
    pub away_win_probability: f64,
    pub predicted_winner: String,
    /// `max(p_home, 1 - p_home)`, in `[0.5, 1.0]`
    pub confidence: f64,
    /// Expected home margin in points (negative favors the away team)
    pub expected_margin: f64
}
