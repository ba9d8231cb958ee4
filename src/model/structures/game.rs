use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One scheduled or played game. Scores are `None` until the game has been played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub season: i32,
    pub week: i32,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    /// Days of rest since the home team's previous game
    #[serde(default)]
    pub home_rest: Option<f64>,
    /// Days of rest since the away team's previous game
    #[serde(default)]
    pub away_rest: Option<f64>,
    #[serde(default)]
    pub game_id: Option<String>,
    /// Used to derive rest days when they are not supplied
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Neither team receives home-field advantage
    #[serde(default)]
    pub neutral_site: bool
}

impl Game {
    /// Returns `(home_score, away_score)` if the game has been played.
    pub fn final_score(&self) -> Option<(u32, u32)> {
        match (self.home_score, self.away_score) {
            (Some(h), Some(a)) => Some((h, a)),
            _ => None
        }
    }

    /// The (season, week) pair that orders games chronologically.
    pub fn round(&self) -> (i32, i32) {
        (self.season, self.week)
    }

    /// A short label for log messages
    pub fn label(&self) -> String {
        match &self.game_id {
            Some(id) => format!("{} {}@{} ({})", self.season, self.away_team, self.home_team, id),
            None => format!("{} wk{} {}@{}", self.season, self.week, self.away_team, self.home_team)
        }
    }
}
