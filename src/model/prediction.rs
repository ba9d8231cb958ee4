use indexmap::IndexMap;
use thiserror::Error;

use crate::model::{
    config::EloConfig,
    elo::expected_score,
    structures::{backtest_result::BacktestResult, game_prediction::Prediction}
};

#[derive(Debug, Error, PartialEq)]
pub enum PredictionError {
    #[error("no ratings have been loaded")]
    RatingsNotLoaded,

    #[error("no rating for team {0}")]
    UnknownTeam(String)
}

/// Forecasts single games from a loaded rating snapshot.
///
/// Predictions never modify the snapshot, so repeated calls with the same inputs return
/// identical results.
#[derive(Debug, Clone)]
pub struct Predictor {
    config: EloConfig,
    ratings: Option<IndexMap<String, f64>>
}

impl Predictor {
    pub fn new(config: EloConfig) -> Predictor {
        Predictor { config, ratings: None }
    }

    /// Loads the final ratings of a finished backtest.
    pub fn from_backtest(config: EloConfig, result: &BacktestResult) -> Predictor {
        let mut predictor = Predictor::new(config);
        predictor.load_ratings(result.final_ratings.clone());
        predictor
    }

    pub fn load_ratings(&mut self, ratings: IndexMap<String, f64>) {
        self.ratings = Some(ratings);
    }

    /// Looks up a team in the loaded snapshot.
    pub fn rating(&self, team: &str) -> Result<f64, PredictionError> {
        let ratings = self.ratings.as_ref().ok_or(PredictionError::RatingsNotLoaded)?;

        ratings
            .get(team)
            .copied()
            .ok_or_else(|| PredictionError::UnknownTeam(team.to_owned()))
    }

    /// Predicts a game at the home team's stadium.
    ///
    /// Explicit ratings override the loaded snapshot. The snapshot is only consulted for a side
    /// whose rating was not supplied.
    pub fn predict_game(
        &self,
        home_team: &str,
        away_team: &str,
        home_rating: Option<f64>,
        away_rating: Option<f64>
    ) -> Result<Prediction, PredictionError> {
        self.predict(home_team, away_team, home_rating, away_rating, false)
    }

    /// Predicts a game with no home-field advantage for either side.
    pub fn predict_neutral(
        &self,
        home_team: &str,
        away_team: &str,
        home_rating: Option<f64>,
        away_rating: Option<f64>
    ) -> Result<Prediction, PredictionError> {
        self.predict(home_team, away_team, home_rating, away_rating, true)
    }

    fn predict(
        &self,
        home_team: &str,
        away_team: &str,
        home_rating: Option<f64>,
        away_rating: Option<f64>,
        neutral_site: bool
    ) -> Result<Prediction, PredictionError> {
        let home = match home_rating {
            Some(r) => r,
            None => self.rating(home_team)?
        };
        let away = match away_rating {
            Some(r) => r,
            None => self.rating(away_team)?
        };

        let hfa = if neutral_site {
            0.0
        } else {
            self.config.home_field_advantage
        };
        let effective_home = home + hfa;

        let home_win_probability = expected_score(effective_home, away, self.config.scale);
        let away_win_probability = 1.0 - home_win_probability;
        let predicted_winner = if home_win_probability >= 0.5 {
            home_team
        } else {
            away_team
        };

        Ok(Prediction {
            home_team: home_team.to_owned(),
            away_team: away_team.to_owned(),
            home_win_probability,
            away_win_probability,
            predicted_winner: predicted_winner.to_owned(),
            confidence: home_win_probability.max(away_win_probability),
            expected_margin: (effective_home - away) / self.config.rating_points_per_point
        })
    }
}
