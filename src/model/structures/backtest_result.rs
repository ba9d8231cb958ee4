use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::structures::{game_result::GameResult, split_rating::SplitRating};

/// Why a game row did not produce a log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Either score is missing
    NotPlayed,
    /// A team code is blank
    EmptyTeamCode,
    /// Home and away are the same team
    SameTeam,
    /// The rating update produced a NaN or infinite value
    NonFiniteRating
}

impl SkipReason {
    /// Expected skips are normal data (future games). Everything else is a defect in the row.
    pub fn is_expected(&self) -> bool {
        matches!(self, SkipReason::NotPlayed)
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            SkipReason::NotPlayed => "game has not been played",
            SkipReason::EmptyTeamCode => "blank team code",
            SkipReason::SameTeam => "home and away team are identical",
            SkipReason::NonFiniteRating => "rating update was not finite"
        };

        write!(f, "{}", msg)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedGame {
    pub season: i32,
    pub week: i32,
    pub game_id: Option<String>,
    pub home_team: String,
    pub away_team: String,
    pub reason: SkipReason
}

/// Output of a walk-forward backtest run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Processed games, in processing order
    pub games: Vec<GameResult>,
    /// Final rating per team, keyed by team code in ascending order
    pub final_ratings: IndexMap<String, f64>,
    /// Present only when offense/defense ratings are enabled
    pub final_split_ratings: Option<IndexMap<String, SplitRating>>,
    pub skipped: Vec<SkippedGame>,
    /// Rows received in the window before any skipping
    pub total_rows: usize
}

impl BacktestResult {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Skipped rows that indicate bad data rather than unplayed games
    pub fn defects(&self) -> impl Iterator<Item = &SkippedGame> {
        self.skipped.iter().filter(|s| !s.reason.is_expected())
    }

    pub fn seasons(&self) -> Vec<i32> {
        let mut seasons: Vec<i32> = self.games.iter().map(|g| g.season).collect();
        seasons.dedup();
        seasons
    }
}
