use serde::{Deserialize, Serialize};

/// Offense and defense halves of a team's rating. Higher is better for both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitRating {
    pub offense: f64,
    pub defense: f64
}

impl SplitRating {
    pub fn new(offense: f64, defense: f64) -> SplitRating {
        SplitRating { offense, defense }
    }

    pub fn uniform(rating: f64) -> SplitRating {
        SplitRating::new(rating, rating)
    }
}
