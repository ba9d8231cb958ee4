use indexmap::IndexMap;
use itertools::Itertools;

use crate::model::structures::split_rating::SplitRating;

/// Current rating for every team seen so far.
///
/// Teams are created lazily at `base_rating` the first time they are referenced and are
/// never removed. Bounding rating changes is the update function's job, not the book's.
#[derive(Debug, Clone)]
pub struct RatingBook {
    base_rating: f64,
    // Insertion order is first-seen order, which keeps iteration deterministic.
    ratings: IndexMap<String, f64>,
    // Only populated when offense/defense ratings are in use
    split_ratings: IndexMap<String, SplitRating>
}

impl RatingBook {
    pub fn new(base_rating: f64) -> RatingBook {
        RatingBook {
            base_rating,
            ratings: IndexMap::new(),
            split_ratings: IndexMap::new()
        }
    }

    /// Rebuilds a book from a snapshot, e.g. the final ratings of a previous run.
    pub fn from_snapshot(base_rating: f64, snapshot: &IndexMap<String, f64>) -> RatingBook {
        let mut book = RatingBook::new(base_rating);
        for (team, rating) in snapshot {
            book.set(team, *rating);
        }

        book
    }

    pub fn base_rating(&self) -> f64 {
        self.base_rating
    }

    /// Returns the team's current rating, initializing it to the base rating if unseen.
    pub fn get(&mut self, team: &str) -> f64 {
        let base = self.base_rating;
        *self.ratings.entry(team.to_owned()).or_insert(base)
    }

    /// Read-only lookup. Unlike [`RatingBook::get`], unseen teams return `None`.
    pub fn peek(&self, team: &str) -> Option<f64> {
        self.ratings.get(team).copied()
    }

    pub fn set(&mut self, team: &str, rating: f64) {
        self.ratings.insert(team.to_owned(), rating);
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    /// Returns the team's (offense, defense) ratings, both defaulting to the base rating.
    pub fn get_offdef(&mut self, team: &str) -> SplitRating {
        let base = self.base_rating;
        *self
            .split_ratings
            .entry(team.to_owned())
            .or_insert_with(|| SplitRating::uniform(base))
    }

    pub fn set_offdef(&mut self, team: &str, split: SplitRating) {
        self.split_ratings.insert(team.to_owned(), split);
    }

    /// Pulls every known rating toward the base rating:
    /// `base + fraction * (rating - base)`.
    ///
    /// `fraction = 1.0` leaves ratings untouched, `fraction = 0.0` resets everyone.
    /// Split ratings are regressed with the same fraction.
    pub fn regress_preseason(&mut self, fraction: f64) {
        let base = self.base_rating;
        let regress = |r: f64| base + fraction * (r - base);

        for rating in self.ratings.values_mut() {
            *rating = regress(*rating);
        }

        for split in self.split_ratings.values_mut() {
            split.offense = regress(split.offense);
            split.defense = regress(split.defense);
        }
    }

    /// Snapshot of every known rating, keyed by team code in ascending order.
    pub fn get_rating_summary(&self) -> IndexMap<String, f64> {
        self.ratings
            .iter()
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(team, rating)| (team.clone(), *rating))
            .collect()
    }

    /// Snapshot of split ratings, keyed by team code in ascending order.
    pub fn get_split_summary(&self) -> IndexMap<String, SplitRating> {
        self.split_ratings
            .iter()
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(team, split)| (team.clone(), *split))
            .collect()
    }

    /// Teams ordered by rating, highest first. Ties are broken by team code.
    pub fn leaderboard(&self) -> Vec<(String, f64)> {
        self.ratings
            .iter()
            .sorted_by(|(t1, r1), (t2, r2)| r2.total_cmp(r1).then_with(|| t1.cmp(t2)))
            .map(|(team, rating)| (team.clone(), *rating))
            .collect()
    }
}
