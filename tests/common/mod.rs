use std::sync::Once;

use nfl_elo::model::structures::game::Game;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

static INIT: Once = Once::new();

pub const TEAMS: [&str; 8] = ["BAL", "BUF", "CIN", "DAL", "GB", "KC", "PHI", "SF"];

/// Initialize test environment with RUST_LOG=WARN
pub fn init_test_env() {
    INIT.call_once(|| {
        std::env::set_var("RUST_LOG", "warn");
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Several seasons of weekly games between [`TEAMS`], with seeded random pairings and scores.
///
/// Rows are shuffled so callers cannot rely on input order.
pub fn generate_league(seed: u64, seasons: std::ops::RangeInclusive<i32>, weeks: i32) -> Vec<Game> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut games = Vec::new();

    for season in seasons {
        for week in 1..=weeks {
            let mut teams = TEAMS.to_vec();
            teams.shuffle(&mut rng);

            for (i, pair) in teams.chunks(2).enumerate() {
                games.push(Game {
                    season,
                    week,
                    home_team: pair[0].to_string(),
                    away_team: pair[1].to_string(),
                    home_score: Some(rng.random_range(0..=42)),
                    away_score: Some(rng.random_range(0..=42)),
                    home_rest: None,
                    away_rest: None,
                    game_id: Some(format!("{}_{:02}_{}", season, week, i)),
                    date: None,
                    neutral_site: false
                });
            }
        }
    }

    games.shuffle(&mut rng);
    games
}
