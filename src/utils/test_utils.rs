use chrono::{Days, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strum::IntoEnumIterator;

use crate::model::{
    adjustments::data::{AdjustmentData, QbSignal, TeamWeek, TravelSignal, WeatherSignal},
    config::EloConfig,
    structures::{adjustment_family::AdjustmentFamily, game::Game}
};

pub fn generate_game(season: i32, week: i32, home: &str, away: &str, home_score: u32, away_score: u32) -> Game {
    let mut game = generate_unplayed_game(season, week, home, away);
    game.home_score = Some(home_score);
    game.away_score = Some(away_score);

    game
}

pub fn generate_unplayed_game(season: i32, week: i32, home: &str, away: &str) -> Game {
    Game {
        season,
        week,
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_score: None,
        away_score: None,
        home_rest: None,
        away_rest: None,
        game_id: Some(format!("{}_{:02}_{}_{}", season, week, away, home)),
        date: None,
        neutral_site: false
    }
}

/// A full round-robin season with seeded random scores and weekly Sunday dates.
pub fn generate_season(seed: u64, season: i32, teams: &[&str]) -> Vec<Game> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let kickoff = NaiveDate::from_ymd_opt(season, 9, 7).unwrap();
    let mut games = Vec::new();

    let mut week = 1;
    for (i, home) in teams.iter().enumerate() {
        for away in teams.iter().skip(i + 1) {
            let mut game = generate_game(
                season,
                week,
                home,
                away,
                rng.random_range(0..=45),
                rng.random_range(0..=45)
            );
            game.date = kickoff.checked_add_days(Days::new(7 * (week as u64 - 1)));
            games.push(game);
            week += 1;
        }
    }

    games
}

pub fn enable_all_adjustments(mut config: EloConfig) -> EloConfig {
    for family in AdjustmentFamily::iter() {
        config.adjustment_mut(family).enabled = true;
    }

    config
}

/// Side tables holding a non-neutral signal for every family of `game`
pub fn generate_loaded_adjustment_data(game: &Game) -> AdjustmentData {
    let home = TeamWeek::new(&game.home_team, game.season, game.week);
    let away = TeamWeek::new(&game.away_team, game.season, game.week);

    let mut data = AdjustmentData::empty();
    data.insert_qb(
        home.clone(),
        QbSignal {
            rating: 100.0,
            starter_changed: false
        }
    );
    data.insert_travel(
        away.clone(),
        TravelSignal {
            miles: 1500.0,
            timezones: -2
        }
    );
    if let Some(id) = &game.game_id {
        data.insert_weather(
            id,
            WeatherSignal {
                temperature_f: Some(20.0),
                wind_mph: Some(25.0),
                precipitation: false,
                indoor: false
            }
        );
    }
    data.insert_impact(AdjustmentFamily::Injury, away, 1.0);
    for family in AdjustmentFamily::iter().filter(|f| f.is_efficiency()) {
        data.insert_impact(family, home.clone(), 1.0);
    }

    data
}
