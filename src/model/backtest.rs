use std::collections::HashMap;

use chrono::NaiveDate;
use itertools::Itertools;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    model::{
        adjustments::{compute_adjustments, data::AdjustmentData, PreGameContext},
        config::{ConfigError, EloConfig},
        elo::rate_game,
        offdef::update_split,
        rating_book::RatingBook,
        structures::{
            backtest_result::{BacktestResult, SkipReason, SkippedGame},
            game::Game,
            game_result::GameResult
        }
    },
    utils::progress_utils::progress_bar
};

#[derive(Debug, Error, PartialEq)]
pub enum BacktestError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("no valid games to process ({total_rows} rows in window, {skipped} skipped)")]
    NoValidGames { total_rows: usize, skipped: usize }
}

/// Walk-forward Elo backtest.
///
/// Games are processed in strict chronological order, so every game only ever sees ratings
/// produced by games before it. Each call to [`Backtester::run`] owns a fresh [`RatingBook`].
#[derive(Debug, Clone)]
pub struct Backtester {
    config: EloConfig,
    data: AdjustmentData,
    show_progress: bool
}

impl Backtester {
    pub fn new(config: EloConfig) -> Result<Backtester, BacktestError> {
        config.validate()?;

        Ok(Backtester {
            config,
            data: AdjustmentData::empty(),
            show_progress: false
        })
    }

    pub fn with_adjustment_data(mut self, data: AdjustmentData) -> Backtester {
        self.data = data;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Backtester {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &EloConfig {
        &self.config
    }

    pub fn adjustment_data(&self) -> &AdjustmentData {
        &self.data
    }

    pub fn run(&self, games: &[Game]) -> Result<BacktestResult, BacktestError> {
        walk_forward(&self.config, &self.data, games, self.show_progress)
    }
}

/// Runs one independent backtest per configuration, in parallel.
///
/// Results are returned in the same order as `configs`. No state is shared between runs.
pub fn run_many(
    configs: &[EloConfig],
    games: &[Game],
    data: &AdjustmentData
) -> Vec<Result<BacktestResult, BacktestError>> {
    info!(runs = configs.len(), "Running backtests in parallel");

    configs
        .par_iter()
        .map(|config| -> Result<BacktestResult, BacktestError> {
            config.validate()?;
            walk_forward(config, data, games, false)
        })
        .collect()
}

/// Returns the games inside the season window in processing order:
/// season, week, game id (missing ids sort first), then input position.
pub fn chronological_order<'a>(games: &'a [Game], config: &EloConfig) -> Vec<&'a Game> {
    games
        .iter()
        .enumerate()
        .filter(|(_, g)| config.in_window(g.season))
        .sorted_by(|(i1, g1), (i2, g2)| {
            g1.round()
                .cmp(&g2.round())
                .then_with(|| {
                    g1.game_id
                        .as_deref()
                        .unwrap_or("")
                        .cmp(g2.game_id.as_deref().unwrap_or(""))
                })
                .then_with(|| i1.cmp(i2))
        })
        .map(|(_, g)| g)
        .collect()
}

fn walk_forward(
    config: &EloConfig,
    data: &AdjustmentData,
    games: &[Game],
    show_progress: bool
) -> Result<BacktestResult, BacktestError> {
    let ordered = chronological_order(games, config);
    let total_rows = ordered.len();

    info!(
        rows = total_rows,
        start = ?config.start_season,
        end = ?config.end_season,
        "Starting walk-forward backtest"
    );

    let mut book = RatingBook::new(config.base_rating);
    if config.use_offdef {
        for game in &ordered {
            for team in [&game.home_team, &game.away_team] {
                if !team.trim().is_empty() {
                    book.get_offdef(team);
                }
            }
        }
    }

    let mut schedule = RestTracker::default();
    let mut results = Vec::with_capacity(total_rows);
    let mut skipped = Vec::new();
    let mut current_season: Option<i32> = None;
    let mut last_round: Option<(i32, i32)> = None;

    let bar = progress_bar(total_rows as u64, "Rating games", show_progress);
    for game in ordered {
        debug_assert!(
            last_round.map_or(true, |r| r <= game.round()),
            "games must be processed in non-decreasing (season, week) order"
        );
        last_round = Some(game.round());

        if current_season != Some(game.season) {
            book.regress_preseason(config.preseason_regress);
            debug!(
                season = game.season,
                fraction = config.preseason_regress,
                teams = book.len(),
                "Regressed ratings toward base for new season"
            );
            current_season = Some(game.season);
        }

        let mut ctx = PreGameContext::new(game);
        ctx.home_rest = ctx.home_rest.or_else(|| schedule.rest_days(&game.home_team, game));
        ctx.away_rest = ctx.away_rest.or_else(|| schedule.rest_days(&game.away_team, game));

        match process_game(&mut book, &ctx, data, config) {
            Ok(result) => {
                schedule.record(game);
                results.push(result);
            }
            Err(reason) => {
                if reason.is_expected() {
                    debug!(game = %game.label(), %reason, "Skipping game");
                } else {
                    warn!(game = %game.label(), %reason, "Skipping malformed game row");
                }

                skipped.push(SkippedGame {
                    season: game.season,
                    week: game.week,
                    game_id: game.game_id.clone(),
                    home_team: game.home_team.clone(),
                    away_team: game.away_team.clone(),
                    reason
                });
            }
        }

        bar.inc(1);
    }
    bar.finish_and_clear();

    if results.is_empty() {
        return Err(BacktestError::NoValidGames {
            total_rows,
            skipped: skipped.len()
        });
    }

    info!(
        processed = results.len(),
        skipped = skipped.len(),
        teams = book.len(),
        "Backtest complete"
    );

    Ok(BacktestResult {
        games: results,
        final_ratings: book.get_rating_summary(),
        final_split_ratings: config.use_offdef.then(|| book.get_split_summary()),
        skipped,
        total_rows
    })
}

/// Rates a single game against the book, writing the new ratings back only on success.
fn process_game(
    book: &mut RatingBook,
    ctx: &PreGameContext,
    data: &AdjustmentData,
    config: &EloConfig
) -> Result<GameResult, SkipReason> {
    let game = ctx.game;

    if game.home_team.trim().is_empty() || game.away_team.trim().is_empty() {
        return Err(SkipReason::EmptyTeamCode);
    }

    if game.home_team == game.away_team {
        return Err(SkipReason::SameTeam);
    }

    let (home_score, away_score) = game.final_score().ok_or(SkipReason::NotPlayed)?;

    let home_before = book.get(&game.home_team);
    let away_before = book.get(&game.away_team);

    let home_field_advantage = if game.neutral_site {
        0.0
    } else {
        config.home_field_advantage
    };
    let adjustments = compute_adjustments(ctx, data, config);
    let total = adjustments.total();

    let effective_home = home_before + home_field_advantage + total.home;
    let effective_away = away_before + total.away;

    let change = rate_game(effective_home, effective_away, home_score, away_score, config);
    let home_after = home_before + change.home_delta;
    let away_after = away_before + change.away_delta;

    if ![change.home_expected, home_after, away_after].iter().all(|v| v.is_finite()) {
        return Err(SkipReason::NonFiniteRating);
    }

    let (home_split_before, home_split_after, away_split_before, away_split_after) = if config.use_offdef {
        let home_split = book.get_offdef(&game.home_team);
        let away_split = book.get_offdef(&game.away_team);
        let (new_home, new_away) = update_split(home_split, away_split, home_score, away_score, config);

        book.set_offdef(&game.home_team, new_home);
        book.set_offdef(&game.away_team, new_away);

        (Some(home_split), Some(new_home), Some(away_split), Some(new_away))
    } else {
        (None, None, None, None)
    };

    book.set(&game.home_team, home_after);
    book.set(&game.away_team, away_after);

    Ok(GameResult {
        season: game.season,
        week: game.week,
        game_id: game.game_id.clone(),
        home_team: game.home_team.clone(),
        away_team: game.away_team.clone(),
        home_score,
        away_score,
        home_rating_before: home_before,
        away_rating_before: away_before,
        home_rating_after: home_after,
        away_rating_after: away_after,
        home_win_probability: change.home_expected,
        winner: change.winner,
        home_field_advantage,
        mov_multiplier: change.mov_multiplier,
        adjustments,
        home_split_before,
        home_split_after,
        away_split_before,
        away_split_after
    })
}

/// Remembers each team's last processed game date within the current season
#[derive(Debug, Default)]
struct RestTracker {
    last_played: HashMap<String, (i32, NaiveDate)>
}

impl RestTracker {
    fn rest_days(&self, team: &str, game: &Game) -> Option<f64> {
        let date = game.date?;
        let (season, last) = self.last_played.get(team)?;

        // Rest never carries across an offseason
        if *season != game.season {
            return None;
        }

        Some((date - *last).num_days() as f64)
    }

    fn record(&mut self, game: &Game) {
        if let Some(date) = game.date {
            for team in [&game.home_team, &game.away_team] {
                self.last_played.insert(team.clone(), (game.season, date));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    use crate::{
        model::{
            adjustments::data::{AdjustmentData, TeamWeek},
            backtest::{chronological_order, run_many, BacktestError, Backtester},
            config::{AdjustmentSettings, ConfigError, EloConfig},
            elo::expected_score,
            structures::{adjustment_family::AdjustmentFamily, backtest_result::SkipReason}
        },
        utils::test_utils::{
            enable_all_adjustments, generate_game, generate_loaded_adjustment_data, generate_season,
            generate_unplayed_game
        }
    };

    const TEAMS: [&str; 6] = ["BUF", "KC", "PHI", "SF", "DAL", "DET"];

    fn multi_season() -> Vec<crate::model::structures::game::Game> {
        let mut games = generate_season(1, 2021, &TEAMS);
        games.extend(generate_season(2, 2022, &TEAMS));
        games.extend(generate_season(3, 2023, &TEAMS));
        games
    }

    #[test]
    fn test_three_game_scenario() {
        let config = EloConfig {
            preseason_regress: 0.3,
            ..Default::default()
        };
        let games = vec![
            generate_game(1, 1, "A", "B", 24, 10),
            generate_game(1, 2, "B", "C", 17, 14),
            generate_game(2, 1, "A", "C", 20, 13)
        ];

        let result = Backtester::new(config.clone()).unwrap().run(&games).unwrap();
        assert_eq!(result.games.len(), 3);

        let first = &result.games[0];
        let expected_a = expected_score(1500.0 + config.home_field_advantage, 1500.0, config.scale);
        let multiplier = (15.0f64).ln() * (config.mov_a / (config.mov_b * config.home_field_advantage + config.mov_a));
        let k_effective = config.k_factor * multiplier;

        assert_abs_diff_eq!(first.home_win_probability, expected_a, epsilon = 1e-12);
        assert_abs_diff_eq!(first.home_rating_after, 1500.0 + k_effective * (1.0 - expected_a), epsilon = 1e-9);

        let third = &result.games[2];
        assert_abs_diff_eq!(
            third.home_rating_before,
            1500.0 + 0.3 * (first.home_rating_after - 1500.0),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            third.away_rating_before,
            1500.0 + 0.3 * (result.games[1].away_rating_after - 1500.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_pre_game_ratings_follow_previous_game() {
        let config = EloConfig {
            preseason_regress: 0.5,
            ..Default::default()
        };
        let result = Backtester::new(config.clone()).unwrap().run(&multi_season()).unwrap();

        // (team) -> (season, rating after that team's latest game)
        let mut last: HashMap<String, (i32, f64)> = HashMap::new();
        for game in &result.games {
            for (team, before, after) in [
                (&game.home_team, game.home_rating_before, game.home_rating_after),
                (&game.away_team, game.away_rating_before, game.away_rating_after)
            ] {
                let expected = match last.get(team) {
                    None => config.base_rating,
                    Some((season, rating)) if *season == game.season => *rating,
                    Some((season, rating)) => {
                        let mut r = *rating;
                        for _ in *season..game.season {
                            r = config.base_rating + config.preseason_regress * (r - config.base_rating);
                        }
                        r
                    }
                };

                assert_abs_diff_eq!(before, expected, epsilon = 1e-9);
                last.insert(team.clone(), (game.season, after));
            }
        }
    }

    #[test]
    fn test_final_ratings_replay_from_log() {
        let config = EloConfig {
            preseason_regress: 1.0,
            ..Default::default()
        };
        let result = Backtester::new(config).unwrap().run(&multi_season()).unwrap();

        let mut replay: HashMap<String, f64> = HashMap::new();
        for game in &result.games {
            *replay.entry(game.home_team.clone()).or_insert(1500.0) += game.home_delta();
            *replay.entry(game.away_team.clone()).or_insert(1500.0) += game.away_delta();
        }

        for (team, rating) in &result.final_ratings {
            assert_abs_diff_eq!(replay[team], *rating, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_run_is_deterministic() {
        let games = multi_season();
        let config = enable_all_adjustments(EloConfig::default());
        let backtester = Backtester::new(config).unwrap();

        let first = backtester.run(&games).unwrap();
        let second = backtester.run(&games).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let games = multi_season();
        let mut reversed = games.clone();
        reversed.reverse();
        let backtester = Backtester::new(EloConfig::default()).unwrap();

        let forward = backtester.run(&games).unwrap();
        let backward = backtester.run(&reversed).unwrap();

        assert_eq!(forward.final_ratings, backward.final_ratings);
        assert_eq!(forward.games, backward.games);
    }

    #[test]
    fn test_disabled_adjustments_match_pure_elo() {
        let games = multi_season();
        let mut data = AdjustmentData::empty();
        for game in &games {
            data.extend(generate_loaded_adjustment_data(game));
        }

        let with_data = Backtester::new(EloConfig::default())
            .unwrap()
            .with_adjustment_data(data)
            .run(&games)
            .unwrap();
        let pure = Backtester::new(EloConfig::default()).unwrap().run(&games).unwrap();

        assert!(with_data.games.iter().all(|g| g.adjustments.is_zero()));
        assert_eq!(with_data.final_ratings, pure.final_ratings);
    }

    #[test]
    fn test_shift_is_bounded_with_extreme_adjustments() {
        let games = multi_season();
        let mut data = AdjustmentData::empty();
        for game in &games {
            data.insert_impact(
                AdjustmentFamily::Turnover,
                TeamWeek::new(&game.home_team, game.season, game.week),
                1e6
            );
        }

        let mut config = EloConfig {
            k_factor: 500.0,
            max_rating_shift_per_game: 30.0,
            ..Default::default()
        };
        config.turnover = AdjustmentSettings::enabled(1e3, 1e9);

        let result = Backtester::new(config).unwrap().with_adjustment_data(data).run(&games).unwrap();

        for game in &result.games {
            assert!(game.home_delta().abs() <= 30.0 + 1e-9);
            assert!(game.away_delta().abs() <= 30.0 + 1e-9);
        }
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let games = vec![
            generate_game(2020, 1, "NE", "NYJ", 21, 3),
            generate_game(2020, 2, "", "NYJ", 10, 7),
            generate_game(2020, 3, "MIA", "MIA", 14, 14),
            generate_unplayed_game(2020, 4, "NE", "MIA"),
            generate_game(2020, 5, "NYJ", "MIA", 27, 24)
        ];

        let result = Backtester::new(EloConfig::default()).unwrap().run(&games).unwrap();

        assert_eq!(result.total_rows, 5);
        assert_eq!(result.games.len(), 2);
        assert_eq!(result.skipped_count(), 3);
        assert_eq!(result.defects().count(), 2);
        assert_eq!(result.skipped[0].reason, SkipReason::EmptyTeamCode);
        assert_eq!(result.skipped[1].reason, SkipReason::SameTeam);
        assert_eq!(result.skipped[2].reason, SkipReason::NotPlayed);
        assert!(!result.final_ratings.contains_key(""));
    }

    #[test]
    fn test_no_valid_games() {
        let backtester = Backtester::new(EloConfig::default()).unwrap();

        assert_eq!(
            backtester.run(&[]),
            Err(BacktestError::NoValidGames {
                total_rows: 0,
                skipped: 0
            })
        );

        let unplayed = vec![generate_unplayed_game(2025, 1, "CHI", "GB")];
        assert_eq!(
            backtester.run(&unplayed),
            Err(BacktestError::NoValidGames {
                total_rows: 1,
                skipped: 1
            })
        );
    }

    #[test]
    fn test_season_window() {
        let config = EloConfig {
            start_season: Some(2022),
            end_season: Some(2022),
            ..Default::default()
        };

        let result = Backtester::new(config).unwrap().run(&multi_season()).unwrap();

        assert_eq!(result.seasons(), vec![2022]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EloConfig {
            scale: -1.0,
            ..Default::default()
        };

        assert_eq!(
            Backtester::new(config).unwrap_err(),
            BacktestError::InvalidConfig(ConfigError::NonPositiveScale(-1.0))
        );
    }

    #[test]
    fn test_non_finite_config_is_rejected() {
        let config = EloConfig {
            max_rating_shift_per_game: f64::NAN,
            ..Default::default()
        };

        assert_eq!(
            Backtester::new(config).unwrap_err(),
            BacktestError::InvalidConfig(ConfigError::NonFinite("max_rating_shift_per_game"))
        );
    }

    #[test]
    fn test_non_finite_adjustment_skips_game() {
        let games = vec![
            generate_game(2021, 1, "LAR", "SEA", 24, 17),
            generate_game(2021, 2, "LAR", "SEA", 10, 20)
        ];
        let mut data = AdjustmentData::empty();
        data.insert_impact(AdjustmentFamily::Turnover, TeamWeek::new("LAR", 2021, 1), f64::NAN);

        let mut config = EloConfig::default();
        config.turnover = AdjustmentSettings::enabled(1.0, 10.0);

        let result = Backtester::new(config)
            .unwrap()
            .with_adjustment_data(data)
            .run(&games)
            .unwrap();

        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].week, 1);
        assert_eq!(result.skipped[0].reason, SkipReason::NonFiniteRating);
        assert_eq!(result.defects().count(), 1);

        // The skipped game must leave both ratings untouched
        assert_eq!(result.games.len(), 1);
        assert_eq!(result.games[0].home_rating_before, 1500.0);
        assert_eq!(result.games[0].away_rating_before, 1500.0);
        assert!(result.final_ratings.values().all(|r| r.is_finite()));
    }

    #[test]
    fn test_chronological_order_tiebreak() {
        let mut a = generate_game(2020, 1, "NE", "NYJ", 1, 0);
        a.game_id = Some("b".to_string());
        let mut b = generate_game(2020, 1, "MIA", "BUF", 1, 0);
        b.game_id = Some("a".to_string());
        let mut c = generate_game(2020, 1, "LAR", "SF", 1, 0);
        c.game_id = None;
        let d = generate_game(2019, 17, "KC", "LV", 1, 0);
        let games = vec![a, b, c, d];

        let ordered: Vec<&str> = chronological_order(&games, &EloConfig::default())
            .iter()
            .map(|g| g.home_team.as_str())
            .collect();

        assert_eq!(ordered, vec!["KC", "LAR", "MIA", "NE"]);
    }

    #[test]
    fn test_rest_is_derived_from_schedule() {
        let mut week1 = generate_game(2023, 1, "KC", "DET", 20, 21);
        week1.date = NaiveDate::from_ymd_opt(2023, 9, 7);
        let mut week2 = generate_game(2023, 2, "JAX", "KC", 9, 17);
        week2.date = NaiveDate::from_ymd_opt(2023, 9, 17);

        let mut config = EloConfig::default();
        config.travel = AdjustmentSettings::enabled(1.0, 100.0);

        let result = Backtester::new(config).unwrap().run(&[week1, week2]).unwrap();

        // Week 1 has no prior game, so rest is neutral
        assert!(result.games[0].adjustments.travel.is_zero());
        // KC had 10 days of rest, JAX has no prior game this season
        assert_abs_diff_eq!(result.games[1].adjustments.travel.away, 9.0);
        assert_eq!(result.games[1].adjustments.travel.home, 0.0);
    }

    #[test]
    fn test_neutral_site_has_no_home_field() {
        let mut game = generate_game(2022, 1, "NO", "MIN", 25, 28);
        game.neutral_site = true;

        let result = Backtester::new(EloConfig::default()).unwrap().run(&[game]).unwrap();

        assert_eq!(result.games[0].home_field_advantage, 0.0);
        assert_abs_diff_eq!(result.games[0].home_win_probability, 0.5);
    }

    #[test]
    fn test_offdef_snapshot() {
        let config = EloConfig {
            use_offdef: true,
            ..Default::default()
        };

        let result = Backtester::new(config).unwrap().run(&multi_season()).unwrap();
        let splits = result.final_split_ratings.unwrap();

        assert_eq!(splits.len(), TEAMS.len());
        assert!(result.games.iter().all(|g| g.home_split_after.is_some()));
    }

    #[test]
    fn test_run_many_matches_sequential() {
        let games = multi_season();
        let configs: Vec<EloConfig> = [10.0, 20.0, 30.0]
            .iter()
            .map(|k| EloConfig {
                k_factor: *k,
                ..Default::default()
            })
            .collect();
        let data = AdjustmentData::empty();

        let parallel = run_many(&configs, &games, &data);

        for (config, result) in configs.iter().zip(parallel) {
            let sequential = Backtester::new(config.clone()).unwrap().run(&games).unwrap();
            assert_eq!(result.unwrap(), sequential);
        }
    }
}
