use crate::model::{config::EloConfig, elo::clamp_shift, structures::split_rating::SplitRating};

/// Points a team is expected to score given its offense and the opponent's defense.
pub fn expected_points(offense: f64, opposing_defense: f64, config: &EloConfig) -> f64 {
    config.league_average_points + (offense - opposing_defense) / config.rating_points_per_point
}

/// Updates both teams' offense/defense ratings from the final score.
///
/// Each side's scoring error (actual minus expected points) raises its offense and lowers the
/// opponent's defense by the same amount, converted to rating points and capped per game.
pub fn update_split(
    home: SplitRating,
    away: SplitRating,
    home_score: u32,
    away_score: u32,
    config: &EloConfig
) -> (SplitRating, SplitRating) {
    let step = config.offdef_k * config.rating_points_per_point;

    let home_error = home_score as f64 - expected_points(home.offense, away.defense, config);
    let away_error = away_score as f64 - expected_points(away.offense, home.defense, config);

    let home_shift = clamp_shift(step * home_error, config.max_rating_shift_per_game);
    let away_shift = clamp_shift(step * away_error, config.max_rating_shift_per_game);

    let new_home = SplitRating::new(home.offense + home_shift, home.defense - away_shift);
    let new_away = SplitRating::new(away.offense + away_shift, away.defense - home_shift);

    (new_home, new_away)
}
