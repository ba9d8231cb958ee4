use crate::model::{
    config::EloConfig,
    constants::PROBABILITY_EPSILON,
    structures::game_result::Winner
};

/// Result of rating a single game, before it is written back to the rating book.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingChange {
    pub home_expected: f64,
    pub home_delta: f64,
    pub away_delta: f64,
    pub mov_multiplier: f64,
    pub winner: Winner
}

/// Logistic Elo expectation for side A:
/// `1 / (1 + 10^(-(rating_a - rating_b) / scale))`
///
/// The result is kept strictly inside (0, 1) so downstream log terms stay finite.
pub fn expected_score(rating_a: f64, rating_b: f64, scale: f64) -> f64 {
    let p = 1.0 / (1.0 + 10f64.powf(-(rating_a - rating_b) / scale));

    p.clamp(PROBABILITY_EPSILON, 1.0 - PROBABILITY_EPSILON)
}

/// Margin-of-victory multiplier: `ln(margin + 1) * (a / (b * |rating_diff| + a))`.
///
/// Larger margins move ratings more, damped when the pre-game gap already predicted a
/// blowout. A margin of zero yields zero.
pub fn mov_multiplier(margin: u32, rating_diff: f64, a: f64, b: f64) -> f64 {
    (margin as f64 + 1.0).ln() * (a / (b * rating_diff.abs() + a))
}

/// Caps a single game's rating change at `±max_shift`.
pub fn clamp_shift(delta: f64, max_shift: f64) -> f64 {
    delta.clamp(-max_shift, max_shift)
}

/// Rates one game from the effective (home-field and adjustment inclusive) ratings.
///
/// The away delta is computed from the away side's own actual and expected score rather
/// than negated from the home delta. Both deltas are clamped independently.
pub fn rate_game(
    effective_home: f64,
    effective_away: f64,
    home_score: u32,
    away_score: u32,
    config: &EloConfig
) -> RatingChange {
    let home_expected = expected_score(effective_home, effective_away, config.scale);
    let away_expected = 1.0 - home_expected;

    let winner = Winner::from_scores(home_score, away_score);
    let home_actual = winner.home_actual();
    let away_actual = 1.0 - home_actual;

    let multiplier = if config.use_mov {
        let margin = home_score.abs_diff(away_score);
        mov_multiplier(margin, effective_home - effective_away, config.mov_a, config.mov_b)
    } else {
        1.0
    };

    let k_effective = config.k_factor * multiplier;
    let home_delta = clamp_shift(
        k_effective * (home_actual - home_expected),
        config.max_rating_shift_per_game
    );
    let away_delta = clamp_shift(
        k_effective * (away_actual - away_expected),
        config.max_rating_shift_per_game
    );

    RatingChange {
        home_expected,
        home_delta,
        away_delta,
        mov_multiplier: multiplier,
        winner
    }
}
