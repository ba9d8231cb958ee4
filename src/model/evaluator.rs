use std::ops::RangeInclusive;

use indexmap::IndexMap;
use itertools::Itertools;
use thiserror::Error;

use crate::model::{
    constants::{CALIBRATION_BINS, LOG_LOSS_CEILING, LOG_LOSS_FLOOR},
    structures::{
        evaluation::{CalibrationBin, EvaluationMetrics},
        game_result::GameResult
    }
};

#[derive(Debug, Error, PartialEq)]
pub enum EvaluationError {
    #[error("no predictions to evaluate")]
    NoPredictions
}

/// Scores the pre-game home win probabilities in `results` against the actual outcomes.
///
/// Ties count as half a home win. A prediction of exactly 0.5, or a tied game, scores half
/// a correct pick towards accuracy.
pub fn evaluate(results: &[GameResult]) -> Result<EvaluationMetrics, EvaluationError> {
    evaluate_iter(results.iter())
}

/// Same as [`evaluate`], restricted to games whose season is in `seasons`.
pub fn evaluate_seasons(
    results: &[GameResult],
    seasons: RangeInclusive<i32>
) -> Result<EvaluationMetrics, EvaluationError> {
    evaluate_iter(results.iter().filter(|r| seasons.contains(&r.season)))
}

/// Metrics for each season present in `results`, in ascending season order.
pub fn evaluate_by_season(results: &[GameResult]) -> IndexMap<i32, EvaluationMetrics> {
    results
        .iter()
        .map(|r| r.season)
        .unique()
        .sorted()
        .filter_map(|season| {
            evaluate_seasons(results, season..=season)
                .ok()
                .map(|metrics| (season, metrics))
        })
        .collect()
}

fn evaluate_iter<'a>(results: impl Iterator<Item = &'a GameResult>) -> Result<EvaluationMetrics, EvaluationError> {
    let pairs: Vec<(f64, f64)> = results.map(|r| (r.home_win_probability, r.home_actual())).collect();

    if pairs.is_empty() {
        return Err(EvaluationError::NoPredictions);
    }

    let n = pairs.len() as f64;

    let accuracy = pairs.iter().map(|(p, y)| pick_score(*p, *y)).sum::<f64>() / n;
    let brier_score = pairs.iter().map(|(p, y)| (p - y).powi(2)).sum::<f64>() / n;
    let log_loss = pairs
        .iter()
        .map(|(p, y)| {
            let p = p.clamp(LOG_LOSS_FLOOR, LOG_LOSS_CEILING);
            -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
        })
        .sum::<f64>()
        / n;
    let sharpness = pairs.iter().map(|(p, _)| (p - 0.5).abs()).sum::<f64>() / n;

    let calibration_bins = calibration_bins(&pairs);
    let expected_calibration_error = calibration_bins
        .iter()
        .map(|b| b.count as f64 / n * b.gap())
        .sum();

    Ok(EvaluationMetrics {
        games: pairs.len(),
        accuracy,
        brier_score,
        log_loss,
        expected_calibration_error,
        sharpness,
        calibration_bins
    })
}

fn pick_score(p: f64, actual: f64) -> f64 {
    if p == 0.5 || actual == 0.5 {
        0.5
    } else if (p > 0.5) == (actual == 1.0) {
        1.0
    } else {
        0.0
    }
}

fn bin_index(p: f64) -> usize {
    ((p * CALIBRATION_BINS as f64) as usize).min(CALIBRATION_BINS - 1)
}

/// Equal-width probability bins. Empty bins are omitted.
fn calibration_bins(pairs: &[(f64, f64)]) -> Vec<CalibrationBin> {
    let mut sums = vec![(0usize, 0.0f64, 0.0f64); CALIBRATION_BINS];

    for (p, y) in pairs {
        let slot = &mut sums[bin_index(*p)];
        slot.0 += 1;
        slot.1 += p;
        slot.2 += y;
    }

    let width = 1.0 / CALIBRATION_BINS as f64;
    sums.into_iter()
        .enumerate()
        .filter(|(_, (count, _, _))| *count > 0)
        .map(|(i, (count, p_sum, y_sum))| CalibrationBin {
            bucket_start: i as f64 * width,
            bucket_end: (i + 1) as f64 * width,
            count,
            mean_predicted: p_sum / count as f64,
            observed_rate: y_sum / count as f64
        })
        .collect()
}
