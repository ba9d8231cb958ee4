use clap::Parser;
use itertools::Itertools;
use nfl_elo::{
    args::Args,
    data::loader::{load_adjustments, load_config, load_games, DataError},
    model::{
        adjustments::data::AdjustmentData,
        backtest::{run_many, BacktestError, Backtester},
        config::EloConfig,
        evaluator::{evaluate, evaluate_by_season, EvaluationError},
        prediction::{PredictionError, Predictor},
        rating_book::RatingBook,
        structures::adjustment_family::AdjustmentFamily
    }
};
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Backtest(#[from] BacktestError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    Prediction(#[from] PredictionError)
}

fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(EnvFilter::new(&args.log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EloConfig::default()
    };
    if args.season_from.is_some() {
        config.start_season = args.season_from;
    }
    if args.season_to.is_some() {
        config.end_season = args.season_to;
    }

    let data = match &args.adjustments {
        Some(path) => load_adjustments(path)?,
        None => AdjustmentData::empty()
    };
    let games = load_games(&args.games)?;

    let enabled = AdjustmentFamily::iter()
        .filter(|f| config.adjustment(*f).enabled)
        .join(", ");
    if !enabled.is_empty() && data.is_empty() {
        warn!(families = %enabled, "Adjustments are enabled but no adjustment tables were loaded");
    }

    let backtester = Backtester::new(config.clone())?
        .with_adjustment_data(data)
        .with_progress(true);
    let result = backtester.run(&games)?;

    let metrics = evaluate(&result.games)?;
    info!(
        games = metrics.games,
        skipped = result.skipped_count(),
        accuracy = metrics.accuracy,
        brier = metrics.brier_score,
        log_loss = metrics.log_loss,
        ece = metrics.expected_calibration_error,
        sharpness = metrics.sharpness,
        "Backtest metrics"
    );

    for (season, m) in evaluate_by_season(&result.games) {
        debug!(
            season,
            games = m.games,
            accuracy = m.accuracy,
            brier = m.brier_score,
            "Season metrics"
        );
    }

    for defect in result.defects() {
        warn!(
            season = defect.season,
            week = defect.week,
            home = %defect.home_team,
            away = %defect.away_team,
            reason = %defect.reason,
            "Row skipped"
        );
    }

    let book = RatingBook::from_snapshot(config.base_rating, &result.final_ratings);
    for (rank, (team, rating)) in book.leaderboard().iter().take(args.top).enumerate() {
        info!("{:>2}. {:<4} {:.1}", rank + 1, team, rating);
    }

    if let Some([home, away]) = args.predict.as_deref() {
        let prediction = Predictor::from_backtest(config.clone(), &result).predict_game(home, away, None, None)?;
        info!(
            home = %prediction.home_team,
            away = %prediction.away_team,
            home_win_probability = prediction.home_win_probability,
            winner = %prediction.predicted_winner,
            confidence = prediction.confidence,
            expected_margin = prediction.expected_margin,
            "Prediction"
        );
    }

    if !args.k_sweep.is_empty() {
        let configs: Vec<EloConfig> = args
            .k_sweep
            .iter()
            .map(|k| EloConfig {
                k_factor: *k,
                ..config.clone()
            })
            .collect();

        for (k, outcome) in args.k_sweep.iter().zip(run_many(&configs, &games, backtester.adjustment_data())) {
            match outcome.map_err(AppError::from).and_then(|r| evaluate(&r.games).map_err(AppError::from)) {
                Ok(m) => info!(
                    k_factor = k,
                    accuracy = m.accuracy,
                    brier = m.brier_score,
                    log_loss = m.log_loss,
                    "K sweep"
                ),
                Err(e) => warn!(k_factor = k, "K sweep run failed: {}", e)
            }
        }
    }

    Ok(())
}
