//! Elo rating model: the rating book, the update rule, pre-game adjustments,
//! the walk-forward backtest that ties them together, and the evaluation and
//! prediction layers that consume its output.

pub mod adjustments;
pub mod backtest;
pub mod config;
pub mod constants;
pub mod elo;
pub mod evaluator;
pub mod offdef;
pub mod prediction;
pub mod rating_book;
pub mod structures;
