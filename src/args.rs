use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Clone, Debug)]
#[command(
    display_name = "NFL Elo",
    about = "Walk-forward Elo ratings and backtests for NFL games",
    long_about = "Replays historical NFL games in chronological order, rating every team with Elo, \
    and scores the pre-game win probabilities against the actual results"
)]
pub struct Args {
    /// JSON array of game rows (season, week, home_team, away_team, scores, ...)
    #[arg(short, long, env = "NFL_ELO_GAMES")]
    pub games: PathBuf,

    /// JSON configuration file. Missing keys fall back to the defaults
    #[arg(short, long, env = "NFL_ELO_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON side tables for the pre-game adjustments (qb, travel, weather, impacts)
    #[arg(short, long, env = "NFL_ELO_ADJUSTMENTS")]
    pub adjustments: Option<PathBuf>,

    /// First season to process, overriding the configuration
    #[arg(long)]
    pub season_from: Option<i32>,

    /// Last season to process, overriding the configuration
    #[arg(long)]
    pub season_to: Option<i32>,

    /// Predict a game from the final ratings
    #[arg(long, num_args = 2, value_names = ["HOME", "AWAY"])]
    pub predict: Option<Vec<String>>,

    /// Also backtest each of these K-factors in parallel and compare their metrics
    #[arg(long, value_delimiter = ',')]
    pub k_sweep: Vec<f64>,

    /// Number of teams to print from the final leaderboard
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Args;

    #[test]
    fn test_parse_full_command_line() {
        let args = Args::try_parse_from([
            "nfl-elo",
            "--games",
            "games.json",
            "--season-from",
            "2015",
            "--season-to",
            "2020",
            "--predict",
            "KC",
            "BUF",
            "--k-sweep",
            "15,20,25",
            "--log-level",
            "debug"
        ])
        .unwrap();

        assert_eq!(args.games.to_str(), Some("games.json"));
        assert_eq!(args.season_from, Some(2015));
        assert_eq!(args.predict, Some(vec!["KC".to_string(), "BUF".to_string()]));
        assert_eq!(args.k_sweep, vec![15.0, 20.0, 25.0]);
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let result = Args::try_parse_from(["nfl-elo", "--games", "g.json", "--log-level", "loud"]);

        assert!(result.is_err());
    }
}
