use std::{fs, path::Path};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use crate::model::{
    adjustments::data::{AdjustmentData, AdjustmentTables},
    config::EloConfig,
    structures::game::Game
};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let display = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: display.clone(),
        source
    })?;

    serde_json::from_str(&contents).map_err(|source| DataError::Json { path: display, source })
}

/// Loads game rows from a JSON array.
pub fn load_games(path: &Path) -> Result<Vec<Game>, DataError> {
    let games: Vec<Game> = read_json(path)?;
    info!(path = %path.display(), rows = games.len(), "Loaded games");

    Ok(games)
}

/// Loads a configuration file. Keys that are absent keep their default values.
pub fn load_config(path: &Path) -> Result<EloConfig, DataError> {
    let config = read_json(path)?;
    info!(path = %path.display(), "Loaded configuration");

    Ok(config)
}

/// Loads and indexes the adjustment side tables.
pub fn load_adjustments(path: &Path) -> Result<AdjustmentData, DataError> {
    let tables: AdjustmentTables = read_json(path)?;
    info!(
        path = %path.display(),
        qb = tables.qb.len(),
        travel = tables.travel.len(),
        weather = tables.weather.len(),
        impacts = tables.impacts.len(),
        "Loaded adjustment tables"
    );

    Ok(AdjustmentData::from(tables))
}
