use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{constants, structures::adjustment_family::AdjustmentFamily};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("logistic scale must be positive, got {0}")]
    NonPositiveScale(f64),

    #[error("k_factor must not be negative, got {0}")]
    NegativeKFactor(f64),

    #[error("preseason_regress must be within [0, 1], got {0}")]
    RegressOutOfRange(f64),

    #[error("max_rating_shift_per_game must be positive, got {0}")]
    NonPositiveMaxShift(f64),

    #[error("{family} adjustment has a negative weight or cap (weight {weight}, max_delta {max_delta})")]
    InvalidAdjustment {
        family: AdjustmentFamily,
        weight: f64,
        max_delta: f64
    },

    #[error("start_season {start} is after end_season {end}")]
    InvertedSeasonWindow { start: i32, end: i32 },

    #[error("{0} must be positive when offense/defense ratings are enabled")]
    InvalidOffDef(&'static str),

    #[error("{0} must be a finite number")]
    NonFinite(&'static str),

    #[error("margin-of-victory shape needs mov_a > 0 and mov_b >= 0 (got {a}, {b})")]
    InvalidMov { a: f64, b: f64 }
}

/// Toggle, weight and cap for one adjustment family
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentSettings {
    pub enabled: bool,
    /// Multiplies the calculator's raw output
    pub weight: f64,
    /// Absolute cap applied after weighting
    pub max_delta: f64
}

impl AdjustmentSettings {
    pub fn disabled(max_delta: f64) -> AdjustmentSettings {
        AdjustmentSettings {
            enabled: false,
            weight: 1.0,
            max_delta
        }
    }

    pub fn enabled(weight: f64, max_delta: f64) -> AdjustmentSettings {
        AdjustmentSettings {
            enabled: true,
            weight,
            max_delta
        }
    }
}

impl Default for AdjustmentSettings {
    fn default() -> Self {
        AdjustmentSettings::disabled(10.0)
    }
}

/// Knobs for a single run. Built once, then shared by reference with every component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EloConfig {
    pub base_rating: f64,
    pub k_factor: f64,
    /// Rating gap that multiplies the odds by 10
    pub scale: f64,
    pub home_field_advantage: f64,
    /// 0 resets every team to `base_rating` each season, 1 carries ratings over untouched
    pub preseason_regress: f64,
    pub use_mov: bool,
    pub mov_a: f64,
    pub mov_b: f64,
    pub start_season: Option<i32>,
    pub end_season: Option<i32>,
    pub max_rating_shift_per_game: f64,
    pub use_offdef: bool,
    pub offdef_k: f64,
    pub league_average_points: f64,
    /// Rating points that correspond to one point of scoring margin
    pub rating_points_per_point: f64,
    pub travel: AdjustmentSettings,
    pub qb: AdjustmentSettings,
    pub weather: AdjustmentSettings,
    pub injury: AdjustmentSettings,
    pub red_zone: AdjustmentSettings,
    pub down_conversion: AdjustmentSettings,
    pub clock_management: AdjustmentSettings,
    pub situational: AdjustmentSettings,
    pub turnover: AdjustmentSettings
}

impl Default for EloConfig {
    fn default() -> Self {
        EloConfig {
            base_rating: constants::BASE_RATING,
            k_factor: constants::K_FACTOR,
            scale: constants::LOGISTIC_SCALE,
            home_field_advantage: constants::HOME_FIELD_ADVANTAGE,
            preseason_regress: constants::PRESEASON_REGRESS,
            use_mov: true,
            mov_a: constants::MOV_A,
            mov_b: constants::MOV_B,
            start_season: None,
            end_season: None,
            max_rating_shift_per_game: constants::MAX_RATING_SHIFT_PER_GAME,
            use_offdef: false,
            offdef_k: constants::OFFDEF_K,
            league_average_points: constants::LEAGUE_AVERAGE_POINTS,
            rating_points_per_point: constants::RATING_POINTS_PER_POINT,
            travel: AdjustmentSettings::disabled(15.0),
            qb: AdjustmentSettings::disabled(40.0),
            weather: AdjustmentSettings::disabled(10.0),
            injury: AdjustmentSettings::disabled(25.0),
            red_zone: AdjustmentSettings::disabled(10.0),
            down_conversion: AdjustmentSettings::disabled(10.0),
            clock_management: AdjustmentSettings::disabled(10.0),
            situational: AdjustmentSettings::disabled(10.0),
            turnover: AdjustmentSettings::disabled(10.0)
        }
    }
}

impl EloConfig {
    pub fn adjustment(&self, family: AdjustmentFamily) -> &AdjustmentSettings {
        match family {
            AdjustmentFamily::Travel => &self.travel,
            AdjustmentFamily::Qb => &self.qb,
            AdjustmentFamily::Weather => &self.weather,
            AdjustmentFamily::Injury => &self.injury,
            AdjustmentFamily::RedZone => &self.red_zone,
            AdjustmentFamily::DownConversion => &self.down_conversion,
            AdjustmentFamily::ClockManagement => &self.clock_management,
            AdjustmentFamily::Situational => &self.situational,
            AdjustmentFamily::Turnover => &self.turnover
        }
    }

    pub fn adjustment_mut(&mut self, family: AdjustmentFamily) -> &mut AdjustmentSettings {
        match family {
            AdjustmentFamily::Travel => &mut self.travel,
            AdjustmentFamily::Qb => &mut self.qb,
            AdjustmentFamily::Weather => &mut self.weather,
            AdjustmentFamily::Injury => &mut self.injury,
            AdjustmentFamily::RedZone => &mut self.red_zone,
            AdjustmentFamily::DownConversion => &mut self.down_conversion,
            AdjustmentFamily::ClockManagement => &mut self.clock_management,
            AdjustmentFamily::Situational => &mut self.situational,
            AdjustmentFamily::Turnover => &mut self.turnover
        }
    }

    /// True if `season` falls inside the configured window (open ends are unbounded)
    pub fn in_window(&self, season: i32) -> bool {
        self.start_season.map_or(true, |s| season >= s) && self.end_season.map_or(true, |e| season <= e)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        use strum::IntoEnumIterator;

        let mut finite = vec![
            ("base_rating", self.base_rating),
            ("k_factor", self.k_factor),
            ("home_field_advantage", self.home_field_advantage),
            ("preseason_regress", self.preseason_regress),
            ("max_rating_shift_per_game", self.max_rating_shift_per_game)
        ];
        if self.use_mov {
            finite.extend([("mov_a", self.mov_a), ("mov_b", self.mov_b)]);
        }
        if self.use_offdef {
            finite.extend([
                ("offdef_k", self.offdef_k),
                ("league_average_points", self.league_average_points),
                ("rating_points_per_point", self.rating_points_per_point)
            ]);
        }
        if let Some(&(name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite(name));
        }

        if self.scale <= 0.0 || !self.scale.is_finite() {
            return Err(ConfigError::NonPositiveScale(self.scale));
        }

        if self.k_factor < 0.0 {
            return Err(ConfigError::NegativeKFactor(self.k_factor));
        }

        if !(0.0..=1.0).contains(&self.preseason_regress) {
            return Err(ConfigError::RegressOutOfRange(self.preseason_regress));
        }

        if self.max_rating_shift_per_game <= 0.0 {
            return Err(ConfigError::NonPositiveMaxShift(self.max_rating_shift_per_game));
        }

        if self.use_mov && (self.mov_a <= 0.0 || self.mov_b < 0.0) {
            return Err(ConfigError::InvalidMov {
                a: self.mov_a,
                b: self.mov_b
            });
        }

        if let (Some(start), Some(end)) = (self.start_season, self.end_season) {
            if start > end {
                return Err(ConfigError::InvertedSeasonWindow { start, end });
            }
        }

        for family in AdjustmentFamily::iter() {
            let settings = self.adjustment(family);
            let usable = |v: f64| v.is_finite() && v >= 0.0;
            if !usable(settings.weight) || !usable(settings.max_delta) {
                return Err(ConfigError::InvalidAdjustment {
                    family,
                    weight: settings.weight,
                    max_delta: settings.max_delta
                });
            }
        }

        if self.use_offdef {
            if self.offdef_k <= 0.0 {
                return Err(ConfigError::InvalidOffDef("offdef_k"));
            }

            if self.rating_points_per_point <= 0.0 {
                return Err(ConfigError::InvalidOffDef("rating_points_per_point"));
            }
        }

        Ok(())
    }
}
