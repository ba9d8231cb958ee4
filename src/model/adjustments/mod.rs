//! Pre-game rating adjustments.
//!
//! Each family has a pure calculator that turns pre-game signals into a raw
//! `(home, away)` delta in rating points. The dispatcher here applies the family's weight
//! and cap, and never invokes a disabled family, so its contribution is exactly zero.

use strum::IntoEnumIterator;

use crate::model::{
    adjustments::{
        data::{AdjustmentData, TeamWeek},
        efficiency::efficiency_adjustment,
        injury::injury_adjustment,
        qb::qb_adjustment,
        travel::{travel_adjustment, TravelInput},
        weather::weather_adjustment
    },
    config::{AdjustmentSettings, EloConfig},
    structures::{
        adjustment_delta::{AdjustmentDelta, AdjustmentDeltas},
        adjustment_family::AdjustmentFamily,
        game::Game
    }
};

pub mod data;
pub mod efficiency;
pub mod injury;
pub mod qb;
pub mod travel;
pub mod weather;

/// Everything known about a game before kickoff that the calculators may read
#[derive(Debug, Clone, Copy)]
pub struct PreGameContext<'a> {
    pub game: &'a Game,
    /// Rest days as supplied by the row, or derived from the schedule
    pub home_rest: Option<f64>,
    pub away_rest: Option<f64>
}

impl<'a> PreGameContext<'a> {
    pub fn new(game: &'a Game) -> PreGameContext<'a> {
        PreGameContext {
            game,
            home_rest: game.home_rest,
            away_rest: game.away_rest
        }
    }

    fn home_key(&self) -> TeamWeek {
        TeamWeek::new(&self.game.home_team, self.game.season, self.game.week)
    }

    fn away_key(&self) -> TeamWeek {
        TeamWeek::new(&self.game.away_team, self.game.season, self.game.week)
    }
}

/// Weight first, then cap.
pub fn apply_settings(raw: AdjustmentDelta, settings: &AdjustmentSettings) -> AdjustmentDelta {
    raw.scale(settings.weight).clamp(settings.max_delta)
}

/// Unweighted, uncapped delta for one family.
pub fn raw_adjustment(family: AdjustmentFamily, ctx: &PreGameContext, data: &AdjustmentData) -> AdjustmentDelta {
    let home_key = ctx.home_key();
    let away_key = ctx.away_key();

    match family {
        AdjustmentFamily::Travel => travel_adjustment(
            TravelInput {
                rest_days: ctx.home_rest,
                travel: data.travel(&home_key)
            },
            TravelInput {
                rest_days: ctx.away_rest,
                travel: data.travel(&away_key)
            }
        ),
        AdjustmentFamily::Qb => qb_adjustment(data.qb(&home_key), data.qb(&away_key)),
        AdjustmentFamily::Weather => {
            // No home edge to hand out at a neutral site
            if ctx.game.neutral_site {
                AdjustmentDelta::zero()
            } else {
                weather_adjustment(data.weather(ctx.game.game_id.as_deref()))
            }
        }
        AdjustmentFamily::Injury => injury_adjustment(
            data.impact(AdjustmentFamily::Injury, &home_key),
            data.impact(AdjustmentFamily::Injury, &away_key)
        ),
        family => {
            debug_assert!(family.is_efficiency());
            efficiency_adjustment(data.impact(family, &home_key), data.impact(family, &away_key))
        }
    }
}

/// Computes every enabled family's weighted, capped delta for a game.
pub fn compute_adjustments(ctx: &PreGameContext, data: &AdjustmentData, config: &EloConfig) -> AdjustmentDeltas {
    let mut deltas = AdjustmentDeltas::default();

    for family in AdjustmentFamily::iter() {
        let settings = config.adjustment(family);
        if !settings.enabled {
            continue;
        }

        deltas.set(family, apply_settings(raw_adjustment(family, ctx, data), settings));
    }

    deltas
}
