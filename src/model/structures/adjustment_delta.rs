use serde::{Deserialize, Serialize};

use crate::model::structures::adjustment_family::AdjustmentFamily;

/// Rating points added to each side's effective rating before the win probability is computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentDelta {
    pub home: f64,
    pub away: f64
}

impl AdjustmentDelta {
    pub fn new(home: f64, away: f64) -> AdjustmentDelta {
        AdjustmentDelta { home, away }
    }

    pub fn zero() -> AdjustmentDelta {
        AdjustmentDelta::default()
    }

    pub fn scale(self, factor: f64) -> AdjustmentDelta {
        AdjustmentDelta::new(self.home * factor, self.away * factor)
    }

    /// Clamps both sides to `±max_abs`
    pub fn clamp(self, max_abs: f64) -> AdjustmentDelta {
        AdjustmentDelta::new(self.home.clamp(-max_abs, max_abs), self.away.clamp(-max_abs, max_abs))
    }

    pub fn is_zero(&self) -> bool {
        self.home == 0.0 && self.away == 0.0
    }
}

impl std::ops::Add for AdjustmentDelta {
    type Output = AdjustmentDelta;

    fn add(self, rhs: AdjustmentDelta) -> AdjustmentDelta {
        AdjustmentDelta::new(self.home + rhs.home, self.away + rhs.away)
    }
}

/// Every family's applied delta for a single game. Disabled families stay at exactly zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentDeltas {
    pub travel: AdjustmentDelta,
    pub qb: AdjustmentDelta,
    pub weather: AdjustmentDelta,
    pub injury: AdjustmentDelta,
    pub red_zone: AdjustmentDelta,
    pub down_conversion: AdjustmentDelta,
    pub clock_management: AdjustmentDelta,
    pub situational: AdjustmentDelta,
    pub turnover: AdjustmentDelta
}

impl AdjustmentDeltas {
    pub fn get(&self, family: AdjustmentFamily) -> AdjustmentDelta {
        match family {
            AdjustmentFamily::Travel => self.travel,
            AdjustmentFamily::Qb => self.qb,
            AdjustmentFamily::Weather => self.weather,
            AdjustmentFamily::Injury => self.injury,
            AdjustmentFamily::RedZone => self.red_zone,
            AdjustmentFamily::DownConversion => self.down_conversion,
            AdjustmentFamily::ClockManagement => self.clock_management,
            AdjustmentFamily::Situational => self.situational,
            AdjustmentFamily::Turnover => self.turnover
        }
    }

    pub fn set(&mut self, family: AdjustmentFamily, delta: AdjustmentDelta) {
        let slot = match family {
            AdjustmentFamily::Travel => &mut self.travel,
            AdjustmentFamily::Qb => &mut self.qb,
            AdjustmentFamily::Weather => &mut self.weather,
            AdjustmentFamily::Injury => &mut self.injury,
            AdjustmentFamily::RedZone => &mut self.red_zone,
            AdjustmentFamily::DownConversion => &mut self.down_conversion,
            AdjustmentFamily::ClockManagement => &mut self.clock_management,
            AdjustmentFamily::Situational => &mut self.situational,
            AdjustmentFamily::Turnover => &mut self.turnover
        };

        *slot = delta;
    }

    /// Sum of every family's delta, per side
    pub fn total(&self) -> AdjustmentDelta {
        use strum::IntoEnumIterator;

        AdjustmentFamily::iter().fold(AdjustmentDelta::zero(), |acc, f| acc + self.get(f))
    }

    pub fn is_zero(&self) -> bool {
        use strum::IntoEnumIterator;

        AdjustmentFamily::iter().all(|f| self.get(f).is_zero())
    }
}
