use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// The independently toggleable families of pre-game rating adjustments.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AdjustmentFamily {
    /// Rest days and travel distance/timezone change
    Travel,
    Qb,
    Weather,
    Injury,
    RedZone,
    /// Third and fourth down conversion
    DownConversion,
    ClockManagement,
    Situational,
    Turnover
}

impl AdjustmentFamily {
    /// Families whose signal is a pre-aggregated per-team efficiency impact score
    pub fn is_efficiency(&self) -> bool {
        matches!(
            self,
            AdjustmentFamily::RedZone
                | AdjustmentFamily::DownConversion
                | AdjustmentFamily::ClockManagement
                | AdjustmentFamily::Situational
                | AdjustmentFamily::Turnover
        )
    }
}
