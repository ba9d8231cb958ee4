use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::structures::adjustment_family::AdjustmentFamily;

/// Lookup key for per-team weekly side tables
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TeamWeek {
    pub team: String,
    pub season: i32,
    pub week: i32
}

impl TeamWeek {
    pub fn new(team: &str, season: i32, week: i32) -> TeamWeek {
        TeamWeek {
            team: team.to_owned(),
            season,
            week
        }
    }
}

/// Quarterback form entering a game. `rating` is a rolling season-to-date efficiency
/// metric computed from games before this week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QbSignal {
    pub rating: f64,
    #[serde(default)]
    pub starter_changed: bool
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TravelSignal {
    pub miles: f64,
    /// Signed timezone change from the team's previous game location
    #[serde(default)]
    pub timezones: i32
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeatherSignal {
    #[serde(default)]
    pub temperature_f: Option<f64>,
    #[serde(default)]
    pub wind_mph: Option<f64>,
    #[serde(default)]
    pub precipitation: bool,
    #[serde(default)]
    pub indoor: bool
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QbRecord {
    pub team: String,
    pub season: i32,
    pub week: i32,
    #[serde(flatten)]
    pub signal: QbSignal
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelRecord {
    pub team: String,
    pub season: i32,
    pub week: i32,
    #[serde(flatten)]
    pub signal: TravelSignal
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub game_id: String,
    #[serde(flatten)]
    pub signal: WeatherSignal
}

/// A per-team scalar impact score for one week (injury or efficiency families)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactRecord {
    pub family: AdjustmentFamily,
    pub team: String,
    pub season: i32,
    pub week: i32,
    pub impact: f64
}

/// On-disk shape of the side tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentTables {
    pub qb: Vec<QbRecord>,
    pub travel: Vec<TravelRecord>,
    pub weather: Vec<WeatherRecord>,
    pub impacts: Vec<ImpactRecord>
}

/// Indexed side tables consulted by the adjustment calculators.
///
/// Every lookup that misses returns `None`, which the calculators treat as neutral.
#[derive(Debug, Clone, Default)]
pub struct AdjustmentData {
    qb: HashMap<TeamWeek, QbSignal>,
    travel: HashMap<TeamWeek, TravelSignal>,
    weather: HashMap<String, WeatherSignal>,
    impacts: HashMap<(AdjustmentFamily, TeamWeek), f64>
}

impl AdjustmentData {
    pub fn empty() -> AdjustmentData {
        AdjustmentData::default()
    }

    pub fn insert_qb(&mut self, key: TeamWeek, signal: QbSignal) {
        self.qb.insert(key, signal);
    }

    pub fn insert_travel(&mut self, key: TeamWeek, signal: TravelSignal) {
        self.travel.insert(key, signal);
    }

    pub fn insert_weather(&mut self, game_id: &str, signal: WeatherSignal) {
        self.weather.insert(game_id.to_owned(), signal);
    }

    pub fn insert_impact(&mut self, family: AdjustmentFamily, key: TeamWeek, impact: f64) {
        self.impacts.insert((family, key), impact);
    }

    pub fn qb(&self, key: &TeamWeek) -> Option<&QbSignal> {
        self.qb.get(key)
    }

    pub fn travel(&self, key: &TeamWeek) -> Option<&TravelSignal> {
        self.travel.get(key)
    }

    pub fn weather(&self, game_id: Option<&str>) -> Option<&WeatherSignal> {
        game_id.and_then(|id| self.weather.get(id))
    }

    pub fn impact(&self, family: AdjustmentFamily, key: &TeamWeek) -> Option<f64> {
        self.impacts.get(&(family, key.clone())).copied()
    }

    /// Merges `other` into this table set. Entries in `other` win on key collisions.
    pub fn extend(&mut self, other: AdjustmentData) {
        self.qb.extend(other.qb);
        self.travel.extend(other.travel);
        self.weather.extend(other.weather);
        self.impacts.extend(other.impacts);
    }

    pub fn is_empty(&self) -> bool {
        self.qb.is_empty() && self.travel.is_empty() && self.weather.is_empty() && self.impacts.is_empty()
    }
}

impl From<AdjustmentTables> for AdjustmentData {
    fn from(tables: AdjustmentTables) -> Self {
        let mut data = AdjustmentData::empty();

        for r in tables.qb {
            data.insert_qb(TeamWeek::new(&r.team, r.season, r.week), r.signal);
        }

        for r in tables.travel {
            data.insert_travel(TeamWeek::new(&r.team, r.season, r.week), r.signal);
        }

        for r in tables.weather {
            data.insert_weather(&r.game_id, r.signal);
        }

        for r in tables.impacts {
            data.insert_impact(r.family, TeamWeek::new(&r.team, r.season, r.week), r.impact);
        }

        data
    }
}
