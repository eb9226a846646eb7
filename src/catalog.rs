use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Roster slot category. Quota rules in the validator are keyed on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub fn label(self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Availability {
    #[default]
    Available,
    // Percent chance of featuring, as published by the provider.
    Doubtful {
        chance: u8,
    },
    Unavailable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPlayer {
    pub id: u32,
    pub name: String,
    pub position: Position,
    pub club_id: u32,
    // Current price in tenths of a currency unit (55 = 5.5m).
    pub cost: i32,
    pub form: f64,
    pub total_points: i32,
    pub minutes: u32,
    #[serde(default)]
    pub transfers_in: u32,
    #[serde(default)]
    pub transfers_out: u32,
    #[serde(default)]
    pub status: Availability,
    #[serde(default)]
    pub news: String,
}

impl CatalogPlayer {
    /// Net transfer balance this gameweek; positive means being bought.
    pub fn net_momentum(&self) -> i64 {
        i64::from(self.transfers_in) - i64::from(self.transfers_out)
    }

    /// Season points per million of current price.
    pub fn points_per_cost(&self) -> f64 {
        if self.cost <= 0 {
            return 0.0;
        }
        f64::from(self.total_points) / (f64::from(self.cost) / 10.0)
    }
}

/// One scheduled match with a per-side difficulty rating (1 easy .. 5 hard).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Fixture {
    pub gameweek: u32,
    pub home_id: u32,
    pub away_id: u32,
    pub home_difficulty: u8,
    pub away_difficulty: u8,
}

/// Read-only season data the planning engine queries. Built once from
/// already-loaded provider data; never mutated by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    players: HashMap<u32, CatalogPlayer>,
    fixtures: Vec<Fixture>,
}

impl Catalog {
    pub fn new(players: Vec<CatalogPlayer>, fixtures: Vec<Fixture>) -> Self {
        let players = players.into_iter().map(|p| (p.id, p)).collect();
        Self { players, fixtures }
    }

    pub fn player(&self, id: u32) -> Option<&CatalogPlayer> {
        self.players.get(&id)
    }

    pub fn players(&self) -> impl Iterator<Item = &CatalogPlayer> {
        self.players.values()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Average fixture difficulty for a club over `window` gameweeks starting
    /// at `from_gw`. `None` when the club has no fixtures in that span
    /// (blank gameweeks yield a smaller sample, not a penalty).
    pub fn difficulty_avg(&self, club_id: u32, from_gw: u32, window: u32) -> Option<f64> {
        let last = from_gw.saturating_add(window.saturating_sub(1));
        let mut sum = 0.0;
        let mut n = 0usize;
        for fx in &self.fixtures {
            if fx.gameweek < from_gw || fx.gameweek > last {
                continue;
            }
            if fx.home_id == club_id {
                sum += f64::from(fx.home_difficulty);
                n += 1;
            } else if fx.away_id == club_id {
                sum += f64::from(fx.away_difficulty);
                n += 1;
            }
        }
        if n == 0 {
            return None;
        }
        Some(sum / n as f64)
    }
}
