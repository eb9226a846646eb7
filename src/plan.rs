use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Position;
use crate::ledger;

pub const MIN_HORIZON: u32 = 3;
pub const MAX_HORIZON: u32 = 8;

/// One-shot season rule modifiers. Wildcard and FreeHit suspend point-hits
/// for their gameweek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Chip {
    Wildcard,
    FreeHit,
    BenchBoost,
    TripleCaptain,
}

impl Chip {
    pub fn label(self) -> &'static str {
        match self {
            Chip::Wildcard => "Wildcard",
            Chip::FreeHit => "Free Hit",
            Chip::BenchBoost => "Bench Boost",
            Chip::TripleCaptain => "Triple Captain",
        }
    }

    pub fn unlimited_transfers(self) -> bool {
        matches!(self, Chip::Wildcard | Chip::FreeHit)
    }
}

impl std::fmt::Display for Chip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub out_id: u32,
    pub in_id: u32,
    pub created_ms: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameweekPlan {
    pub transfers: Vec<Transfer>,
    // Both computed by the ledger recompute; never edited directly.
    pub free_transfers: u32,
    pub points_hit: i32,
    #[serde(default)]
    pub chip: Option<Chip>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SnapshotPick {
    pub player_id: u32,
    pub position: Position,
    // Acquisition price in tenths at the time the snapshot was taken.
    pub cost: i32,
}

/// Immutable squad/budget state captured when the plan was created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquadSnapshot {
    pub picks: Vec<SnapshotPick>,
    pub bank: i32,
    pub value: i32,
}

impl SquadSnapshot {
    pub fn new(picks: Vec<SnapshotPick>, bank: i32) -> Self {
        let value = picks.iter().map(|p| p.cost).sum();
        Self { picks, bank, value }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub created_ms: i64,
    pub modified_ms: i64,
    pub start_gw: u32,
    pub horizon: u32,
    // Keyed exactly [start_gw, start_gw + horizon - 1]; no gaps.
    pub gameweeks: BTreeMap<u32, GameweekPlan>,
    pub snapshot: SquadSnapshot,
}

impl Plan {
    /// Build a plan covering `horizon` gameweeks (clamped to 3..=8) from
    /// `start_gw`, seeding every gameweek and running the ledger recompute
    /// so free-transfer counts are coherent from the start.
    pub fn new(name: &str, start_gw: u32, horizon: u32, snapshot: SquadSnapshot) -> Self {
        let horizon = horizon.clamp(MIN_HORIZON, MAX_HORIZON);
        let now = now_ms();
        let mut gameweeks = BTreeMap::new();
        for gw in start_gw..start_gw + horizon {
            gameweeks.insert(gw, GameweekPlan::default());
        }
        let mut plan = Self {
            id: format!("plan-{now}"),
            name: name.to_string(),
            created_ms: now,
            modified_ms: now,
            start_gw,
            horizon,
            gameweeks,
            snapshot,
        };
        ledger::recalculate_transfer_costs(&mut plan);
        plan
    }

    pub fn last_gw(&self) -> u32 {
        self.start_gw + self.horizon - 1
    }

    pub fn contains_gameweek(&self, gw: u32) -> bool {
        self.gameweeks.contains_key(&gw)
    }

    pub fn gameweek(&self, gw: u32) -> Option<&GameweekPlan> {
        self.gameweeks.get(&gw)
    }

    /// Total point-hit across the whole horizon (non-positive).
    pub fn total_hit(&self) -> i32 {
        self.gameweeks.values().map(|g| g.points_hit).sum()
    }

    pub fn transfer_count(&self) -> usize {
        self.gameweeks.values().map(|g| g.transfers.len()).sum()
    }

    pub fn touch(&mut self) {
        self.modified_ms = now_ms();
    }
}

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
