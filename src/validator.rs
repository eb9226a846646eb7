use std::collections::HashMap;

use crate::catalog::{Catalog, Position};
use crate::plan::Plan;
use crate::projector::project;

pub const SQUAD_SIZE: usize = 15;
pub const MAX_PER_CLUB: usize = 3;
// Budget ceiling in tenths (100.0m).
pub const BUDGET_CEILING: i32 = 1000;
// Bank below this (but non-negative) only warns.
pub const LOW_BANK_WARN: i32 = 5;

// (position, min, max) quota bands for a 15-player squad.
const POSITION_BANDS: [(Position, usize, usize); 4] = [
    (Position::Goalkeeper, 2, 2),
    (Position::Defender, 3, 5),
    (Position::Midfielder, 2, 5),
    (Position::Forward, 1, 3),
];

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Check the projected squad at `gameweek` against the composition and
/// budget rules. `valid` is true iff `errors` is empty; warnings never
/// affect validity.
pub fn validate(catalog: &Catalog, plan: &Plan, gameweek: u32) -> ValidationReport {
    let projection = project(catalog, plan, gameweek);
    let mut errors = Vec::new();
    let mut warnings = projection.warnings.clone();

    if projection.picks.len() != SQUAD_SIZE {
        errors.push(format!(
            "squad must have {SQUAD_SIZE} players, found {}",
            projection.picks.len()
        ));
    }

    let mut by_position: HashMap<Position, usize> = HashMap::new();
    let mut by_club: HashMap<u32, usize> = HashMap::new();
    for pick in &projection.picks {
        *by_position.entry(pick.position).or_default() += 1;
        if let Some(player) = catalog.player(pick.player_id) {
            *by_club.entry(player.club_id).or_default() += 1;
        }
    }

    for (position, min, max) in POSITION_BANDS {
        let count = by_position.get(&position).copied().unwrap_or(0);
        if count < min || count > max {
            errors.push(format!(
                "{} count {count} outside allowed {min}-{max}",
                position.label()
            ));
        }
    }

    for (club_id, count) in &by_club {
        if *count > MAX_PER_CLUB {
            errors.push(format!(
                "{count} players from club {club_id} (max {MAX_PER_CLUB})"
            ));
        }
    }

    if projection.value + projection.bank > BUDGET_CEILING {
        errors.push(format!(
            "total budget {} exceeds ceiling {BUDGET_CEILING}",
            projection.value + projection.bank
        ));
    }

    if projection.bank < 0 {
        errors.push(format!("bank is negative ({})", projection.bank));
    } else if projection.bank < LOW_BANK_WARN {
        warnings.push(format!("bank is nearly empty ({})", projection.bank));
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}
