use crate::error::ChipError;
use crate::ledger::recalculate_transfer_costs;
use crate::plan::{Chip, Plan};

/// Assign (or clear, with `None`) a chip on one gameweek of a plan.
///
/// A chip already spent on the real team this season (`used_chips`) cannot be
/// planned again, and a chip may appear at most once per plan. Changing chip
/// state reruns the ledger recompute, since an unlimited-transfer chip alters
/// the free-transfer semantics of its week and the counter carried forward.
pub fn set_chip(
    plan: &Plan,
    gameweek: u32,
    chip: Option<Chip>,
    used_chips: &[Chip],
) -> Result<Plan, ChipError> {
    if !plan.contains_gameweek(gameweek) {
        return Err(ChipError::UnknownGameweek(gameweek));
    }
    if let Some(chip) = chip {
        if used_chips.contains(&chip) {
            return Err(ChipError::AlreadyUsed(chip));
        }
        if let Some((&other_gw, _)) = plan
            .gameweeks
            .iter()
            .find(|&(&gw, g)| gw != gameweek && g.chip == Some(chip))
        {
            return Err(ChipError::AlreadyPlanned {
                chip,
                gameweek: other_gw,
            });
        }
    }

    let mut updated = plan.clone();
    if let Some(gw_plan) = updated.gameweeks.get_mut(&gameweek) {
        gw_plan.chip = chip;
    }
    recalculate_transfer_costs(&mut updated);
    Ok(updated)
}
