use crate::catalog::Catalog;
use crate::error::TransferError;
use crate::plan::{now_ms, Plan, Transfer};
use crate::projector::project;
use crate::validator;

// Points charged per transfer beyond the free allotment.
pub const HIT_COST: i32 = 4;
// Unused free transfers bank up to this many.
pub const MAX_BANKED_FREE: u32 = 2;

/// Append a transfer to one gameweek of a plan. Checks run in a fixed order
/// and each failure is a distinct reason; on any failure the input plan is
/// returned untouched to the caller (nothing is partially applied). On
/// success the returned plan has been fully recomputed and validated.
pub fn add_transfer(
    catalog: &Catalog,
    plan: &Plan,
    gameweek: u32,
    out_id: u32,
    in_id: u32,
) -> Result<Plan, TransferError> {
    let Some(gw_plan) = plan.gameweek(gameweek) else {
        return Err(TransferError::UnknownGameweek(gameweek));
    };
    if gw_plan.transfers.iter().any(|t| t.out_id == out_id) {
        return Err(TransferError::DuplicateOut {
            player: out_id,
            gameweek,
        });
    }
    if gw_plan.transfers.iter().any(|t| t.in_id == in_id) {
        return Err(TransferError::DuplicateIn {
            player: in_id,
            gameweek,
        });
    }

    // The player must be there before this gameweek's own transfers run.
    let before = project(catalog, plan, gameweek.saturating_sub(1));
    if !before.contains(out_id) {
        return Err(TransferError::NotInSquad {
            player: out_id,
            gameweek,
        });
    }

    let Some(out_player) = catalog.player(out_id) else {
        return Err(TransferError::UnknownPlayer(out_id));
    };
    let Some(in_player) = catalog.player(in_id) else {
        return Err(TransferError::UnknownPlayer(in_id));
    };

    let post_bank = before.bank + out_player.cost - in_player.cost;
    if post_bank < 0 {
        return Err(TransferError::InsufficientFunds {
            shortfall: -post_bank,
        });
    }
    if out_player.position != in_player.position {
        return Err(TransferError::PositionMismatch {
            out_pos: out_player.position,
            in_pos: in_player.position,
        });
    }

    let mut updated = plan.clone();
    updated
        .gameweeks
        .get_mut(&gameweek)
        .expect("gameweek checked above")
        .transfers
        .push(Transfer {
            out_id,
            in_id,
            created_ms: now_ms(),
        });
    recalculate_transfer_costs(&mut updated);

    let report = validator::validate(catalog, &updated, gameweek);
    if let Some(first) = report.errors.first() {
        return Err(TransferError::InvalidSquad(first.clone()));
    }
    Ok(updated)
}

/// Remove a transfer by its position in the gameweek's list. Only the ledger
/// is recomputed; removal reverts toward the snapshot, which was valid when
/// the plan was created, so no re-validation runs.
pub fn remove_transfer(
    plan: &Plan,
    gameweek: u32,
    index: usize,
) -> Result<Plan, TransferError> {
    let Some(gw_plan) = plan.gameweek(gameweek) else {
        return Err(TransferError::UnknownGameweek(gameweek));
    };
    if index >= gw_plan.transfers.len() {
        return Err(TransferError::IndexOutOfRange { gameweek, index });
    }

    let mut updated = plan.clone();
    updated
        .gameweeks
        .get_mut(&gameweek)
        .expect("gameweek checked above")
        .transfers
        .remove(index);
    recalculate_transfer_costs(&mut updated);
    Ok(updated)
}

/// Recompute free-transfer and point-hit state for every gameweek, walking
/// ascending with a running availability counter seeded at 1.
///
/// Rules, applied per gameweek:
/// - unlimited-transfer chip active: free = transfer count, hit = 0, and the
///   counter restarts at 1 for the next gameweek;
/// - otherwise free = the counter, hit = -4 per transfer beyond it, and the
///   next counter is min(2, counter + 1) when nothing was transferred
///   (one banked, capped) or back to 1 when anything was.
pub fn recalculate_transfer_costs(plan: &mut Plan) {
    let mut counter: u32 = 1;
    for gw_plan in plan.gameweeks.values_mut() {
        let made = gw_plan.transfers.len() as u32;
        let unlimited = gw_plan.chip.is_some_and(|c| c.unlimited_transfers());
        if unlimited {
            gw_plan.free_transfers = made;
            gw_plan.points_hit = 0;
            counter = 1;
            continue;
        }
        gw_plan.free_transfers = counter;
        let extra = made.saturating_sub(counter);
        gw_plan.points_hit = -(extra as i32) * HIT_COST;
        counter = if made == 0 {
            (counter + 1).min(MAX_BANKED_FREE)
        } else {
            1
        };
    }
}
