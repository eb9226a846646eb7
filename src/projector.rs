use crate::catalog::{Catalog, Position};
use crate::plan::Plan;

#[derive(Debug, Clone, Copy)]
pub struct ProjectedPick {
    pub player_id: u32,
    pub position: Position,
    // Acquisition price: snapshot price for original picks, current catalog
    // price for players brought in by a planned transfer.
    pub cost: i32,
}

/// Squad/budget state after replaying a plan's transfers up to a gameweek.
/// A value object: recomputed on demand, never shared or cached.
#[derive(Debug, Clone)]
pub struct Projection {
    pub picks: Vec<ProjectedPick>,
    pub bank: i32,
    pub value: i32,
    // Catalog ids that could not be resolved while replaying. Stale plan
    // data lands here instead of disappearing silently.
    pub warnings: Vec<String>,
}

impl Projection {
    pub fn contains(&self, player_id: u32) -> bool {
        self.picks.iter().any(|p| p.player_id == player_id)
    }
}

/// Replay all transfers from the plan's start gameweek through `target_gw`
/// (inclusive, in stored order) over the snapshot. `start_gw - 1` is accepted
/// and means "snapshot only". Pure: the plan is never mutated.
pub fn project(catalog: &Catalog, plan: &Plan, target_gw: u32) -> Projection {
    let mut picks: Vec<ProjectedPick> = plan
        .snapshot
        .picks
        .iter()
        .map(|p| ProjectedPick {
            player_id: p.player_id,
            position: p.position,
            cost: p.cost,
        })
        .collect();
    let mut bank = plan.snapshot.bank;
    let mut warnings = Vec::new();

    for (&gw, gw_plan) in &plan.gameweeks {
        if gw > target_gw {
            break;
        }
        for transfer in &gw_plan.transfers {
            if let Some(idx) = picks.iter().position(|p| p.player_id == transfer.out_id) {
                picks.remove(idx);
            }
            match catalog.player(transfer.out_id) {
                Some(out) => bank += out.cost,
                None => warn_missing(&mut warnings, transfer.out_id, gw),
            }
            match catalog.player(transfer.in_id) {
                Some(inn) => {
                    bank -= inn.cost;
                    picks.push(ProjectedPick {
                        player_id: inn.id,
                        position: inn.position,
                        cost: inn.cost,
                    });
                }
                None => warn_missing(&mut warnings, transfer.in_id, gw),
            }
        }
    }

    let mut value = 0;
    for pick in &picks {
        match catalog.player(pick.player_id) {
            Some(p) => value += p.cost,
            None => {
                // Price the pick at acquisition cost so totals stay usable.
                value += pick.cost;
                let msg = format!(
                    "player {} missing from catalog; using acquisition price",
                    pick.player_id
                );
                if !warnings.contains(&msg) {
                    warnings.push(msg);
                }
            }
        }
    }

    Projection {
        picks,
        bank,
        value,
        warnings,
    }
}

fn warn_missing(warnings: &mut Vec<String>, player_id: u32, gw: u32) {
    let msg = format!("player {player_id} missing from catalog in gameweek {gw}; bank adjustment skipped");
    log::warn!("{msg}");
    warnings.push(msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogPlayer, Position};
    use crate::plan::{Plan, SnapshotPick, SquadSnapshot, Transfer};

    fn player(id: u32, cost: i32) -> CatalogPlayer {
        CatalogPlayer {
            id,
            name: format!("P{id}"),
            position: Position::Midfielder,
            club_id: id,
            cost,
            form: 0.0,
            total_points: 0,
            minutes: 0,
            transfers_in: 0,
            transfers_out: 0,
            status: Default::default(),
            news: String::new(),
        }
    }

    fn plan_with_swap(out_id: u32, in_id: u32) -> Plan {
        let snapshot = SquadSnapshot::new(
            vec![SnapshotPick {
                player_id: out_id,
                position: Position::Midfielder,
                cost: 50,
            }],
            0,
        );
        let mut plan = Plan::new("p", 1, 3, snapshot);
        plan.gameweeks.get_mut(&1).unwrap().transfers.push(Transfer {
            out_id,
            in_id,
            created_ms: 0,
        });
        plan
    }

    #[test]
    fn swap_moves_money_at_current_prices() {
        let catalog = Catalog::new(vec![player(1, 55), player(2, 48)], Vec::new());
        let plan = plan_with_swap(1, 2);

        let before = project(&catalog, &plan, 0);
        assert_eq!(before.bank, 0);
        assert!(before.contains(1));

        let after = project(&catalog, &plan, 1);
        // Credited 55 (current price, not the 50 acquisition price), debited 48.
        assert_eq!(after.bank, 7);
        assert!(!after.contains(1));
        assert!(after.contains(2));
        assert_eq!(after.value, 48);
        assert!(after.warnings.is_empty());
    }

    #[test]
    fn missing_player_is_reported_not_silent() {
        let catalog = Catalog::new(vec![player(2, 48)], Vec::new());
        let plan = plan_with_swap(1, 2);

        let proj = project(&catalog, &plan, 1);
        // Out side unresolvable: no credit, but the pick is still removed.
        assert_eq!(proj.bank, -48);
        assert!(!proj.contains(1));
        assert_eq!(proj.warnings.len(), 1);
        assert!(proj.warnings[0].contains("player 1"));
    }

    #[test]
    fn projection_is_idempotent() {
        let catalog = Catalog::new(vec![player(1, 55), player(2, 48)], Vec::new());
        let plan = plan_with_swap(1, 2);
        let a = project(&catalog, &plan, 1);
        let b = project(&catalog, &plan, 1);
        assert_eq!(a.bank, b.bank);
        assert_eq!(a.value, b.value);
        let ids_a: Vec<u32> = a.picks.iter().map(|p| p.player_id).collect();
        let ids_b: Vec<u32> = b.picks.iter().map(|p| p.player_id).collect();
        assert_eq!(ids_a, ids_b);
    }
}
