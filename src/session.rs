use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::chips::set_chip;
use crate::error::SessionError;
use crate::ledger::{add_transfer, remove_transfer};
use crate::plan::{Chip, Plan, SnapshotPick, SquadSnapshot};
use crate::store;

/// Owns everything the planning engine needs from the outside world: the
/// season catalog, the current gameweek, chips already spent on the real
/// team, and the authoritative plan collection. Every mutating method is one
/// atomic unit: run the pure operation, stamp `modified`, swap the plan into
/// the collection, persist. A persistence failure is logged inside the store
/// and never touches the in-memory collection.
pub struct PlannerSession {
    catalog: Catalog,
    pub current_gw: u32,
    used_chips: Vec<Chip>,
    plans: Vec<Plan>,
    store_path: Option<PathBuf>,
}

impl PlannerSession {
    pub fn new(catalog: Catalog, current_gw: u32, used_chips: Vec<Chip>) -> Self {
        Self {
            catalog,
            current_gw,
            used_chips,
            plans: Vec::new(),
            store_path: None,
        }
    }

    /// Use an explicit store file instead of the default cache location.
    pub fn with_store_path(mut self, path: PathBuf) -> Self {
        self.store_path = Some(path);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn used_chips(&self) -> &[Chip] {
        &self.used_chips
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn plan(&self, id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == id)
    }

    /// Replace the in-memory collection with whatever the store holds.
    pub fn load_saved_plans(&mut self) {
        self.plans = match &self.store_path {
            Some(path) => store::load_from(path),
            None => store::load(),
        };
    }

    /// Snapshot a live squad into a new plan starting at the current
    /// gameweek. Returns the new plan's id.
    pub fn create_plan(&mut self, name: &str, horizon: u32, picks: Vec<SnapshotPick>, bank: i32) -> String {
        let snapshot = SquadSnapshot::new(picks, bank);
        let mut plan = Plan::new(name, self.current_gw, horizon, snapshot);
        // Plan ids derive from the clock; disambiguate rapid creation.
        let mut n = 1;
        let base = plan.id.clone();
        while self.plans.iter().any(|p| p.id == plan.id) {
            plan.id = format!("{base}-{n}");
            n += 1;
        }
        let id = plan.id.clone();
        self.plans.push(plan);
        self.persist();
        id
    }

    pub fn delete_plan(&mut self, id: &str) {
        let before = self.plans.len();
        self.plans.retain(|p| p.id != id);
        if self.plans.len() != before {
            self.persist();
        }
    }

    pub fn add_transfer(
        &mut self,
        plan_id: &str,
        gameweek: u32,
        out_id: u32,
        in_id: u32,
    ) -> Result<&Plan, SessionError> {
        let plan = self.require_plan(plan_id)?;
        let updated = add_transfer(&self.catalog, plan, gameweek, out_id, in_id)?;
        Ok(self.commit(plan_id, updated))
    }

    pub fn remove_transfer(
        &mut self,
        plan_id: &str,
        gameweek: u32,
        index: usize,
    ) -> Result<&Plan, SessionError> {
        let plan = self.require_plan(plan_id)?;
        let updated = remove_transfer(plan, gameweek, index)?;
        Ok(self.commit(plan_id, updated))
    }

    pub fn set_chip(
        &mut self,
        plan_id: &str,
        gameweek: u32,
        chip: Option<Chip>,
    ) -> Result<&Plan, SessionError> {
        let plan = self.require_plan(plan_id)?;
        let updated = set_chip(plan, gameweek, chip, &self.used_chips)?;
        Ok(self.commit(plan_id, updated))
    }

    fn require_plan(&self, id: &str) -> Result<&Plan, SessionError> {
        self.plan(id)
            .ok_or_else(|| SessionError::PlanNotFound(id.to_string()))
    }

    fn commit(&mut self, plan_id: &str, mut updated: Plan) -> &Plan {
        updated.touch();
        let slot = self
            .plans
            .iter_mut()
            .find(|p| p.id == plan_id)
            .expect("plan existence checked before commit");
        *slot = updated;
        self.persist();
        self.plans
            .iter()
            .find(|p| p.id == plan_id)
            .expect("plan was just committed")
    }

    fn persist(&self) {
        match &self.store_path {
            Some(path) => store::save_to(path, &self.plans),
            None => store::save(&self.plans),
        }
    }
}
