use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::plan::Plan;

const STORE_DIR: &str = "fpl_planner";
const STORE_FILE: &str = "plans.json";
const STORE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StoreFile {
    version: u32,
    plans: Vec<Plan>,
}

/// Load the whole plan collection. Missing, unreadable, corrupt or
/// wrong-version data all degrade to an empty list; a parse failure is
/// logged, never propagated.
pub fn load() -> Vec<Plan> {
    let Some(path) = store_path() else {
        return Vec::new();
    };
    load_from(&path)
}

pub fn load_from(path: &Path) -> Vec<Plan> {
    let Ok(raw) = fs::read_to_string(path) else {
        return Vec::new();
    };
    let store = match serde_json::from_str::<StoreFile>(&raw) {
        Ok(store) => store,
        Err(err) => {
            log::warn!("plan store at {} is corrupt, starting empty: {err}", path.display());
            return Vec::new();
        }
    };
    if store.version != STORE_VERSION {
        log::warn!(
            "plan store version {} (expected {STORE_VERSION}), starting empty",
            store.version
        );
        return Vec::new();
    }
    store.plans
}

/// Serialize the entire collection. Writes via a tmp file and rename so a
/// failed write never truncates the previous store; failures are logged and
/// the in-memory collection stays authoritative.
pub fn save(plans: &[Plan]) {
    let Some(path) = store_path() else {
        log::warn!("no cache directory available, plans not persisted");
        return;
    };
    save_to(&path, plans);
}

pub fn save_to(path: &Path, plans: &[Plan]) {
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }

    let store = StoreFile {
        version: STORE_VERSION,
        plans: plans.to_vec(),
    };
    let json = match serde_json::to_string(&store) {
        Ok(json) => json,
        Err(err) => {
            log::warn!("failed to serialize plans: {err}");
            return;
        }
    };
    let tmp = path.with_extension("json.tmp");
    match fs::write(&tmp, json) {
        Ok(()) => {
            if let Err(err) = fs::rename(&tmp, path) {
                log::warn!("failed to move plan store into place: {err}");
            }
        }
        Err(err) => log::warn!("failed to write plan store: {err}"),
    }
}

/// Drop one plan by id and rewrite the collection.
pub fn delete(plan_id: &str) {
    let Some(path) = store_path() else {
        return;
    };
    delete_from(&path, plan_id);
}

pub fn delete_from(path: &Path, plan_id: &str) {
    let mut plans = load_from(path);
    let before = plans.len();
    plans.retain(|p| p.id != plan_id);
    if plans.len() != before {
        save_to(path, &plans);
    }
}

pub fn store_path() -> Option<PathBuf> {
    // Prefer XDG cache.
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(STORE_DIR).join(STORE_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(STORE_DIR)
            .join(STORE_FILE),
    )
}
