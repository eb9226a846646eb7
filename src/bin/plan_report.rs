use std::fs;
use std::path::PathBuf;

use fpl_planner::catalog::{Catalog, CatalogPlayer, Fixture};
use fpl_planner::{projector, store, validator};

#[derive(Debug, serde::Deserialize)]
struct CatalogInput {
    players: Vec<CatalogPlayer>,
    #[serde(default)]
    fixtures: Vec<Fixture>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let catalog_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("catalog.json"));

    let raw = fs::read_to_string(&catalog_path)?;
    let input: CatalogInput = serde_json::from_str(&raw)?;
    let catalog = Catalog::new(input.players, input.fixtures);

    let plans = match std::env::args().nth(2).map(PathBuf::from) {
        Some(path) => store::load_from(&path),
        None => store::load(),
    };
    if plans.is_empty() {
        println!("no saved plans");
        return Ok(());
    }

    for plan in &plans {
        println!(
            "{} ({}) GW{}-{} transfers={} total_hit={}",
            plan.name,
            plan.id,
            plan.start_gw,
            plan.last_gw(),
            plan.transfer_count(),
            plan.total_hit()
        );
        for (&gw, gw_plan) in &plan.gameweeks {
            let projection = projector::project(&catalog, plan, gw);
            let report = validator::validate(&catalog, plan, gw);
            let chip = gw_plan
                .chip
                .map(|c| c.label().to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  GW{gw}: transfers={} free={} hit={} chip={} bank={:.1} value={:.1} {}",
                gw_plan.transfers.len(),
                gw_plan.free_transfers,
                gw_plan.points_hit,
                chip,
                f64::from(projection.bank) / 10.0,
                f64::from(projection.value) / 10.0,
                if report.valid { "ok" } else { "INVALID" }
            );
            for err in &report.errors {
                println!("    error: {err}");
            }
            for warn in &report.warnings {
                println!("    warn: {warn}");
            }
        }
    }
    Ok(())
}
