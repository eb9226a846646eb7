use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use fpl_planner::catalog::{Catalog, CatalogPlayer, Fixture, Position};
use fpl_planner::ledger::recalculate_transfer_costs;
use fpl_planner::plan::{Plan, SnapshotPick, SquadSnapshot, Transfer};
use fpl_planner::suggest::{suggest, SuggestionWeights};
use fpl_planner::{projector, validator};

fn position_for(i: u32) -> Position {
    match i % 4 {
        0 => Position::Goalkeeper,
        1 => Position::Defender,
        2 => Position::Midfielder,
        _ => Position::Forward,
    }
}

fn season_catalog() -> Catalog {
    let players = (1..=600u32)
        .map(|i| CatalogPlayer {
            id: i,
            name: format!("Player {i}"),
            position: position_for(i),
            club_id: i % 20,
            cost: 40 + (i % 90) as i32,
            form: (i % 10) as f64,
            total_points: (i % 150) as i32,
            minutes: (i % 34) * 90,
            transfers_in: i * 100,
            transfers_out: i * 80,
            status: Default::default(),
            news: String::new(),
        })
        .collect();
    let fixtures = (1..=38u32)
        .flat_map(|gw| {
            (0..10u32).map(move |m| Fixture {
                gameweek: gw,
                home_id: m * 2,
                away_id: m * 2 + 1,
                home_difficulty: 1 + ((gw + m) % 5) as u8,
                away_difficulty: 1 + ((gw + m + 2) % 5) as u8,
            })
        })
        .collect();
    Catalog::new(players, fixtures)
}

fn sample_plan(catalog: &Catalog) -> Plan {
    // 2 GK / 5 DEF / 5 MID / 3 FWD drawn from the generated catalog.
    let mut picks = Vec::new();
    let mut want = [
        (Position::Goalkeeper, 2usize),
        (Position::Defender, 5),
        (Position::Midfielder, 5),
        (Position::Forward, 3),
    ];
    let mut players: Vec<_> = catalog.players().collect();
    players.sort_by_key(|p| p.id);
    for p in players {
        for slot in want.iter_mut() {
            if slot.0 == p.position && slot.1 > 0 {
                picks.push(SnapshotPick {
                    player_id: p.id,
                    position: p.position,
                    cost: p.cost,
                });
                slot.1 -= 1;
                break;
            }
        }
        if picks.len() == 15 {
            break;
        }
    }
    let mut plan = Plan::new("bench", 10, 6, SquadSnapshot::new(picks, 30));
    for (i, gw) in (10..14u32).enumerate() {
        plan.gameweeks.get_mut(&gw).unwrap().transfers.push(Transfer {
            out_id: plan.snapshot.picks[i].player_id,
            in_id: 500 + i as u32,
            created_ms: 0,
        });
    }
    recalculate_transfer_costs(&mut plan);
    plan
}

fn bench_project(c: &mut Criterion) {
    let catalog = season_catalog();
    let plan = sample_plan(&catalog);
    c.bench_function("project_six_gameweeks", |b| {
        b.iter(|| {
            let projection = projector::project(black_box(&catalog), black_box(&plan), 15);
            black_box(projection.bank);
        })
    });
}

fn bench_recalculate(c: &mut Criterion) {
    let catalog = season_catalog();
    let plan = sample_plan(&catalog);
    c.bench_function("recalculate_transfer_costs", |b| {
        b.iter(|| {
            let mut p = plan.clone();
            recalculate_transfer_costs(black_box(&mut p));
            black_box(p.total_hit());
        })
    });
}

fn bench_validate(c: &mut Criterion) {
    let catalog = season_catalog();
    let plan = sample_plan(&catalog);
    c.bench_function("validate_gameweek", |b| {
        b.iter(|| {
            let report = validator::validate(black_box(&catalog), black_box(&plan), 13);
            black_box(report.valid);
        })
    });
}

fn bench_suggest(c: &mut Criterion) {
    let catalog = season_catalog();
    let plan = sample_plan(&catalog);
    let weights = SuggestionWeights::defaults();
    c.bench_function("suggest_over_600_players", |b| {
        b.iter(|| {
            let got = suggest(black_box(&catalog), black_box(&plan), 12, 10, &weights);
            black_box(got.len());
        })
    });
}

criterion_group!(
    benches,
    bench_project,
    bench_recalculate,
    bench_validate,
    bench_suggest
);
criterion_main!(benches);
