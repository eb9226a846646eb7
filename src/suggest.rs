use std::cmp::Ordering;
use std::collections::HashSet;

use crate::catalog::{Availability, Catalog, CatalogPlayer};
use crate::plan::Plan;
use crate::projector::project;
use crate::risk;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    Risk,
    Fixture,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub priority: Priority,
    pub player_out: u32,
    pub player_in: u32,
    pub reason: String,
    pub score: f64,
}

/// Hand-tuned scoring knobs. All named and overridable; nothing in here is
/// load-bearing beyond ranking candidates consistently.
#[derive(Debug, Clone)]
pub struct SuggestionWeights {
    // Score components, each clipped to its cap (caps sum to 100).
    pub form_scale: f64,
    pub form_cap: f64,
    pub fixture_scale: f64,
    pub fixture_cap: f64,
    pub value_scale: f64,
    pub value_cap: f64,
    pub minutes_cap: f64,
    pub momentum_norm: f64,
    pub momentum_cap: f64,

    // Pass thresholds.
    pub fixture_window: u32,
    pub hard_fixture_threshold: f64,
    pub fixture_improvement: f64,
    pub value_gain_ratio: f64,
    pub form_gain: f64,
    pub candidates_per_player: usize,
}

impl SuggestionWeights {
    pub fn defaults() -> Self {
        Self {
            form_scale: 4.0,
            form_cap: 30.0,
            fixture_scale: 5.0,
            fixture_cap: 20.0,
            value_scale: 2.5,
            value_cap: 25.0,
            minutes_cap: 15.0,
            momentum_norm: 200_000.0,
            momentum_cap: 10.0,
            fixture_window: 5,
            hard_fixture_threshold: 3.5,
            fixture_improvement: 0.5,
            value_gain_ratio: 0.20,
            form_gain: 2.0,
            candidates_per_player: 3,
        }
    }
}

impl Default for SuggestionWeights {
    fn default() -> Self {
        Self::defaults()
    }
}

/// 0-100 desirability score for one player as of `gameweek`. Each component
/// contributes a non-negative, capped amount.
pub fn score_player(
    catalog: &Catalog,
    player: &CatalogPlayer,
    gameweek: u32,
    weights: &SuggestionWeights,
) -> f64 {
    let form = (player.form * weights.form_scale).clamp(0.0, weights.form_cap);

    // Missing fixture data reads as neutral difficulty, not as easy or hard.
    let difficulty = catalog
        .difficulty_avg(player.club_id, gameweek, weights.fixture_window)
        .unwrap_or(3.0);
    let fixture = ((5.0 - difficulty) * weights.fixture_scale).clamp(0.0, weights.fixture_cap);

    let value = (player.points_per_cost() * weights.value_scale).clamp(0.0, weights.value_cap);

    let played_gws = gameweek.saturating_sub(1).max(1);
    let minutes_fraction = (f64::from(player.minutes) / (90.0 * f64::from(played_gws))).min(1.0);
    let minutes = minutes_fraction * weights.minutes_cap;

    let momentum = (player.net_momentum() as f64 / weights.momentum_norm
        * weights.momentum_cap)
        .clamp(0.0, weights.momentum_cap);

    form + fixture + value + minutes + momentum
}

/// Heuristic replacement transfers for a plan at one gameweek: a risk pass,
/// a fixture pass and a value pass over the squad projected before that
/// gameweek, merged, ranked and truncated to `max_results`.
pub fn suggest(
    catalog: &Catalog,
    plan: &Plan,
    gameweek: u32,
    max_results: usize,
    weights: &SuggestionWeights,
) -> Vec<Suggestion> {
    let before = project(catalog, plan, gameweek.saturating_sub(1));
    let squad_ids: HashSet<u32> = before.picks.iter().map(|p| p.player_id).collect();

    let mut out = Vec::new();
    for pick in &before.picks {
        let Some(incumbent) = catalog.player(pick.player_id) else {
            continue;
        };
        let budget = incumbent.cost + before.bank;
        let candidates = replacement_candidates(catalog, incumbent, budget, &squad_ids, gameweek, weights);

        risk_pass(incumbent, &candidates, weights, &mut out);
        fixture_pass(catalog, incumbent, &candidates, gameweek, weights, &mut out);
        value_pass(incumbent, &candidates, weights, &mut out);
    }

    out.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal))
    });

    let mut seen = HashSet::new();
    out.retain(|s| seen.insert((s.player_out, s.player_in)));
    out.truncate(max_results);
    out
}

/// Same-position, affordable, non-squad, fit replacements, best score first
/// (player id breaks ties so results are deterministic).
fn replacement_candidates<'a>(
    catalog: &'a Catalog,
    incumbent: &CatalogPlayer,
    budget: i32,
    squad_ids: &HashSet<u32>,
    gameweek: u32,
    weights: &SuggestionWeights,
) -> Vec<(&'a CatalogPlayer, f64)> {
    let mut candidates: Vec<(&CatalogPlayer, f64)> = catalog
        .players()
        .filter(|c| {
            c.id != incumbent.id
                && c.position == incumbent.position
                && !squad_ids.contains(&c.id)
                && c.cost <= budget
                && !matches!(c.status, Availability::Unavailable)
                && !risk::has_high_risk(c)
        })
        .map(|c| (c, score_player(catalog, c, gameweek, weights)))
        .collect();
    candidates.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.id.cmp(&b.0.id))
    });
    candidates
}

fn risk_pass(
    incumbent: &CatalogPlayer,
    candidates: &[(&CatalogPlayer, f64)],
    weights: &SuggestionWeights,
    out: &mut Vec<Suggestion>,
) {
    let flags = risk::assess(incumbent);
    if !flags.iter().any(|f| f.severity == risk::Severity::High) {
        return;
    }
    let labels: Vec<&str> = flags.iter().map(|f| f.label.as_str()).collect();
    let reason = format!("{} flagged: {}", incumbent.name, labels.join("; "));

    for (rank, (candidate, score)) in candidates
        .iter()
        .take(weights.candidates_per_player)
        .enumerate()
    {
        out.push(Suggestion {
            kind: SuggestionKind::Risk,
            priority: if rank == 0 {
                Priority::High
            } else {
                Priority::Medium
            },
            player_out: incumbent.id,
            player_in: candidate.id,
            reason: reason.clone(),
            score: *score,
        });
    }
}

fn fixture_pass(
    catalog: &Catalog,
    incumbent: &CatalogPlayer,
    candidates: &[(&CatalogPlayer, f64)],
    gameweek: u32,
    weights: &SuggestionWeights,
    out: &mut Vec<Suggestion>,
) {
    let Some(own_avg) = catalog.difficulty_avg(incumbent.club_id, gameweek, weights.fixture_window)
    else {
        return;
    };
    if own_avg < weights.hard_fixture_threshold {
        return;
    }

    let mut taken = 0;
    for (candidate, score) in candidates {
        if taken >= weights.candidates_per_player {
            break;
        }
        let Some(cand_avg) =
            catalog.difficulty_avg(candidate.club_id, gameweek, weights.fixture_window)
        else {
            continue;
        };
        if cand_avg > own_avg - weights.fixture_improvement {
            continue;
        }
        out.push(Suggestion {
            kind: SuggestionKind::Fixture,
            priority: Priority::Medium,
            player_out: incumbent.id,
            player_in: candidate.id,
            reason: format!(
                "{} faces {:.1} avg difficulty over {} GWs; {} at {:.1}",
                incumbent.name, own_avg, weights.fixture_window, candidate.name, cand_avg
            ),
            score: *score,
        });
        taken += 1;
    }
}

fn value_pass(
    incumbent: &CatalogPlayer,
    candidates: &[(&CatalogPlayer, f64)],
    weights: &SuggestionWeights,
    out: &mut Vec<Suggestion>,
) {
    let incumbent_ppc = incumbent.points_per_cost();
    for (candidate, score) in candidates {
        let better_value =
            candidate.points_per_cost() >= incumbent_ppc * (1.0 + weights.value_gain_ratio);
        let better_form = candidate.form >= incumbent.form + weights.form_gain;
        if !better_value && !better_form {
            continue;
        }
        let reason = if better_value {
            format!(
                "{} returns {:.1} pts/m vs {:.1} for {}",
                candidate.name,
                candidate.points_per_cost(),
                incumbent_ppc,
                incumbent.name
            )
        } else {
            format!(
                "{} form {:.1} vs {:.1} for {}",
                candidate.name, candidate.form, incumbent.form, incumbent.name
            )
        };
        out.push(Suggestion {
            kind: SuggestionKind::Value,
            priority: Priority::Low,
            player_out: incumbent.id,
            player_in: candidate.id,
            reason,
            score: *score,
        });
        // One value suggestion per incumbent; the list is best-first.
        break;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Fixture, Position};
    use crate::plan::{Plan, SnapshotPick, SquadSnapshot};

    fn player(id: u32, club: u32, cost: i32, form: f64, points: i32) -> CatalogPlayer {
        CatalogPlayer {
            id,
            name: format!("P{id}"),
            position: Position::Midfielder,
            club_id: club,
            cost,
            form,
            total_points: points,
            minutes: 900,
            transfers_in: 0,
            transfers_out: 0,
            status: Default::default(),
            news: String::new(),
        }
    }

    fn plan_with(picks: &[&CatalogPlayer], bank: i32) -> Plan {
        let snapshot = SquadSnapshot::new(
            picks
                .iter()
                .map(|p| SnapshotPick {
                    player_id: p.id,
                    position: p.position,
                    cost: p.cost,
                })
                .collect(),
            bank,
        );
        Plan::new("p", 2, 3, snapshot)
    }

    #[test]
    fn score_components_are_capped() {
        let weights = SuggestionWeights::defaults();
        let mut p = player(1, 1, 40, 50.0, 10_000);
        p.minutes = 90_000;
        p.transfers_in = 10_000_000;
        let catalog = Catalog::new(
            Vec::new(),
            vec![Fixture {
                gameweek: 2,
                home_id: 1,
                away_id: 2,
                home_difficulty: 1,
                away_difficulty: 5,
            }],
        );
        let score = score_player(&catalog, &p, 2, &weights);
        assert!(score <= 100.0, "score {score} exceeds 100");
    }

    #[test]
    fn risk_pass_flags_ruled_out_incumbent_first() {
        let mut hurt = player(1, 1, 60, 5.0, 80);
        hurt.status = Availability::Unavailable;
        hurt.news = "Hamstring".to_string();
        let good = player(2, 2, 55, 6.0, 90);
        let better = player(3, 3, 58, 7.0, 110);
        let catalog = Catalog::new(vec![hurt.clone(), good, better], Vec::new());
        let plan = plan_with(&[&hurt], 0);

        let got = suggest(&catalog, &plan, 2, 10, &SuggestionWeights::defaults());
        assert!(!got.is_empty());
        assert_eq!(got[0].priority, Priority::High);
        assert_eq!(got[0].kind, SuggestionKind::Risk);
        assert_eq!(got[0].player_out, 1);
        // Highest-scoring replacement ranks first.
        assert_eq!(got[0].player_in, 3);
        assert!(got[0].reason.contains("Hamstring"));
    }

    #[test]
    fn unaffordable_candidates_are_excluded() {
        let incumbent = player(1, 1, 50, 2.0, 30);
        let rich = player(2, 2, 120, 9.0, 200);
        let catalog = Catalog::new(vec![incumbent.clone(), rich], Vec::new());
        let plan = plan_with(&[&incumbent], 10);

        let got = suggest(&catalog, &plan, 2, 10, &SuggestionWeights::defaults());
        assert!(got.iter().all(|s| s.player_in != 2));
    }

    #[test]
    fn results_dedup_and_truncate() {
        let mut hurt = player(1, 1, 60, 1.0, 10);
        hurt.status = Availability::Unavailable;
        // High value gap too, so the same (out, in) pair emerges from two passes.
        let strong = player(2, 2, 55, 8.0, 150);
        let catalog = Catalog::new(vec![hurt.clone(), strong], Vec::new());
        let plan = plan_with(&[&hurt], 0);

        let got = suggest(&catalog, &plan, 2, 10, &SuggestionWeights::defaults());
        let pairs: Vec<(u32, u32)> = got.iter().map(|s| (s.player_out, s.player_in)).collect();
        let mut unique = pairs.clone();
        unique.dedup();
        assert_eq!(pairs, unique);
        // The surviving entry is the higher-priority risk one.
        assert_eq!(got[0].kind, SuggestionKind::Risk);

        let capped = suggest(&catalog, &plan, 2, 1, &SuggestionWeights::defaults());
        assert_eq!(capped.len(), 1);
    }
}
