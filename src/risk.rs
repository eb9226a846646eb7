use crate::catalog::{Availability, CatalogPlayer};

// Doubtful at or below this chance is treated the same as ruled out
// when prioritising replacements.
const HIGH_RISK_CHANCE: u8 = 50;

// Net sales beyond this many transfers read as the crowd reacting to news.
const HEAVY_SELL_THRESHOLD: i64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone)]
pub struct RiskFlag {
    pub label: String,
    pub severity: Severity,
}

/// Availability risk flags for one player, most severe first.
pub fn assess(player: &CatalogPlayer) -> Vec<RiskFlag> {
    let mut flags = Vec::new();

    match player.status {
        Availability::Unavailable => {
            let label = if player.news.is_empty() {
                "Ruled out".to_string()
            } else {
                format!("Ruled out: {}", player.news)
            };
            flags.push(RiskFlag {
                label,
                severity: Severity::High,
            });
        }
        Availability::Doubtful { chance } => {
            let severity = if chance <= HIGH_RISK_CHANCE {
                Severity::High
            } else {
                Severity::Medium
            };
            let label = if player.news.is_empty() {
                format!("{chance}% chance of playing")
            } else {
                format!("{chance}% chance of playing: {}", player.news)
            };
            flags.push(RiskFlag { label, severity });
        }
        Availability::Available => {}
    }

    if player.net_momentum() <= -HEAVY_SELL_THRESHOLD {
        flags.push(RiskFlag {
            label: "Heavily sold this gameweek".to_string(),
            severity: Severity::Low,
        });
    }

    flags.sort_by(|a, b| b.severity.cmp(&a.severity));
    flags
}

pub fn has_high_risk(player: &CatalogPlayer) -> bool {
    assess(player)
        .iter()
        .any(|f| f.severity == Severity::High)
}
