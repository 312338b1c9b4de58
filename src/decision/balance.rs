//! Allocation drift against target weights.

use crate::models::{PortfolioBalanceAssessment, Position, RebalanceAction, Urgency};
use std::collections::{BTreeMap, HashMap};

pub const HIGH_DEVIATION: f64 = 0.10;
pub const MEDIUM_DEVIATION: f64 = 0.05;
pub const LOW_DEVIATION: f64 = 0.02;

/// `|size × mark| / equity` per symbol, summed across positions, with every
/// target symbol present (0 when not held). Callers guarantee `equity > 0`.
pub fn current_weights(
    positions: &[Position],
    equity: f64,
    targets: &BTreeMap<String, f64>,
) -> HashMap<String, f64> {
    let mut weights: HashMap<String, f64> = targets.keys().map(|s| (s.clone(), 0.0)).collect();
    for position in positions {
        *weights.entry(position.symbol.clone()).or_insert(0.0) += position.notional() / equity;
    }
    weights
}

/// `None` when the deviation is within tolerance.
pub fn classify_urgency(deviation: f64) -> Option<Urgency> {
    let magnitude = deviation.abs();
    if magnitude > HIGH_DEVIATION {
        Some(Urgency::High)
    } else if magnitude > MEDIUM_DEVIATION {
        Some(Urgency::Medium)
    } else if magnitude > LOW_DEVIATION {
        Some(Urgency::Low)
    } else {
        None
    }
}

pub fn assess(symbol: &str, current_weight: f64, target_weight: f64) -> PortfolioBalanceAssessment {
    let deviation = current_weight - target_weight;
    let urgency = classify_urgency(deviation);
    let action = match urgency {
        Some(_) if deviation > 0.0 => RebalanceAction::Sell,
        Some(_) => RebalanceAction::Buy,
        None => RebalanceAction::Hold,
    };

    PortfolioBalanceAssessment {
        symbol: symbol.to_string(),
        current_weight,
        target_weight,
        deviation,
        needs_rebalancing: urgency.is_some(),
        action,
        urgency: urgency.unwrap_or(Urgency::Low),
    }
}

/// `max(0, 1 − 10 × mean |deviation|)`; 1 when there are no targets.
pub fn balance_score(weights: &HashMap<String, f64>, targets: &BTreeMap<String, f64>) -> f64 {
    if targets.is_empty() {
        return 1.0;
    }
    let total: f64 = targets
        .iter()
        .map(|(symbol, target)| (weights.get(symbol).copied().unwrap_or(0.0) - target).abs())
        .sum();
    let average = total / targets.len() as f64;
    (1.0 - average * 10.0).max(0.0)
}
