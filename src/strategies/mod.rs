//! Rule-based strategies evaluated against one indicator snapshot.
//!
//! Each strategy is a pure function `(Bar, IndicatorSet) -> Option<Candidate>`.
//! [`STRATEGIES`] fixes their evaluation order, and that order is the
//! tie-break: when two candidates share the highest confidence, the one
//! declared first wins.

pub mod breakout;
pub mod reversal;
pub mod trend;

use crate::models::{Bar, IndicatorSet, SignalDirection};
use serde::{Deserialize, Serialize};

/// Upper bound for any strategy or decision confidence.
pub const MAX_CONFIDENCE: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyId {
    RsiMacdReversal,
    BollingerMeanReversion,
    TripleIndicatorTrend,
    BollingerBreakout,
    MacdMomentum,
}

impl StrategyId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyId::RsiMacdReversal => "rsi_macd_reversal",
            StrategyId::BollingerMeanReversion => "bollinger_mean_reversion",
            StrategyId::TripleIndicatorTrend => "triple_indicator_trend",
            StrategyId::BollingerBreakout => "bollinger_breakout",
            StrategyId::MacdMomentum => "macd_momentum",
        }
    }
}

impl std::fmt::Display for StrategyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A strategy's vote before it becomes a [`crate::models::Signal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub direction: SignalDirection,
    pub confidence: f64,
}

impl Candidate {
    pub fn new(direction: SignalDirection, confidence: f64) -> Self {
        Self {
            direction,
            confidence: confidence.clamp(0.0, MAX_CONFIDENCE),
        }
    }
}

pub type StrategyFn = fn(&Bar, &IndicatorSet) -> Option<Candidate>;

pub struct StrategyDefinition {
    pub id: StrategyId,
    pub evaluate: StrategyFn,
}

pub const STRATEGIES: [StrategyDefinition; 5] = [
    StrategyDefinition {
        id: StrategyId::RsiMacdReversal,
        evaluate: reversal::rsi_macd_reversal,
    },
    StrategyDefinition {
        id: StrategyId::BollingerMeanReversion,
        evaluate: reversal::bollinger_mean_reversion,
    },
    StrategyDefinition {
        id: StrategyId::TripleIndicatorTrend,
        evaluate: trend::triple_indicator_trend,
    },
    StrategyDefinition {
        id: StrategyId::BollingerBreakout,
        evaluate: breakout::bollinger_breakout,
    },
    StrategyDefinition {
        id: StrategyId::MacdMomentum,
        evaluate: trend::macd_momentum,
    },
];

/// Every candidate that fired, in declaration order.
pub fn evaluate_all(bar: &Bar, indicators: &IndicatorSet) -> Vec<(StrategyId, Candidate)> {
    STRATEGIES
        .iter()
        .filter_map(|strategy| {
            (strategy.evaluate)(bar, indicators).map(|candidate| (strategy.id, candidate))
        })
        .collect()
}

/// Highest-confidence candidate. Only a strictly greater confidence replaces
/// the current best, so ties go to the earlier strategy.
pub fn select_best(candidates: &[(StrategyId, Candidate)]) -> Option<(StrategyId, Candidate)> {
    let mut best: Option<(StrategyId, Candidate)> = None;
    for &(id, candidate) in candidates {
        match best {
            Some((_, current)) if candidate.confidence <= current.confidence => {}
            _ => best = Some((id, candidate)),
        }
    }
    best
}
