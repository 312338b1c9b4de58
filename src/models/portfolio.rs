use serde::{Deserialize, Serialize};

/// A live holding as reported by the position source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    /// Signed size; negative for shorts.
    pub size: f64,
    pub mark_price: f64,
}

impl Position {
    pub fn new(symbol: impl Into<String>, size: f64, mark_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            size,
            mark_price,
        }
    }

    pub fn notional(&self) -> f64 {
        (self.size * self.mark_price).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebalanceAction {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioBalanceAssessment {
    pub symbol: String,
    pub current_weight: f64,
    pub target_weight: f64,
    /// `current_weight - target_weight`
    pub deviation: f64,
    pub needs_rebalancing: bool,
    pub action: RebalanceAction,
    pub urgency: Urgency,
}
