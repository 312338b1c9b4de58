use crate::models::signal::Signal;
use serde::{Deserialize, Serialize};

/// A scored, prioritized candidate trade derived from a [`Signal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingOpportunity {
    pub symbol: String,
    pub signal: Signal,
    pub confidence: f64,
    /// Percent.
    pub expected_return: f64,
    pub risk_score: f64,
    pub priority: f64,
    pub reason: String,
    pub timeframe: String,
}
