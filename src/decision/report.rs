use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot returned by `AggressiveDecisionEngine::get_decision_metrics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionMetrics {
    /// Accepted opportunities per symbol since local midnight.
    pub daily_trade_counts: BTreeMap<String, u32>,
    pub total_daily_trades: u32,
    /// Recorded trades in the trailing 24 hours.
    pub recent_trades: usize,
    /// Executed share of `recent_trades`; 0 when there are none.
    pub success_rate: f64,
    pub portfolio_balance_score: f64,
    pub last_rebalance_notification: Option<DateTime<FixedOffset>>,
}
