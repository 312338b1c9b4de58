//! Mutable state owned by one decision engine instance.

use crate::models::SignalDirection;
use crate::strategies::StrategyId;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, VecDeque};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub symbol: String,
    pub strategy: StrategyId,
    pub direction: SignalDirection,
    pub confidence: f64,
    pub executed: bool,
    pub at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone)]
pub struct EngineState {
    pub(crate) daily_counts: HashMap<String, u32>,
    pub(crate) trade_history: VecDeque<TradeRecord>,
    pub(crate) history_capacity: usize,
    /// Rebuilt by every portfolio balance evaluation; empty until then.
    pub(crate) current_weights: HashMap<String, f64>,
    pub(crate) target_allocations: BTreeMap<String, f64>,
    pub(crate) last_reset: NaiveDate,
    pub(crate) last_rebalance_notification: Option<DateTime<FixedOffset>>,
}

impl EngineState {
    pub fn new(
        target_allocations: BTreeMap<String, f64>,
        history_capacity: usize,
        today: NaiveDate,
    ) -> Self {
        Self {
            daily_counts: HashMap::new(),
            trade_history: VecDeque::with_capacity(history_capacity),
            history_capacity: history_capacity.max(1),
            current_weights: HashMap::new(),
            target_allocations,
            last_reset: today,
            last_rebalance_notification: None,
        }
    }

    /// Clear the daily counters if `today` differs from the last reset date.
    pub fn reset_if_new_day(&mut self, today: NaiveDate) -> bool {
        if today == self.last_reset {
            return false;
        }
        self.daily_counts.clear();
        self.last_reset = today;
        true
    }

    pub fn daily_count(&self, symbol: &str) -> u32 {
        self.daily_counts.get(symbol).copied().unwrap_or(0)
    }

    pub fn increment_daily_count(&mut self, symbol: &str) -> u32 {
        let count = self.daily_counts.entry(symbol.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Mean of today's per-symbol counts over symbols traded today.
    pub fn average_daily_count(&self) -> f64 {
        if self.daily_counts.is_empty() {
            return 0.0;
        }
        let total: u32 = self.daily_counts.values().sum();
        total as f64 / self.daily_counts.len() as f64
    }

    /// Live minus target weight, when both are known.
    pub fn allocation_deviation(&self, symbol: &str) -> Option<f64> {
        let target = self.target_allocations.get(symbol)?;
        let current = self.current_weights.get(symbol)?;
        Some(current - target)
    }

    pub fn push_trade(&mut self, record: TradeRecord) {
        self.trade_history.push_back(record);
        while self.trade_history.len() > self.history_capacity {
            self.trade_history.pop_front();
        }
    }

    pub fn rebalance_notification_due(&self, now: DateTime<FixedOffset>, interval: Duration) -> bool {
        match self.last_rebalance_notification {
            Some(last) => now - last >= interval,
            None => true,
        }
    }
}
