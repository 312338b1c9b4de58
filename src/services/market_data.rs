//! Market data feed interface.

use crate::models::Bar;
use crate::services::ServiceError;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Supplies bars per `(symbol, timeframe)` in chronological order. Gaps are
/// passed through as-is; nothing downstream interpolates.
pub trait MarketDataProvider {
    /// The next bar for `symbol`, or `None` if nothing new arrived.
    fn latest_bar(&self, symbol: &str, timeframe: &str) -> Result<Option<Bar>, ServiceError>;
}

/// Replays queued bars one per call.
#[derive(Debug, Default)]
pub struct ReplayMarketDataProvider {
    queues: Mutex<HashMap<(String, String), VecDeque<Bar>>>,
}

impl ReplayMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, symbol: &str, timeframe: &str, bar: Bar) {
        let mut queues = self.queues.lock().unwrap_or_else(|e| e.into_inner());
        queues
            .entry((symbol.to_string(), timeframe.to_string()))
            .or_default()
            .push_back(bar);
    }

    pub fn extend(&self, symbol: &str, timeframe: &str, bars: impl IntoIterator<Item = Bar>) {
        for bar in bars {
            self.push(symbol, timeframe, bar);
        }
    }

    pub fn remaining(&self, symbol: &str, timeframe: &str) -> usize {
        let queues = self.queues.lock().unwrap_or_else(|e| e.into_inner());
        queues
            .get(&(symbol.to_string(), timeframe.to_string()))
            .map_or(0, VecDeque::len)
    }
}

impl MarketDataProvider for ReplayMarketDataProvider {
    fn latest_bar(&self, symbol: &str, timeframe: &str) -> Result<Option<Bar>, ServiceError> {
        let mut queues = self.queues.lock().unwrap_or_else(|e| e.into_inner());
        Ok(queues
            .get_mut(&(symbol.to_string(), timeframe.to_string()))
            .and_then(VecDeque::pop_front))
    }
}
