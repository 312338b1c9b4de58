//! Order execution interface. Retries and exchange logging belong to the
//! implementation, not to the caller.

use crate::models::SignalDirection;
use crate::services::ServiceError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionIntent {
    pub symbol: String,
    pub direction: SignalDirection,
    pub size: f64,
    pub reference_price: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub symbol: String,
    pub filled_size: f64,
    pub fill_price: f64,
}

pub trait OrderExecutor {
    fn execute(&self, intent: &PositionIntent) -> Result<ExecutionReport, ServiceError>;
}

/// Fills every intent at its reference price and remembers it.
#[derive(Debug, Default)]
pub struct PaperExecutor {
    fills: Mutex<Vec<PositionIntent>>,
    failing: Mutex<HashSet<String>>,
}

impl PaperExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every intent for `symbol` fail.
    pub fn fail_symbol(&self, symbol: &str) {
        self.failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(symbol.to_string());
    }

    pub fn fills(&self) -> Vec<PositionIntent> {
        self.fills.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl OrderExecutor for PaperExecutor {
    fn execute(&self, intent: &PositionIntent) -> Result<ExecutionReport, ServiceError> {
        let failing = self.failing.lock().unwrap_or_else(|e| e.into_inner());
        if failing.contains(&intent.symbol) {
            return Err(format!("paper fill rejected for {}", intent.symbol).into());
        }
        drop(failing);

        self.fills
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(intent.clone());
        Ok(ExecutionReport {
            symbol: intent.symbol.clone(),
            filled_size: intent.size,
            fill_price: intent.reference_price,
        })
    }
}
