//! Position and equity source interface.

use crate::models::Position;
use crate::risk::RiskState;
use crate::services::ServiceError;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub positions: Vec<Position>,
    pub equity: f64,
    #[serde(default)]
    pub risk: RiskState,
}

pub trait PortfolioSource {
    fn snapshot(&self) -> Result<PortfolioSnapshot, ServiceError>;
}

/// Returns whatever snapshot was last stored.
#[derive(Debug, Default)]
pub struct StaticPortfolioSource {
    snapshot: Mutex<PortfolioSnapshot>,
}

impl StaticPortfolioSource {
    pub fn new(snapshot: PortfolioSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
        }
    }

    pub fn set(&self, snapshot: PortfolioSnapshot) {
        *self.snapshot.lock().unwrap_or_else(|e| e.into_inner()) = snapshot;
    }
}

impl PortfolioSource for StaticPortfolioSource {
    fn snapshot(&self) -> Result<PortfolioSnapshot, ServiceError> {
        Ok(self.snapshot.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }
}
