//! Global risk caps applied by the orchestrator before execution.
//!
//! The engines never read these; they only bound how a tick sizes and
//! gates the opportunities it forwards.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Fraction of equity committed per trade at full confidence.
    pub max_equity_risk: f64,
    /// Fraction of equity that may be lost in one day before trading halts.
    pub max_daily_loss: f64,
    pub max_consecutive_losses: u32,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_equity_risk: 0.02,
            max_daily_loss: 0.05,
            max_consecutive_losses: 5,
        }
    }
}

/// Running P&L state reported alongside positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskState {
    pub daily_pnl: f64,
    pub consecutive_losses: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiskGate {
    Open,
    DailyLossExceeded { loss: f64, limit: f64 },
    LosingStreak { losses: u32, limit: u32 },
}

impl RiskLimits {
    pub fn gate(&self, state: &RiskState, equity: f64) -> RiskGate {
        let limit = equity * self.max_daily_loss;
        if state.daily_pnl < 0.0 && -state.daily_pnl >= limit {
            return RiskGate::DailyLossExceeded {
                loss: -state.daily_pnl,
                limit,
            };
        }
        if state.consecutive_losses >= self.max_consecutive_losses {
            return RiskGate::LosingStreak {
                losses: state.consecutive_losses,
                limit: self.max_consecutive_losses,
            };
        }
        RiskGate::Open
    }

    /// Units to trade: risked notional scaled by confidence, divided by price.
    pub fn position_size(&self, equity: f64, confidence: f64, price: f64) -> f64 {
        if equity <= 0.0 || price <= 0.0 {
            return 0.0;
        }
        equity * self.max_equity_risk * confidence.clamp(0.0, 1.0) / price
    }
}
