//! Engine configuration with environment overrides.

use crate::error::EngineError;
use crate::risk::RiskLimits;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;

/// Deployment environment (`APP_ENV`), defaulting to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalConfig {
    /// Bars retained per symbol.
    pub history_capacity: usize,
    /// Bars required before any strategy is evaluated.
    pub min_history: usize,
}

impl Default for TechnicalConfig {
    fn default() -> Self {
        Self {
            history_capacity: 100,
            min_history: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionConfig {
    pub min_confidence: f64,
    /// Percent.
    pub min_expected_return: f64,
    pub daily_quota: u32,
    /// Trades per symbol per day before the risk score starts climbing.
    pub quota_risk_free_trades: u32,
    pub high_volume: f64,
    pub low_volume: f64,
    pub major_symbols: Vec<String>,
    /// Allocation deviation above which priority gets a rebalance boost.
    pub deviation_boost_threshold: f64,
    pub rebalance_notification_interval_secs: i64,
    pub trade_history_capacity: usize,
    pub target_allocations: BTreeMap<String, f64>,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.35,
            min_expected_return: 0.5,
            daily_quota: 15,
            quota_risk_free_trades: 5,
            high_volume: 1_000_000.0,
            low_volume: 500_000.0,
            major_symbols: vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()],
            deviation_boost_threshold: 0.05,
            rebalance_notification_interval_secs: 4 * 60 * 60,
            trade_history_capacity: 100,
            target_allocations: default_target_allocations(),
        }
    }
}

pub fn default_target_allocations() -> BTreeMap<String, f64> {
    [
        ("BTCUSDT", 0.30),
        ("ETHUSDT", 0.25),
        ("SOLUSDT", 0.15),
        ("BNBUSDT", 0.10),
        ("XRPUSDT", 0.10),
        ("ADAUSDT", 0.10),
    ]
    .into_iter()
    .map(|(symbol, weight)| (symbol.to_string(), weight))
    .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub technical: TechnicalConfig,
    pub decision: DecisionConfig,
    pub risk: RiskLimits,
}

impl EngineConfig {
    /// Load `.env` if present, then apply environment overrides.
    pub fn load() -> Result<Self, EngineError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Defaults overridden by whichever variables are set.
    pub fn from_env() -> Result<Self, EngineError> {
        let mut config = Self::default();

        if let Some(v) = parse_var("HISTORY_CAPACITY")? {
            config.technical.history_capacity = v;
        }
        if let Some(v) = parse_var("MIN_HISTORY_BARS")? {
            config.technical.min_history = v;
        }

        let decision = &mut config.decision;
        if let Some(v) = parse_var("MIN_CONFIDENCE")? {
            decision.min_confidence = v;
        }
        if let Some(v) = parse_var("MIN_EXPECTED_RETURN")? {
            decision.min_expected_return = v;
        }
        if let Some(v) = parse_var("DAILY_TRADE_QUOTA")? {
            decision.daily_quota = v;
        }
        if let Ok(raw) = env::var("MAJOR_SYMBOLS") {
            decision.major_symbols = raw
                .split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(raw) = env::var("TARGET_ALLOCATIONS") {
            decision.target_allocations =
                serde_json::from_str(&raw).map_err(|e| EngineError::Config {
                    key: "TARGET_ALLOCATIONS".to_string(),
                    reason: e.to_string(),
                })?;
        }

        if let Some(v) = parse_var("MAX_EQUITY_RISK")? {
            config.risk.max_equity_risk = v;
        }
        if let Some(v) = parse_var("MAX_DAILY_LOSS")? {
            config.risk.max_daily_loss = v;
        }
        if let Some(v) = parse_var("MAX_CONSECUTIVE_LOSSES")? {
            config.risk.max_consecutive_losses = v;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.technical.history_capacity < self.technical.min_history {
            return Err(EngineError::Config {
                key: "HISTORY_CAPACITY".to_string(),
                reason: format!(
                    "capacity {} cannot hold the {}-bar minimum",
                    self.technical.history_capacity, self.technical.min_history
                ),
            });
        }
        for (symbol, weight) in &self.decision.target_allocations {
            if !(0.0..=1.0).contains(weight) {
                return Err(EngineError::InvalidAllocation {
                    symbol: symbol.clone(),
                    weight: *weight,
                });
            }
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(key: &str) -> Result<Option<T>, EngineError>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| EngineError::Config {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
