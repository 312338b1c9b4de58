//! Opportunity scoring, daily quotas and portfolio balance.

pub mod balance;
pub mod engine;
pub mod ranking;
pub mod report;
pub mod scoring;
pub mod state;

pub use engine::AggressiveDecisionEngine;
pub use ranking::rank_opportunities;
pub use report::DecisionMetrics;
pub use state::{EngineState, TradeRecord};
