//! Shared data models spanning the engine layers.

pub mod bar;
pub mod indicators;
pub mod opportunity;
pub mod portfolio;
pub mod signal;

pub use bar::Bar;
pub use indicators::{BollingerBandsIndicator, IndicatorSet, MacdIndicator, RsiIndicator, VolumeIndicator};
pub use opportunity::TradingOpportunity;
pub use portfolio::{PortfolioBalanceAssessment, Position, RebalanceAction, Urgency};
pub use signal::{SentimentBias, SentimentHint, Signal, SignalDirection, SignalMetadata};
