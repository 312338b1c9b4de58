//! Interfaces of the collaborators around the strategy core, with in-memory
//! implementations for replay and paper trading.

pub mod execution;
pub mod market_data;
pub mod portfolio;

pub use execution::{ExecutionReport, OrderExecutor, PaperExecutor, PositionIntent};
pub use market_data::{MarketDataProvider, ReplayMarketDataProvider};
pub use portfolio::{PortfolioSnapshot, PortfolioSource, StaticPortfolioSource};

pub type ServiceError = Box<dyn std::error::Error + Send + Sync>;
