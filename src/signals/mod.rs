//! Technical analysis: per-symbol history and signal selection.

pub mod engine;
pub mod history;

pub use engine::TechnicalAnalysisEngine;
pub use history::PriceHistory;
