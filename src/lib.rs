//! surgebot: strategy core of an aggressive crypto trading bot.
//!
//! Bars flow into the [`signals::TechnicalAnalysisEngine`], which keeps a
//! bounded history per symbol and emits the best-confidence [`models::Signal`].
//! The [`decision::AggressiveDecisionEngine`] scores signals into ranked
//! [`models::TradingOpportunity`] values and tracks portfolio balance.
//! [`core::runtime::TradingCycle`] wires both to the external collaborators
//! declared in [`services`].

pub mod common;
pub mod config;
pub mod core;
pub mod decision;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod risk;
pub mod services;
pub mod signals;
pub mod strategies;

pub use error::{EngineError, RejectionReason};
