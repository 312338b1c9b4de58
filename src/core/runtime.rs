//! One synchronous orchestration tick: feed → analysis → decision → ranking
//! → risk gate → execution.
//!
//! Symbols are processed sequentially. A failing collaborator call for one
//! symbol is logged and skipped; the rest of the batch proceeds.

use crate::config::EngineConfig;
use crate::core::clock::Clock;
use crate::decision::{rank_opportunities, AggressiveDecisionEngine};
use crate::error::EngineError;
use crate::metrics::Metrics;
use crate::models::{PortfolioBalanceAssessment, TradingOpportunity};
use crate::risk::{RiskGate, RiskLimits};
use crate::services::{
    MarketDataProvider, OrderExecutor, PortfolioSnapshot, PortfolioSource, PositionIntent,
};
use crate::signals::TechnicalAnalysisEngine;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for the trading cycle
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub symbols: Vec<String>,
    pub timeframe: String,
    /// Opportunities executed per tick, highest priority first.
    pub max_trades_per_tick: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            symbols: vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()],
            timeframe: "1h".to_string(),
            max_trades_per_tick: 3,
        }
    }
}

/// Collaborators injected into the cycle.
pub struct CycleContext {
    pub market_data: Arc<dyn MarketDataProvider + Send + Sync>,
    pub portfolio: Arc<dyn PortfolioSource + Send + Sync>,
    pub executor: Arc<dyn OrderExecutor + Send + Sync>,
    pub metrics: Option<Arc<Metrics>>,
}

impl CycleContext {
    pub fn new(
        market_data: Arc<dyn MarketDataProvider + Send + Sync>,
        portfolio: Arc<dyn PortfolioSource + Send + Sync>,
        executor: Arc<dyn OrderExecutor + Send + Sync>,
        metrics: Option<Arc<Metrics>>,
    ) -> Self {
        Self {
            market_data,
            portfolio,
            executor,
            metrics,
        }
    }
}

#[derive(Debug, Default)]
pub struct TickReport {
    pub signals: usize,
    /// Ranked and truncated to the per-tick limit.
    pub selected: Vec<TradingOpportunity>,
    pub executed: Vec<String>,
    pub failed: Vec<String>,
    pub balance: Vec<PortfolioBalanceAssessment>,
    pub halted: Option<RiskGate>,
}

pub struct TradingCycle {
    config: RuntimeConfig,
    risk: RiskLimits,
    analysis: TechnicalAnalysisEngine,
    decision: AggressiveDecisionEngine,
    context: CycleContext,
}

impl TradingCycle {
    pub fn new(
        config: RuntimeConfig,
        engine_config: EngineConfig,
        clock: Arc<dyn Clock + Send + Sync>,
        context: CycleContext,
    ) -> Self {
        let mut analysis = TechnicalAnalysisEngine::new(engine_config.technical);
        let mut decision = AggressiveDecisionEngine::new(engine_config.decision, clock);
        if let Some(metrics) = &context.metrics {
            analysis = analysis.with_metrics(metrics.clone());
            decision = decision.with_metrics(metrics.clone());
        }

        info!(
            symbols = ?config.symbols,
            timeframe = %config.timeframe,
            max_trades = config.max_trades_per_tick,
            "TradingCycle: created"
        );

        Self {
            config,
            risk: engine_config.risk,
            analysis,
            decision,
            context,
        }
    }

    pub fn decision_engine(&self) -> &AggressiveDecisionEngine {
        &self.decision
    }

    pub fn decision_engine_mut(&mut self) -> &mut AggressiveDecisionEngine {
        &mut self.decision
    }

    pub fn analysis_engine(&self) -> &TechnicalAnalysisEngine {
        &self.analysis
    }

    pub fn run_tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        let snapshot = match self.context.portfolio.snapshot() {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                let err = EngineError::Collaborator {
                    source_name: "portfolio source".to_string(),
                    reason: e.to_string(),
                };
                warn!(error = %err, "portfolio snapshot unavailable, execution skipped this tick");
                None
            }
        };
        if let Some(snapshot) = &snapshot {
            report.balance = self
                .decision
                .evaluate_portfolio_balance(&snapshot.positions, snapshot.equity);
            report.halted = self.gate(snapshot);
        }

        // Without a snapshot or with the gate closed nothing can execute, so
        // bars only feed the history and the daily quota stays untouched.
        let tradable = match &snapshot {
            Some(snapshot) if report.halted.is_none() => Some(snapshot),
            _ => None,
        };

        let mut opportunities = Vec::new();
        for symbol in &self.config.symbols {
            let bar = match self.context.market_data.latest_bar(symbol, &self.config.timeframe) {
                Ok(Some(bar)) => bar,
                Ok(None) => {
                    debug!(symbol = %symbol, "no new bar");
                    continue;
                }
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "market data fetch failed");
                    continue;
                }
            };

            let Some(signal) = self.analysis.analyze(bar, symbol, &self.config.timeframe) else {
                continue;
            };
            report.signals += 1;

            let Some(snapshot) = tradable else {
                debug!(symbol = %symbol, strategy = %signal.strategy, "signal not evaluated, execution unavailable");
                continue;
            };
            if let Some(opportunity) =
                self.decision
                    .evaluate_opportunity(symbol, &signal, &bar, snapshot.equity)
            {
                opportunities.push(opportunity);
            }
        }

        report.selected = rank_opportunities(opportunities, self.config.max_trades_per_tick);
        let Some(snapshot) = tradable else {
            return report;
        };

        for opportunity in &report.selected {
            if self.execute(opportunity, snapshot.equity) {
                report.executed.push(opportunity.symbol.clone());
            } else {
                report.failed.push(opportunity.symbol.clone());
            }
        }

        report
    }

    fn gate(&self, snapshot: &PortfolioSnapshot) -> Option<RiskGate> {
        match self.risk.gate(&snapshot.risk, snapshot.equity) {
            RiskGate::Open => None,
            gate => {
                warn!(gate = ?gate, "risk limits reached, execution halted");
                Some(gate)
            }
        }
    }

    fn execute(&mut self, opportunity: &TradingOpportunity, equity: f64) -> bool {
        let price = opportunity.signal.metadata.price;
        let size = self.risk.position_size(equity, opportunity.confidence, price);
        if size <= 0.0 {
            warn!(symbol = %opportunity.symbol, equity, price, "position size is zero, skipped");
            return false;
        }

        let intent = PositionIntent {
            symbol: opportunity.symbol.clone(),
            direction: opportunity.signal.direction,
            size,
            reference_price: price,
            confidence: opportunity.confidence,
        };

        let executed = match self.context.executor.execute(&intent) {
            Ok(fill) => {
                info!(
                    symbol = %fill.symbol,
                    size = fill.filled_size,
                    price = fill.fill_price,
                    direction = intent.direction.as_str(),
                    "position opened"
                );
                true
            }
            Err(e) => {
                warn!(symbol = %intent.symbol, error = %e, "execution failed");
                false
            }
        };

        self.decision
            .record_trade(&opportunity.symbol, &opportunity.signal, executed);
        if let Some(metrics) = &self.context.metrics {
            metrics.record_execution(executed);
        }
        executed
    }
}
