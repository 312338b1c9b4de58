//! Aggressive decision engine: signals in, ranked opportunities out.
//!
//! Callers evaluate every symbol with fresh data, sort the accepted
//! opportunities with [`super::rank_opportunities`] and execute at most N.
//! The engine itself never caps a batch.
//!
//! All state is owned by the instance. Calls mutate daily counters and the
//! trade history without synchronization, so one instance must not be
//! driven from several threads for the same symbol at once.

use crate::config::DecisionConfig;
use crate::core::clock::{Clock, SystemClock};
use crate::decision::balance;
use crate::decision::report::DecisionMetrics;
use crate::decision::scoring;
use crate::decision::state::{EngineState, TradeRecord};
use crate::error::{EngineError, RejectionReason};
use crate::metrics::Metrics;
use crate::models::{Bar, PortfolioBalanceAssessment, Position, Signal, TradingOpportunity};
use chrono::{Duration, Timelike};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct AggressiveDecisionEngine {
    config: DecisionConfig,
    clock: Arc<dyn Clock + Send + Sync>,
    state: EngineState,
    metrics: Option<Arc<Metrics>>,
}

impl AggressiveDecisionEngine {
    pub fn new(config: DecisionConfig, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        let today = clock.now().date_naive();
        let state = EngineState::new(
            config.target_allocations.clone(),
            config.trade_history_capacity,
            today,
        );
        Self {
            config,
            clock,
            state,
            metrics: None,
        }
    }

    pub fn with_system_clock(config: DecisionConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Score `signal` into an opportunity, or `None` if it is rejected or
    /// cannot be scored. Rejections are logged with their cause.
    ///
    /// `equity` does not affect scoring; it is recorded on the acceptance
    /// log line. Sizing against equity happens in the caller.
    pub fn evaluate_opportunity(
        &mut self,
        symbol: &str,
        signal: &Signal,
        bar: &Bar,
        equity: f64,
    ) -> Option<TradingOpportunity> {
        match self.assess_opportunity(symbol, signal, bar, equity) {
            Ok(opportunity) => Some(opportunity),
            Err(EngineError::Rejected(_)) => None,
            Err(e) => {
                warn!(symbol, error = %e, "opportunity evaluation failed");
                None
            }
        }
    }

    /// Like [`Self::evaluate_opportunity`] but keeps the structured cause.
    pub fn assess_opportunity(
        &mut self,
        symbol: &str,
        signal: &Signal,
        bar: &Bar,
        equity: f64,
    ) -> Result<TradingOpportunity, EngineError> {
        let now = self.clock.now();
        if self.state.reset_if_new_day(now.date_naive()) {
            info!(date = %now.date_naive(), "daily trade counters reset");
        }

        if !bar.is_finite() || bar.open <= 0.0 || bar.close <= 0.0 {
            return Err(EngineError::computation(symbol, "bar prices must be finite and positive"));
        }
        if !signal.confidence.is_finite() {
            return Err(EngineError::computation(symbol, "signal confidence is not finite"));
        }

        let daily_count = self.state.daily_count(symbol);
        let confidence = scoring::score_confidence(signal, bar, now.hour(), &self.config);
        let expected_return = scoring::expected_return(confidence, signal.direction, bar);
        let risk_score = scoring::risk_score(symbol, bar, daily_count, &self.config);
        let priority = scoring::priority(
            confidence,
            expected_return,
            self.state.allocation_deviation(symbol),
            (daily_count as f64) < self.state.average_daily_count(),
            &self.config,
        );

        if let Some(reason) = self.rejection(confidence, expected_return, daily_count) {
            debug!(
                symbol,
                strategy = %signal.strategy,
                reason = reason.label(),
                confidence,
                expected_return,
                daily_count,
                "opportunity rejected: {}",
                reason
            );
            if let Some(metrics) = &self.metrics {
                metrics.record_rejection(&reason);
            }
            return Err(reason.into());
        }

        let count = self.state.increment_daily_count(symbol);
        let reason = scoring::describe(signal, confidence, expected_return, risk_score);

        info!(
            symbol,
            strategy = %signal.strategy,
            confidence,
            expected_return,
            risk_score,
            priority,
            equity,
            daily_count = count,
            "opportunity accepted"
        );
        if let Some(metrics) = &self.metrics {
            metrics.opportunities_accepted.inc();
        }

        Ok(TradingOpportunity {
            symbol: symbol.to_string(),
            signal: signal.clone(),
            confidence,
            expected_return,
            risk_score,
            priority,
            reason,
            timeframe: signal.timeframe.clone(),
        })
    }

    fn rejection(&self, confidence: f64, expected_return: f64, daily_count: u32) -> Option<RejectionReason> {
        if confidence < self.config.min_confidence {
            return Some(RejectionReason::LowConfidence {
                confidence,
                minimum: self.config.min_confidence,
            });
        }
        if expected_return < self.config.min_expected_return {
            return Some(RejectionReason::LowExpectedReturn {
                expected_return,
                minimum: self.config.min_expected_return,
            });
        }
        if daily_count >= self.config.daily_quota {
            return Some(RejectionReason::DailyQuotaReached {
                count: daily_count,
                quota: self.config.daily_quota,
            });
        }
        None
    }

    /// Compare live weights with targets for every target symbol.
    ///
    /// With `equity <= 0` no weights are computed and every symbol reports a
    /// current weight of 0. The "rebalancing needed" notification is emitted
    /// at most once per configured interval; the assessments are always fresh.
    pub fn evaluate_portfolio_balance(
        &mut self,
        positions: &[Position],
        equity: f64,
    ) -> Vec<PortfolioBalanceAssessment> {
        let now = self.clock.now();

        if equity > 0.0 && equity.is_finite() {
            self.state.current_weights =
                balance::current_weights(positions, equity, &self.state.target_allocations);
        } else {
            debug!(equity, "non-positive equity, current weights left unset");
            self.state.current_weights.clear();
        }

        let assessments: Vec<PortfolioBalanceAssessment> = self
            .state
            .target_allocations
            .iter()
            .map(|(symbol, target)| {
                let current = self.state.current_weights.get(symbol).copied().unwrap_or(0.0);
                balance::assess(symbol, current, *target)
            })
            .collect();

        let drifting: Vec<&str> = assessments
            .iter()
            .filter(|a| a.needs_rebalancing)
            .map(|a| a.symbol.as_str())
            .collect();

        let interval = Duration::seconds(self.config.rebalance_notification_interval_secs);
        if !drifting.is_empty() && self.state.rebalance_notification_due(now, interval) {
            info!(symbols = ?drifting, "portfolio rebalancing needed");
            self.state.last_rebalance_notification = Some(now);
        }

        assessments
    }

    pub fn record_trade(&mut self, symbol: &str, signal: &Signal, executed: bool) {
        let record = TradeRecord {
            symbol: symbol.to_string(),
            strategy: signal.strategy,
            direction: signal.direction,
            confidence: signal.confidence,
            executed,
            at: self.clock.now(),
        };
        debug!(symbol, strategy = %signal.strategy, executed, "trade recorded");
        self.state.push_trade(record);
    }

    pub fn get_decision_metrics(&mut self) -> DecisionMetrics {
        let now = self.clock.now();
        self.state.reset_if_new_day(now.date_naive());

        let daily_trade_counts: BTreeMap<String, u32> = self
            .state
            .daily_counts
            .iter()
            .map(|(symbol, count)| (symbol.clone(), *count))
            .collect();
        let total_daily_trades = daily_trade_counts.values().sum();

        let window_start = now - Duration::hours(24);
        let (recent, executed) = self
            .state
            .trade_history
            .iter()
            .filter(|t| t.at >= window_start)
            .fold((0usize, 0usize), |(recent, executed), t| {
                (recent + 1, executed + usize::from(t.executed))
            });
        let success_rate = if recent > 0 {
            executed as f64 / recent as f64
        } else {
            0.0
        };

        DecisionMetrics {
            daily_trade_counts,
            total_daily_trades,
            recent_trades: recent,
            success_rate,
            portfolio_balance_score: balance::balance_score(
                &self.state.current_weights,
                &self.state.target_allocations,
            ),
            last_rebalance_notification: self.state.last_rebalance_notification,
        }
    }

    pub fn update_target_allocation(&mut self, symbol: &str, weight: f64) -> Result<(), EngineError> {
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(EngineError::InvalidAllocation {
                symbol: symbol.to_string(),
                weight,
            });
        }
        info!(symbol, weight, "target allocation updated");
        self.state
            .target_allocations
            .insert(symbol.to_string(), weight);
        Ok(())
    }

    pub fn target_allocations(&self) -> &BTreeMap<String, f64> {
        &self.state.target_allocations
    }

    pub fn current_weight(&self, symbol: &str) -> Option<f64> {
        self.state.current_weights.get(symbol).copied()
    }

    pub fn daily_count(&self, symbol: &str) -> u32 {
        self.state.daily_count(symbol)
    }

    pub fn trade_history(&self) -> &VecDeque<TradeRecord> {
        &self.state.trade_history
    }
}
