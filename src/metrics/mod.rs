//! Prometheus counters for the strategy core.

use crate::error::RejectionReason;
use crate::strategies::StrategyId;
use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

pub struct Metrics {
    registry: Registry,
    pub signals_generated: IntCounterVec,
    pub opportunities_accepted: IntCounter,
    pub opportunities_rejected: IntCounterVec,
    pub trades_executed: IntCounter,
    pub execution_failures: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("surgebot".to_string()), None)?;

        let signals_generated = IntCounterVec::new(
            Opts::new("signals_generated_total", "Signals emitted by technical analysis"),
            &["strategy"],
        )?;
        let opportunities_accepted = IntCounter::new(
            "opportunities_accepted_total",
            "Signals accepted as trading opportunities",
        )?;
        let opportunities_rejected = IntCounterVec::new(
            Opts::new("opportunities_rejected_total", "Signals rejected by the decision engine"),
            &["reason"],
        )?;
        let trades_executed =
            IntCounter::new("trades_executed_total", "Position intents filled by the executor")?;
        let execution_failures = IntCounter::new(
            "execution_failures_total",
            "Position intents the executor failed to fill",
        )?;

        registry.register(Box::new(signals_generated.clone()))?;
        registry.register(Box::new(opportunities_accepted.clone()))?;
        registry.register(Box::new(opportunities_rejected.clone()))?;
        registry.register(Box::new(trades_executed.clone()))?;
        registry.register(Box::new(execution_failures.clone()))?;

        Ok(Self {
            registry,
            signals_generated,
            opportunities_accepted,
            opportunities_rejected,
            trades_executed,
            execution_failures,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_signal(&self, strategy: StrategyId) {
        self.signals_generated
            .with_label_values(&[strategy.as_str()])
            .inc();
    }

    pub fn record_rejection(&self, reason: &RejectionReason) {
        self.opportunities_rejected
            .with_label_values(&[reason.label()])
            .inc();
    }

    pub fn record_execution(&self, executed: bool) {
        if executed {
            self.trades_executed.inc();
        } else {
            self.execution_failures.inc();
        }
    }
}
