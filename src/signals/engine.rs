//! Technical analysis engine: bars in, best-confidence signal out.

use crate::config::TechnicalConfig;
use crate::error::EngineError;
use crate::indicators::momentum::{calculate_macd_default, calculate_rsi_default};
use crate::indicators::volatility::calculate_bollinger_bands_default;
use crate::indicators::volume::calculate_volume_default;
use crate::metrics::Metrics;
use crate::models::{Bar, IndicatorSet, Signal, SignalMetadata};
use crate::signals::history::PriceHistory;
use crate::strategies::{self, Candidate, StrategyId};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const MIN_BARS: usize = 50;

pub struct TechnicalAnalysisEngine {
    config: TechnicalConfig,
    history: PriceHistory,
    metrics: Option<Arc<Metrics>>,
}

impl TechnicalAnalysisEngine {
    pub fn new(config: TechnicalConfig) -> Self {
        let history = PriceHistory::new(config.history_capacity);
        Self {
            config,
            history,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn history_len(&self, symbol: &str) -> usize {
        self.history.len(symbol)
    }

    /// Append `bar` to the symbol's history and evaluate every strategy.
    ///
    /// Returns `None` below the minimum history, when no strategy fires, or
    /// when indicator math fails; failures are logged, never returned.
    ///
    /// A bar with a non-finite field is not appended: it is logged and
    /// dropped so it cannot poison the indicators of later bars.
    pub fn analyze(&mut self, bar: Bar, symbol: &str, timeframe: &str) -> Option<Signal> {
        if !bar.is_finite() {
            warn!(symbol, timeframe, "analysis skipped: bar contains non-finite values");
            return None;
        }

        let len = self.history.push(symbol, bar);
        let required = self.config.min_history.max(MIN_BARS);
        if len < required {
            debug!(symbol, bars = len, required, "insufficient history");
            return None;
        }

        let indicators = match Self::compute_indicators(symbol, self.history.bars(symbol)) {
            Ok(indicators) => indicators,
            Err(e) => {
                warn!(symbol, timeframe, error = %e, "indicator computation failed");
                return None;
            }
        };

        let candidates = strategies::evaluate_all(&bar, &indicators);
        let Some((strategy, candidate)) = strategies::select_best(&candidates) else {
            debug!(symbol, timeframe, rsi = indicators.rsi.value, "no strategy fired");
            return None;
        };

        let signal = Self::build_signal(symbol, timeframe, &bar, &indicators, strategy, candidate);

        info!(
            symbol,
            timeframe,
            strategy = %strategy,
            direction = signal.direction.as_str(),
            confidence = signal.confidence,
            candidates = candidates.len(),
            "signal generated"
        );
        if let Some(metrics) = &self.metrics {
            metrics.record_signal(strategy);
        }

        Some(signal)
    }

    /// RSI(14), MACD(12, 26, 9), Bollinger(20, 2σ) and the 20-bar volume average.
    pub fn compute_indicators(symbol: &str, bars: &[Bar]) -> Result<IndicatorSet, EngineError> {
        let rsi = calculate_rsi_default(bars)
            .ok_or_else(|| EngineError::computation(symbol, "not enough bars for RSI"))?;
        let macd = calculate_macd_default(bars)
            .ok_or_else(|| EngineError::computation(symbol, "not enough bars for MACD"))?;
        let bollinger = calculate_bollinger_bands_default(bars)
            .ok_or_else(|| EngineError::computation(symbol, "no bars for Bollinger Bands"))?;
        let volume = calculate_volume_default(bars)
            .ok_or_else(|| EngineError::computation(symbol, "no bars for volume average"))?;

        let indicators = IndicatorSet {
            rsi,
            macd,
            bollinger,
            volume,
        };
        if !indicators.is_finite() {
            return Err(EngineError::computation(symbol, "indicator produced a non-finite value"));
        }
        Ok(indicators)
    }

    fn build_signal(
        symbol: &str,
        timeframe: &str,
        bar: &Bar,
        indicators: &IndicatorSet,
        strategy: StrategyId,
        candidate: Candidate,
    ) -> Signal {
        Signal {
            at: bar.timestamp,
            symbol: symbol.to_string(),
            timeframe: timeframe.to_string(),
            direction: candidate.direction,
            confidence: candidate.confidence,
            strategy,
            metadata: SignalMetadata {
                price: bar.close,
                rsi: indicators.rsi.value,
                macd_histogram: indicators.macd.histogram,
                band_position: indicators.bollinger.position(bar.close),
                bandwidth: indicators.bollinger.bandwidth,
                volume_ratio: indicators.volume.ratio(),
                sentiment: None,
            },
        }
    }
}

impl Default for TechnicalAnalysisEngine {
    fn default() -> Self {
        Self::new(TechnicalConfig::default())
    }
}
