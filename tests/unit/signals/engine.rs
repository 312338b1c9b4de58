//! Unit tests for the technical analysis engine

use crate::support::{rising_bars, ts};
use surgebot::config::TechnicalConfig;
use surgebot::models::Bar;
use surgebot::signals::{PriceHistory, TechnicalAnalysisEngine};

#[test]
fn test_analyze_insufficient_history() {
    let mut engine = TechnicalAnalysisEngine::default();
    for (i, bar) in rising_bars(49).into_iter().enumerate() {
        assert!(engine.analyze(bar, "BTCUSDT", "1h").is_none());
        assert_eq!(engine.history_len("BTCUSDT"), i + 1);
    }
}

#[test]
fn test_history_is_per_symbol() {
    let mut engine = TechnicalAnalysisEngine::default();
    for bar in rising_bars(60) {
        engine.analyze(bar, "BTCUSDT", "1h");
    }
    // a fresh symbol starts from zero regardless of other symbols
    let first = rising_bars(1)[0];
    assert!(engine.analyze(first, "ETHUSDT", "1h").is_none());
    assert_eq!(engine.history_len("ETHUSDT"), 1);
    assert_eq!(engine.history_len("BTCUSDT"), 60);
}

#[test]
fn test_single_bar_fixture_is_finite() {
    let bars = rising_bars(1);
    assert_eq!(bars.len(), 1);
    assert!(bars[0].is_finite());
    assert_eq!(bars[0].close, 100.0);
}

#[test]
fn test_history_capacity_evicts_oldest() {
    let mut engine = TechnicalAnalysisEngine::default();
    for bar in rising_bars(150) {
        engine.analyze(bar, "BTCUSDT", "1h");
    }
    assert_eq!(engine.history_len("BTCUSDT"), 100);
}

#[test]
fn test_price_history_fifo() {
    let mut history = PriceHistory::new(3);
    for i in 0..5 {
        let close = 100.0 + i as f64;
        history.push("SOLUSDT", Bar::new(close, close, close, close, 1.0, ts(i)));
    }
    let closes: Vec<f64> = history.bars("SOLUSDT").iter().map(|b| b.close).collect();
    assert_eq!(closes, vec![102.0, 103.0, 104.0]);
    assert!(history.bars("XRPUSDT").is_empty());
}

#[test]
fn test_min_history_cannot_go_below_floor() {
    let mut engine = TechnicalAnalysisEngine::new(TechnicalConfig {
        history_capacity: 100,
        min_history: 10,
    });
    for bar in rising_bars(49) {
        assert!(engine.analyze(bar, "BTCUSDT", "1h").is_none());
    }
}

#[test]
fn test_non_finite_bar_is_dropped() {
    let mut engine = TechnicalAnalysisEngine::default();
    for bar in rising_bars(55) {
        engine.analyze(bar, "BTCUSDT", "1h");
    }
    let bad = Bar::new(f64::NAN, 1.0, 1.0, 1.0, 1.0, ts(100));
    assert!(engine.analyze(bad, "BTCUSDT", "1h").is_none());
    assert_eq!(engine.history_len("BTCUSDT"), 55);
}

#[test]
fn test_compute_indicators_reports_short_history() {
    let err = TechnicalAnalysisEngine::compute_indicators("BTCUSDT", &rising_bars(10)).unwrap_err();
    assert!(err.to_string().contains("BTCUSDT"));
}

#[test]
fn test_signal_fields() {
    let mut engine = TechnicalAnalysisEngine::default();
    let bars = rising_bars(60);
    let last = *bars.last().unwrap();
    let mut signal = None;
    for bar in bars {
        signal = engine.analyze(bar, "SOLUSDT", "15m");
    }
    let signal = signal.expect("uptrend should produce a signal");
    assert_eq!(signal.symbol, "SOLUSDT");
    assert_eq!(signal.timeframe, "15m");
    assert_eq!(signal.at, last.timestamp);
    assert_eq!(signal.metadata.price, last.close);
    assert!(signal.metadata.sentiment.is_none());
    assert!(signal.confidence <= 0.95);
}
