//! Unit tests for the aggressive decision engine

use crate::support::{bar, clock_at, signal};
use approx::assert_relative_eq;
use chrono::Duration;
use std::collections::BTreeMap;
use surgebot::config::DecisionConfig;
use surgebot::decision::{rank_opportunities, AggressiveDecisionEngine};
use surgebot::error::{EngineError, RejectionReason};
use surgebot::models::{Bar, Position, SentimentBias, SentimentHint, SignalDirection};

fn engine_at(hour: u32) -> AggressiveDecisionEngine {
    AggressiveDecisionEngine::new(DecisionConfig::default(), clock_at(hour))
}

/// 0.5% up move, 1.5% range, mid volume.
fn quiet_bar() -> Bar {
    bar(100.0, 101.0, 99.5, 100.5, 800_000.0)
}

fn targets(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries.iter().map(|(s, w)| (s.to_string(), *w)).collect()
}

#[test]
fn test_accepts_and_scores_opportunity() {
    let mut engine = engine_at(3);
    let signal = signal("SOLUSDT", SignalDirection::Long, 0.6);

    let opp = engine
        .assess_opportunity("SOLUSDT", &signal, &quiet_bar(), 10_000.0)
        .unwrap();

    let expected_return = 1.2 + (1.5 / 100.5) * 5.0 + 0.5;
    assert_relative_eq!(opp.confidence, 0.6, epsilon = 1e-12);
    assert_relative_eq!(opp.expected_return, expected_return, epsilon = 1e-9);
    assert_relative_eq!(opp.risk_score, 1.0, epsilon = 1e-12);
    assert_relative_eq!(opp.priority, 0.6 * expected_return, epsilon = 1e-9);
    assert_eq!(opp.symbol, "SOLUSDT");
    assert_eq!(opp.timeframe, "1h");
    assert!(opp.reason.contains("moderate confidence"));
    assert!(opp.reason.contains("moderate expected return"));
    assert!(opp.reason.contains("moderate risk"));
    assert_eq!(engine.daily_count("SOLUSDT"), 1);
}

#[test]
fn test_active_hours_boost() {
    let signal = signal("SOLUSDT", SignalDirection::Long, 0.6);
    let mut night = engine_at(3);
    let mut day = engine_at(10);
    let mut evening = engine_at(21);

    let base = night.assess_opportunity("SOLUSDT", &signal, &quiet_bar(), 0.0).unwrap();
    let boosted = day.assess_opportunity("SOLUSDT", &signal, &quiet_bar(), 0.0).unwrap();
    let late = evening.assess_opportunity("SOLUSDT", &signal, &quiet_bar(), 0.0).unwrap();
    assert_relative_eq!(boosted.confidence - base.confidence, 0.05, epsilon = 1e-9);
    assert_relative_eq!(late.confidence, boosted.confidence, epsilon = 1e-12);
}

#[test]
fn test_aligned_sentiment_boost() {
    let mut engine = engine_at(3);
    let bullish = signal("SOLUSDT", SignalDirection::Long, 0.6)
        .with_sentiment(SentimentHint::new(SentimentBias::Bullish, 0.5));
    let bearish = signal("SOLUSDT", SignalDirection::Long, 0.6)
        .with_sentiment(SentimentHint::new(SentimentBias::Bearish, 0.9));

    let aligned = engine.assess_opportunity("SOLUSDT", &bullish, &quiet_bar(), 0.0).unwrap();
    let opposed = engine.assess_opportunity("SOLUSDT", &bearish, &quiet_bar(), 0.0).unwrap();
    assert_relative_eq!(aligned.confidence, 0.7, epsilon = 1e-9);
    assert_relative_eq!(opposed.confidence, 0.6, epsilon = 1e-9);
}

#[test]
fn test_confidence_capped() {
    let mut engine = engine_at(10);
    let signal = signal("SOLUSDT", SignalDirection::Long, 0.9);
    let big_move = bar(100.0, 106.0, 99.0, 105.0, 2_000_000.0);

    let opp = engine.assess_opportunity("SOLUSDT", &signal, &big_move, 0.0).unwrap();
    assert_eq!(opp.confidence, 0.95);
    assert!(opp.expected_return <= 8.0);
}

#[test]
fn test_direction_confirmation_only_when_bar_agrees() {
    let mut engine = engine_at(3);
    let short = signal("SOLUSDT", SignalDirection::Short, 0.6);

    let opp = engine.assess_opportunity("SOLUSDT", &short, &quiet_bar(), 0.0).unwrap();
    assert_relative_eq!(opp.expected_return, 1.2 + (1.5 / 100.5) * 5.0, epsilon = 1e-9);
}

#[test]
fn test_rejects_low_confidence() {
    let mut engine = engine_at(3);
    let weak = signal("SOLUSDT", SignalDirection::Long, 0.2);

    let err = engine.assess_opportunity("SOLUSDT", &weak, &quiet_bar(), 0.0).unwrap_err();
    assert!(matches!(
        err.rejection(),
        Some(RejectionReason::LowConfidence { .. })
    ));
    assert!(engine.evaluate_opportunity("SOLUSDT", &weak, &quiet_bar(), 0.0).is_none());
    assert_eq!(engine.daily_count("SOLUSDT"), 0);
}

#[test]
fn test_daily_quota_until_rollover() {
    let clock = clock_at(3);
    let mut engine = AggressiveDecisionEngine::new(DecisionConfig::default(), clock.clone());
    let signal = signal("SOLUSDT", SignalDirection::Long, 0.6);

    for _ in 0..15 {
        assert!(engine.evaluate_opportunity("SOLUSDT", &signal, &quiet_bar(), 0.0).is_some());
    }
    let err = engine.assess_opportunity("SOLUSDT", &signal, &quiet_bar(), 0.0).unwrap_err();
    assert_eq!(
        err.rejection(),
        Some(RejectionReason::DailyQuotaReached { count: 15, quota: 15 })
    );
    assert!(engine.evaluate_opportunity("SOLUSDT", &signal, &quiet_bar(), 0.0).is_none());

    // other symbols keep their own quota
    assert!(engine.evaluate_opportunity("XRPUSDT", &signal, &quiet_bar(), 0.0).is_some());

    clock.advance(Duration::hours(22));
    assert!(engine.evaluate_opportunity("SOLUSDT", &signal, &quiet_bar(), 0.0).is_some());
    assert_eq!(engine.daily_count("SOLUSDT"), 1);
}

#[test]
fn test_low_expected_return_rejection() {
    let config = DecisionConfig {
        min_expected_return: 5.0,
        target_allocations: targets(&[("ADAUSDT", 0.10)]),
        ..DecisionConfig::default()
    };
    let mut engine = AggressiveDecisionEngine::new(config, clock_at(3));
    engine.evaluate_portfolio_balance(&[Position::new("ADAUSDT", 15.0, 1.0)], 100.0);

    let signal = signal("ADAUSDT", SignalDirection::Long, 0.5);
    let up_move = bar(100.0, 101.5, 99.8, 101.2, 2_000_000.0);

    let err = engine.assess_opportunity("ADAUSDT", &signal, &up_move, 100.0).unwrap_err();
    match err {
        EngineError::Rejected(RejectionReason::LowExpectedReturn { expected_return, minimum }) => {
            assert!(expected_return < 5.0);
            assert_eq!(minimum, 5.0);
        }
        other => panic!("unexpected outcome: {other}"),
    }
}

#[test]
fn test_expected_return_at_least_twice_confidence() {
    // with default thresholds the confidence floor implies the return floor
    let mut engine = engine_at(3);
    let signal = signal("ADAUSDT", SignalDirection::Short, 0.36);
    let flat = bar(100.0, 100.0, 100.0, 100.0, 800_000.0);

    let opp = engine.assess_opportunity("ADAUSDT", &signal, &flat, 0.0).unwrap();
    assert_relative_eq!(opp.expected_return, 0.72, epsilon = 1e-9);
    assert!(opp.reason.contains("speculative"));
    assert!(opp.reason.contains("small expected return"));
}

#[test]
fn test_risk_major_symbol_discount() {
    let mut engine = engine_at(3);
    let signal = signal("BTCUSDT", SignalDirection::Long, 0.6);

    let opp = engine.assess_opportunity("BTCUSDT", &signal, &quiet_bar(), 0.0).unwrap();
    assert_relative_eq!(opp.risk_score, 0.8, epsilon = 1e-12);
    assert!(opp.reason.contains("low risk"));
}

#[test]
fn test_risk_low_volume_and_volatility() {
    let mut engine = engine_at(3);
    let signal = signal("SOLUSDT", SignalDirection::Long, 0.6);

    let thin = bar(100.0, 101.0, 99.5, 100.5, 100_000.0);
    let opp = engine.assess_opportunity("SOLUSDT", &signal, &thin, 0.0).unwrap();
    assert_relative_eq!(opp.risk_score, 1.3, epsilon = 1e-12);

    let wild = bar(104.0, 110.0, 100.0, 105.0, 800_000.0);
    let opp = engine.assess_opportunity("SOLUSDT", &signal, &wild, 0.0).unwrap();
    assert_relative_eq!(opp.risk_score, 1.0 + (10.0 / 105.0) * 2.0, epsilon = 1e-9);
    assert!(opp.reason.contains("moderate risk"));
}

#[test]
fn test_risk_grows_after_five_daily_trades() {
    let mut engine = engine_at(3);
    let signal = signal("SOLUSDT", SignalDirection::Long, 0.6);
    for _ in 0..7 {
        engine.evaluate_opportunity("SOLUSDT", &signal, &quiet_bar(), 0.0);
    }
    let opp = engine.assess_opportunity("SOLUSDT", &signal, &quiet_bar(), 0.0).unwrap();
    assert_relative_eq!(opp.risk_score, 1.2, epsilon = 1e-9);
}

#[test]
fn test_priority_allocation_deviation_boost() {
    let config = DecisionConfig {
        target_allocations: targets(&[("SOLUSDT", 0.15)]),
        ..DecisionConfig::default()
    };
    let mut balanced = AggressiveDecisionEngine::new(config.clone(), clock_at(3));
    let mut unknown = AggressiveDecisionEngine::new(config, clock_at(3));
    balanced.evaluate_portfolio_balance(&[Position::new("SOLUSDT", 3.0, 100.0)], 1_000.0);

    let signal = signal("SOLUSDT", SignalDirection::Long, 0.6);
    let boosted = balanced.assess_opportunity("SOLUSDT", &signal, &quiet_bar(), 1_000.0).unwrap();
    let plain = unknown.assess_opportunity("SOLUSDT", &signal, &quiet_bar(), 1_000.0).unwrap();

    assert_relative_eq!(boosted.priority - plain.priority, 1.5, epsilon = 1e-9);
}

#[test]
fn test_priority_below_average_activity_boost() {
    let mut engine = engine_at(3);
    let btc = signal("BTCUSDT", SignalDirection::Long, 0.6);
    engine.evaluate_opportunity("BTCUSDT", &btc, &quiet_bar(), 0.0);
    engine.evaluate_opportunity("BTCUSDT", &btc, &quiet_bar(), 0.0);

    let sol = signal("SOLUSDT", SignalDirection::Long, 0.6);
    let opp = engine.assess_opportunity("SOLUSDT", &sol, &quiet_bar(), 0.0).unwrap();
    assert_relative_eq!(
        opp.priority,
        opp.confidence * opp.expected_return + 0.5,
        epsilon = 1e-9
    );
}

#[test]
fn test_unusable_bar_is_computation_failure() {
    let mut engine = engine_at(3);
    let signal = signal("SOLUSDT", SignalDirection::Long, 0.6);
    let broken = bar(0.0, 0.0, 0.0, 0.0, 800_000.0);

    let err = engine.assess_opportunity("SOLUSDT", &signal, &broken, 0.0).unwrap_err();
    assert!(matches!(err, EngineError::ComputationFailure { .. }));
    assert!(engine.evaluate_opportunity("SOLUSDT", &signal, &broken, 0.0).is_none());
}

#[test]
fn test_update_target_allocation() {
    let mut engine = engine_at(3);
    assert!(engine.update_target_allocation("DOGEUSDT", 1.5).is_err());
    assert!(engine.update_target_allocation("DOGEUSDT", f64::NAN).is_err());
    engine.update_target_allocation("DOGEUSDT", 0.05).unwrap();
    assert_eq!(engine.target_allocations().get("DOGEUSDT"), Some(&0.05));
}

#[test]
fn test_rank_opportunities_orders_and_truncates() {
    let mut engine = engine_at(3);
    let mut opportunities = Vec::new();
    for (symbol, confidence) in [("ADAUSDT", 0.5), ("SOLUSDT", 0.8), ("XRPUSDT", 0.65)] {
        let signal = signal(symbol, SignalDirection::Long, confidence);
        opportunities.push(engine.assess_opportunity(symbol, &signal, &quiet_bar(), 0.0).unwrap());
    }

    let ranked = rank_opportunities(opportunities, 2);
    let symbols: Vec<&str> = ranked.iter().map(|o| o.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["SOLUSDT", "XRPUSDT"]);
}

#[test]
fn test_rank_opportunities_stable_for_ties() {
    let mut engine = engine_at(3);
    let a = engine
        .assess_opportunity("ADAUSDT", &signal("ADAUSDT", SignalDirection::Long, 0.6), &quiet_bar(), 0.0)
        .unwrap();
    let mut b = a.clone();
    b.symbol = "XRPUSDT".to_string();

    let ranked = rank_opportunities(vec![a, b], 5);
    assert_eq!(ranked[0].symbol, "ADAUSDT");
    assert_eq!(ranked[1].symbol, "XRPUSDT");
}

#[test]
fn test_equity_does_not_change_scoring() {
    let signal = signal("SOLUSDT", SignalDirection::Long, 0.6);
    let mut flat = engine_at(3);
    let mut rich = engine_at(3);

    let a = flat.assess_opportunity("SOLUSDT", &signal, &quiet_bar(), 0.0).unwrap();
    let b = rich.assess_opportunity("SOLUSDT", &signal, &quiet_bar(), 1_000_000.0).unwrap();
    assert_eq!(a, b);
}
