//! Unit tests for configuration loading

use surgebot::config::{DecisionConfig, EngineConfig, TechnicalConfig};
use surgebot::error::EngineError;
use surgebot::logging::is_production;

const VARS: [&str; 4] = [
    "MIN_CONFIDENCE",
    "TARGET_ALLOCATIONS",
    "MAJOR_SYMBOLS",
    "DAILY_TRADE_QUOTA",
];

#[test]
fn test_defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.technical.history_capacity, 100);
    assert_eq!(config.technical.min_history, 50);
    assert_eq!(config.decision.min_confidence, 0.35);
    assert_eq!(config.decision.min_expected_return, 0.5);
    assert_eq!(config.decision.daily_quota, 15);
    assert_eq!(config.decision.rebalance_notification_interval_secs, 14_400);

    let total: f64 = config.decision.target_allocations.values().sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert!(config.validate().is_ok());
}

// Every environment mutation lives in this one test so parallel tests never
// observe a half-applied override.
#[test]
fn test_environment_overrides() {
    std::env::set_var("MIN_CONFIDENCE", "0.5");
    std::env::set_var("TARGET_ALLOCATIONS", r#"{"BTCUSDT":0.6,"ETHUSDT":0.4}"#);
    std::env::set_var("MAJOR_SYMBOLS", "btcusdt, solusdt,");
    let config = EngineConfig::from_env();

    std::env::set_var("DAILY_TRADE_QUOTA", "many");
    let malformed_quota = EngineConfig::from_env();
    std::env::remove_var("DAILY_TRADE_QUOTA");

    std::env::set_var("TARGET_ALLOCATIONS", r#"{"BTCUSDT":1.4}"#);
    let oversized = EngineConfig::from_env();

    std::env::set_var("TARGET_ALLOCATIONS", "not json");
    let malformed_targets = EngineConfig::from_env();

    for key in VARS {
        std::env::remove_var(key);
    }

    let config = config.unwrap();
    assert_eq!(config.decision.min_confidence, 0.5);
    assert_eq!(config.decision.target_allocations.len(), 2);
    assert_eq!(config.decision.target_allocations.get("BTCUSDT"), Some(&0.6));
    assert_eq!(config.decision.major_symbols, vec!["BTCUSDT", "SOLUSDT"]);

    assert!(matches!(
        malformed_quota,
        Err(EngineError::Config { ref key, .. }) if key == "DAILY_TRADE_QUOTA"
    ));
    assert!(matches!(oversized, Err(EngineError::InvalidAllocation { .. })));
    assert!(matches!(
        malformed_targets,
        Err(EngineError::Config { ref key, .. }) if key == "TARGET_ALLOCATIONS"
    ));
}

#[test]
fn test_validate_rejects_small_history() {
    let config = EngineConfig {
        technical: TechnicalConfig {
            history_capacity: 30,
            min_history: 50,
        },
        ..EngineConfig::default()
    };
    assert!(matches!(config.validate(), Err(EngineError::Config { .. })));
}

#[test]
fn test_validate_rejects_negative_weight() {
    let config = EngineConfig {
        decision: DecisionConfig {
            target_allocations: [("BTCUSDT".to_string(), -0.1)].into(),
            ..DecisionConfig::default()
        },
        ..EngineConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(EngineError::InvalidAllocation { .. })
    ));
}

#[test]
fn test_production_environment_names() {
    assert!(is_production("production"));
    assert!(is_production("prod"));
    assert!(!is_production("sandbox"));
}
