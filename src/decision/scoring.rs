//! Pure scoring heuristics behind [`super::AggressiveDecisionEngine`].

use crate::config::DecisionConfig;
use crate::models::{Bar, Signal, SignalDirection};
use crate::strategies::MAX_CONFIDENCE;

pub const MAX_EXPECTED_RETURN: f64 = 8.0;
const MOVE_BOOST_THRESHOLD: f64 = 0.01;
const ACTIVE_HOUR_BOOST: f64 = 0.05;
const VOLUME_BOOST: f64 = 0.1;
const MAX_SENTIMENT_BOOST: f64 = 0.2;

/// 08-16 and 20-23 local time.
pub fn is_active_hour(hour: u32) -> bool {
    (8..=16).contains(&hour) || (20..=23).contains(&hour)
}

/// Signal confidence boosted by bar movement, volume, trading hours and any
/// aligned sentiment. Always within `[0, 0.95]`.
pub fn score_confidence(signal: &Signal, bar: &Bar, local_hour: u32, config: &DecisionConfig) -> f64 {
    let mut confidence = signal.confidence;

    let move_fraction = bar.price_change().abs();
    if move_fraction > MOVE_BOOST_THRESHOLD {
        confidence += 2.0 * move_fraction;
    }
    if bar.volume > config.high_volume {
        confidence += VOLUME_BOOST;
    }
    if is_active_hour(local_hour) {
        confidence += ACTIVE_HOUR_BOOST;
    }
    if let Some(sentiment) = signal.metadata.sentiment {
        if sentiment.aligns_with(signal.direction) {
            confidence += MAX_SENTIMENT_BOOST * sentiment.confidence;
        }
    }

    if confidence.is_nan() {
        return 0.0;
    }
    confidence.clamp(0.0, MAX_CONFIDENCE)
}

/// Open-to-close move when it agrees with the signal direction, else 0.
pub fn direction_confirmation(direction: SignalDirection, bar: &Bar) -> f64 {
    let change = bar.price_change();
    let agrees = match direction {
        SignalDirection::Long => change > 0.0,
        SignalDirection::Short => change < 0.0,
    };
    if agrees {
        change.abs()
    } else {
        0.0
    }
}

/// Expected return in percent, capped at 8.
pub fn expected_return(confidence: f64, direction: SignalDirection, bar: &Bar) -> f64 {
    let raw = confidence * 2.0
        + bar.volatility() * 5.0
        + direction_confirmation(direction, bar) * 100.0;
    raw.clamp(0.0, MAX_EXPECTED_RETURN)
}

pub fn risk_score(symbol: &str, bar: &Bar, daily_count: u32, config: &DecisionConfig) -> f64 {
    let mut risk = 1.0;

    if bar.volume < config.low_volume {
        risk += 0.3;
    }
    let volatility = bar.volatility();
    if volatility > 0.05 {
        risk += volatility * 2.0;
    }
    if is_major(symbol, config) {
        risk *= 0.8;
    }
    if daily_count > config.quota_risk_free_trades {
        risk += 0.1 * (daily_count - config.quota_risk_free_trades) as f64;
    }

    risk
}

pub fn is_major(symbol: &str, config: &DecisionConfig) -> bool {
    config
        .major_symbols
        .iter()
        .any(|major| major.eq_ignore_ascii_case(symbol))
}

/// `confidence × expected_return`, plus `10 × |deviation|` once the live
/// allocation is more than the threshold away from target, plus 0.5 for
/// symbols traded less than average today.
pub fn priority(
    confidence: f64,
    expected_return: f64,
    allocation_deviation: Option<f64>,
    below_average_activity: bool,
    config: &DecisionConfig,
) -> f64 {
    let mut priority = confidence * expected_return;

    if let Some(deviation) = allocation_deviation {
        if deviation.abs() > config.deviation_boost_threshold {
            priority += deviation.abs() * 10.0;
        }
    }
    if below_average_activity {
        priority += 0.5;
    }

    priority
}

pub fn confidence_tier(confidence: f64) -> &'static str {
    if confidence >= 0.7 {
        "high confidence"
    } else if confidence >= 0.5 {
        "moderate confidence"
    } else {
        "speculative"
    }
}

pub fn return_tier(expected_return: f64) -> &'static str {
    if expected_return >= 3.0 {
        "high expected return"
    } else if expected_return >= 1.5 {
        "moderate expected return"
    } else {
        "small expected return"
    }
}

pub fn risk_tier(risk_score: f64) -> &'static str {
    if risk_score < 1.0 {
        "low risk"
    } else if risk_score < 1.3 {
        "moderate risk"
    } else {
        "higher risk"
    }
}

/// Human-readable summary of the three judgments.
pub fn describe(signal: &Signal, confidence: f64, expected_return: f64, risk_score: f64) -> String {
    format!(
        "{} {} via {} ({:.0}%); {} ({:.2}%); {} ({:.2})",
        confidence_tier(confidence),
        signal.direction.as_str(),
        signal.strategy,
        confidence * 100.0,
        return_tier(expected_return),
        expected_return,
        risk_tier(risk_score),
        risk_score,
    )
}
