//! Trend-following strategies.

use super::Candidate;
use crate::models::{Bar, IndicatorSet, SignalDirection};

/// RSI, MACD line and the middle band all pointing the same way.
pub fn triple_indicator_trend(bar: &Bar, ind: &IndicatorSet) -> Option<Candidate> {
    let rsi = ind.rsi.value;
    let macd = &ind.macd;
    let middle = ind.bollinger.middle;

    if rsi > 60.0 && macd.macd > 0.0 && bar.close > middle {
        let mut confidence = 0.75;
        if macd.histogram > 0.0 {
            confidence += 0.05;
        }
        if macd.macd > macd.signal {
            confidence += 0.05;
        }
        if rsi > 70.0 {
            confidence += 0.05;
        }
        return Some(Candidate::new(SignalDirection::Long, confidence));
    }

    if rsi < 40.0 && macd.macd < 0.0 && bar.close < middle {
        let mut confidence = 0.75;
        if macd.histogram < 0.0 {
            confidence += 0.05;
        }
        if macd.macd < macd.signal {
            confidence += 0.05;
        }
        if rsi < 30.0 {
            confidence += 0.05;
        }
        return Some(Candidate::new(SignalDirection::Short, confidence));
    }

    None
}

/// Growing histogram while price sits in the body of the band.
pub fn macd_momentum(bar: &Bar, ind: &IndicatorSet) -> Option<Candidate> {
    let position = ind.bollinger.position(bar.close);
    if !(0.2..=0.8).contains(&position) {
        return None;
    }

    let rsi = ind.rsi.value;
    let macd = &ind.macd;

    if macd.histogram > 0.0 && macd.histogram > macd.previous_histogram && rsi > 45.0 {
        let mut confidence = 0.7;
        if macd.macd > macd.signal {
            confidence += 0.05;
        }
        if rsi > 50.0 && rsi < 70.0 {
            confidence += 0.05;
        }
        return Some(Candidate::new(SignalDirection::Long, confidence));
    }

    if macd.histogram < 0.0 && macd.histogram < macd.previous_histogram && rsi < 55.0 {
        let mut confidence = 0.7;
        if macd.macd < macd.signal {
            confidence += 0.05;
        }
        if rsi > 30.0 && rsi < 50.0 {
            confidence += 0.05;
        }
        return Some(Candidate::new(SignalDirection::Short, confidence));
    }

    None
}
