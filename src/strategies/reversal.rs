//! Mean-reverting strategies: oversold/overbought turns.

use super::Candidate;
use crate::models::{Bar, IndicatorSet, SignalDirection};

/// Oversold RSI with a bullish MACD, or overbought RSI with a bearish one.
pub fn rsi_macd_reversal(_bar: &Bar, ind: &IndicatorSet) -> Option<Candidate> {
    let rsi = ind.rsi.value;
    let macd = &ind.macd;

    if rsi < 30.0 && macd.is_bullish() {
        let mut confidence = 0.7;
        if rsi < 25.0 {
            confidence += 0.1;
        }
        // histogram just crossed zero
        if macd.previous_histogram <= 0.0 {
            confidence += 0.1;
        }
        return Some(Candidate::new(SignalDirection::Long, confidence));
    }

    if rsi > 70.0 && macd.is_bearish() {
        let mut confidence = 0.7;
        if rsi > 75.0 {
            confidence += 0.1;
        }
        if macd.previous_histogram >= 0.0 {
            confidence += 0.1;
        }
        return Some(Candidate::new(SignalDirection::Short, confidence));
    }

    None
}

/// Price pinned against an outer band with RSI agreeing.
pub fn bollinger_mean_reversion(bar: &Bar, ind: &IndicatorSet) -> Option<Candidate> {
    let rsi = ind.rsi.value;
    let bands = &ind.bollinger;
    let position = bands.position(bar.close);

    if position < 0.1 && rsi < 40.0 {
        let mut confidence = 0.65;
        if bar.close < bands.lower {
            confidence += 0.1;
        }
        if rsi < 30.0 {
            confidence += 0.1;
        }
        return Some(Candidate::new(SignalDirection::Long, confidence));
    }

    if position > 0.9 && rsi > 60.0 {
        let mut confidence = 0.65;
        if bar.close > bands.upper {
            confidence += 0.1;
        }
        if rsi > 70.0 {
            confidence += 0.1;
        }
        return Some(Candidate::new(SignalDirection::Short, confidence));
    }

    None
}
