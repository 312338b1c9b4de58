//! MACD (Moving Average Convergence Divergence) indicator
//!
//! The signal line is not a true EMA of the MACD line. It is the mean of
//! `signal_period` MACD values, each recomputed from scratch on a
//! successively shorter prefix of the close series.

use crate::common::math;
use crate::indicators::closes;
use crate::models::indicators::MacdIndicator;
use crate::models::Bar;

pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

/// MACD line, signal and histogram for one close series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdSnapshot {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// EMA(fast) - EMA(slow) over the whole slice.
pub fn macd_line(closes: &[f64], fast: usize, slow: usize) -> Option<f64> {
    Some(math::ema(closes, fast)? - math::ema(closes, slow)?)
}

/// Closes needed for one snapshot.
pub fn min_closes(slow: usize, signal: usize) -> usize {
    slow + signal.saturating_sub(1)
}

pub fn macd_snapshot(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Option<MacdSnapshot> {
    if signal_period == 0 || closes.len() < min_closes(slow, signal_period) {
        return None;
    }

    let line = macd_line(closes, fast, slow)?;

    let mut total = 0.0;
    for offset in 0..signal_period {
        total += macd_line(&closes[..closes.len() - offset], fast, slow)?;
    }
    let signal = total / signal_period as f64;

    Some(MacdSnapshot {
        line,
        signal,
        histogram: line - signal,
    })
}

/// Calculate MACD, including the histogram as it stood one bar earlier.
pub fn calculate_macd(
    bars: &[Bar],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Option<MacdIndicator> {
    let closes = closes(bars);
    if closes.len() < min_closes(slow_period, signal_period) + 1 {
        return None;
    }

    let current = macd_snapshot(&closes, fast_period, slow_period, signal_period)?;
    let previous = macd_snapshot(
        &closes[..closes.len() - 1],
        fast_period,
        slow_period,
        signal_period,
    )?;

    Some(MacdIndicator {
        macd: current.line,
        signal: current.signal,
        histogram: current.histogram,
        previous_histogram: previous.histogram,
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(bars: &[Bar]) -> Option<MacdIndicator> {
    calculate_macd(bars, MACD_FAST, MACD_SLOW, MACD_SIGNAL)
}
