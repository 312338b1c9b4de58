//! RSI (Relative Strength Index) indicator

use crate::models::indicators::RsiIndicator;
use crate::models::Bar;

pub const RSI_PERIOD: u32 = 14;

/// Calculate RSI over the last `period` close-to-close deltas.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Returns 100 when the average loss is zero.
pub fn calculate_rsi(bars: &[Bar], period: u32) -> Option<RsiIndicator> {
    let period_len = period as usize;
    if period == 0 || bars.len() < period_len + 1 {
        return None;
    }

    let window = &bars[bars.len() - (period_len + 1)..];
    let (gains, losses) = window
        .windows(2)
        .map(|pair| pair[1].close - pair[0].close)
        .fold((0.0, 0.0), |(gains, losses), change| {
            if change > 0.0 {
                (gains + change, losses)
            } else {
                (gains, losses + change.abs())
            }
        });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return Some(RsiIndicator {
            value: 100.0,
            period,
        });
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));

    Some(RsiIndicator {
        value: rsi.clamp(0.0, 100.0),
        period,
    })
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(bars: &[Bar]) -> Option<RsiIndicator> {
    calculate_rsi(bars, RSI_PERIOD)
}
