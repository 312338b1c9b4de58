//! Bollinger Bands indicator

use crate::common::math;
use crate::indicators::closes;
use crate::models::indicators::BollingerBandsIndicator;
use crate::models::Bar;

pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_STD_DEV: f64 = 2.0;
/// Half-width of the band used while history is shorter than the period.
pub const SYNTHETIC_BAND_PCT: f64 = 0.02;

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * standard deviation)
/// Lower Band = Middle - (std_dev * standard deviation)
///
/// With fewer than `period` bars the band is ±2% around the last close.
pub fn calculate_bollinger_bands(
    bars: &[Bar],
    period: usize,
    std_dev: f64,
) -> Option<BollingerBandsIndicator> {
    let last = bars.last()?.close;

    if bars.len() < period {
        let upper = last * (1.0 + SYNTHETIC_BAND_PCT);
        let lower = last * (1.0 - SYNTHETIC_BAND_PCT);
        return Some(BollingerBandsIndicator {
            upper,
            middle: last,
            lower,
            bandwidth: bandwidth(upper, lower, last),
            synthetic: true,
        });
    }

    let closes = closes(bars);
    let middle = math::sma(&closes, period)?;
    let std = math::standard_deviation(&closes, period)?;

    let upper = middle + (std_dev * std);
    let lower = middle - (std_dev * std);

    Some(BollingerBandsIndicator {
        upper,
        middle,
        lower,
        bandwidth: bandwidth(upper, lower, middle),
        synthetic: false,
    })
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(bars: &[Bar]) -> Option<BollingerBandsIndicator> {
    calculate_bollinger_bands(bars, BOLLINGER_PERIOD, BOLLINGER_STD_DEV)
}

fn bandwidth(upper: f64, lower: f64, middle: f64) -> f64 {
    if middle == 0.0 {
        return 0.0;
    }
    (upper - lower) / middle
}
