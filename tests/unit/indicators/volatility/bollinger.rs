//! Unit tests for Bollinger Bands

use crate::support::{bars_from_closes, rising_bars};
use approx::assert_relative_eq;
use surgebot::indicators::volatility::calculate_bollinger_bands_default;

#[test]
fn test_bollinger_synthetic_band_below_period() {
    let bars = rising_bars(10);
    let last = bars.last().unwrap().close;
    let bands = calculate_bollinger_bands_default(&bars).unwrap();

    assert!(bands.synthetic);
    assert_relative_eq!(bands.upper, last * 1.02);
    assert_relative_eq!(bands.lower, last * 0.98);
    assert_relative_eq!(bands.middle, last);
    assert_relative_eq!(bands.bandwidth, 0.04, epsilon = 1e-12);
}

#[test]
fn test_bollinger_empty_history() {
    assert!(calculate_bollinger_bands_default(&[]).is_none());
}

#[test]
fn test_bollinger_known_values() {
    let closes: Vec<f64> = (1..=20).map(f64::from).collect();
    let bands = calculate_bollinger_bands_default(&bars_from_closes(&closes, 1_000.0)).unwrap();
    let std = (399.0_f64 / 12.0).sqrt();

    assert!(!bands.synthetic);
    assert_relative_eq!(bands.middle, 10.5, epsilon = 1e-12);
    assert_relative_eq!(bands.upper, 10.5 + 2.0 * std, epsilon = 1e-9);
    assert_relative_eq!(bands.lower, 10.5 - 2.0 * std, epsilon = 1e-9);
    assert_relative_eq!(bands.bandwidth, 4.0 * std / 10.5, epsilon = 1e-9);
}

#[test]
fn test_bollinger_flat_series_collapses() {
    let bands = calculate_bollinger_bands_default(&bars_from_closes(&[80.0; 25], 1_000.0)).unwrap();
    assert_eq!(bands.upper, bands.lower);
    assert_eq!(bands.bandwidth, 0.0);
    assert_eq!(bands.position(80.0), 0.5);
}

#[test]
fn test_band_position() {
    let bands = calculate_bollinger_bands_default(&rising_bars(40)).unwrap();
    assert_relative_eq!(bands.position(bands.lower), 0.0, epsilon = 1e-12);
    assert_relative_eq!(bands.position(bands.upper), 1.0, epsilon = 1e-12);
}
