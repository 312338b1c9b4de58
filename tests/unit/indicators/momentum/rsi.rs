//! Unit tests for RSI

use crate::support::{bars_from_closes, falling_bars, rising_bars};
use approx::assert_relative_eq;
use surgebot::indicators::momentum::{calculate_rsi, calculate_rsi_default};

#[test]
fn test_rsi_insufficient_data() {
    let bars = rising_bars(14);
    assert!(calculate_rsi_default(&bars).is_none());
    assert!(calculate_rsi_default(&rising_bars(15)).is_some());
}

#[test]
fn test_rsi_all_gains_is_100() {
    let rsi = calculate_rsi_default(&rising_bars(30)).unwrap();
    assert_eq!(rsi.value, 100.0);
    assert_eq!(rsi.period, 14);
}

#[test]
fn test_rsi_flat_series_is_100() {
    // no losses at all: average loss is zero
    let bars = bars_from_closes(&[100.0; 20], 1_000.0);
    assert_eq!(calculate_rsi_default(&bars).unwrap().value, 100.0);
}

#[test]
fn test_rsi_all_losses_is_0() {
    let rsi = calculate_rsi_default(&falling_bars(30)).unwrap();
    assert_relative_eq!(rsi.value, 0.0);
}

#[test]
fn test_rsi_balanced_moves_is_50() {
    let closes: Vec<f64> = (0..15).map(|i| if i % 2 == 0 { 100.0 } else { 101.0 }).collect();
    let rsi = calculate_rsi(&bars_from_closes(&closes, 1_000.0), 14).unwrap();
    assert_relative_eq!(rsi.value, 50.0, epsilon = 1e-9);
}

#[test]
fn test_rsi_only_uses_last_period_deltas() {
    // a crash long ago is outside the 14-delta window
    let mut closes = vec![200.0, 100.0];
    closes.extend((0..14).map(|i| 100.0 + i as f64));
    let rsi = calculate_rsi_default(&bars_from_closes(&closes, 1_000.0)).unwrap();
    assert_eq!(rsi.value, 100.0);
}
