//! Moving averages and dispersion over close series.

/// Arithmetic mean of the whole slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Simple moving average of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    mean(&values[values.len() - period..])
}

/// Exponential moving average over the whole slice.
///
/// Seeded with the first value, smoothing `2 / (period + 1)`.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let current = values[1..]
        .iter()
        .fold(values[0], |previous, &value| ema_from_previous(value, previous, period));
    Some(current)
}

/// One EMA step.
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let k = 2.0 / (period as f64 + 1.0);
    value * k + previous * (1.0 - k)
}

/// Population standard deviation of the last `period` values.
pub fn standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    let avg = sma(values, period)?;
    let window = &values[values.len() - period..];
    let variance = window.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / period as f64;
    Some(variance.sqrt())
}
