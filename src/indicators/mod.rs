//! Indicator computation over bar slices.

pub mod momentum;
pub mod volatility;
pub mod volume;

use crate::models::Bar;

pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}
