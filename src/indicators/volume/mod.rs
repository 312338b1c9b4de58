//! Volume average over the trailing window.

use crate::common::math;
use crate::models::indicators::VolumeIndicator;
use crate::models::Bar;

pub const VOLUME_MA_PERIOD: usize = 20;

/// Current volume against the mean of the last `period` volumes (current bar
/// included). Shorter histories average whatever is available.
pub fn calculate_volume(bars: &[Bar], period: usize) -> Option<VolumeIndicator> {
    let current = bars.last()?.volume;
    let start = bars.len().saturating_sub(period);
    let volumes: Vec<f64> = bars[start..].iter().map(|b| b.volume).collect();
    let volume_ma = math::mean(&volumes)?;

    Some(VolumeIndicator {
        volume: current,
        volume_ma,
        volume_ma_period: period as u32,
    })
}

pub fn calculate_volume_default(bars: &[Bar]) -> Option<VolumeIndicator> {
    calculate_volume(bars, VOLUME_MA_PERIOD)
}
