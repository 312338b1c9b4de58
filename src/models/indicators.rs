use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    /// Histogram computed without the most recent bar.
    pub previous_histogram: f64,
}

impl MacdIndicator {
    pub fn is_bullish(&self) -> bool {
        self.macd > self.signal && self.histogram > 0.0
    }

    pub fn is_bearish(&self) -> bool {
        self.macd < self.signal && self.histogram < 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBandsIndicator {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    /// Band width relative to the middle band.
    pub bandwidth: f64,
    /// True when fewer than `period` closes were available and the band is
    /// a fixed percentage around the last close.
    #[serde(default)]
    pub synthetic: bool,
}

impl BollingerBandsIndicator {
    /// Position of `price` inside the band: 0 at the lower band, 1 at the upper.
    pub fn position(&self, price: f64) -> f64 {
        let width = self.upper - self.lower;
        if width == 0.0 {
            return 0.5;
        }
        (price - self.lower) / width
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeIndicator {
    pub volume: f64,
    pub volume_ma: f64,
    pub volume_ma_period: u32,
}

impl VolumeIndicator {
    pub fn ratio(&self) -> f64 {
        if self.volume_ma == 0.0 {
            return 0.0;
        }
        self.volume / self.volume_ma
    }

    pub fn is_spike(&self, multiplier: f64) -> bool {
        self.volume > self.volume_ma * multiplier
    }
}

/// Indicator snapshot recomputed on every analysis call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub rsi: RsiIndicator,
    pub macd: MacdIndicator,
    pub bollinger: BollingerBandsIndicator,
    pub volume: VolumeIndicator,
}

impl IndicatorSet {
    pub fn is_finite(&self) -> bool {
        [
            self.rsi.value,
            self.macd.macd,
            self.macd.signal,
            self.macd.histogram,
            self.macd.previous_histogram,
            self.bollinger.upper,
            self.bollinger.middle,
            self.bollinger.lower,
            self.bollinger.bandwidth,
            self.volume.volume,
            self.volume.volume_ma,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}
