use super::Candidate;
use crate::models::{Bar, IndicatorSet, SignalDirection};

/// Bandwidth under which the band counts as squeezed.
pub const SQUEEZE_BANDWIDTH: f64 = 0.02;
pub const VOLUME_SPIKE_MULTIPLIER: f64 = 1.5;

/// Close outside a band on a volume spike, stronger out of a squeeze.
pub fn bollinger_breakout(bar: &Bar, ind: &IndicatorSet) -> Option<Candidate> {
    if !ind.volume.is_spike(VOLUME_SPIKE_MULTIPLIER) {
        return None;
    }

    let rsi = ind.rsi.value;
    let bands = &ind.bollinger;
    let squeezed = bands.bandwidth < SQUEEZE_BANDWIDTH;

    if bar.close > bands.upper && rsi > 55.0 {
        let mut confidence = 0.8;
        if squeezed {
            confidence += 0.1;
        }
        if rsi > 60.0 {
            confidence += 0.05;
        }
        return Some(Candidate::new(SignalDirection::Long, confidence));
    }

    if bar.close < bands.lower && rsi < 45.0 {
        let mut confidence = 0.8;
        if squeezed {
            confidence += 0.1;
        }
        if rsi < 40.0 {
            confidence += 0.05;
        }
        return Some(Candidate::new(SignalDirection::Short, confidence));
    }

    None
}
