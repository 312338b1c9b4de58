use crate::strategies::StrategyId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalDirection {
    Long,
    Short,
}

impl SignalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalDirection::Long => "long",
            SignalDirection::Short => "short",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentBias {
    Bullish,
    Bearish,
    Neutral,
}

/// External sentiment attached to a signal before it reaches the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentHint {
    pub bias: SentimentBias,
    /// 0..1
    pub confidence: f64,
}

impl SentimentHint {
    pub fn new(bias: SentimentBias, confidence: f64) -> Self {
        Self {
            bias,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn aligns_with(&self, direction: SignalDirection) -> bool {
        matches!(
            (self.bias, direction),
            (SentimentBias::Bullish, SignalDirection::Long)
                | (SentimentBias::Bearish, SignalDirection::Short)
        )
    }
}

/// Indicator readings captured when the signal fired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalMetadata {
    pub price: f64,
    pub rsi: f64,
    pub macd_histogram: f64,
    pub band_position: f64,
    pub bandwidth: f64,
    pub volume_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sentiment: Option<SentimentHint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub at: DateTime<Utc>,
    pub symbol: String,
    pub timeframe: String,
    pub direction: SignalDirection,
    /// 0..0.95
    pub confidence: f64,
    pub strategy: StrategyId,
    pub metadata: SignalMetadata,
}

impl Signal {
    pub fn with_sentiment(mut self, sentiment: SentimentHint) -> Self {
        self.metadata.sentiment = Some(sentiment);
        self
    }

    pub fn name(&self) -> &'static str {
        self.strategy.as_str()
    }
}
