//! Error types for the strategy core.
//!
//! Nothing here is fatal: every variant resolves to "no output" for one
//! symbol on one tick.

/// Why a scored signal was not accepted as an opportunity.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RejectionReason {
    #[error("confidence {confidence:.3} below minimum {minimum:.3}")]
    LowConfidence { confidence: f64, minimum: f64 },

    #[error("expected return {expected_return:.3}% below minimum {minimum:.3}%")]
    LowExpectedReturn { expected_return: f64, minimum: f64 },

    #[error("daily quota reached: {count}/{quota} trades today")]
    DailyQuotaReached { count: u32, quota: u32 },
}

impl RejectionReason {
    /// Short label used for metrics and log fields.
    pub fn label(&self) -> &'static str {
        match self {
            RejectionReason::LowConfidence { .. } => "low_confidence",
            RejectionReason::LowExpectedReturn { .. } => "low_expected_return",
            RejectionReason::DailyQuotaReached { .. } => "daily_quota_reached",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("computation failed for {symbol}: {reason}")]
    ComputationFailure { symbol: String, reason: String },

    #[error("opportunity rejected: {0}")]
    Rejected(#[from] RejectionReason),

    #[error("invalid target allocation for {symbol}: {weight}")]
    InvalidAllocation { symbol: String, weight: f64 },

    #[error("invalid config value {key}: {reason}")]
    Config { key: String, reason: String },

    #[error("{source_name} failed: {reason}")]
    Collaborator { source_name: String, reason: String },
}

impl EngineError {
    pub fn computation(symbol: &str, reason: impl Into<String>) -> Self {
        EngineError::ComputationFailure {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }

    /// The structured rejection cause, if this error is a rejection.
    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            EngineError::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}
