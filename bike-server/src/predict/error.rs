//! Predictor error types.

/// Errors from model loading and inference.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PredictError {
    /// Artifact file could not be read
    #[error("failed to read model artifact {path}: {message}")]
    Load { path: String, message: String },

    /// Artifact file was read but could not be parsed
    #[error("corrupt model artifact {path}: {message}")]
    Corrupt { path: String, message: String },

    /// Prediction target was neither `bike` nor `stand`
    #[error("invalid prediction target: {0:?} (expected \"bike\" or \"stand\")")]
    InvalidTarget(String),

    /// Timestamp outside the representable range
    #[error("timestamp out of range: {0}")]
    BadTimestamp(i64),
}
