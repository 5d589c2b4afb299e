//! Errors raised while parsing caller-supplied request values

use thiserror::Error;

/// Validation errors for request values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommonError {
    /// Market category outside the supported set
    #[error("Unsupported market: {0}")]
    UnsupportedMarket(String),

    /// Forex upstream outside the supported set
    #[error("Unsupported forex provider: {0}")]
    UnsupportedForexProvider(String),

    /// Date string that is neither `YYYY-MM-DD` nor `YYYYMMDD`
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
