//! Gateway error types

use common::CommonError;
use thiserror::Error;

/// Gateway error types
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Market category outside equity/crypto/forex
    #[error("Unsupported market: {0}")]
    UnsupportedMarket(String),

    /// Forex upstream outside yfinance/alphavantage
    #[error("Unsupported forex provider: {0}")]
    UnsupportedForexProvider(String),

    /// Provider needs a credential the request did not carry
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    /// Symbol the provider cannot be queried with
    #[error("Invalid symbol '{symbol}': {reason}")]
    InvalidSymbol { symbol: String, reason: String },

    /// Unparseable request date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Transport or HTTP status failure from a collaborator
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body that is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider payload with an unexpected shape or value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl GatewayError {
    /// True for errors caused by the request or setup rather than the
    /// environment; retrying them without changes cannot succeed.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedMarket(_)
                | Self::UnsupportedForexProvider(_)
                | Self::MissingCredential(_)
                | Self::InvalidSymbol { .. }
                | Self::InvalidDate(_)
                | Self::Config(_)
        )
    }

    pub(crate) fn invalid_symbol(symbol: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSymbol {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<CommonError> for GatewayError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::UnsupportedMarket(market) => Self::UnsupportedMarket(market),
            CommonError::UnsupportedForexProvider(provider) => {
                Self::UnsupportedForexProvider(provider)
            }
            CommonError::InvalidDate(date) => Self::InvalidDate(date),
        }
    }
}

/// Result alias used across the gateway
pub type GatewayResult<T> = Result<T, GatewayError>;
