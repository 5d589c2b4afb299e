//! Source adapters
//!
//! One adapter per market category. Each calls its collaborator once (or
//! not at all when the request is invalid) and hands the raw record set to a
//! pure `normalize_*` function that builds a fresh [`CanonicalSeries`].

pub mod crypto;
pub mod equity;
pub mod forex;

pub use crypto::CryptoAdapter;
pub use equity::EquityAdapter;
pub use forex::ForexAdapter;

use crate::errors::{GatewayError, GatewayResult};
use async_trait::async_trait;
use common::{CanonicalSeries, RequestParams};

/// Adapter from one market category to the canonical schema
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Fetch and normalize; `Ok(None)` when the source has no data
    async fn fetch(&self, params: &RequestParams) -> GatewayResult<Option<CanonicalSeries>>;
}

/// Parse a provider number cell
pub(crate) fn parse_f64(value: &str, field: &str) -> GatewayResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| GatewayError::Parse(format!("{field} '{value}': {e}")))
}
