//! Market data gateway
//!
//! Normalizes daily price history from three heterogeneous sources into one
//! canonical, date-indexed OHLC(V) series:
//! - adapters/: per-category normalization (equity, crypto, forex)
//! - providers/: upstream HTTP collaborators behind traits
//! - gateway: category dispatch, the public entry point
//!
//! Every request is one-shot and stateless: no retries, caching or streaming.

#![deny(clippy::all)]

pub mod adapters;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod providers;

pub use adapters::{CryptoAdapter, EquityAdapter, ForexAdapter, SourceAdapter};
pub use config::GatewayConfig;
pub use errors::{GatewayError, GatewayResult};
pub use gateway::MarketDataGateway;

pub use common::{
    CanonicalBar, CanonicalSeries, DateRange, ForexProvider, MarketCategory, RequestParams, Schema,
};
