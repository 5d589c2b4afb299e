//! Core types for the market data gateway
//!
//! Everything a caller sees from a history request lives here: the closed
//! market/provider enums, the inclusive date range and the canonical
//! date-indexed OHLC(V) series every source adapter produces.

#![deny(clippy::all)]

pub mod errors;
pub mod types;

pub use errors::CommonError;
pub use types::{
    CanonicalBar, CanonicalSeries, DateRange, ForexProvider, MarketCategory, RequestParams, Schema,
    parse_date,
};
