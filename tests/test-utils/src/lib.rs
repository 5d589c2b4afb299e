//! Test utilities for the market data gateway
//!
//! - fixtures: upstream payloads in each provider's wire format
//! - mocks: a wiremock server standing in for every upstream
//! - helpers: logging and date helpers

pub mod fixtures;
pub mod helpers;
pub mod mocks;

pub use fixtures::*;
pub use helpers::*;
pub use mocks::*;
