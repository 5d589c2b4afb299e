//! Upstream collaborators
//!
//! Each trait is the seam between an adapter and the outside world. The
//! HTTP implementations below only fetch and lightly decode; they return
//! provider-native records and leave every renaming, date conversion and
//! range filtering decision to the adapters.

pub mod alphavantage;
pub mod binance;
pub mod eastmoney;
pub mod yahoo;

pub use alphavantage::AlphaVantageClient;
pub use binance::BinanceClient;
pub use eastmoney::EastmoneyClient;
pub use yahoo::YahooClient;

use crate::config::HttpConfig;
use crate::errors::GatewayResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use common::DateRange;
use reqwest::Client;
use std::time::Duration;

/// Positional exchange bar: `(timestamp_ms, open, high, low, close, volume)`
pub type OhlcvTuple = (i64, f64, f64, f64, f64, f64);

/// Equity history as the provider labels it
///
/// `columns` holds the provider's own (Chinese) column labels and every row
/// has one cell per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquityRawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl EquityRawTable {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column label
    #[must_use]
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }
}

/// Daily forex bar already in canonical naming
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForexDailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// A-share daily history source
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquityHistoryProvider: Send + Sync {
    /// Fetch daily rows for `symbol` between two `YYYYMMDD` dates.
    /// `None` means the provider answered without a payload.
    async fn fetch_history(
        &self,
        symbol: &str,
        start_date: &str,
        end_date: &str,
    ) -> GatewayResult<Option<EquityRawTable>>;
}

/// Crypto exchange OHLCV source
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CryptoOhlcvProvider: Send + Sync {
    /// Fetch up to `limit` bars of `timeframe` starting at `since_ms`
    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: &str,
        since_ms: i64,
        limit: u32,
    ) -> GatewayResult<Vec<OhlcvTuple>>;
}

/// Bulk quote download keyed by ticker and date range
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForexQuoteProvider: Send + Sync {
    /// Download daily bars for `ticker` over `range`
    async fn download(&self, ticker: &str, range: DateRange) -> GatewayResult<Vec<ForexDailyBar>>;
}

/// FX daily time-series JSON API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FxTimeSeriesProvider: Send + Sync {
    /// Fetch the full daily series for `from_symbol`/`to_symbol` as raw JSON
    async fn fx_daily(
        &self,
        from_symbol: &str,
        to_symbol: &str,
        api_key: &str,
    ) -> GatewayResult<serde_json::Value>;
}

/// Build the HTTP client shared by the collaborators
pub fn build_http_client(config: &HttpConfig) -> GatewayResult<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()?)
}

/// Trim a configured base URL so paths can be appended
pub(crate) fn base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
