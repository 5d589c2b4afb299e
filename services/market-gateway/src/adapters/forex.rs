//! Forex adapter
//!
//! Two upstreams, picked per request by [`ForexProvider`]:
//! - yfinance-style quote download, bars arrive in canonical naming;
//! - Alpha Vantage `FX_DAILY`, a date-keyed JSON object parsed here.
//!
//! Forex output never carries volume.

use super::{SourceAdapter, parse_f64};
use crate::errors::{GatewayError, GatewayResult};
use crate::providers::{ForexDailyBar, ForexQuoteProvider, FxTimeSeriesProvider};
use async_trait::async_trait;
use chrono::NaiveDate;
use common::{CanonicalBar, CanonicalSeries, DateRange, ForexProvider, RequestParams, Schema};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Key of the daily series in an `FX_DAILY` response
pub const TIME_SERIES_KEY: &str = "Time Series FX (Daily)";

/// Keys the provider uses for throttling notices and request errors
const NOTICE_KEYS: [&str; 3] = ["Note", "Information", "Error Message"];

const CURRENCY_CODE_LEN: usize = 3;

/// Forex adapter
pub struct ForexAdapter {
    quotes: Box<dyn ForexQuoteProvider>,
    time_series: Box<dyn FxTimeSeriesProvider>,
}

impl ForexAdapter {
    pub fn new(
        quotes: Box<dyn ForexQuoteProvider>,
        time_series: Box<dyn FxTimeSeriesProvider>,
    ) -> Self {
        Self {
            quotes,
            time_series,
        }
    }

    async fn fetch_yfinance(&self, params: &RequestParams) -> GatewayResult<Option<CanonicalSeries>> {
        let bars = self.quotes.download(&params.symbol, params.range).await?;
        let series = normalize_quotes(bars, &params.range);
        if series.is_none() {
            info!("No forex quotes for {} in {}", params.symbol, params.range);
        }
        Ok(series)
    }

    async fn fetch_alphavantage(
        &self,
        params: &RequestParams,
    ) -> GatewayResult<Option<CanonicalSeries>> {
        let api_key = params
            .forex_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(GatewayError::MissingCredential("alphavantage api key"))?;
        let (base, quote) = split_pair(&params.symbol)?;

        let body = self.time_series.fx_daily(base, quote, api_key).await?;
        let series = normalize_fx_daily(&body, &params.range)?;
        if series.is_none() {
            info!("No FX_DAILY series for {}/{}", base, quote);
        }
        Ok(series)
    }
}

/// Split a fixed-width pair symbol into base and quote currency codes.
///
/// The first three characters are the base, the next three the quote and
/// anything after (`EURUSD=X`) is ignored. Symbols that do not start with
/// six ASCII letters are rejected rather than sliced blindly.
pub fn split_pair(symbol: &str) -> GatewayResult<(&str, &str)> {
    let pair_len = CURRENCY_CODE_LEN * 2;
    let head = symbol
        .get(..pair_len)
        .ok_or_else(|| GatewayError::invalid_symbol(symbol, "need at least 6 characters"))?;

    if !head.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GatewayError::invalid_symbol(
            symbol,
            "first 6 characters must be two 3-letter currency codes",
        ));
    }

    Ok(head.split_at(CURRENCY_CODE_LEN))
}

/// Canonical series from quote-download bars, narrowed to `range`
pub fn normalize_quotes(bars: Vec<ForexDailyBar>, range: &DateRange) -> Option<CanonicalSeries> {
    if bars.is_empty() {
        return None;
    }

    let bars = bars
        .into_iter()
        .map(|b| CanonicalBar::ohlc(b.date, b.open, b.high, b.low, b.close))
        .collect();
    Some(CanonicalSeries::from_bars(Schema::Ohlc, bars).within(range))
}

/// OHLC value from an `FX_DAILY` day object (`"1. open"`, `"2. high"`, ...)
fn fx_field(day: &Map<String, Value>, name: &str, date: &str) -> GatewayResult<f64> {
    let value = day
        .iter()
        .find(|(key, _)| key.split_once(". ").map_or(key.as_str(), |(_, n)| n) == name)
        .map(|(_, value)| value)
        .ok_or_else(|| GatewayError::Parse(format!("{date}: missing {name}")))?;

    match value {
        Value::String(s) => parse_f64(s, name),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| GatewayError::Parse(format!("{date}: {name} out of range"))),
        other => Err(GatewayError::Parse(format!("{date}: {name} is {other}"))),
    }
}

/// Parse an `FX_DAILY` body into an ascending series narrowed to `range`.
///
/// A body without the series key (including throttling notices) or with an
/// empty series is the empty result.
pub fn normalize_fx_daily(body: &Value, range: &DateRange) -> GatewayResult<Option<CanonicalSeries>> {
    for key in NOTICE_KEYS {
        if let Some(notice) = body.get(key) {
            warn!("FX_DAILY {}: {}", key, notice);
        }
    }

    let Some(days) = body.get(TIME_SERIES_KEY).and_then(Value::as_object) else {
        debug!("FX_DAILY response has no {:?}", TIME_SERIES_KEY);
        return Ok(None);
    };
    if days.is_empty() {
        return Ok(None);
    }

    let mut bars = Vec::with_capacity(days.len());
    for (date_key, day) in days {
        let day = day
            .as_object()
            .ok_or_else(|| GatewayError::Parse(format!("{date_key}: expected an object")))?;
        let date = NaiveDate::parse_from_str(date_key, "%Y-%m-%d")
            .map_err(|e| GatewayError::Parse(format!("date key '{date_key}': {e}")))?;

        bars.push(CanonicalBar::ohlc(
            date,
            fx_field(day, "open", date_key)?,
            fx_field(day, "high", date_key)?,
            fx_field(day, "low", date_key)?,
            fx_field(day, "close", date_key)?,
        ));
    }

    // Provider order is newest first; from_bars sorts ascending
    Ok(Some(CanonicalSeries::from_bars(Schema::Ohlc, bars).within(range)))
}

#[async_trait]
impl SourceAdapter for ForexAdapter {
    async fn fetch(&self, params: &RequestParams) -> GatewayResult<Option<CanonicalSeries>> {
        debug!("Forex request for {} via {}", params.symbol, params.forex_provider);
        match params.forex_provider {
            ForexProvider::YFinance => self.fetch_yfinance(params).await,
            ForexProvider::AlphaVantage => self.fetch_alphavantage(params).await,
        }
    }
}
