//! Yahoo Finance chart client (forex daily quotes)

use super::{ForexDailyBar, ForexQuoteProvider, base_url};
use crate::config::ForexConfig;
use crate::errors::{GatewayError, GatewayResult};
use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate};
use common::DateRange;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

const CHART_PATH: &str = "/v8/finance/chart";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default, rename = "gmtoffset")]
    gmt_offset: i64,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Yahoo chart API client
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    /// Create client
    pub fn new(client: Client, config: &ForexConfig) -> Self {
        Self {
            client,
            base_url: base_url(&config.yahoo_base_url),
        }
    }

    /// `period1`/`period2` in epoch seconds.
    ///
    /// Bars are stamped at exchange-local midnight, which can fall on the
    /// previous UTC day, so `period1` starts a day early. `period2` is
    /// exclusive upstream so the day after `range.end` is requested. The
    /// adapter trims both extras with its range filter.
    fn periods(range: &DateRange) -> (i64, i64) {
        let midnight = |date: NaiveDate| date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        let before_start = range.start.checked_sub_days(Days::new(1)).unwrap_or(range.start);
        let after_end = range.end.checked_add_days(Days::new(1)).unwrap_or(range.end);
        (midnight(before_start), midnight(after_end))
    }

    /// Zip the chart columns into bars, skipping rows with missing prices
    fn parse_chart(result: ChartResult) -> GatewayResult<Vec<ForexDailyBar>> {
        let offset = result.meta.gmt_offset;
        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

        let mut bars = Vec::with_capacity(result.timestamp.len());
        for (idx, ts) in result.timestamp.iter().enumerate() {
            let cell = |column: &[Option<f64>]| column.get(idx).copied().flatten();
            let (Some(open), Some(high), Some(low), Some(close)) = (
                cell(&quote.open[..]),
                cell(&quote.high[..]),
                cell(&quote.low[..]),
                cell(&quote.close[..]),
            ) else {
                continue;
            };

            let date = ts
                .checked_add(offset)
                .and_then(|local| DateTime::from_timestamp(local, 0))
                .ok_or_else(|| GatewayError::Parse(format!("chart timestamp out of range: {ts}")))?
                .date_naive();

            bars.push(ForexDailyBar {
                date,
                open,
                high,
                low,
                close,
            });
        }

        Ok(bars)
    }
}

#[async_trait]
impl ForexQuoteProvider for YahooClient {
    async fn download(&self, ticker: &str, range: DateRange) -> GatewayResult<Vec<ForexDailyBar>> {
        let url = format!("{}{}/{}", self.base_url, CHART_PATH, ticker);
        let (period1, period2) = Self::periods(&range);
        debug!("Requesting chart for {} over {}", ticker, range);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            warn!("No chart data for {}", ticker);
            return Ok(Vec::new());
        }

        let body: ChartResponse = response.error_for_status()?.json().await?;
        if let Some(err) = body.chart.error {
            warn!("Chart error for {}: {} {}", ticker, err.code, err.description);
            return Ok(Vec::new());
        }

        match body.chart.result.and_then(|r| r.into_iter().next()) {
            Some(result) => Self::parse_chart(result),
            None => Ok(Vec::new()),
        }
    }
}
