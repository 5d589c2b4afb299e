//! A-share equity adapter

use super::{SourceAdapter, parse_f64};
use crate::errors::{GatewayError, GatewayResult};
use crate::providers::{EquityHistoryProvider, EquityRawTable};
use async_trait::async_trait;
use chrono::NaiveDate;
use common::{CanonicalBar, CanonicalSeries, RequestParams, Schema};
use tracing::{debug, info};

const DATE_LABEL: &str = "日期";
const OPEN_LABEL: &str = "开盘";
const HIGH_LABEL: &str = "最高";
const LOW_LABEL: &str = "最低";
const CLOSE_LABEL: &str = "收盘";
const VOLUME_LABEL: &str = "成交量";

/// Compact date format the history source expects
const REQUEST_DATE_FORMAT: &str = "%Y%m%d";

/// Equity adapter
///
/// Trusts the source to honour the requested range: rows are renamed,
/// re-indexed by date and narrowed to OHLCV, never range-filtered.
pub struct EquityAdapter {
    provider: Box<dyn EquityHistoryProvider>,
}

impl EquityAdapter {
    pub fn new(provider: Box<dyn EquityHistoryProvider>) -> Self {
        Self { provider }
    }
}

fn column(raw: &EquityRawTable, label: &str) -> GatewayResult<usize> {
    raw.column_index(label)
        .ok_or_else(|| GatewayError::Parse(format!("equity history lacks column {label}")))
}

fn parse_row_date(value: &str) -> GatewayResult<NaiveDate> {
    // Usually `YYYY-MM-DD`, occasionally with a time part
    let day = value.trim().split([' ', 'T']).next().unwrap_or_default();
    common::parse_date(day)
        .map_err(|_| GatewayError::Parse(format!("equity row date '{value}'")))
}

/// Rename the native labels, index by date and keep only OHLCV
pub fn normalize_equity(raw: &EquityRawTable) -> GatewayResult<Option<CanonicalSeries>> {
    if raw.is_empty() {
        return Ok(None);
    }

    let date_idx = column(raw, DATE_LABEL)?;
    let open_idx = column(raw, OPEN_LABEL)?;
    let high_idx = column(raw, HIGH_LABEL)?;
    let low_idx = column(raw, LOW_LABEL)?;
    let close_idx = column(raw, CLOSE_LABEL)?;
    let volume_idx = column(raw, VOLUME_LABEL)?;

    let mut bars = Vec::with_capacity(raw.rows.len());
    for row in &raw.rows {
        let cell = |idx: usize| {
            row.get(idx)
                .map(String::as_str)
                .ok_or_else(|| GatewayError::Parse(format!("equity row too short: {row:?}")))
        };

        let bar = CanonicalBar::ohlc(
            parse_row_date(cell(date_idx)?)?,
            parse_f64(cell(open_idx)?, "Open")?,
            parse_f64(cell(high_idx)?, "High")?,
            parse_f64(cell(low_idx)?, "Low")?,
            parse_f64(cell(close_idx)?, "Close")?,
        )
        .with_volume(parse_f64(cell(volume_idx)?, "Volume")?);
        bars.push(bar);
    }

    Ok(Some(CanonicalSeries::from_bars(Schema::Ohlcv, bars)))
}

#[async_trait]
impl SourceAdapter for EquityAdapter {
    async fn fetch(&self, params: &RequestParams) -> GatewayResult<Option<CanonicalSeries>> {
        let start = params.range.start.format(REQUEST_DATE_FORMAT).to_string();
        let end = params.range.end.format(REQUEST_DATE_FORMAT).to_string();

        let raw = self
            .provider
            .fetch_history(&params.symbol, &start, &end)
            .await?;

        let Some(raw) = raw else {
            debug!("Equity source returned no payload for {}", params.symbol);
            return Ok(None);
        };

        let series = normalize_equity(&raw)?;
        match &series {
            Some(s) => info!("Normalized {} equity bars for {}", s.len(), params.symbol),
            None => info!("No equity data for {} in {}", params.symbol, params.range),
        }
        Ok(series)
    }
}
