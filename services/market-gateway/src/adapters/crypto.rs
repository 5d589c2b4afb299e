//! Crypto adapter (single exchange, daily bars)

use super::SourceAdapter;
use crate::errors::{GatewayError, GatewayResult};
use crate::providers::{CryptoOhlcvProvider, OhlcvTuple};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use common::{CanonicalBar, CanonicalSeries, DateRange, RequestParams, Schema};
use tracing::{debug, info};

/// Bar interval requested from the exchange
pub const TIMEFRAME: &str = "1d";

/// Default number of bars requested from `since`
pub const DEFAULT_LOOKBACK_LIMIT: u32 = 1000;

/// Crypto adapter
pub struct CryptoAdapter {
    provider: Box<dyn CryptoOhlcvProvider>,
    lookback_limit: u32,
}

impl CryptoAdapter {
    pub fn new(provider: Box<dyn CryptoOhlcvProvider>) -> Self {
        Self {
            provider,
            lookback_limit: DEFAULT_LOOKBACK_LIMIT,
        }
    }

    #[must_use]
    pub fn with_lookback_limit(mut self, limit: u32) -> Self {
        self.lookback_limit = limit;
        self
    }
}

/// Midnight UTC of `date` in epoch milliseconds
#[must_use]
pub fn since_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Label positional bars, index by UTC date, then keep `range` only.
///
/// The exchange honours `since` and a row limit but no upper bound, so the
/// range filter here is what keeps bars past `range.end` out.
pub fn normalize_ohlcv(
    rows: &[OhlcvTuple],
    range: &DateRange,
) -> GatewayResult<Option<CanonicalSeries>> {
    if rows.is_empty() {
        return Ok(None);
    }

    let bars = rows
        .iter()
        .map(|&(ts, open, high, low, close, volume)| {
            let date = DateTime::from_timestamp_millis(ts)
                .ok_or_else(|| GatewayError::Parse(format!("bar timestamp out of range: {ts}")))?
                .date_naive();
            Ok(CanonicalBar::ohlc(date, open, high, low, close).with_volume(volume))
        })
        .collect::<GatewayResult<Vec<_>>>()?;

    let series = CanonicalSeries::from_bars(Schema::Ohlcv, bars).within(range);
    Ok(Some(series))
}

#[async_trait]
impl SourceAdapter for CryptoAdapter {
    async fn fetch(&self, params: &RequestParams) -> GatewayResult<Option<CanonicalSeries>> {
        let since = since_millis(params.range.start);
        let rows = self
            .provider
            .fetch_ohlcv(&params.symbol, TIMEFRAME, since, self.lookback_limit)
            .await?;
        debug!("Exchange returned {} bars for {}", rows.len(), params.symbol);

        let series = normalize_ohlcv(&rows, &params.range)?;
        match &series {
            Some(s) => info!(
                "Normalized {} of {} crypto bars for {} in {}",
                s.len(),
                rows.len(),
                params.symbol,
                params.range
            ),
            None => info!("No crypto data for {} since {}", params.symbol, params.range.start),
        }
        Ok(series)
    }
}
