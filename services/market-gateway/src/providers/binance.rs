//! Binance spot klines client

use super::{CryptoOhlcvProvider, OhlcvTuple, base_url};
use crate::config::CryptoConfig;
use crate::errors::{GatewayError, GatewayResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

const KLINES_PATH: &str = "/api/v3/klines";

/// Binance REST client for historical klines
pub struct BinanceClient {
    client: Client,
    base_url: String,
}

impl BinanceClient {
    /// Create client
    pub fn new(client: Client, config: &CryptoConfig) -> Self {
        Self {
            client,
            base_url: base_url(&config.base_url),
        }
    }

    /// Exchange pair (`BTC/USDT`) to Binance market id (`BTCUSDT`)
    #[must_use]
    pub fn market_id(symbol: &str) -> String {
        symbol.replace(['/', '-'], "").to_uppercase()
    }

    fn field_f64(row: &[Value], idx: usize) -> GatewayResult<f64> {
        match row.get(idx) {
            Some(Value::String(s)) => s
                .parse::<f64>()
                .map_err(|e| GatewayError::Parse(format!("kline field {idx} '{s}': {e}"))),
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| GatewayError::Parse(format!("kline field {idx} out of range"))),
            other => Err(GatewayError::Parse(format!(
                "kline field {idx} missing or malformed: {other:?}"
            ))),
        }
    }

    /// Kline rows to positional tuples
    fn parse_klines(rows: &[Vec<Value>]) -> GatewayResult<Vec<OhlcvTuple>> {
        rows.iter()
            .map(|row| {
                let open_time = row.first().and_then(Value::as_i64).ok_or_else(|| {
                    GatewayError::Parse(format!("kline open time missing: {row:?}"))
                })?;
                Ok((
                    open_time,
                    Self::field_f64(row, 1)?,
                    Self::field_f64(row, 2)?,
                    Self::field_f64(row, 3)?,
                    Self::field_f64(row, 4)?,
                    Self::field_f64(row, 5)?,
                ))
            })
            .collect()
    }
}

#[async_trait]
impl CryptoOhlcvProvider for BinanceClient {
    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: &str,
        since_ms: i64,
        limit: u32,
    ) -> GatewayResult<Vec<OhlcvTuple>> {
        let url = format!("{}{}", self.base_url, KLINES_PATH);
        let market = Self::market_id(symbol);
        debug!(
            "Requesting {} klines for {} since {} (limit {})",
            timeframe, market, since_ms, limit
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", market),
                ("interval", timeframe.to_string()),
                ("startTime", since_ms.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let rows: Vec<Vec<Value>> = response.json().await?;
        Self::parse_klines(&rows)
    }
}
