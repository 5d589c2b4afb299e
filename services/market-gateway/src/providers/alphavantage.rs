//! Alpha Vantage FX daily client

use super::{FxTimeSeriesProvider, base_url};
use crate::config::ForexConfig;
use crate::errors::GatewayResult;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

const QUERY_PATH: &str = "/query";

/// Alpha Vantage REST client
pub struct AlphaVantageClient {
    client: Client,
    base_url: String,
}

impl AlphaVantageClient {
    /// Create client
    pub fn new(client: Client, config: &ForexConfig) -> Self {
        Self {
            client,
            base_url: base_url(&config.alphavantage_base_url),
        }
    }
}

#[async_trait]
impl FxTimeSeriesProvider for AlphaVantageClient {
    async fn fx_daily(
        &self,
        from_symbol: &str,
        to_symbol: &str,
        api_key: &str,
    ) -> GatewayResult<serde_json::Value> {
        let url = format!("{}{}", self.base_url, QUERY_PATH);
        // api_key rides in the query string: keep it out of logs and error text
        debug!("Requesting FX_DAILY {}/{}", from_symbol, to_symbol);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("function", "FX_DAILY"),
                ("from_symbol", from_symbol),
                ("to_symbol", to_symbol),
                ("outputsize", "full"),
                ("apikey", api_key),
            ])
            .send()
            .await
            .map_err(reqwest::Error::without_url)?
            .error_for_status()
            .map_err(reqwest::Error::without_url)?;

        let bytes = response.bytes().await.map_err(reqwest::Error::without_url)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
