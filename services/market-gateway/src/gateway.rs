//! Market data gateway: category dispatch to the source adapters

use crate::adapters::{CryptoAdapter, EquityAdapter, ForexAdapter, SourceAdapter};
use crate::config::GatewayConfig;
use crate::errors::GatewayResult;
use crate::providers::{
    AlphaVantageClient, BinanceClient, EastmoneyClient, YahooClient, build_http_client,
};
use chrono::NaiveDate;
use common::{CanonicalSeries, DateRange, ForexProvider, MarketCategory, RequestParams};
use tracing::info;

/// Single entry point for daily history across equity, crypto and forex.
///
/// Holds no per-request state; concurrent callers share it freely.
pub struct MarketDataGateway {
    equity: Box<dyn SourceAdapter>,
    crypto: Box<dyn SourceAdapter>,
    forex: Box<dyn SourceAdapter>,
    default_forex_provider: ForexProvider,
}

impl MarketDataGateway {
    /// Create gateway from one adapter per category
    pub fn new(
        equity: Box<dyn SourceAdapter>,
        crypto: Box<dyn SourceAdapter>,
        forex: Box<dyn SourceAdapter>,
    ) -> Self {
        Self {
            equity,
            crypto,
            forex,
            default_forex_provider: ForexProvider::default(),
        }
    }

    /// Forex upstream used when [`get_data`](Self::get_data) is given none
    #[must_use]
    pub fn with_default_forex_provider(mut self, provider: ForexProvider) -> Self {
        self.default_forex_provider = provider;
        self
    }

    /// Wire the HTTP collaborators described by `config`
    pub fn from_config(config: &GatewayConfig) -> GatewayResult<Self> {
        let client = build_http_client(&config.http)?;

        let equity = EquityAdapter::new(Box::new(EastmoneyClient::new(
            client.clone(),
            &config.equity,
        )));
        let crypto = CryptoAdapter::new(Box::new(BinanceClient::new(
            client.clone(),
            &config.crypto,
        )))
        .with_lookback_limit(config.crypto.lookback_limit);
        let forex = ForexAdapter::new(
            Box::new(YahooClient::new(client.clone(), &config.forex)),
            Box::new(AlphaVantageClient::new(client, &config.forex)),
        );

        Ok(
            Self::new(Box::new(equity), Box::new(crypto), Box::new(forex))
                .with_default_forex_provider(config.forex.default_provider),
        )
    }

    /// Fetch daily history by category name.
    ///
    /// `category` accepts `equity`/`crypto`/`forex` (or the Chinese market
    /// labels). `forex_provider` and `forex_api_key` are only read for forex;
    /// an unknown provider name is an error only on that path.
    ///
    /// # Errors
    /// `UnsupportedMarket`, `UnsupportedForexProvider`, `MissingCredential`,
    /// `InvalidSymbol`, or whatever the collaborator failed with.
    pub async fn get_data(
        &self,
        category: &str,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        forex_provider: Option<&str>,
        forex_api_key: Option<&str>,
    ) -> GatewayResult<Option<CanonicalSeries>> {
        let category: MarketCategory = category.parse()?;
        let mut params = RequestParams::new(category, symbol, DateRange::new(start_date, end_date));

        if category == MarketCategory::Forex {
            params.forex_provider = match forex_provider {
                Some(name) => name.parse()?,
                None => self.default_forex_provider,
            };
            params.forex_api_key = forex_api_key.map(str::to_string);
        }

        self.fetch(&params).await
    }

    /// [`get_data`](Self::get_data) with `YYYY-MM-DD` (or `YYYYMMDD`) date
    /// strings.
    ///
    /// # Errors
    /// `InvalidDate` for a malformed bound, otherwise as `get_data`.
    pub async fn get_data_by_str(
        &self,
        category: &str,
        symbol: &str,
        start_date: &str,
        end_date: &str,
        forex_provider: Option<&str>,
        forex_api_key: Option<&str>,
    ) -> GatewayResult<Option<CanonicalSeries>> {
        let range = DateRange::parse(start_date, end_date)?;
        self.get_data(
            category,
            symbol,
            range.start,
            range.end,
            forex_provider,
            forex_api_key,
        )
        .await
    }

    /// Fetch daily history for an already parsed request
    pub async fn fetch(&self, params: &RequestParams) -> GatewayResult<Option<CanonicalSeries>> {
        info!(
            "Dispatching {} request for {} over {}",
            params.category, params.symbol, params.range
        );

        let adapter = match params.category {
            MarketCategory::Equity => &self.equity,
            MarketCategory::Crypto => &self.crypto,
            MarketCategory::Forex => &self.forex,
        };

        let series = adapter.fetch(params).await?;
        match &series {
            Some(s) => info!("{} {}: {} bars", params.category, params.symbol, s.len()),
            None => info!("{} {}: no data", params.category, params.symbol),
        }
        Ok(series)
    }
}
