//! Configuration for the market data gateway

use crate::errors::GatewayResult;
use common::ForexProvider;
use serde::{Deserialize, Serialize};

/// Environment prefix for overrides, e.g. `MARKET_GATEWAY_HTTP__TIMEOUT_SECS=10`
pub const ENV_PREFIX: &str = "MARKET_GATEWAY";

/// Gateway configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Shared HTTP client settings
    pub http: HttpConfig,
    /// A-share history source
    pub equity: EquityConfig,
    /// Crypto exchange source
    pub crypto: CryptoConfig,
    /// Forex sources
    pub forex: ForexConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

/// Price adjustment applied by the equity source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceAdjust {
    /// Raw traded prices
    #[default]
    None,
    /// Forward-adjusted for dividends and splits
    Forward,
    /// Backward-adjusted for dividends and splits
    Backward,
}

impl PriceAdjust {
    /// Value of the upstream `fqt` query parameter
    #[must_use]
    pub const fn as_fqt(&self) -> &'static str {
        match self {
            Self::None => "0",
            Self::Forward => "1",
            Self::Backward => "2",
        }
    }
}

/// Equity source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityConfig {
    /// Kline history endpoint base URL
    pub base_url: String,
    /// Price adjustment
    pub adjust: PriceAdjust,
}

/// Crypto source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// Exchange REST base URL
    pub base_url: String,
    /// Maximum bars requested from `since`
    pub lookback_limit: u32,
}

/// Forex sources configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForexConfig {
    /// Yahoo chart API base URL
    pub yahoo_base_url: String,
    /// Alpha Vantage base URL
    pub alphavantage_base_url: String,
    /// Provider used when the caller does not name one
    pub default_provider: ForexProvider,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("market-gateway/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            base_url: "https://push2his.eastmoney.com".to_string(),
            adjust: PriceAdjust::None,
        }
    }
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.binance.com".to_string(),
            lookback_limit: 1000,
        }
    }
}

impl Default for ForexConfig {
    fn default() -> Self {
        Self {
            yahoo_base_url: "https://query1.finance.yahoo.com".to_string(),
            alphavantage_base_url: "https://www.alphavantage.co".to_string(),
            default_provider: ForexProvider::YFinance,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from file, with environment overrides
    pub fn from_file(path: &str) -> GatewayResult<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(path))
            .add_source(Self::environment())
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Defaults plus environment overrides only
    pub fn from_env() -> GatewayResult<Self> {
        let settings = ::config::Config::builder()
            .add_source(Self::environment())
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    fn environment() -> ::config::Environment {
        ::config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }
}
