//! Canonical request and series types

use crate::errors::CommonError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Market category a history request is routed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCategory {
    /// Shanghai/Shenzhen A-share equities
    Equity,
    /// Spot crypto pairs
    Crypto,
    /// Currency pairs
    Forex,
}

impl MarketCategory {
    /// Column layout produced for this category
    #[must_use]
    pub const fn schema(&self) -> Schema {
        match self {
            Self::Equity | Self::Crypto => Schema::Ohlcv,
            Self::Forex => Schema::Ohlc,
        }
    }

    /// Lowercase name used in logs and config
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equity => "equity",
            Self::Crypto => "crypto",
            Self::Forex => "forex",
        }
    }
}

impl fmt::Display for MarketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketCategory {
    type Err = CommonError;

    /// Accepts the English names (any case) and the Chinese market labels
    /// used by A-share tooling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "沪深A股" => return Ok(Self::Equity),
            "加密货币" => return Ok(Self::Crypto),
            "外汇" => return Ok(Self::Forex),
            _ => {}
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "equity" => Ok(Self::Equity),
            "crypto" => Ok(Self::Crypto),
            "forex" | "fx" => Ok(Self::Forex),
            _ => Err(CommonError::UnsupportedMarket(s.to_string())),
        }
    }
}

/// Upstream used for forex history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForexProvider {
    /// Yahoo Finance chart data (bulk quote download)
    #[default]
    YFinance,
    /// Alpha Vantage `FX_DAILY`, needs an API key
    AlphaVantage,
}

impl ForexProvider {
    /// Name as accepted by [`FromStr`]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::YFinance => "yfinance",
            Self::AlphaVantage => "alphavantage",
        }
    }
}

impl fmt::Display for ForexProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForexProvider {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yfinance" => Ok(Self::YFinance),
            "alphavantage" => Ok(Self::AlphaVantage),
            _ => Err(CommonError::UnsupportedForexProvider(s.to_string())),
        }
    }
}

/// Parse a calendar date given as `YYYY-MM-DD` or `YYYYMMDD`
pub fn parse_date(value: &str) -> Result<NaiveDate, CommonError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
        .map_err(|_| CommonError::InvalidDate(value.to_string()))
}

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First date included
    pub start: NaiveDate,
    /// Last date included
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range; `start > end` is allowed and contains nothing
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse both bounds with [`parse_date`]
    pub fn parse(start: &str, end: &str) -> Result<Self, CommonError> {
        Ok(Self::new(parse_date(start)?, parse_date(end)?))
    }

    /// Whether `date` lies within `[start, end]`
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// One history request, already parsed into closed types
#[derive(Clone, PartialEq, Eq)]
pub struct RequestParams {
    pub category: MarketCategory,
    /// Provider-specific symbol (`600000`, `BTC/USDT`, `EURUSD=X`, `EURUSD`)
    pub symbol: String,
    pub range: DateRange,
    /// Only read for [`MarketCategory::Forex`]
    pub forex_provider: ForexProvider,
    /// Only read for [`ForexProvider::AlphaVantage`]
    pub forex_api_key: Option<String>,
}

impl RequestParams {
    #[must_use]
    pub fn new(category: MarketCategory, symbol: impl Into<String>, range: DateRange) -> Self {
        Self {
            category,
            symbol: symbol.into(),
            range,
            forex_provider: ForexProvider::default(),
            forex_api_key: None,
        }
    }

    #[must_use]
    pub fn with_forex_provider(mut self, provider: ForexProvider) -> Self {
        self.forex_provider = provider;
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.forex_api_key = Some(api_key.into());
        self
    }
}

impl fmt::Debug for RequestParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestParams")
            .field("category", &self.category)
            .field("symbol", &self.symbol)
            .field("range", &self.range)
            .field("forex_provider", &self.forex_provider)
            .field(
                "forex_api_key",
                &self.forex_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Column layout of a canonical series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Schema {
    /// Open/High/Low/Close/Volume
    Ohlcv,
    /// Open/High/Low/Close, no volume
    Ohlc,
}

impl Schema {
    /// Canonical column names, in order
    #[must_use]
    pub const fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Ohlcv => &["Open", "High", "Low", "Close", "Volume"],
            Self::Ohlc => &["Open", "High", "Low", "Close"],
        }
    }

    /// Whether bars carry a volume
    #[must_use]
    pub const fn has_volume(&self) -> bool {
        matches!(self, Self::Ohlcv)
    }
}

/// One daily bar in canonical naming
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CanonicalBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl CanonicalBar {
    /// Bar without volume
    #[must_use]
    pub const fn ohlc(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    /// Attach a volume
    #[must_use]
    pub const fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// Date-indexed daily series with unique, strictly increasing dates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalSeries {
    schema: Schema,
    bars: Vec<CanonicalBar>,
}

impl CanonicalSeries {
    /// Build a series from bars in any order.
    ///
    /// Bars are sorted by date. When a date repeats the last bar seen for it
    /// wins. Under [`Schema::Ohlc`] any volume is dropped.
    #[must_use]
    pub fn from_bars(schema: Schema, mut bars: Vec<CanonicalBar>) -> Self {
        bars.sort_by_key(|bar| bar.date);

        let mut unique: Vec<CanonicalBar> = Vec::with_capacity(bars.len());
        for mut bar in bars {
            if !schema.has_volume() {
                bar.volume = None;
            }
            match unique.last_mut() {
                Some(last) if last.date == bar.date => *last = bar,
                _ => unique.push(bar),
            }
        }

        Self {
            schema,
            bars: unique,
        }
    }

    /// New series holding only the bars inside `range`
    #[must_use]
    pub fn within(&self, range: &DateRange) -> Self {
        Self {
            schema: self.schema,
            bars: self
                .bars
                .iter()
                .filter(|bar| range.contains(bar.date))
                .copied()
                .collect(),
        }
    }

    #[must_use]
    pub const fn schema(&self) -> Schema {
        self.schema
    }

    /// Canonical column names of this series
    #[must_use]
    pub const fn columns(&self) -> &'static [&'static str] {
        self.schema.columns()
    }

    #[must_use]
    pub fn bars(&self) -> &[CanonicalBar] {
        &self.bars
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Index values, ascending
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.bars.iter().map(|bar| bar.date)
    }

    /// Look up the bar for a date
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&CanonicalBar> {
        self.bars
            .binary_search_by_key(&date, |bar| bar.date)
            .ok()
            .map(|idx| &self.bars[idx])
    }

    #[must_use]
    pub fn first(&self) -> Option<&CanonicalBar> {
        self.bars.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&CanonicalBar> {
        self.bars.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalBar> {
        self.bars.iter()
    }
}

impl<'a> IntoIterator for &'a CanonicalSeries {
    type Item = &'a CanonicalBar;
    type IntoIter = std::slice::Iter<'a, CanonicalBar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}
