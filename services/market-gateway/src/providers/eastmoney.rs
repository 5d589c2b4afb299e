//! Eastmoney kline history client (A-share daily bars)

use super::{EquityHistoryProvider, EquityRawTable, base_url};
use crate::config::{EquityConfig, PriceAdjust};
use crate::errors::{GatewayError, GatewayResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Column labels of a kline row, in wire order
pub const NATIVE_COLUMNS: [&str; 11] = [
    "日期",
    "开盘",
    "收盘",
    "最高",
    "最低",
    "成交量",
    "成交额",
    "振幅",
    "涨跌幅",
    "涨跌额",
    "换手率",
];

const KLINE_PATH: &str = "/api/qt/stock/kline/get";
const DAILY_KLT: &str = "101";
const FIELDS1: &str = "f1,f2,f3,f4,f5,f6";
const FIELDS2: &str = "f51,f52,f53,f54,f55,f56,f57,f58,f59,f60,f61";
const PUBLIC_UT: &str = "7eea3edcaed734bea9cbfc24409ed989";

#[derive(Debug, Deserialize)]
struct KlineResponse {
    #[serde(default)]
    data: Option<KlineData>,
}

#[derive(Debug, Deserialize)]
struct KlineData {
    #[serde(default)]
    klines: Vec<String>,
}

/// Eastmoney history client
pub struct EastmoneyClient {
    client: Client,
    base_url: String,
    adjust: PriceAdjust,
}

impl EastmoneyClient {
    /// Create client
    pub fn new(client: Client, config: &EquityConfig) -> Self {
        Self {
            client,
            base_url: base_url(&config.base_url),
            adjust: config.adjust,
        }
    }

    /// Exchange-qualified security id: Shanghai listings (`6xxxxx`) are
    /// market 1, everything else market 0.
    #[must_use]
    pub fn secid(symbol: &str) -> String {
        let market = if symbol.starts_with('6') { 1 } else { 0 };
        format!("{market}.{symbol}")
    }

    fn parse_klines(klines: Vec<String>) -> GatewayResult<EquityRawTable> {
        let columns: Vec<String> = NATIVE_COLUMNS.iter().map(|c| (*c).to_string()).collect();
        let mut rows = Vec::with_capacity(klines.len());

        for line in klines {
            let cells: Vec<String> = line.split(',').map(str::to_string).collect();
            if cells.len() != columns.len() {
                return Err(GatewayError::Parse(format!(
                    "kline row has {} fields, expected {}: {line}",
                    cells.len(),
                    columns.len()
                )));
            }
            rows.push(cells);
        }

        Ok(EquityRawTable { columns, rows })
    }
}

#[async_trait]
impl EquityHistoryProvider for EastmoneyClient {
    async fn fetch_history(
        &self,
        symbol: &str,
        start_date: &str,
        end_date: &str,
    ) -> GatewayResult<Option<EquityRawTable>> {
        let url = format!("{}{}", self.base_url, KLINE_PATH);
        let secid = Self::secid(symbol);
        debug!("Requesting equity history {} {}..{}", symbol, start_date, end_date);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("secid", secid.as_str()),
                ("ut", PUBLIC_UT),
                ("fields1", FIELDS1),
                ("fields2", FIELDS2),
                ("klt", DAILY_KLT),
                ("fqt", self.adjust.as_fqt()),
                ("beg", start_date),
                ("end", end_date),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: KlineResponse = response.json().await?;
        match body.data {
            Some(data) => Ok(Some(Self::parse_klines(data.klines)?)),
            None => Ok(None),
        }
    }
}
