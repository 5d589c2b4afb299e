//! Upstream payload fixtures, one builder per provider wire format

use crate::helpers::{date, epoch_millis};
use chrono::{Days, NaiveDate};
use rstest::fixture;
use serde_json::{Map, Value, json};

const DAY_MS: i64 = 86_400_000;

/// Inclusive request window used across the integration tests
#[derive(Debug, Clone, Copy)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// 2024-01-02 ..= 2024-01-05
#[fixture]
pub fn first_week_2024() -> Window {
    Window {
        start: date(2024, 1, 2),
        end: date(2024, 1, 5),
    }
}

/// Eastmoney kline row: date, open, close, high, low, volume, then turnover
/// and change columns the gateway ignores.
#[must_use]
pub fn kline_line(day: NaiveDate, open: f64, close: f64, high: f64, low: f64, volume: u64) -> String {
    let amount = volume as f64 * close;
    let amplitude = (high - low) / open * 100.0;
    let change = close - open;
    let change_pct = change / open * 100.0;
    format!(
        "{},{open:.2},{close:.2},{high:.2},{low:.2},{volume},{amount:.2},{amplitude:.2},{change_pct:.2},{change:.2},0.10",
        day.format("%Y-%m-%d")
    )
}

/// Eastmoney kline response with the given rows
#[must_use]
pub fn eastmoney_kline_body(code: &str, lines: &[String]) -> Value {
    let market = if code.starts_with('6') { 1 } else { 0 };
    json!({
        "rc": 0,
        "rt": 17,
        "svr": 181669437,
        "lt": 1,
        "full": 0,
        "dlmkts": "",
        "data": {
            "code": code,
            "market": market,
            "name": "浦发银行",
            "decimal": 2,
            "dktotal": lines.len(),
            "preKPrice": 6.6,
            "klines": lines
        }
    })
}

/// Eastmoney response for an unknown code: `data` is null
#[must_use]
pub fn eastmoney_empty_body() -> Value {
    json!({"rc": 0, "rt": 17, "svr": 181669437, "lt": 1, "full": 0, "dlmkts": "", "data": null})
}

/// Consecutive daily A-share rows starting at `first`
#[must_use]
pub fn equity_lines(first: NaiveDate, days: u64) -> Vec<String> {
    (0..days)
        .map(|i| {
            let day = first.checked_add_days(Days::new(i)).unwrap_or(first);
            let px = 6.5 + i as f64 * 0.01;
            kline_line(day, px, px + 0.02, px + 0.05, px - 0.03, 250_000 + i * 1000)
        })
        .collect()
}

/// Binance `/api/v3/klines` rows, one per day from `first`
#[must_use]
pub fn binance_klines_body(first: NaiveDate, days: i64) -> Value {
    let first_ms = epoch_millis(first);
    let rows: Vec<Value> = (0..days)
        .map(|i| {
            let open_time = first_ms + i * DAY_MS;
            let px = 42_000.0 + i as f64 * 100.0;
            json!([
                open_time,
                format!("{:.8}", px),
                format!("{:.8}", px + 250.0),
                format!("{:.8}", px - 250.0),
                format!("{:.8}", px + 50.0),
                format!("{:.8}", 20_000.0 + i as f64),
                open_time + DAY_MS - 1,
                "850000000.00000000",
                1_000_000,
                "10000.00000000",
                "425000000.00000000",
                "0"
            ])
        })
        .collect();
    Value::Array(rows)
}

/// Yahoo chart body with one bar per day from `first`, stamped at
/// midnight UTC
#[must_use]
pub fn yahoo_chart_body(ticker: &str, first: NaiveDate, days: i64, gmt_offset: i64) -> Value {
    let first_ts = epoch_millis(first) / 1000;
    let timestamps: Vec<i64> = (0..days).map(|i| first_ts + i * 86_400).collect();
    let px = |i: i64, bump: f64| Value::from(1.09 + i as f64 * 0.001 + bump);

    json!({
        "chart": {
            "result": [{
                "meta": {
                    "currency": "USD",
                    "symbol": ticker,
                    "exchangeName": "CCY",
                    "instrumentType": "CURRENCY",
                    "gmtoffset": gmt_offset,
                    "timezone": "GMT",
                    "dataGranularity": "1d"
                },
                "timestamp": timestamps,
                "indicators": {
                    "quote": [{
                        "open": (0..days).map(|i| px(i, 0.0)).collect::<Vec<_>>(),
                        "high": (0..days).map(|i| px(i, 0.004)).collect::<Vec<_>>(),
                        "low": (0..days).map(|i| px(i, -0.004)).collect::<Vec<_>>(),
                        "close": (0..days).map(|i| px(i, 0.001)).collect::<Vec<_>>(),
                        "volume": (0..days).map(|_| 0).collect::<Vec<_>>()
                    }]
                }
            }],
            "error": null
        }
    })
}

/// Yahoo 404 body for an unknown ticker
#[must_use]
pub fn yahoo_not_found_body() -> Value {
    json!({
        "chart": {
            "result": null,
            "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
        }
    })
}

/// Alpha Vantage `FX_DAILY` body text, newest day first as the provider
/// sends it. Built as text so the key order survives.
#[must_use]
pub fn alphavantage_fx_body(from: &str, to: &str, first: NaiveDate, days: u64) -> String {
    let days_json: Vec<String> = (0..days)
        .rev()
        .map(|i| {
            let day = first.checked_add_days(Days::new(i)).unwrap_or(first);
            let px = 1.09 + i as f64 * 0.001;
            format!(
                r#""{}": {{"1. open": "{:.5}", "2. high": "{:.5}", "3. low": "{:.5}", "4. close": "{:.5}"}}"#,
                day.format("%Y-%m-%d"),
                px,
                px + 0.004,
                px - 0.004,
                px + 0.001
            )
        })
        .collect();

    format!(
        r#"{{
    "Meta Data": {{
        "1. Information": "Forex Daily Prices (open, high, low, close)",
        "2. From Symbol": "{from}",
        "3. To Symbol": "{to}",
        "4. Output Size": "Full size",
        "5. Last Refreshed": "2024-01-31 21:55:00",
        "6. Time Zone": "UTC"
    }},
    "Time Series FX (Daily)": {{
        {}
    }}
}}"#,
        days_json.join(",\n        ")
    )
}

/// Alpha Vantage throttling reply, which carries no series
#[must_use]
pub fn alphavantage_note_body() -> Value {
    json!({
        "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute and 500 calls per day."
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kline_line_has_eleven_fields() {
        let line = kline_line(date(2024, 1, 2), 6.6, 6.59, 6.63, 6.56, 279_063);
        assert_eq!(line.split(',').count(), 11);
        assert!(line.starts_with("2024-01-02,6.60,6.59,6.63,6.56,279063,"));
    }

    #[test]
    fn test_alphavantage_body_is_newest_first() -> Result<(), serde_json::Error> {
        let body = alphavantage_fx_body("EUR", "USD", date(2024, 1, 1), 3);
        let newest = body.find("2024-01-03");
        let oldest = body.find("2024-01-01");
        assert!(newest.is_some() && newest < oldest);

        let parsed: Value = serde_json::from_str(&body)?;
        let days = parsed["Time Series FX (Daily)"].as_object().map(Map::len);
        assert_eq!(days, Some(3));
        Ok(())
    }

    #[test]
    fn test_binance_rows_are_daily() {
        let body = binance_klines_body(date(2024, 1, 1), 2);
        let t0 = body[0][0].as_i64().unwrap_or_default();
        let t1 = body[1][0].as_i64().unwrap_or_default();
        assert_eq!(t1 - t0, DAY_MS);
        assert_eq!(t0, 1_704_067_200_000);
    }
}
