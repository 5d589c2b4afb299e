//! Wiremock server standing in for every upstream the gateway talks to

use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const EASTMONEY_KLINE_PATH: &str = "/api/qt/stock/kline/get";
pub const BINANCE_KLINES_PATH: &str = "/api/v3/klines";
pub const YAHOO_CHART_PATH: &str = "/v8/finance/chart";
pub const ALPHAVANTAGE_QUERY_PATH: &str = "/query";

/// One mock server shared by all four upstreams; their paths do not overlap.
pub struct UpstreamMocks {
    server: MockServer,
}

impl UpstreamMocks {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to point every provider at
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Kline reply for one `secid`; verified on drop when `calls` is set
    pub async fn mount_eastmoney(&self, secid: &str, body: Value, calls: u64) {
        Mock::given(method("GET"))
            .and(path(EASTMONEY_KLINE_PATH))
            .and(query_param("secid", secid))
            .and(query_param("klt", "101"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Same as [`mount_eastmoney`](Self::mount_eastmoney) but also pins the
    /// compact `beg`/`end` dates
    pub async fn mount_eastmoney_window(&self, secid: &str, beg: &str, end: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(EASTMONEY_KLINE_PATH))
            .and(query_param("secid", secid))
            .and(query_param("beg", beg))
            .and(query_param("end", end))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mount_binance(&self, market: &str, start_time_ms: i64, body: Value) {
        Mock::given(method("GET"))
            .and(path(BINANCE_KLINES_PATH))
            .and(query_param("symbol", market))
            .and(query_param("interval", "1d"))
            .and(query_param("startTime", start_time_ms.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mount_yahoo(&self, ticker: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("{YAHOO_CHART_PATH}/{ticker}")))
            .and(query_param("interval", "1d"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mount_yahoo_not_found(&self, ticker: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("{YAHOO_CHART_PATH}/{ticker}")))
            .respond_with(ResponseTemplate::new(404).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// `FX_DAILY` reply served as raw text so the provider's key order reaches
    /// the client untouched
    pub async fn mount_alphavantage(&self, from: &str, to: &str, body: String, calls: u64) {
        Mock::given(method("GET"))
            .and(path(ALPHAVANTAGE_QUERY_PATH))
            .and(query_param("function", "FX_DAILY"))
            .and(query_param("from_symbol", from))
            .and(query_param("to_symbol", to))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_string(body),
            )
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    pub async fn mount_alphavantage_json(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path(ALPHAVANTAGE_QUERY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Fail every request on `route` with `status`
    pub async fn mount_status(&self, route: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(route.to_string()))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Number of requests the server has seen so far
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::eastmoney_empty_body;

    #[tokio::test]
    async fn test_fresh_server_has_no_requests() {
        let mocks = UpstreamMocks::start().await;
        mocks.mount_eastmoney("1.600000", eastmoney_empty_body(), 0).await;
        assert!(mocks.uri().starts_with("http://"));
        assert_eq!(mocks.request_count().await, 0);
    }
}
