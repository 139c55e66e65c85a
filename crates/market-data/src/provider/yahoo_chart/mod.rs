//! Yahoo Finance chart-endpoint provider.
//!
//! Fetches the latest close price through the public v8 chart endpoint
//! (e.g., `https://query1.finance.yahoo.com/v8/finance/chart/AAPL`), which
//! requires no API key. The endpoint reports the price in the listing
//! exchange's native quote currency, including minor units such as GBp for
//! London listings.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use log::debug;
use num_traits::FromPrimitive;
use reqwest::{header, Client, StatusCode};
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::QuoteSource;

use models::ChartResponse;

const BASE_URL: &str = "https://query1.finance.yahoo.com";
const PROVIDER_ID: &str = "YAHOO_CHART";

/// Yahoo Finance chart provider.
///
/// Keyless access to close prices for equities and ETFs on any exchange
/// Yahoo covers.
pub struct YahooChartProvider {
    client: Client,
    base_url: String,
}

impl Default for YahooChartProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooChartProvider {
    /// Create a new Yahoo chart provider.
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL.to_string())
    }

    /// Create a provider against a custom endpoint. Used by tests to point
    /// at a local mock server.
    pub fn with_base_url(base_url: String) -> Self {
        // Yahoo rejects requests without a browser-looking user agent.
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, base_url }
    }

    fn network_error(e: reqwest::Error) -> MarketDataError {
        if e.is_timeout() {
            MarketDataError::Timeout {
                provider: PROVIDER_ID.to_string(),
            }
        } else {
            MarketDataError::Network(e)
        }
    }
}

#[async_trait]
impl QuoteSource for YahooChartProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn latest_close(&self, ticker: &str) -> Result<Quote, MarketDataError> {
        let url = format!(
            "{}/v8/finance/chart/{}?interval=1d&range=1d",
            self.base_url, ticker
        );
        debug!("Fetching latest close for {} from {}", ticker, PROVIDER_ID);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(Self::network_error)?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                })
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(MarketDataError::Unauthorized {
                    provider: PROVIDER_ID.to_string(),
                })
            }
            // Yahoo answers unknown symbols with a 404 that still carries a
            // chart envelope, so fall through and read the error branch.
            status if !status.is_success() && status != StatusCode::NOT_FOUND => {
                return Err(MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("HTTP {}", status),
                })
            }
            _ => {}
        }

        let body: ChartResponse = response
            .json()
            .await
            .map_err(|e| MarketDataError::Parse(format!("chart response: {}", e)))?;

        if let Some(err) = body.chart.error {
            return if err.code.eq_ignore_ascii_case("not found") {
                Err(MarketDataError::SymbolNotFound(ticker.to_string()))
            } else {
                Err(MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("{}: {}", err.code, err.description),
                })
            };
        }

        let meta = body
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .map(|r| r.meta)
            .ok_or_else(|| MarketDataError::NoData(ticker.to_string()))?;

        let price = meta
            .regular_market_price
            .and_then(Decimal::from_f64)
            .ok_or_else(|| MarketDataError::NoData(ticker.to_string()))?;

        let as_of = meta
            .regular_market_time
            .and_then(|t| Utc.timestamp_opt(t, 0).single())
            .ok_or_else(|| {
                MarketDataError::Parse(format!("missing market time for {}", ticker))
            })?;

        let currency = meta.currency.unwrap_or_else(|| "USD".to_string());

        Ok(Quote::new(ticker, price, currency, as_of, PROVIDER_ID))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn chart_body(price: f64, currency: &str, time: i64) -> serde_json::Value {
        serde_json::json!({
            "chart": {
                "result": [{
                    "meta": {
                        "currency": currency,
                        "symbol": "AAPL",
                        "regularMarketPrice": price,
                        "regularMarketTime": time
                    }
                }],
                "error": null
            }
        })
    }

    #[tokio::test]
    async fn test_latest_close_parses_meta() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(
                150.25,
                "USD",
                1_700_254_800,
            )))
            .mount(&server)
            .await;

        let provider = YahooChartProvider::with_base_url(server.uri());
        let quote = provider.latest_close("AAPL").await.unwrap();

        assert_eq!(quote.ticker, "AAPL");
        assert_eq!(quote.price, dec!(150.25));
        assert_eq!(quote.currency, "USD");
        assert_eq!(quote.as_of.timestamp(), 1_700_254_800);
        assert_eq!(quote.source, "YAHOO_CHART");
    }

    #[tokio::test]
    async fn test_unknown_symbol_maps_to_symbol_not_found() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "chart": {
                "result": null,
                "error": {
                    "code": "Not Found",
                    "description": "No data found, symbol may be delisted"
                }
            }
        });
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/NOPE"))
            .respond_with(ResponseTemplate::new(404).set_body_json(body))
            .mount(&server)
            .await;

        let provider = YahooChartProvider::with_base_url(server.uri());
        let err = provider.latest_close("NOPE").await.unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(s) if s == "NOPE"));
    }

    #[tokio::test]
    async fn test_http_429_maps_to_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let provider = YahooChartProvider::with_base_url(server.uri());
        let err = provider.latest_close("AAPL").await.unwrap_err();
        assert!(matches!(err, MarketDataError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn test_missing_price_maps_to_no_data() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "chart": {
                "result": [{
                    "meta": {
                        "currency": "USD",
                        "symbol": "AAPL",
                        "regularMarketTime": 1_700_254_800
                    }
                }],
                "error": null
            }
        });
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let provider = YahooChartProvider::with_base_url(server.uri());
        let err = provider.latest_close("AAPL").await.unwrap_err();
        assert!(matches!(err, MarketDataError::NoData(_)));
    }
}
