//! ExchangeRate-API foreign exchange provider.
//!
//! Fetches the latest conversion rates from exchangerate-api.com's v6
//! `latest/{base}` endpoint. One request returns the rate from the base
//! currency into every currency the vendor quotes, which keeps the whole
//! run at a single FX call.
//!
//! Note: the free tier refreshes rates once per day and enforces a monthly
//! request quota.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use log::debug;
use num_traits::FromPrimitive;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::FxRate;
use crate::provider::FxRateSource;

const BASE_URL: &str = "https://v6.exchangerate-api.com";
const PROVIDER_ID: &str = "EXCHANGE_RATE_API";

/// `latest/{base}` response.
///
/// A `BTreeMap` keeps `conversion_rates` in a stable currency order so that
/// repeated runs see the rates in the same sequence.
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: String,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    time_last_update_unix: Option<i64>,
    base_code: Option<String>,
    conversion_rates: Option<BTreeMap<String, f64>>,
}

/// ExchangeRate-API provider.
pub struct ExchangeRateApiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ExchangeRateApiProvider {
    /// Create a new provider with the given API key.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL.to_string())
    }

    /// Create a provider against a custom endpoint. Used by tests to point
    /// at a local mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url,
        }
    }

    fn vendor_error(&self, error_type: Option<String>) -> MarketDataError {
        match error_type.as_deref() {
            Some("invalid-key") | Some("inactive-account") => MarketDataError::Unauthorized {
                provider: PROVIDER_ID.to_string(),
            },
            Some("quota-reached") => MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            },
            Some(other) => MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: other.to_string(),
            },
            None => MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "unspecified error".to_string(),
            },
        }
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
impl FxRateSource for ExchangeRateApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn latest_rates(&self, base: &str) -> Result<Vec<FxRate>, MarketDataError> {
        let url = format!("{}/v6/{}/latest/{}", self.base_url, self.api_key, base);
        debug!("Fetching latest FX rates for base {}", base);

        let response = self.client.get(&url).send().await.map_err(Self::network_error)?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let body: LatestRatesResponse = response
            .json()
            .await
            .map_err(|e| MarketDataError::Parse(format!("latest rates response: {}", e)))?;

        if body.result != "success" {
            return Err(self.vendor_error(body.error_type));
        }

        let as_of = body
            .time_last_update_unix
            .and_then(|t| Utc.timestamp_opt(t, 0).single())
            .ok_or_else(|| MarketDataError::Parse("missing rate timestamp".to_string()))?;

        let base_code = body.base_code.unwrap_or_else(|| base.to_string());
        let rates = body
            .conversion_rates
            .ok_or_else(|| MarketDataError::Parse("missing conversion rates".to_string()))?;

        let mut out = Vec::with_capacity(rates.len());
        for (currency, value) in rates {
            if currency == base_code {
                continue;
            }
            let rate = Decimal::from_f64(value).ok_or_else(|| {
                MarketDataError::Parse(format!("unrepresentable rate for {}", currency))
            })?;
            out.push(FxRate {
                from_currency: base_code.clone(),
                to_currency: currency,
                rate,
                as_of,
                source: PROVIDER_ID.to_string(),
            });
        }

        Ok(out)
    }
}
