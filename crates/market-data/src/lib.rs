//! Pricecross Market Data Crate
//!
//! Provider-agnostic fetching of end-of-day close quotes and foreign
//! exchange rates for the reconciliation pipeline.
//!
//! # Overview
//!
//! This crate supplies:
//! - The [`QuoteSource`] and [`FxRateSource`] capabilities implemented by
//!   concrete vendors
//! - A batch fetcher with bounded concurrency, per-request timeouts and
//!   capped retries
//! - Normalized [`Quote`] and [`FxRate`] records handed to the domain layer
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |     Tickers      | --> |  Batch Fetcher   |  (bounded concurrency, retry)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   QuoteSource    |  (Yahoo chart, ...)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |      Quote       |  (close price + currency)
//!                          +------------------+
//! ```
//!
//! FX rates follow the same shape through [`FxRateSource`].

pub mod errors;
pub mod fetch;
pub mod models;
pub mod provider;

pub use errors::{MarketDataError, RetryClass};
pub use fetch::{fetch_latest_quotes, fetch_latest_rates, FetchOptions, FetchOutcome};
pub use models::{FxRate, Quote};
pub use provider::exchange_rate_api::ExchangeRateApiProvider;
pub use provider::yahoo_chart::YahooChartProvider;
pub use provider::{FxRateSource, QuoteSource};
