//! Batch fetching with bounded concurrency and capped retries.
//!
//! Per-ticker quote requests run in chunks of `concurrency` futures at a
//! time. Each request gets its own timeout, and transient failures are
//! retried sequentially with exponential backoff. A ticker that exhausts
//! its retries is isolated into a failed outcome; it never aborts the
//! batch.
//!
//! Outcomes are returned in input ticker order regardless of the order in
//! which the vendor answers.

use std::future::Future;
use std::time::Duration;

use log::{debug, warn};

use crate::errors::{MarketDataError, RetryClass};
use crate::models::{FxRate, Quote};
use crate::provider::{FxRateSource, QuoteSource};

/// Tuning knobs for a batch fetch.
#[derive(Clone, Debug)]
pub struct FetchOptions {
    /// Maximum in-flight requests at any moment.
    pub concurrency: usize,

    /// Maximum retries per request after the initial attempt.
    pub max_retries: u32,

    /// Per-request timeout.
    pub timeout: Duration,

    /// First backoff delay; doubles on each subsequent retry.
    pub backoff_base: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            concurrency: 5,
            max_retries: 3,
            timeout: Duration::from_secs(10),
            backoff_base: Duration::from_millis(250),
        }
    }
}

/// Result of fetching one ticker, failure isolated per ticker.
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticker: String,
    pub result: Result<Quote, MarketDataError>,
}

/// Fetch the latest close quote for every ticker.
///
/// Returns one [`FetchOutcome`] per input ticker, in input order.
pub async fn fetch_latest_quotes(
    source: &dyn QuoteSource,
    tickers: &[String],
    options: &FetchOptions,
) -> Vec<FetchOutcome> {
    let chunk_size = options.concurrency.max(1);
    let mut outcomes = Vec::with_capacity(tickers.len());

    for chunk in tickers.chunks(chunk_size) {
        let futures: Vec<_> = chunk
            .iter()
            .map(|ticker| async move {
                let result =
                    retry_with_backoff(source.id(), options, || source.latest_close(ticker)).await;
                FetchOutcome {
                    ticker: ticker.clone(),
                    result,
                }
            })
            .collect();

        // join_all yields results in future order, so outcomes line up with
        // the input tickers even when completions interleave.
        outcomes.extend(futures::future::join_all(futures).await);
    }

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        warn!(
            "Fetched {} tickers from {}, {} failed",
            tickers.len(),
            source.id(),
            failed
        );
    }

    outcomes
}

/// Fetch the latest FX rates for a base currency, with the same timeout and
/// retry policy as the quote batch. One vendor call covers every pair.
pub async fn fetch_latest_rates(
    source: &dyn FxRateSource,
    base: &str,
    options: &FetchOptions,
) -> Result<Vec<FxRate>, MarketDataError> {
    retry_with_backoff(source.id(), options, || source.latest_rates(base)).await
}

/// Sequential retry loop shared by quote and FX fetching. Requests that
/// outlive the timeout count as provider timeouts; only transient errors
/// are retried, and never more than `max_retries` times.
async fn retry_with_backoff<T, F, Fut>(
    provider: &str,
    options: &FetchOptions,
    mut operation: F,
) -> Result<T, MarketDataError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, MarketDataError>>,
{
    let mut attempt: u32 = 0;

    loop {
        let outcome = match tokio::time::timeout(options.timeout, operation()).await {
            Ok(result) => result,
            Err(_) => Err(MarketDataError::Timeout {
                provider: provider.to_string(),
            }),
        };

        match outcome {
            Ok(value) => return Ok(value),
            Err(e) => {
                if e.retry_class() == RetryClass::WithBackoff && attempt < options.max_retries {
                    let delay = options.backoff_base * 2u32.saturating_pow(attempt);
                    debug!(
                        "Retrying {} after {:?} (attempt {}): {}",
                        provider,
                        delay,
                        attempt + 1,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                } else {
                    return Err(e);
                }
            }
        }
    }
}
