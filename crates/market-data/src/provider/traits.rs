//! Market data provider trait definitions.
//!
//! This module defines the `QuoteSource` and `FxRateSource` capabilities
//! that concrete vendors implement. The reconciliation pipeline never
//! depends on a specific vendor's transport details.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{FxRate, Quote};

/// Trait for close-price providers.
///
/// Implement this trait to add support for a new price vendor. The batch
/// fetcher drives it one ticker at a time and applies timeout, retry and
/// concurrency policy on top.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO_CHART".
    /// Used for logging and error attribution.
    fn id(&self) -> &'static str;

    /// Fetch the latest close-of-business quote for a ticker.
    ///
    /// # Returns
    ///
    /// The latest close quote on success, or a `MarketDataError` on failure.
    /// `NoData` means the symbol exists but has no recent close.
    async fn latest_close(&self, ticker: &str) -> Result<Quote, MarketDataError>;
}

/// Trait for foreign exchange rate providers.
#[async_trait]
pub trait FxRateSource: Send + Sync {
    /// Unique identifier for this provider.
    fn id(&self) -> &'static str;

    /// Fetch the latest rates from `base` into every currency the vendor
    /// quotes, as one batch request.
    ///
    /// # Returns
    ///
    /// One `FxRate` per quoted currency (`base` -> currency), or a
    /// `MarketDataError` when the vendor is unavailable.
    async fn latest_rates(&self, base: &str) -> Result<Vec<FxRate>, MarketDataError>;
}
