//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all market data operations
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// Each variant is classified into a [`RetryClass`] via the
/// [`retry_class`](Self::retry_class) method, which determines how the batch
/// fetcher should handle the error.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    /// This is a terminal error - retrying won't help.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The symbol exists but the provider has no quote for it.
    #[error("No data available: {0}")]
    NoData(String),

    /// The provider rejected the API credential.
    #[error("Unauthorized: {provider}")]
    Unauthorized {
        /// The provider that rejected the credential
        provider: String,
    },

    /// The provider rate limited the request (HTTP 429 or quota exhausted).
    /// Should retry with exponential backoff.
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    /// Should retry with exponential backoff.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned a payload that could not be interpreted.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricecross_market_data::errors::{MarketDataError, RetryClass};
    ///
    /// let error = MarketDataError::RateLimited { provider: "YAHOO_CHART".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = MarketDataError::SymbolNotFound("INVALID".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            // Terminal errors - never retry
            Self::SymbolNotFound(_)
            | Self::NoData(_)
            | Self::Unauthorized { .. }
            | Self::ProviderError { .. }
            | Self::Parse(_) => RetryClass::Never,

            // Transient errors - retry with backoff
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Network(_) => {
                RetryClass::WithBackoff
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_not_found_never_retries() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_no_data_never_retries() {
        let error = MarketDataError::NoData("ACSO.L".to_string());
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_unauthorized_never_retries() {
        let error = MarketDataError::Unauthorized {
            provider: "EXCHANGE_RATE_API".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_provider_error_never_retries() {
        let error = MarketDataError::ProviderError {
            provider: "YAHOO_CHART".to_string(),
            message: "Internal server error".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_rate_limited_retries_with_backoff() {
        let error = MarketDataError::RateLimited {
            provider: "YAHOO_CHART".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_timeout_retries_with_backoff() {
        let error = MarketDataError::Timeout {
            provider: "YAHOO_CHART".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: INVALID");

        let error = MarketDataError::RateLimited {
            provider: "YAHOO_CHART".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: YAHOO_CHART");

        let error = MarketDataError::ProviderError {
            provider: "EXCHANGE_RATE_API".to_string(),
            message: "API key invalid".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Provider error: EXCHANGE_RATE_API - API key invalid"
        );
    }
}
