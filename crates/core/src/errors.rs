//! Core error types for the reconciliation pipeline.
//!
//! Per-ticker failures (fetch, normalization) are not represented here -
//! they are isolated into the affected ticker's reconciliation record.
//! This module covers the structural errors that abort a run.

use thiserror::Error;

use crate::fx::FxError;
use pricecross_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the reconciliation pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed holdings registry, reference prices or run settings.
    /// Fatal: raised before any fetch occurs.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Fx error: {0}")]
    Fx(#[from] FxError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    /// Writing the report artifact failed.
    #[error("Report error: {0}")]
    Report(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}
