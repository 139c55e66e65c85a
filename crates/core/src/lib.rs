//! Pricecross Core
//!
//! Domain logic for the daily close-price reconciliation run: the holdings
//! registry, currency normalization, the reconciliation engine and the
//! report sinks. Network transport lives in `pricecross-market-data`; this
//! crate only consumes its `QuoteSource`/`FxRateSource` capabilities.

pub mod constants;
pub mod errors;
pub mod fx;
pub mod holdings;
pub mod pipeline;
pub mod recon;
pub mod report;

pub use errors::{Error, Result};
