//! Market data provider implementations.

pub mod exchange_rate_api;
mod traits;
pub mod yahoo_chart;

pub use traits::{FxRateSource, QuoteSource};
