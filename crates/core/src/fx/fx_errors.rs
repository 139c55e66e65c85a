//! FX error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while normalizing a quote into the reporting currency.
///
/// Both variants surface in the affected ticker's reconciliation record as
/// a normalization failure; they never abort the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FxError {
    /// No rate exists for the required currency pair.
    #[error("No FX rate available for {from}/{to}")]
    MissingRate { from: String, to: String },

    /// The rate exists but predates the quote by more than the allowed age.
    #[error("FX rate for {from}/{to} is stale: rate dated {rate_date}, quote dated {quote_date}")]
    StaleRate {
        from: String,
        to: String,
        rate_date: NaiveDate,
        quote_date: NaiveDate,
    },
}
