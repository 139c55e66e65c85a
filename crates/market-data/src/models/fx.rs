use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A dated foreign exchange rate.
///
/// Multiplying an amount in `from_currency` by `rate` yields the amount in
/// `to_currency`. Produced once per run by an
/// [`FxRateSource`](crate::provider::FxRateSource) and immutable thereafter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxRate {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: Decimal,
    pub as_of: DateTime<Utc>,

    /// Source of the rate (EXCHANGE_RATE_API, ...)
    pub source: String,
}

impl FxRate {
    /// Returns the inverse rate (to -> from), or `None` when the rate is
    /// zero and cannot be inverted.
    pub fn inverted(&self) -> Option<FxRate> {
        if self.rate.is_zero() {
            return None;
        }
        Some(FxRate {
            from_currency: self.to_currency.clone(),
            to_currency: self.from_currency.clone(),
            rate: Decimal::ONE / self.rate,
            as_of: self.as_of,
            source: self.source.clone(),
        })
    }
}
