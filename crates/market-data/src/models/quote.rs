use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// End-of-day close quote for a single ticker.
///
/// Produced once per run by a [`QuoteSource`](crate::provider::QuoteSource)
/// and immutable thereafter. The price is in the vendor's native quote
/// currency; conversion into the reporting currency happens downstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Vendor ticker symbol (e.g., "AAPL", "SIE.DE")
    pub ticker: String,

    /// Close-of-business price in the native quote currency
    pub price: Decimal,

    /// Quote currency as reported by the vendor (e.g., "USD", "GBp")
    pub currency: String,

    /// Timestamp of the close this price belongs to
    pub as_of: DateTime<Utc>,

    /// Source of the quote (YAHOO_CHART, ...)
    pub source: String,
}

impl Quote {
    /// Create a new quote.
    pub fn new(
        ticker: impl Into<String>,
        price: Decimal,
        currency: impl Into<String>,
        as_of: DateTime<Utc>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            price,
            currency: currency.into(),
            as_of,
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_new() {
        let quote = Quote::new("AAPL", dec!(150.25), "USD", Utc::now(), "YAHOO_CHART");
        assert_eq!(quote.ticker, "AAPL");
        assert_eq!(quote.price, dec!(150.25));
        assert_eq!(quote.currency, "USD");
        assert_eq!(quote.source, "YAHOO_CHART");
    }
}
