use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single portfolio position.
///
/// Created from static configuration at startup; immutable for the run's
/// duration. Tickers are unique within a registry snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Vendor ticker symbol (e.g., "AAPL", "SIE.DE", "WISE.L")
    pub ticker: String,

    pub quantity: Decimal,

    /// Exchange label carried through to the report (e.g., "XETRA")
    pub exchange: Option<String>,

    /// Quote currency of the listing (e.g., "USD", "GBp"). Inferred from
    /// the ticker suffix when the registry omits it.
    pub native_currency: String,
}
