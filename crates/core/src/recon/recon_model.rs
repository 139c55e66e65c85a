use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::fx::NormalizedQuote;

/// Maximum acceptable deviation between expected and observed price.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Tolerance {
    /// Fixed amount in the reporting currency.
    Absolute(Decimal),

    /// Percentage of the expected price (0.5 means 0.5%).
    Percent(Decimal),
}

impl Tolerance {
    /// Absolute threshold this tolerance allows for a given expected price.
    pub fn threshold(&self, expected_price: Decimal) -> Decimal {
        match self {
            Tolerance::Absolute(amount) => *amount,
            Tolerance::Percent(percent) => expected_price.abs() * *percent / dec!(100),
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::Percent(dec!(0.5))
    }
}

/// Outcome status of reconciling one holding.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReconStatus {
    /// Observed price within tolerance of the expected price.
    WithinTolerance,

    /// Observed price deviates from the expected price beyond tolerance.
    OutOfTolerance,

    /// No expected price configured; the observed price is reported as-is.
    Informational,

    /// No quote could be fetched for the ticker.
    NoQuoteAvailable,

    /// A quote was fetched but could not be converted into the reporting
    /// currency.
    NormalizationFailed,
}

impl ReconStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReconStatus::WithinTolerance => "WITHIN_TOLERANCE",
            ReconStatus::OutOfTolerance => "OUT_OF_TOLERANCE",
            ReconStatus::Informational => "INFORMATIONAL",
            ReconStatus::NoQuoteAvailable => "NO_QUOTE_AVAILABLE",
            ReconStatus::NormalizationFailed => "NORMALIZATION_FAILED",
        }
    }
}

/// Per-ticker input to the engine: what the fetch and normalization stages
/// produced for that ticker.
#[derive(Debug, Clone, PartialEq)]
pub enum ObservedQuote {
    /// Quote fetched and converted into the reporting currency.
    Available(NormalizedQuote),

    /// Quote fetched but conversion failed (missing or stale rate).
    NormalizationFailed { reason: String },

    /// Fetch failed after exhausting retries.
    Unavailable { reason: String },
}

/// One reconciliation result row. Terminal entity, consumed by the report
/// sink.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationRecord {
    pub ticker: String,
    pub exchange: Option<String>,
    pub native_currency: String,

    /// Reference price in the reporting currency, when configured.
    pub expected_price: Option<Decimal>,

    /// Observed close in the reporting currency.
    pub observed_price: Option<Decimal>,

    /// `observed - expected`, present only when both prices are.
    pub delta: Option<Decimal>,

    pub status: ReconStatus,

    /// Timestamp of the close the observed price belongs to.
    pub as_of: Option<DateTime<Utc>>,

    /// Failure detail for no-data and normalization-failed records.
    pub detail: Option<String>,
}

impl ReconciliationRecord {
    /// Tri-state tolerance flag: `None` when no expected price applies.
    pub fn within_tolerance(&self) -> Option<bool> {
        match self.status {
            ReconStatus::WithinTolerance => Some(true),
            ReconStatus::OutOfTolerance => Some(false),
            ReconStatus::NoQuoteAvailable | ReconStatus::NormalizationFailed => Some(false),
            ReconStatus::Informational => None,
        }
    }
}
