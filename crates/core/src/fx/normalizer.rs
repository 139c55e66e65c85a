//! Quote normalization into the reporting currency.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::currency::{minor_unit_divisor, normalize_currency_code};
use super::fx_errors::FxError;
use crate::constants::{MAX_FX_RATE_AGE_DAYS, REPORTING_DECIMAL_PRECISION};
use pricecross_market_data::{FxRate, Quote};

/// A quote converted into the reporting currency.
///
/// Consumed by the reconciliation engine; nothing outlives the run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedQuote {
    pub ticker: String,

    /// Price in the reporting currency, rounded to 4 decimal places with
    /// banker's rounding.
    pub price: Decimal,

    pub as_of: DateTime<Utc>,
}

/// Converts vendor quotes into the reporting currency using the run's FX
/// rate snapshot.
///
/// Pure computation: the rates are loaded once at construction and lookups
/// never touch the network. Each pair keeps its most recent rate, and the
/// inverse direction is derived (1/rate) when only one direction is quoted.
pub struct CurrencyNormalizer {
    reporting_currency: String,
    rates: HashMap<(String, String), FxRate>,
}

impl CurrencyNormalizer {
    /// Create a normalizer targeting `reporting_currency`.
    pub fn new(reporting_currency: impl Into<String>, rates: Vec<FxRate>) -> Self {
        let mut normalizer = Self {
            reporting_currency: reporting_currency.into(),
            rates: HashMap::new(),
        };
        normalizer.add_rates(rates);
        normalizer
    }

    /// Add FX rates, keeping the most recent rate per pair. Derived inverse
    /// rates never displace a directly quoted one of the same age.
    fn add_rates(&mut self, rates: Vec<FxRate>) {
        for rate in rates {
            if rate.from_currency == rate.to_currency {
                continue;
            }
            let inverse = rate.inverted();
            self.insert(rate, false);
            if let Some(inverse) = inverse {
                self.insert(inverse, true);
            }
        }
    }

    fn insert(&mut self, rate: FxRate, derived: bool) {
        let key = (rate.from_currency.clone(), rate.to_currency.clone());
        match self.rates.get(&key) {
            Some(existing) if derived && existing.as_of >= rate.as_of => {}
            Some(existing) if !derived && existing.as_of > rate.as_of => {}
            _ => {
                self.rates.insert(key, rate);
            }
        }
    }

    pub fn reporting_currency(&self) -> &str {
        &self.reporting_currency
    }

    /// Convert a quote into the reporting currency.
    ///
    /// Minor-unit quotes (pence, cents) are scaled to the major unit first.
    /// Fails with [`FxError::MissingRate`] when the pair has no rate and
    /// with [`FxError::StaleRate`] when the rate predates the quote by more
    /// than one calendar day.
    pub fn normalize(&self, quote: &Quote) -> Result<NormalizedQuote, FxError> {
        let currency = normalize_currency_code(&quote.currency);
        let major_price = quote.price / minor_unit_divisor(&quote.currency);

        if currency == self.reporting_currency {
            return Ok(NormalizedQuote {
                ticker: quote.ticker.clone(),
                price: Self::round(major_price),
                as_of: quote.as_of,
            });
        }

        let key = (currency.to_string(), self.reporting_currency.clone());
        let rate = self.rates.get(&key).ok_or_else(|| FxError::MissingRate {
            from: currency.to_string(),
            to: self.reporting_currency.clone(),
        })?;

        let quote_date = quote.as_of.date_naive();
        let rate_date = rate.as_of.date_naive();
        if (quote_date - rate_date).num_days() > MAX_FX_RATE_AGE_DAYS {
            return Err(FxError::StaleRate {
                from: currency.to_string(),
                to: self.reporting_currency.clone(),
                rate_date,
                quote_date,
            });
        }

        Ok(NormalizedQuote {
            ticker: quote.ticker.clone(),
            price: Self::round(major_price * rate.rate),
            as_of: quote.as_of,
        })
    }

    fn round(price: Decimal) -> Decimal {
        price.round_dp_with_strategy(
            REPORTING_DECIMAL_PRECISION,
            RoundingStrategy::MidpointNearestEven,
        )
    }
}
