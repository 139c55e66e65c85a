//! CSV loaders for the holdings registry and the reference price file.
//!
//! Registry problems are structural: they abort the run before any fetch,
//! unlike per-ticker data problems which only mark the affected record.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::holdings_model::Holding;
use super::suffixes::infer_native_currency;
use crate::errors::{Error, Result};

/// Immutable portfolio snapshot for a single run.
///
/// Holds the configured positions in registry order; reconciliation records
/// come out in the same order.
#[derive(Debug, Clone)]
pub struct HoldingsRegistry {
    holdings: Vec<Holding>,
}

impl HoldingsRegistry {
    /// Build a registry from already-validated holdings.
    ///
    /// Rejects duplicate tickers and an empty portfolio.
    pub fn new(holdings: Vec<Holding>) -> Result<Self> {
        if holdings.is_empty() {
            return Err(Error::Configuration(
                "holdings registry is empty".to_string(),
            ));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for holding in &holdings {
            if !seen.insert(holding.ticker.as_str()) {
                return Err(Error::Configuration(format!(
                    "duplicate ticker in holdings registry: {}",
                    holding.ticker
                )));
            }
        }

        Ok(Self { holdings })
    }

    /// Load a registry from a CSV file with a
    /// `ticker,quantity,exchange,currency` header row. `exchange` and
    /// `currency` may be empty; an empty currency is inferred from the
    /// ticker suffix.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Configuration(format!("cannot open {}: {}", path.display(), e)))?;
        Self::from_reader(file)
    }

    /// Load a registry from any CSV reader. See [`from_csv_path`](Self::from_csv_path).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut holdings = Vec::new();
        for (idx, row) in csv_reader.records().enumerate() {
            let line = idx + 2; // header is line 1
            let record =
                row.map_err(|e| Error::Configuration(format!("holdings line {}: {}", line, e)))?;

            let ticker = field(&record, 0);
            if ticker.is_empty() {
                return Err(Error::Configuration(format!(
                    "holdings line {}: missing ticker",
                    line
                )));
            }

            let quantity_raw = field(&record, 1);
            let quantity = Decimal::from_str(&quantity_raw).map_err(|_| {
                Error::Configuration(format!(
                    "holdings line {}: invalid quantity '{}' for {}",
                    line, quantity_raw, ticker
                ))
            })?;

            let exchange = match field(&record, 2) {
                s if s.is_empty() => None,
                s => Some(s),
            };

            let native_currency = match field(&record, 3) {
                s if s.is_empty() => infer_native_currency(&ticker).to_string(),
                s => s,
            };

            holdings.push(Holding {
                ticker,
                quantity,
                exchange,
                native_currency,
            });
        }

        Self::new(holdings)
    }

    /// Positions in registry order.
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// Tickers in registry order.
    pub fn tickers(&self) -> Vec<String> {
        self.holdings.iter().map(|h| h.ticker.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

/// Load reference prices from a `ticker,expected_price` CSV file.
///
/// The result is keyed by ticker; holdings without an entry produce
/// informational records.
pub fn load_expected_prices(path: &Path) -> Result<HashMap<String, Decimal>> {
    let file = std::fs::File::open(path)
        .map_err(|e| Error::Configuration(format!("cannot open {}: {}", path.display(), e)))?;
    load_expected_prices_from_reader(file)
}

fn load_expected_prices_from_reader<R: Read>(reader: R) -> Result<HashMap<String, Decimal>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut expected = HashMap::new();
    for (idx, row) in csv_reader.records().enumerate() {
        let line = idx + 2;
        let record = row
            .map_err(|e| Error::Configuration(format!("reference prices line {}: {}", line, e)))?;

        let ticker = field(&record, 0);
        if ticker.is_empty() {
            return Err(Error::Configuration(format!(
                "reference prices line {}: missing ticker",
                line
            )));
        }

        let price_raw = field(&record, 1);
        let price = Decimal::from_str(&price_raw).map_err(|_| {
            Error::Configuration(format!(
                "reference prices line {}: invalid price '{}' for {}",
                line, price_raw, ticker
            ))
        })?;

        if expected.insert(ticker.clone(), price).is_some() {
            return Err(Error::Configuration(format!(
                "duplicate ticker in reference prices: {}",
                ticker
            )));
        }
    }

    Ok(expected)
}

fn field(record: &csv::StringRecord, index: usize) -> String {
    record.get(index).unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_registry_loads_and_infers_currency() {
        let csv = "ticker,quantity,exchange,currency\n\
                   AAPL,10,NASDAQ,USD\n\
                   WISE.L,25,,\n\
                   SIE.DE,5,XETRA,\n";
        let registry = HoldingsRegistry::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(registry.len(), 3);
        let holdings = registry.holdings();
        assert_eq!(holdings[0].ticker, "AAPL");
        assert_eq!(holdings[0].quantity, dec!(10));
        assert_eq!(holdings[0].exchange.as_deref(), Some("NASDAQ"));
        assert_eq!(holdings[1].native_currency, "GBp");
        assert!(holdings[1].exchange.is_none());
        assert_eq!(holdings[2].native_currency, "EUR");
    }

    #[test]
    fn test_registry_preserves_input_order() {
        let csv = "ticker,quantity,exchange,currency\n\
                   ZAL.DE,1,,\n\
                   AAPL,2,,\n\
                   BOKU.L,3,,\n";
        let registry = HoldingsRegistry::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(registry.tickers(), vec!["ZAL.DE", "AAPL", "BOKU.L"]);
    }

    #[test]
    fn test_duplicate_ticker_is_fatal() {
        let csv = "ticker,quantity,exchange,currency\n\
                   AAPL,10,,\n\
                   AAPL,5,,\n";
        let err = HoldingsRegistry::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("duplicate ticker"));
    }

    #[test]
    fn test_invalid_quantity_is_fatal() {
        let csv = "ticker,quantity,exchange,currency\n\
                   AAPL,ten,,\n";
        let err = HoldingsRegistry::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("invalid quantity"));
    }

    #[test]
    fn test_empty_registry_is_fatal() {
        let csv = "ticker,quantity,exchange,currency\n";
        let err = HoldingsRegistry::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_expected_prices_load() {
        let csv = "ticker,expected_price\n\
                   AAPL,149.00\n\
                   WISE.L,9.87\n";
        let expected = load_expected_prices_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(expected.len(), 2);
        assert_eq!(expected["AAPL"], dec!(149.00));
        assert_eq!(expected["WISE.L"], dec!(9.87));
    }

    #[test]
    fn test_expected_prices_reject_duplicates() {
        let csv = "ticker,expected_price\n\
                   AAPL,149.00\n\
                   AAPL,150.00\n";
        let err = load_expected_prices_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
