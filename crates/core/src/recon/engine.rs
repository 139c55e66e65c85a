//! The reconciliation engine proper.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::recon_model::{ObservedQuote, ReconStatus, ReconciliationRecord, Tolerance};
use crate::holdings::Holding;

/// Joins holdings with normalized quotes and reference prices into one
/// record per holding.
///
/// Pure and deterministic: identical inputs yield identical output
/// sequences, and the output order is the holdings order regardless of the
/// order the quotes arrived in.
pub struct ReconciliationEngine {
    tolerance: Tolerance,
}

impl ReconciliationEngine {
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// Produce one [`ReconciliationRecord`] per holding (left join on
    /// ticker). A holding with no observed quote is reported as
    /// `NoQuoteAvailable`; one without a reference price is reported as
    /// `Informational`. Neither aborts the run.
    pub fn reconcile(
        &self,
        holdings: &[Holding],
        observed: &HashMap<String, ObservedQuote>,
        expected: &HashMap<String, Decimal>,
    ) -> Vec<ReconciliationRecord> {
        holdings
            .iter()
            .map(|holding| self.reconcile_one(holding, observed.get(&holding.ticker), expected))
            .collect()
    }

    fn reconcile_one(
        &self,
        holding: &Holding,
        observed: Option<&ObservedQuote>,
        expected: &HashMap<String, Decimal>,
    ) -> ReconciliationRecord {
        let expected_price = expected.get(&holding.ticker).copied();

        let mut record = ReconciliationRecord {
            ticker: holding.ticker.clone(),
            exchange: holding.exchange.clone(),
            native_currency: holding.native_currency.clone(),
            expected_price,
            observed_price: None,
            delta: None,
            status: ReconStatus::NoQuoteAvailable,
            as_of: None,
            detail: None,
        };

        match observed {
            Some(ObservedQuote::Available(quote)) => {
                record.observed_price = Some(quote.price);
                record.as_of = Some(quote.as_of);
                match expected_price {
                    Some(expected_price) => {
                        let delta = quote.price - expected_price;
                        record.delta = Some(delta);
                        record.status = if delta.abs() <= self.tolerance.threshold(expected_price) {
                            ReconStatus::WithinTolerance
                        } else {
                            ReconStatus::OutOfTolerance
                        };
                    }
                    None => {
                        record.status = ReconStatus::Informational;
                    }
                }
            }
            Some(ObservedQuote::NormalizationFailed { reason }) => {
                record.status = ReconStatus::NormalizationFailed;
                record.detail = Some(reason.clone());
            }
            Some(ObservedQuote::Unavailable { reason }) => {
                record.detail = Some(reason.clone());
            }
            None => {
                record.detail = Some("no quote returned".to_string());
            }
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::NormalizedQuote;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn holding(ticker: &str) -> Holding {
        Holding {
            ticker: ticker.to_string(),
            quantity: dec!(10),
            exchange: None,
            native_currency: "USD".to_string(),
        }
    }

    fn available(ticker: &str, price: Decimal) -> ObservedQuote {
        ObservedQuote::Available(NormalizedQuote {
            ticker: ticker.to_string(),
            price,
            as_of: Utc.with_ymd_and_hms(2024, 3, 15, 21, 0, 0).unwrap(),
        })
    }

    #[test]
    fn test_tolerance_boundary_half_percent() {
        let engine = ReconciliationEngine::new(Tolerance::Percent(dec!(0.5)));
        let holdings = vec![holding("A"), holding("B")];
        let observed = HashMap::from([
            ("A".to_string(), available("A", dec!(100.50))),
            ("B".to_string(), available("B", dec!(100.51))),
        ]);
        let expected = HashMap::from([
            ("A".to_string(), dec!(100.00)),
            ("B".to_string(), dec!(100.00)),
        ]);

        let records = engine.reconcile(&holdings, &observed, &expected);

        assert_eq!(records[0].status, ReconStatus::WithinTolerance);
        assert_eq!(records[0].delta, Some(dec!(0.50)));
        assert_eq!(records[1].status, ReconStatus::OutOfTolerance);
        assert_eq!(records[1].delta, Some(dec!(0.51)));
    }

    #[test]
    fn test_one_percent_tolerance_example() {
        let engine = ReconciliationEngine::new(Tolerance::Percent(dec!(1)));
        let holdings = vec![holding("AAPL")];
        let observed = HashMap::from([("AAPL".to_string(), available("AAPL", dec!(150.00)))]);
        let expected = HashMap::from([("AAPL".to_string(), dec!(149.00))]);

        let records = engine.reconcile(&holdings, &observed, &expected);

        // delta 1.00 against a 1.49 threshold
        assert_eq!(records[0].delta, Some(dec!(1.00)));
        assert_eq!(records[0].status, ReconStatus::WithinTolerance);
        assert_eq!(records[0].within_tolerance(), Some(true));
    }

    #[test]
    fn test_missing_quote_is_reportable_not_fatal() {
        let engine = ReconciliationEngine::new(Tolerance::default());
        let holdings = vec![holding("GONE")];
        let expected = HashMap::from([("GONE".to_string(), dec!(10))]);

        let records = engine.reconcile(&holdings, &HashMap::new(), &expected);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, ReconStatus::NoQuoteAvailable);
        assert_eq!(records[0].observed_price, None);
        assert_eq!(records[0].within_tolerance(), Some(false));
    }

    #[test]
    fn test_no_expected_price_is_informational() {
        let engine = ReconciliationEngine::new(Tolerance::default());
        let holdings = vec![holding("SPOT")];
        let observed = HashMap::from([("SPOT".to_string(), available("SPOT", dec!(305.10)))]);

        let records = engine.reconcile(&holdings, &observed, &HashMap::new());

        assert_eq!(records[0].status, ReconStatus::Informational);
        assert_eq!(records[0].observed_price, Some(dec!(305.10)));
        assert_eq!(records[0].delta, None);
        assert_eq!(records[0].within_tolerance(), None);
    }

    #[test]
    fn test_normalization_failure_carries_reason() {
        let engine = ReconciliationEngine::new(Tolerance::default());
        let holdings = vec![holding("7203.T")];
        let observed = HashMap::from([(
            "7203.T".to_string(),
            ObservedQuote::NormalizationFailed {
                reason: "No FX rate available for JPY/USD".to_string(),
            },
        )]);

        let records = engine.reconcile(&holdings, &observed, &HashMap::new());

        assert_eq!(records[0].status, ReconStatus::NormalizationFailed);
        assert_eq!(
            records[0].detail.as_deref(),
            Some("No FX rate available for JPY/USD")
        );
    }

    #[test]
    fn test_output_preserves_holdings_order() {
        let engine = ReconciliationEngine::new(Tolerance::default());
        let holdings = vec![holding("Z"), holding("A"), holding("M")];
        let observed = HashMap::from([
            ("A".to_string(), available("A", dec!(1))),
            ("M".to_string(), available("M", dec!(2))),
            ("Z".to_string(), available("Z", dec!(3))),
        ]);

        let records = engine.reconcile(&holdings, &observed, &HashMap::new());

        let order: Vec<&str> = records.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(order, vec!["Z", "A", "M"]);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let engine = ReconciliationEngine::new(Tolerance::Percent(dec!(0.5)));
        let holdings = vec![holding("A"), holding("B"), holding("C")];
        let observed = HashMap::from([
            ("A".to_string(), available("A", dec!(99.99))),
            (
                "C".to_string(),
                ObservedQuote::Unavailable {
                    reason: "Timeout: YAHOO_CHART".to_string(),
                },
            ),
        ]);
        let expected = HashMap::from([("A".to_string(), dec!(100.00))]);

        let first = engine.reconcile(&holdings, &observed, &expected);
        let second = engine.reconcile(&holdings, &observed, &expected);

        assert_eq!(first, second);
    }

    #[test]
    fn test_negative_delta_within_tolerance() {
        let engine = ReconciliationEngine::new(Tolerance::Absolute(dec!(0.50)));
        let holdings = vec![holding("A")];
        let observed = HashMap::from([("A".to_string(), available("A", dec!(99.60)))]);
        let expected = HashMap::from([("A".to_string(), dec!(100.00))]);

        let records = engine.reconcile(&holdings, &observed, &expected);

        assert_eq!(records[0].delta, Some(dec!(-0.40)));
        assert_eq!(records[0].status, ReconStatus::WithinTolerance);
    }
}
