//! One-run orchestration: fetch, normalize, reconcile.
//!
//! The pipeline is partial-failure tolerant. A ticker that cannot be
//! fetched or normalized still produces a record; only structural problems
//! (a broken registry, handled before the pipeline runs) abort a run.

use std::collections::HashMap;
use std::sync::Arc;

use log::{info, warn};
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::fx::{normalize_currency_code, CurrencyNormalizer};
use crate::holdings::HoldingsRegistry;
use crate::recon::{ObservedQuote, ReconciliationEngine, ReconciliationRecord, Tolerance};
use pricecross_market_data::{
    fetch_latest_quotes, fetch_latest_rates, FetchOptions, FxRateSource, QuoteSource,
};

/// Run settings for one reconciliation pass.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Currency every quote is normalized into.
    pub reporting_currency: String,

    pub tolerance: Tolerance,

    pub fetch: FetchOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reporting_currency: crate::constants::DEFAULT_REPORTING_CURRENCY.to_string(),
            tolerance: Tolerance::default(),
            fetch: FetchOptions::default(),
        }
    }
}

/// The reconciliation pipeline for a single run.
///
/// Owns its vendor capabilities; the concrete providers are injected at
/// startup so the run logic never sees transport details.
pub struct ReconciliationPipeline {
    quote_source: Arc<dyn QuoteSource>,
    fx_source: Arc<dyn FxRateSource>,
    config: PipelineConfig,
}

impl ReconciliationPipeline {
    pub fn new(
        quote_source: Arc<dyn QuoteSource>,
        fx_source: Arc<dyn FxRateSource>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            quote_source,
            fx_source,
            config,
        }
    }

    /// Run one reconciliation pass over the registry.
    ///
    /// Returns one record per holding, in registry order.
    pub async fn run(
        &self,
        registry: &HoldingsRegistry,
        expected: &HashMap<String, Decimal>,
    ) -> Result<Vec<ReconciliationRecord>> {
        let tickers = registry.tickers();
        info!(
            "Reconciling {} holdings into {}",
            tickers.len(),
            self.config.reporting_currency
        );

        let outcomes =
            fetch_latest_quotes(self.quote_source.as_ref(), &tickers, &self.config.fetch).await;

        let rates = if self.needs_fx(&outcomes) {
            match fetch_latest_rates(
                self.fx_source.as_ref(),
                &self.config.reporting_currency,
                &self.config.fetch,
            )
            .await
            {
                Ok(rates) => rates,
                Err(e) => {
                    // Every cross-currency ticker will surface this as a
                    // normalization failure in its record.
                    warn!("FX rate fetch failed, continuing without rates: {}", e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let normalizer = CurrencyNormalizer::new(self.config.reporting_currency.clone(), rates);

        let mut observed: HashMap<String, ObservedQuote> = HashMap::with_capacity(outcomes.len());
        for outcome in outcomes {
            let entry = match outcome.result {
                Ok(quote) => match normalizer.normalize(&quote) {
                    Ok(normalized) => ObservedQuote::Available(normalized),
                    Err(e) => ObservedQuote::NormalizationFailed {
                        reason: e.to_string(),
                    },
                },
                Err(e) => ObservedQuote::Unavailable {
                    reason: e.to_string(),
                },
            };
            observed.insert(outcome.ticker, entry);
        }

        let engine = ReconciliationEngine::new(self.config.tolerance.clone());
        Ok(engine.reconcile(registry.holdings(), &observed, expected))
    }

    /// FX is only fetched when at least one quote arrived in a currency
    /// other than the reporting one, so an all-domestic portfolio never
    /// touches the FX vendor.
    fn needs_fx(&self, outcomes: &[pricecross_market_data::FetchOutcome]) -> bool {
        outcomes.iter().any(|o| match &o.result {
            Ok(quote) => {
                normalize_currency_code(&quote.currency) != self.config.reporting_currency
            }
            Err(_) => false,
        })
    }
}
