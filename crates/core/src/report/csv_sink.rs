//! CSV report sink.

use std::path::PathBuf;

use log::info;

use super::ReportSink;
use crate::errors::{Error, Result};
use crate::recon::ReconciliationRecord;

/// Writes the reconciliation report as a CSV file, one row per holding,
/// in record order. An existing file at the target path is overwritten.
pub struct CsvReportSink {
    path: PathBuf,
}

impl CsvReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for CsvReportSink {
    fn write(&self, records: &[ReconciliationRecord]) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path)
            .map_err(|e| Error::Report(format!("cannot create {}: {}", self.path.display(), e)))?;

        writer
            .write_record([
                "ticker",
                "exchange",
                "native_currency",
                "observed_price",
                "expected_price",
                "delta",
                "status",
                "within_tolerance",
                "as_of",
            ])
            .map_err(|e| Error::Report(e.to_string()))?;

        for record in records {
            let within_tolerance = match record.within_tolerance() {
                Some(flag) => flag.to_string(),
                None => String::new(),
            };
            let observed = optional_decimal(record.observed_price);
            let expected = optional_decimal(record.expected_price);
            let delta = optional_decimal(record.delta);
            let as_of = record.as_of.map(|t| t.to_rfc3339()).unwrap_or_default();
            writer
                .write_record([
                    record.ticker.as_str(),
                    record.exchange.as_deref().unwrap_or(""),
                    record.native_currency.as_str(),
                    observed.as_str(),
                    expected.as_str(),
                    delta.as_str(),
                    record.status.as_str(),
                    within_tolerance.as_str(),
                    as_of.as_str(),
                ])
                .map_err(|e| Error::Report(e.to_string()))?;
        }

        writer
            .flush()
            .map_err(|e| Error::Report(e.to_string()))?;

        info!(
            "Wrote reconciliation report with {} rows to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn optional_decimal(value: Option<rust_decimal::Decimal>) -> String {
    value.map(|d| d.to_string()).unwrap_or_default()
}
