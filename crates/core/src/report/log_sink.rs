//! Log report sink for dry runs.

use log::info;

use super::ReportSink;
use crate::errors::Result;
use crate::recon::ReconciliationRecord;

/// Logs one line per record instead of writing a file.
#[derive(Default)]
pub struct LogReportSink;

impl ReportSink for LogReportSink {
    fn write(&self, records: &[ReconciliationRecord]) -> Result<()> {
        for record in records {
            info!(
                "{} [{}] observed={} expected={} delta={}{}",
                record.ticker,
                record.status.as_str(),
                display(record.observed_price),
                display(record.expected_price),
                display(record.delta),
                record
                    .detail
                    .as_deref()
                    .map(|d| format!(" ({})", d))
                    .unwrap_or_default(),
            );
        }
        Ok(())
    }
}

fn display(value: Option<rust_decimal::Decimal>) -> String {
    value.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}
