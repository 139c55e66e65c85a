//! Report sinks - side-effecting consumers of the reconciliation records.

mod csv_sink;
mod log_sink;

pub use csv_sink::CsvReportSink;
pub use log_sink::LogReportSink;

use crate::errors::Result;
use crate::recon::ReconciliationRecord;

/// Capability for writing the final report artifact.
///
/// Consumes the ordered record sequence; computation is already done by the
/// time a sink runs.
pub trait ReportSink: Send + Sync {
    fn write(&self, records: &[ReconciliationRecord]) -> Result<()>;
}
