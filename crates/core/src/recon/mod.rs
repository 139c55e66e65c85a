//! Reconciliation engine - joins holdings with normalized quotes and flags
//! discrepancies against reference prices.

mod engine;
mod recon_model;

pub use engine::ReconciliationEngine;
pub use recon_model::{ObservedQuote, ReconStatus, ReconciliationRecord, Tolerance};
