//! Holdings registry - the immutable portfolio snapshot a run reconciles.

mod holdings_model;
mod registry;
mod suffixes;

pub use holdings_model::Holding;
pub use registry::{load_expected_prices, HoldingsRegistry};
pub use suffixes::infer_native_currency;
