/// Decimal precision for normalized prices in the reporting currency
pub const REPORTING_DECIMAL_PRECISION: u32 = 4;

/// Default reporting currency
pub const DEFAULT_REPORTING_CURRENCY: &str = "USD";

/// Default tolerance as a percentage of the expected price
pub const DEFAULT_TOLERANCE_PERCENT: &str = "0.5";

/// Maximum age of an FX rate relative to the quote it normalizes, in
/// calendar days
pub const MAX_FX_RATE_AGE_DAYS: i64 = 1;
