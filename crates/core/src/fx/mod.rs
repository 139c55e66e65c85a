//! FX module - currency codes, minor-unit scaling and quote normalization.

pub mod currency;
mod fx_errors;
mod normalizer;

pub use currency::{minor_unit_divisor, normalize_currency_code};
pub use fx_errors::FxError;
pub use normalizer::{CurrencyNormalizer, NormalizedQuote};
