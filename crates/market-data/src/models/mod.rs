//! Data models shared between providers and the domain layer.

mod fx;
mod quote;

pub use fx::FxRate;
pub use quote::Quote;
