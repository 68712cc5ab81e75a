//! Shared utilities.

mod decimal;

pub use decimal::format_rate;
