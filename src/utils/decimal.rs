//! Decimal formatting utilities for exchange rates.

use rust_decimal::Decimal;

/// Render a rate without trailing zeros (e.g. `4.10` -> `4.1`).
pub fn format_rate(rate: Decimal) -> String {
    rate.normalize().to_string()
}
