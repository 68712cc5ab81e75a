//! Type definitions for NBP API responses.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;

/// Exchange rate series for a single currency.
///
/// Returned by `GET /exchangerates/rates/{table}/{code}/{date}/`. Only the
/// rates are read; `table`, `currency`, `code` and `no` are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRatesSeries {
    pub rates: Vec<SeriesRate>,
}

/// One published rate within a series.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRate {
    pub effective_date: NaiveDate,
    /// Average (mid) rate in PLN per unit of currency
    #[serde(with = "rust_decimal::serde::float")]
    pub mid: Decimal,
}

/// A rate together with the business day it was published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateQuote {
    pub rate: Decimal,
    pub effective_date: NaiveDate,
}

impl RateQuote {
    pub fn new(rate: Decimal, effective_date: NaiveDate) -> Self {
        Self {
            rate,
            effective_date,
        }
    }
}

impl ExchangeRatesSeries {
    /// The first rate of the series, which is the only one for a single-date query.
    pub fn first_quote(&self) -> Option<RateQuote> {
        self.rates
            .first()
            .map(|r| RateQuote::new(r.mid, r.effective_date))
    }
}

impl fmt::Display for RateQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on {}",
            crate::utils::format_rate(self.rate),
            self.effective_date.format("%Y-%m-%d")
        )
    }
}
