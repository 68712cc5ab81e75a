//! Source-agnostic trait for exchange rate lookups.
//!
//! The resolver only needs "give me the rate for this date, if one was
//! published". Implement this trait to plug in another rate service or a
//! scripted source for tests.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::types::RateQuote;
use crate::error::FetchResult;

/// Trait for services that publish one rate per business day.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch the rate published for `date`.
    ///
    /// Returns `Ok(None)` when nothing was published for that date
    /// (weekends, holidays). Any `Err` is terminal for the lookup.
    async fn fetch_rate(&self, date: NaiveDate) -> FetchResult<Option<RateQuote>>;
}

#[async_trait]
impl<T: RateSource + ?Sized> RateSource for &T {
    async fn fetch_rate(&self, date: NaiveDate) -> FetchResult<Option<RateQuote>> {
        (**self).fetch_rate(date).await
    }
}
