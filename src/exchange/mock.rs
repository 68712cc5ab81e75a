//! Scripted rate source for resolver and orchestration tests.

use super::traits::RateSource;
use super::types::RateQuote;
use crate::error::{FetchError, FetchResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// In-memory rate source.
///
/// Dates with a quote answer with it, dates marked as failing answer with an
/// HTTP 500 style error, and every other date reports "not published".
/// All requested dates are recorded in order.
#[derive(Debug, Default)]
pub struct MockRateSource {
    quotes: HashMap<NaiveDate, RateQuote>,
    failing: HashSet<NaiveDate>,
    requests: Mutex<Vec<NaiveDate>>,
}

impl MockRateSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `quote` under the requested date `date`.
    pub fn with_quote(mut self, date: NaiveDate, quote: RateQuote) -> Self {
        self.quotes.insert(date, quote);
        self
    }

    /// Make lookups for `date` fail with a non-404 server error.
    pub fn with_failure(mut self, date: NaiveDate) -> Self {
        self.failing.insert(date);
        self
    }

    /// Dates requested so far, in call order.
    pub fn requests(&self) -> Vec<NaiveDate> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl RateSource for MockRateSource {
    async fn fetch_rate(&self, date: NaiveDate) -> FetchResult<Option<RateQuote>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(date);

        if self.failing.contains(&date) {
            debug!("Mock failure for {}", date);
            return Err(FetchError::UnexpectedStatus {
                date,
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body: "mock failure".to_string(),
            });
        }

        Ok(self.quotes.get(&date).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_mock_records_requests() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let next = day.succ_opt().unwrap();
        let quote = RateQuote::new(dec!(3.99), day);
        let source = MockRateSource::new().with_quote(day, quote);

        assert_eq!(source.fetch_rate(next).await.unwrap(), None);
        assert_eq!(source.fetch_rate(day).await.unwrap(), Some(quote));
        assert_eq!(source.requests(), vec![next, day]);
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let source = MockRateSource::new().with_failure(day);

        assert!(source.fetch_rate(day).await.is_err());
        assert_eq!(source.request_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_records_after_poisoned_lock() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let source = MockRateSource::new();

        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = source.requests.lock().unwrap();
            panic!("poison the request log");
        }));
        assert!(source.requests.is_poisoned());

        source.fetch_rate(day).await.unwrap();
        assert_eq!(source.requests(), vec![day]);
    }
}
