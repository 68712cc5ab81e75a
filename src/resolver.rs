//! Rate resolution by walking back over non-business days.
//!
//! NBP publishes table A only on business days. Starting from a candidate
//! date, the resolver asks the source for that day and steps one calendar day
//! back on every "not published" answer, up to a fixed number of attempts.

use chrono::{Days, NaiveDate};
use tracing::{debug, info, instrument};

use crate::error::{FetchError, FetchResult};
use crate::exchange::{RateQuote, RateSource};
use crate::utils::format_rate;

/// Default number of consecutive days tried before giving up.
///
/// Long enough to span Easter and the Christmas/New Year break.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Finds the most recent published rate on or before a date.
pub struct RateResolver<S> {
    source: S,
    max_attempts: u32,
}

impl<S: RateSource> RateResolver<S> {
    pub fn new(source: S, max_attempts: u32) -> Self {
        Self {
            source,
            max_attempts,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve the rate starting at `start` and walking back one day per miss.
    ///
    /// Errors from the source abort immediately; only "not published" is
    /// retried.
    #[instrument(skip(self))]
    pub async fn resolve(&self, start: NaiveDate) -> FetchResult<RateQuote> {
        let mut current = Some(start);

        for _ in 0..self.max_attempts {
            let Some(date) = current else {
                break;
            };

            info!("Trying to fetch exchange rate for {}...", date);

            if let Some(quote) = self.source.fetch_rate(date).await? {
                info!(
                    "Found exchange rate: {} PLN for {}",
                    format_rate(quote.rate),
                    quote.effective_date
                );
                return Ok(quote);
            }

            debug!("No rate for {}, trying previous day", date);
            current = date.checked_sub_days(Days::new(1));
        }

        Err(FetchError::ExhaustedAttempts {
            start,
            attempts: self.max_attempts,
        })
    }

    /// Resolve the most recent rate published strictly before `date`.
    pub async fn resolve_before(&self, date: NaiveDate) -> FetchResult<RateQuote> {
        let start = date
            .checked_sub_days(Days::new(1))
            .ok_or(FetchError::DateOutOfRange { date })?;

        self.resolve(start).await
    }
}
