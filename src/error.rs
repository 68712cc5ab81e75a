//! Error types for rate lookups and invoice file updates.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while talking to the rate service or walking back through dates.
///
/// "No rate published for this date" is not an error: sources report it as
/// `Ok(None)` and the resolver steps one day back.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Error fetching exchange rate for {date}: {source}")]
    Transport {
        date: NaiveDate,
        #[source]
        source: reqwest::Error,
    },

    #[error("Error fetching exchange rate for {date}: HTTP {status}: {body}")]
    UnexpectedStatus {
        date: NaiveDate,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed rate service response for {date}: {source}")]
    MalformedResponse {
        date: NaiveDate,
        #[source]
        source: serde_json::Error,
    },

    #[error("Rate service response for {date} contains no rates")]
    EmptyRates { date: NaiveDate },

    #[error("Couldn't find exchange rate in the last {attempts} days (starting from {start})")]
    ExhaustedAttempts { start: NaiveDate, attempts: u32 },

    #[error("No calendar day precedes {date}")]
    DateOutOfRange { date: NaiveDate },
}

/// Failures while reading or rewriting the invoice data file.
#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("{} not found. Run 'make' to create it from the template.", .path.display())]
    FileMissing { path: PathBuf },

    #[error(
        "Could not find {field} in {}. Please check that the file has the correct format.",
        .path.display()
    )]
    FieldMissing { path: PathBuf, field: &'static str },

    #[error("Invalid invoice_date {value:?} in {}: expected YYYY-MM-DD", .path.display())]
    InvalidDate {
        path: PathBuf,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },

    #[error("Failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type FetchResult<T> = Result<T, FetchError>;

pub type InvoiceResult<T> = Result<T, InvoiceError>;
