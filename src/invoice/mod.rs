//! Invoice data file access.
//!
//! The invoice file is a hand-maintained TOML document. Only `invoice_date`
//! is read, and only the `exchange_rate` / `exchange_date` lines are
//! rewritten. Everything else, including comments and formatting, passes
//! through byte for byte.

use chrono::NaiveDate;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{InvoiceError, InvoiceResult};
use crate::exchange::RateQuote;
use crate::utils::format_rate;

/// File name used when nothing else is configured.
pub const DEFAULT_INVOICE_FILE: &str = "invoice-data.toml";

/// Trailing comment marking lines written by this tool.
pub const PROVENANCE_TAG: &str = "fetch-exchange-rate.py";

const INVOICE_DATE_KEY: &str = "invoice_date";
const RATE_KEY: &str = "exchange_rate";
const DATE_KEY: &str = "exchange_date";

/// Read the top-level `invoice_date` from the invoice file.
///
/// Accepts both a quoted string and a TOML local date.
pub fn read_invoice_date(path: &Path) -> InvoiceResult<NaiveDate> {
    if !path.exists() {
        return Err(InvoiceError::FileMissing {
            path: path.to_path_buf(),
        });
    }

    debug!("Reading {}", path.display());

    let data = config::Config::builder()
        .add_source(config::File::from(path.to_path_buf()).format(config::FileFormat::Toml))
        .build()
        .map_err(|source| InvoiceError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let value = match data.get_string(INVOICE_DATE_KEY) {
        Ok(value) => value,
        Err(config::ConfigError::NotFound(_)) => {
            return Err(InvoiceError::FieldMissing {
                path: path.to_path_buf(),
                field: INVOICE_DATE_KEY,
            })
        }
        Err(source) => {
            return Err(InvoiceError::Parse {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|source| {
        InvoiceError::InvalidDate {
            path: path.to_path_buf(),
            value,
            source,
        }
    })
}

/// Write `quote` into the `exchange_rate` and `exchange_date` lines of the file.
///
/// Both lines must exist; otherwise the file is left untouched.
pub fn update_exchange_fields(path: &Path, quote: &RateQuote) -> InvoiceResult<()> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => InvoiceError::FileMissing {
            path: path.to_path_buf(),
        },
        _ => InvoiceError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let missing = |field| InvoiceError::FieldMissing {
        path: path.to_path_buf(),
        field,
    };

    let rate_value = format_rate(quote.rate);
    let date_value = format!("\"{}\"", quote.effective_date.format("%Y-%m-%d"));

    let updated =
        replace_field_line(&content, RATE_KEY, &rate_value).ok_or_else(|| missing(RATE_KEY))?;
    let updated =
        replace_field_line(&updated, DATE_KEY, &date_value).ok_or_else(|| missing(DATE_KEY))?;

    fs::write(path, updated).map_err(|source| InvoiceError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!("✓ Updated {}", path.display());
    Ok(())
}

/// Replace the first line starting with `{key} = ` by `{key} = {value}  # {tag}`.
///
/// The replaced line keeps its original line terminator. Returns `None` when
/// no line matches.
pub fn replace_field_line(content: &str, key: &str, value: &str) -> Option<String> {
    let prefix = format!("{key} = ");
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let body = line.trim_end_matches(|c: char| c == '\n' || c == '\r');

        if body.starts_with(&prefix) {
            let ending = &line[body.len()..];
            let rest = &content[offset + line.len()..];

            let mut out = String::with_capacity(content.len() + value.len() + PROVENANCE_TAG.len());
            out.push_str(&content[..offset]);
            out.push_str(&format!("{prefix}{value}  # {PROVENANCE_TAG}"));
            out.push_str(ending);
            out.push_str(rest);
            return Some(out);
        }

        offset += line.len();
    }

    None
}
