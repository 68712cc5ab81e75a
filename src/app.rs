//! Query and update flows driven by the CLI.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;
use tracing::info;

use crate::exchange::{RateQuote, RateSource};
use crate::invoice;
use crate::resolver::RateResolver;

/// Look up the rate published before `date`. Never touches the invoice file.
pub async fn query_rate<S: RateSource>(
    resolver: &RateResolver<S>,
    date: NaiveDate,
) -> Result<RateQuote> {
    info!("Looking for exchange rate before {}...", date);

    resolver
        .resolve_before(date)
        .await
        .with_context(|| format!("Failed to resolve exchange rate before {date}"))
}

/// Read the invoice date from `path`, resolve the rate published before it
/// and write the result back into the file.
pub async fn update_invoice<S: RateSource>(
    resolver: &RateResolver<S>,
    path: &Path,
) -> Result<RateQuote> {
    info!("Reading {}...", path.display());
    let invoice_date = invoice::read_invoice_date(path)?;
    info!("Invoice date: {}", invoice_date);

    let quote = query_rate(resolver, invoice_date).await?;

    invoice::update_exchange_fields(path, &quote)?;

    Ok(quote)
}
