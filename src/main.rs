//! Fetch Exchange Rate - Main Entry Point
//!
//! Without arguments, updates the invoice data file with the NBP rate
//! published before its invoice date. With a date argument, only prints the
//! rate published before that date.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use fetch_exchange_rate::app;
use fetch_exchange_rate::config::{AppConfig, LoggingConfig};
use fetch_exchange_rate::exchange::NbpClient;
use fetch_exchange_rate::resolver::RateResolver;
use fetch_exchange_rate::utils::format_rate;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

/// Fetch Exchange Rate CLI
#[derive(Parser)]
#[command(name = "fetch-exchange-rate")]
#[command(version, about = "Fetch the NBP USD/PLN rate for an invoice and record it")]
struct Cli {
    /// Only print the rate published before this date (YYYY-MM-DD)
    date: Option<NaiveDate>,

    /// Invoice data file to update (default: invoice-data.toml)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = parse_cli(std::env::args_os());

    let config = AppConfig::load()?;
    config.validate()?;

    init_logging(&config.logging, cli.verbose)?;
    debug!("Configuration: {:?}", config);

    let client = NbpClient::new(&config.nbp)?;
    let currency = client.currency_code();
    let resolver = RateResolver::new(client, config.resolver.max_attempts);

    match cli.date {
        Some(date) => run_query(&resolver, date, &currency).await,
        None => {
            let path = cli.file.unwrap_or(config.invoice.path);
            run_update(&resolver, path, &currency).await
        }
    }
}

/// Parse arguments; usage errors exit with 1 like every other fatal condition.
fn parse_cli<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let code = cli_exit_code(&err);
            if code == 0 {
                // --help / --version
                err.exit();
            }
            let _ = err.print();
            std::process::exit(code);
        }
    }
}

fn cli_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Query-only mode: print the rate, never touch the invoice file.
async fn run_query(resolver: &RateResolver<NbpClient>, date: NaiveDate, currency: &str) -> Result<()> {
    let quote = app::query_rate(resolver, date).await?;

    println!();
    println!("Exchange rate for {}:", quote.effective_date);
    println!("Rate: {} PLN/{}", format_rate(quote.rate), currency);

    Ok(())
}

/// Update mode: rewrite the exchange fields of the invoice data file.
async fn run_update(resolver: &RateResolver<NbpClient>, path: PathBuf, currency: &str) -> Result<()> {
    let quote = app::update_invoice(resolver, &path)
        .await
        .with_context(|| format!("Failed to update {}", path.display()))?;

    println!();
    println!("Success! Exchange rate updated:");
    println!("Rate: {} PLN/{}", format_rate(quote.rate), currency);
    println!("Date: {}", quote.effective_date);

    Ok(())
}

/// Initialize console logging, plus a rolling log file when configured.
fn init_logging(config: &LoggingConfig, verbose: bool) -> Result<()> {
    use tracing_subscriber::fmt::writer::MakeWriterExt;

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(Level::WARN.into())
        .from_env()?
        .add_directive(format!("fetch_exchange_rate={}", level).parse()?);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time();

    match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let file_appender = tracing_appender::rolling::daily(dir, "fetch-exchange-rate.log");
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

            // Keep the writer alive for the program duration
            Box::leak(Box::new(guard));

            builder
                .with_writer(std::io::stderr.and(file_writer))
                .with_ansi(false)
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}
