//! # Fetch Exchange Rate
//!
//! Looks up the NBP (Narodowy Bank Polski) USD/PLN mid rate published before
//! an invoice date and records it in the invoice's TOML data file.
//!
//! ## Architecture
//!
//! - `config`: Application settings loaded from file and environment
//! - `error`: Error taxonomy for rate lookups and invoice rewrites
//! - `exchange`: NBP REST client, wire types and the `RateSource` seam
//! - `resolver`: Walks back day by day until a published rate is found
//! - `invoice`: Reads `invoice_date` and rewrites the exchange fields in place
//! - `app`: Query and update flows used by the CLI
//! - `utils`: Shared utilities and decimal formatting

pub mod app;
pub mod config;
pub mod error;
pub mod exchange;
pub mod invoice;
pub mod resolver;
pub mod utils;

pub use crate::config::AppConfig;
pub use crate::exchange::RateQuote;
