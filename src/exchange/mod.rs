//! Exchange rate service integrations.
//!
//! ## NBP
//! Read-only access to the Narodowy Bank Polski rate tables:
//! - Mid rates from table A, one per business day
//! - HTTP 404 for dates without a published table (weekends, holidays)

mod client;
#[cfg(test)]
pub mod mock;
mod traits;
mod types;

pub use client::NbpClient;
#[cfg(test)]
pub use mock::MockRateSource;
pub use traits::RateSource;
pub use types::*;
