//! Coinbase v2 REST API client.
//!
//! The client recognizes two request kinds: signed (account, user, and price
//! endpoints) and public (server time, exchange rates), mirroring what the
//! upstream API requires. Signed operations take the caller's [`Credentials`]
//! by reference, so one client instance serves concurrent requests without
//! credential leakage.
//!
//! [`Credentials`]: crate::auth::Credentials

mod account;
mod client;
pub(crate) mod endpoints;
mod public;
pub mod types;

pub use account::DUST_THRESHOLD;
pub use client::{ApiOutcome, CoinbaseRestClient, CoinbaseRestClientBuilder};
pub use endpoints::{API_VERSION, COINBASE_BASE_URL};
