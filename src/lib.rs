//! # Coinbase Balance Service
//!
//! An async HTTP service that reports a user's aggregated Coinbase balance
//! and balance history, backed by a read-through cache.
//!
//! ## Features
//!
//! - Signed, versioned Coinbase v2 REST client with typed error translation
//! - Derived current-balance computation with concurrent price fan-out
//! - Read-through caching with miss coalescing and history logging
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coinbase_balance_service::auth::Credentials;
//! use coinbase_balance_service::rest::CoinbaseRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CoinbaseRestClient::new();
//!     let credentials = Credentials::new("api_key", "api_secret");
//!     let balance = client.get_current_balance(&credentials).await?;
//!     println!("Balance: {balance} EUR");
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod balance;
pub mod cache;
pub mod config;
pub mod error;
pub mod rest;
pub mod server;

// Re-export commonly used types at crate root
pub use error::ServiceError;
pub use rest::CoinbaseRestClient;

/// Result type alias using ServiceError
pub type Result<T> = std::result::Result<T, ServiceError>;
