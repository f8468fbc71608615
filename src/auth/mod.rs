//! Authentication for the Coinbase v2 API.
//!
//! This module provides:
//! - Credential handling with secure secret storage
//! - HMAC-SHA256 request signing for authenticated endpoints

mod credentials;
mod signature;

pub use credentials::Credentials;
pub use signature::{SignedRequest, sign_message};
