//! HMAC-SHA256 signature generation for Coinbase API authentication.
//!
//! Signed endpoints require a signature computed as:
//! ```text
//! hex(HMAC-SHA256(api_secret, timestamp + method + endpoint + body))
//! ```
//!
//! The signature is sent in the `CB-ACCESS-SIGN` header together with the
//! timestamp and API key.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::error::ServiceError;

type HmacSha256 = Hmac<Sha256>;

/// A fully signed request, ready to be turned into HTTP headers.
///
/// The signature covers every other field, so changing any of them means
/// rebuilding the whole value. The timestamp is epoch seconds truncated at
/// signing time; signatures are never reused across calls.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// HTTP method covered by the signature
    pub method: String,
    /// Endpoint path (including any query string) covered by the signature
    pub endpoint: String,
    /// Request body covered by the signature
    pub body: String,
    /// Epoch seconds at signing time
    pub timestamp: i64,
    /// Hex-encoded HMAC-SHA256 over `timestamp + method + endpoint + body`
    pub signature: String,
}

impl SignedRequest {
    /// Sign a request for the given credentials and timestamp.
    ///
    /// Deterministic: identical inputs always produce the same signature.
    pub fn build(
        credentials: &Credentials,
        method: &str,
        endpoint: &str,
        body: &str,
        timestamp: i64,
    ) -> Result<Self, ServiceError> {
        let message = format!("{timestamp}{method}{endpoint}{body}");
        let signature = sign_message(credentials.expose_secret(), &message)?;
        Ok(Self {
            method: method.to_owned(),
            endpoint: endpoint.to_owned(),
            body: body.to_owned(),
            timestamp,
            signature,
        })
    }
}

/// Sign `message` with the shared API secret, returning a hex digest.
pub fn sign_message(api_secret: &str, message: &str) -> Result<String, ServiceError> {
    let mut hmac = HmacSha256::new_from_slice(api_secret.as_bytes())
        .map_err(|e| ServiceError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(message.as_bytes());
    Ok(hex::encode(hmac.finalize().into_bytes()))
}
