//! Credential handling for Coinbase API authentication.

use secrecy::{ExposeSecret, SecretString};

/// Per-caller API credentials plus request locale and display currency.
///
/// A value of this type is built once per inbound request and passed by
/// reference into each client operation, so concurrent callers sharing one
/// client instance can never observe each other's keys.
#[derive(Clone)]
pub struct Credentials {
    /// The API key (public identifier)
    pub api_key: String,
    /// The API secret (private, used for signing)
    api_secret: SecretString,
    /// Language sent in the `Accept-Language` header
    pub locale: String,
    /// Display currency for exchange-rate lookups
    pub currency: String,
}

impl Credentials {
    /// Locale used when the caller supplies none.
    pub const DEFAULT_LOCALE: &'static str = "en";
    /// Display currency used when the caller supplies none.
    pub const DEFAULT_CURRENCY: &'static str = "EUR";

    /// Create new credentials from an API key and secret.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
            locale: Self::DEFAULT_LOCALE.to_string(),
            currency: Self::DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Override the request locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Override the display currency.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Get the API secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("locale", &self.locale)
            .field("currency", &self.currency)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials::new("my_key", "super_secret");
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("my_key"));
        assert!(!debug_str.contains("super_secret"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_credentials_defaults() {
        let creds = Credentials::new("key", "secret");
        assert_eq!(creds.locale, "en");
        assert_eq!(creds.currency, "EUR");
        assert_eq!(creds.expose_secret(), "secret");
    }

    #[test]
    fn test_credentials_overrides() {
        let creds = Credentials::new("key", "secret")
            .with_locale("de")
            .with_currency("CHF");
        assert_eq!(creds.locale, "de");
        assert_eq!(creds.currency, "CHF");
    }
}
