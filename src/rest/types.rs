//! Types for the Coinbase v2 REST API.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::UpstreamError;

/// Envelope wrapping every Coinbase response body: `data` on success,
/// `errors` on failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<UpstreamError>,
}

/// Server time response.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerTime {
    /// ISO 8601 formatted time string.
    pub iso: String,
    /// Unix timestamp.
    pub epoch: i64,
}

/// Exchange rates for a base currency.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeRates {
    /// The base currency the rates are quoted against.
    pub currency: String,
    /// Rate per target currency code.
    pub rates: HashMap<String, Decimal>,
}

/// Raw user payload from `/v2/user`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserData {
    pub id: String,
    pub native_currency: String,
}

/// The authenticated user, as exposed by this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Coinbase account identifier.
    pub coinbase_id: String,
    /// The user's native currency code.
    pub currency: String,
}

/// A price quote for one currency pair.
#[derive(Debug, Clone, Deserialize)]
pub struct Price {
    /// Decimal amount in the quote currency.
    pub amount: Decimal,
    /// Quote currency code.
    pub currency: String,
    /// Base currency code, when the upstream includes it.
    #[serde(default)]
    pub base: Option<String>,
}

/// One account row from `/v2/accounts`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Account {
    pub currency: String,
    pub balance: Money,
}

/// An amount as Coinbase serializes money.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Money {
    pub amount: Decimal,
}

/// One non-dust holding derived from the account listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyHolding {
    /// Currency code (e.g., "BTC").
    pub currency: String,
    /// Amount held.
    pub amount: Decimal,
}
