//! Coinbase v2 REST endpoint constants.

/// Base URL for the Coinbase REST API.
pub const COINBASE_BASE_URL: &str = "https://api.coinbase.com";

/// Version date sent in the `CB-VERSION` header on signed calls.
pub const API_VERSION: &str = "2015-07-22";

/// List account balances.
pub const ACCOUNTS: &str = "/v2/accounts";
/// Get server time (public).
pub const TIME: &str = "/v2/time";
/// Get the authenticated user.
pub const USER: &str = "/v2/user";
/// Get exchange rates for a base currency (public).
pub const EXCHANGE_RATES: &str = "/v2/exchange-rates";
/// Prefix for spot/sell/buy price lookups.
pub const PRICES: &str = "/v2/prices";
