//! Public REST API endpoints (no authentication required).

use crate::error::ServiceError;
use crate::rest::CoinbaseRestClient;
use crate::rest::endpoints;
use crate::rest::types::{ExchangeRates, ServerTime};

impl CoinbaseRestClient {
    /// Get the server time.
    ///
    /// Useful for synchronizing local time and checking API availability.
    pub async fn get_server_time(&self, locale: &str) -> Result<ServerTime, ServiceError> {
        self.public_get(endpoints::TIME, locale).await?.into_result()
    }

    /// Get exchange rates for a base currency.
    ///
    /// # Arguments
    ///
    /// * `currency` - Base currency code the rates are quoted against.
    /// * `locale` - Language for the `Accept-Language` header.
    pub async fn get_exchange_rates(
        &self,
        currency: &str,
        locale: &str,
    ) -> Result<ExchangeRates, ServiceError> {
        #[derive(serde::Serialize)]
        struct Params<'a> {
            currency: &'a str,
        }
        self.public_get_with_params(endpoints::EXCHANGE_RATES, locale, &Params { currency })
            .await?
            .into_result()
    }
}
