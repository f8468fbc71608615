//! Signed account, user, and price endpoints.

use rust_decimal::Decimal;

use crate::auth::Credentials;
use crate::balance::{self, QUOTE_CURRENCY};
use crate::error::ServiceError;
use crate::rest::CoinbaseRestClient;
use crate::rest::client::ApiOutcome;
use crate::rest::endpoints;
use crate::rest::types::{Account, CurrencyHolding, Price, UserData, UserProfile};

/// Holdings at or below this amount are dust and excluded from aggregation.
pub const DUST_THRESHOLD: Decimal = Decimal::from_parts(1, 0, 0, false, 11);

#[derive(Debug, Clone, Copy)]
enum PriceKind {
    Spot,
    Sell,
    Buy,
}

impl PriceKind {
    fn as_str(self) -> &'static str {
        match self {
            PriceKind::Spot => "spot",
            PriceKind::Sell => "sell",
            PriceKind::Buy => "buy",
        }
    }
}

impl CoinbaseRestClient {
    /// Get the authenticated user's profile.
    pub async fn get_user(&self, credentials: &Credentials) -> Result<UserProfile, ServiceError> {
        let data: UserData = self
            .signed_get(credentials, endpoints::USER)
            .await?
            .into_result()?;
        Ok(UserProfile {
            coinbase_id: data.id,
            currency: data.native_currency,
        })
    }

    async fn get_price(
        &self,
        credentials: &Credentials,
        pair: &str,
        kind: PriceKind,
        date: Option<&str>,
    ) -> Result<Decimal, ServiceError> {
        let mut endpoint = format!("{}/{}/{}", endpoints::PRICES, pair, kind.as_str());
        if let Some(date) = date {
            #[derive(serde::Serialize)]
            struct Params<'a> {
                data: &'a str,
            }
            let query = serde_urlencoded::to_string(&Params { data: date })
                .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;
            endpoint = format!("{endpoint}?{query}");
        }
        let price: Price = self
            .signed_get(credentials, &endpoint)
            .await?
            .into_result()?;
        Ok(price.amount)
    }

    /// Current spot price for a pair such as `BTC-EUR`.
    pub async fn get_spot_price(
        &self,
        credentials: &Credentials,
        pair: &str,
    ) -> Result<Decimal, ServiceError> {
        self.get_price(credentials, pair, PriceKind::Spot, None).await
    }

    /// Current sell price for a pair such as `BTC-EUR`.
    pub async fn get_sell_price(
        &self,
        credentials: &Credentials,
        pair: &str,
    ) -> Result<Decimal, ServiceError> {
        self.get_price(credentials, pair, PriceKind::Sell, None).await
    }

    /// Current buy price for a pair such as `BTC-EUR`.
    pub async fn get_buy_price(
        &self,
        credentials: &Credentials,
        pair: &str,
    ) -> Result<Decimal, ServiceError> {
        self.get_price(credentials, pair, PriceKind::Buy, None).await
    }

    /// Sell price for a pair on a given date (`YYYY-MM-DD`).
    pub async fn get_historic_sell_price(
        &self,
        credentials: &Credentials,
        pair: &str,
        date: &str,
    ) -> Result<Decimal, ServiceError> {
        self.get_price(credentials, pair, PriceKind::Sell, Some(date))
            .await
    }

    /// Fetch all account balances, excluding dust holdings.
    ///
    /// An upstream error envelope yields an empty list; the rejection is
    /// logged so it stays visible.
    pub async fn get_amount_per_currency(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<CurrencyHolding>, ServiceError> {
        let outcome: ApiOutcome<Vec<Account>> =
            self.signed_get(credentials, endpoints::ACCOUNTS).await?;
        let accounts = match outcome {
            ApiOutcome::Success(accounts) => accounts,
            ApiOutcome::Failure(failure) => {
                tracing::warn!(%failure, "account listing rejected upstream, treating as empty");
                return Ok(Vec::new());
            }
        };

        Ok(accounts
            .into_iter()
            .filter(|account| account.balance.amount > DUST_THRESHOLD)
            .map(|account| CurrencyHolding {
                currency: account.currency,
                amount: account.balance.amount,
            })
            .collect())
    }

    /// Total balance across all holdings, valued at current sell prices
    /// against [`QUOTE_CURRENCY`].
    ///
    /// Per-holding price lookups are independent reads and run concurrently.
    pub async fn get_current_balance(
        &self,
        credentials: &Credentials,
    ) -> Result<Decimal, ServiceError> {
        let holdings = self.get_amount_per_currency(credentials).await?;
        balance::aggregate_balance(&holdings, QUOTE_CURRENCY, |pair| async move {
            self.get_sell_price(credentials, &pair).await
        })
        .await
    }
}
