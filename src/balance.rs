//! Balance aggregation across currency holdings.

use std::future::Future;

use futures_util::future::try_join_all;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ServiceError;
use crate::rest::types::CurrencyHolding;

/// Quote currency every holding is valued against.
pub const QUOTE_CURRENCY: &str = "EUR";

/// Value each holding at its sell price and sum the results.
///
/// Price lookups fan out concurrently; the reduction joins all of them. The
/// total is rounded to 2 decimal places, half away from zero.
pub async fn aggregate_balance<F, Fut>(
    holdings: &[CurrencyHolding],
    quote: &str,
    sell_price: F,
) -> Result<Decimal, ServiceError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<Decimal, ServiceError>>,
{
    let per_holding = holdings.iter().map(|holding| {
        let lookup = sell_price(format!("{}-{}", holding.currency, quote));
        async move { Ok::<_, ServiceError>(lookup.await? * holding.amount) }
    });
    let valued = try_join_all(per_holding).await?;

    let total: Decimal = valued.into_iter().sum();
    let mut rounded = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    Ok(rounded)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn holding(currency: &str, amount: &str) -> CurrencyHolding {
        CurrencyHolding {
            currency: currency.to_string(),
            amount: amount.parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_two_btc_at_hundred() {
        let holdings = vec![holding("BTC", "2")];
        let total = aggregate_balance(&holdings, "EUR", |_| async {
            Ok("100".parse().unwrap())
        })
        .await
        .unwrap();

        assert_eq!(total.to_string(), "200.00");
    }

    #[tokio::test]
    async fn test_sums_across_holdings() {
        let holdings = vec![holding("BTC", "1"), holding("ETH", "10")];
        let total = aggregate_balance(&holdings, "EUR", |pair| async move {
            match pair.as_str() {
                "BTC-EUR" => Ok("100.50".parse().unwrap()),
                "ETH-EUR" => Ok("10.05".parse().unwrap()),
                other => panic!("unexpected pair {other}"),
            }
        })
        .await
        .unwrap();

        assert_eq!(total.to_string(), "201.00");
    }

    #[tokio::test]
    async fn test_rounds_half_away_from_zero() {
        let holdings = vec![holding("BTC", "1")];
        let total = aggregate_balance(&holdings, "EUR", |_| async {
            Ok("66.665".parse().unwrap())
        })
        .await
        .unwrap();

        assert_eq!(total.to_string(), "66.67");
    }

    #[tokio::test]
    async fn test_empty_holdings_is_zero() {
        let total = aggregate_balance(&[], "EUR", |_| async { Ok(Decimal::ONE) })
            .await
            .unwrap();

        assert_eq!(total.to_string(), "0.00");
    }

    #[tokio::test]
    async fn test_pairs_use_quote_currency() {
        let seen = Mutex::new(Vec::new());
        let holdings = vec![holding("BTC", "1"), holding("DOGE", "1")];
        aggregate_balance(&holdings, "USD", |pair| {
            seen.lock().unwrap().push(pair);
            async { Ok(Decimal::ONE) }
        })
        .await
        .unwrap();

        let mut seen = seen.into_inner().unwrap();
        seen.sort();
        assert_eq!(seen, vec!["BTC-USD", "DOGE-USD"]);
    }

    #[tokio::test]
    async fn test_price_error_propagates() {
        let holdings = vec![holding("BTC", "1")];
        let result = aggregate_balance(&holdings, "EUR", |_| async {
            Err(ServiceError::InvalidResponse("boom".to_string()))
        })
        .await;

        assert!(result.is_err());
    }
}
