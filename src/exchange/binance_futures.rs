use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::error::TradingError;
use crate::exchange::traits::Exchange;
use crate::models::order::{Order, OrderId, OrderType};
use crate::models::report::OrderReport;
use crate::utils::{current_timestamp_ms, fmt_decimal};

type HmacSha256 = Hmac<Sha256>;

pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";
pub const MAINNET_BASE_URL: &str = "https://fapi.binance.com";

const ORDER_PATH: &str = "/fapi/v1/order";
const RECV_WINDOW_MS: u64 = 5000;

/// Error payload shape shared by every /fapi endpoint
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
  code: i64,
  msg: String,
}

/// Binance USDT-M Futures REST connector (order endpoints only)
pub struct BinanceFuturesExchange {
  pub base_url: String,
  api_key: String,
  api_secret: String,
  http: reqwest::Client,
}

impl BinanceFuturesExchange {
  pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
    BinanceFuturesExchange {
      base_url: base_url.into(),
      api_key: api_key.into(),
      api_secret: api_secret.into(),
      http: reqwest::Client::new(),
    }
  }

  fn sign(&self, query: &str) -> String {
    // HMAC accepts keys of any length, so new_from_slice cannot fail
    let mut mac = HmacSha256::new_from_slice(self.api_secret.as_bytes()).unwrap();
    mac.update(query.as_bytes());
    hex::encode(mac.finalize().into_bytes())
  }

  fn order_params(order: &Order) -> Vec<String> {
    let mut params = vec![
      format!("symbol={}", order.symbol),
      format!("side={}", order.side.as_str()),
      format!("type={}", order.order_type.as_str()),
      format!("quantity={}", fmt_decimal(order.quantity)),
    ];

    match order.order_type {
      OrderType::Market => {}
      OrderType::Limit => {
        if let Some(price) = order.price {
          params.push(format!("price={}", fmt_decimal(price)));
        }
        params.push(format!("timeInForce={}", order.time_in_force.as_str()));
      }
      OrderType::StopLimit => {
        if let Some(price) = order.price {
          params.push(format!("price={}", fmt_decimal(price)));
        }
        if let Some(stop_price) = order.stop_price {
          params.push(format!("stopPrice={}", fmt_decimal(stop_price)));
        }
        params.push(format!("timeInForce={}", order.time_in_force.as_str()));
      }
    }

    if let Some(client_order_id) = &order.client_order_id {
      params.push(format!("newClientOrderId={}", client_order_id));
    }

    params
  }

  async fn signed_request(
    &self,
    method: reqwest::Method,
    path: &str,
    mut params: Vec<String>,
  ) -> Result<OrderReport, TradingError> {
    params.push(format!("recvWindow={}", RECV_WINDOW_MS));
    params.push(format!("timestamp={}", current_timestamp_ms()));

    let query = params.join("&");
    let signature = self.sign(&query);
    let url = format!("{}{}?{}&signature={}", self.base_url, path, query, signature);

    let response = self.http
      .request(method, url)
      .header("X-MBX-APIKEY", &self.api_key)
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
      // Pass the exchange error payload through unchanged
      if let Ok(api_error) = serde_json::from_str::<ApiErrorBody>(&body) {
        return Err(TradingError::ApiError { code: api_error.code, msg: api_error.msg });
      }
      return Err(TradingError::ExchangeError(format!("HTTP {}: {}", status, body)));
    }

    serde_json::from_str::<OrderReport>(&body)
      .map_err(|e| TradingError::ExchangeError(format!("unexpected order response: {} ({})", e, body)))
  }
}

#[async_trait]
impl Exchange for BinanceFuturesExchange {
  async fn submit_order(&mut self, order: Order) -> Result<OrderReport, TradingError> {
    let params = Self::order_params(&order);
    self.signed_request(reqwest::Method::POST, ORDER_PATH, params).await
  }

  async fn cancel_order(&mut self, symbol: &str, order_id: &OrderId) -> Result<OrderReport, TradingError> {
    let params = vec![
      format!("symbol={}", symbol),
      format!("orderId={}", order_id),
    ];
    self.signed_request(reqwest::Method::DELETE, ORDER_PATH, params).await
  }

  async fn query_order(&self, symbol: &str, order_id: &OrderId) -> Result<OrderReport, TradingError> {
    let params = vec![
      format!("symbol={}", symbol),
      format!("orderId={}", order_id),
    ];
    self.signed_request(reqwest::Method::GET, ORDER_PATH, params).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::order::OrderSide;

  #[test]
  fn test_order_params_market() {
    let order = Order::market("BTCUSDT", OrderSide::Buy, 0.5);
    let params = BinanceFuturesExchange::order_params(&order);
    assert_eq!(
      params,
      vec!["symbol=BTCUSDT", "side=BUY", "type=MARKET", "quantity=0.5"]
    );
  }

  #[test]
  fn test_order_params_stop_limit() {
    let order = Order::stop_limit("ETHUSDT", OrderSide::Sell, 1.0, 2950.0, 2900.0)
      .with_client_order_id("x-abc");
    let params = BinanceFuturesExchange::order_params(&order);
    assert_eq!(
      params,
      vec![
        "symbol=ETHUSDT",
        "side=SELL",
        "type=STOP",
        "quantity=1",
        "price=2900",
        "stopPrice=2950",
        "timeInForce=GTC",
        "newClientOrderId=x-abc",
      ]
    );
  }

  #[test]
  fn test_signature_is_stable_hex() {
    let exchange = BinanceFuturesExchange::new(TESTNET_BASE_URL, "key", "secret");
    let sig = exchange.sign("symbol=BTCUSDT&side=BUY");
    assert_eq!(sig.len(), 64);
    assert_eq!(sig, exchange.sign("symbol=BTCUSDT&side=BUY"));
    assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
  }
}
