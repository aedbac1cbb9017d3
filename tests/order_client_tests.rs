//! 주문 클라이언트 통합 테스트

use std::sync::Arc;
use tokio::sync::RwLock;

use xOrder::exchange::mocks::MockExchange;
use xOrder::exchange::traits::Exchange;
use xOrder::models::order::{OrderSide, OrderStatus, OrderType, TimeInForce};
use xOrder::order_core::client::OrderClient;
use xOrder::TradingError;

fn setup(mock: MockExchange) -> (Arc<RwLock<MockExchange>>, OrderClient) {
  let mock = Arc::new(RwLock::new(mock));
  let exchange: Arc<RwLock<dyn Exchange>> = mock.clone();
  let client = OrderClient::new(exchange);
  (mock, client)
}

#[tokio::test]
async fn test_market_order() {
  let (mock, client) = setup(MockExchange::new());

  let report = client.place_market_order(" btcusdt ", "buy", "0.5").await.unwrap();

  assert_eq!(report.symbol, "BTCUSDT");
  assert_eq!(report.side, OrderSide::Buy);
  assert_eq!(report.order_type, OrderType::Market);
  assert_eq!(report.status, OrderStatus::Filled);
  assert!((report.executed_qty - 0.5).abs() < 1e-12);
  assert!(report.client_order_id.is_some());

  assert_eq!(mock.read().await.submitted_orders().len(), 1);
}

#[tokio::test]
async fn test_limit_order_carries_gtc() {
  let (mock, client) = setup(MockExchange::new());

  let report = client
    .place_limit_order("ETHUSDT", "SELL", "1", "3100")
    .await
    .unwrap();

  assert_eq!(report.status, OrderStatus::New);
  assert_eq!(report.time_in_force, Some(TimeInForce::Gtc));
  assert_eq!(report.price, 3100.0);

  let mock = mock.read().await;
  assert_eq!(mock.submitted_orders()[0].time_in_force, TimeInForce::Gtc);
}

#[tokio::test]
async fn test_stop_limit_order() {
  let (_, client) = setup(MockExchange::new());

  let report = client
    .place_stop_limit_order("BTCUSDT", "SELL", "0.1", "49000", "48900")
    .await
    .unwrap();

  assert_eq!(report.order_type, OrderType::StopLimit);
  assert_eq!(report.stop_price, 49000.0);
  assert_eq!(report.price, 48900.0);
}

#[tokio::test]
async fn test_oco_places_both_legs() {
  let (mock, client) = setup(MockExchange::new());

  let report = client
    .place_oco_order("BTCUSDT", "SELL", "0.1", "52000", "49000", "48900")
    .await
    .unwrap();

  assert_eq!(report.take_profit.order_type, OrderType::Limit);
  assert_eq!(report.take_profit.price, 52000.0);
  assert_eq!(report.stop_loss.order_type, OrderType::StopLimit);
  assert_eq!(report.stop_loss.stop_price, 49000.0);

  let mock = mock.read().await;
  assert_eq!(mock.submitted_orders().len(), 2);
  assert!(mock.canceled_ids().is_empty());
}

#[tokio::test]
async fn test_oco_cancels_first_leg_when_second_rejected() {
  // 첫 leg만 성공, 두 번째 leg는 거절
  let (mock, client) = setup(MockExchange::new().fail_after(1));

  let result = client
    .place_oco_order("BTCUSDT", "SELL", "0.1", "52000", "49000", "48900")
    .await;
  assert!(matches!(result, Err(TradingError::ApiError { .. })));

  let mock = mock.read().await;
  assert_eq!(mock.submitted_orders().len(), 1);
  // 남은 take-profit leg는 취소되어야 한다
  assert_eq!(mock.canceled_ids().len(), 1);
}

#[tokio::test]
async fn test_validation_failures_submit_nothing() {
  let (mock, client) = setup(MockExchange::new());

  assert!(matches!(
    client.place_market_order("BTCEUR", "BUY", "1").await,
    Err(TradingError::InvalidParameter(_))
  ));
  assert!(matches!(
    client.place_market_order("BTCUSDT", "BUY", "0").await,
    Err(TradingError::InvalidParameter(_))
  ));
  assert!(matches!(
    client.place_limit_order("BTCUSDT", "BUY", "1", "-5").await,
    Err(TradingError::InvalidParameter(_))
  ));

  assert!(mock.read().await.submitted_orders().is_empty());
}

#[tokio::test]
async fn test_exchange_error_passes_through_unchanged() {
  let (_, client) = setup(MockExchange::new().fail_after(0));

  let err = client.place_market_order("BTCUSDT", "BUY", "1").await.unwrap_err();
  match err {
    TradingError::ApiError { code, msg } => {
      assert_eq!(code, -2019);
      assert_eq!(msg, "Margin is insufficient.");
    }
    other => panic!("expected ApiError, got {:?}", other),
  }
}
