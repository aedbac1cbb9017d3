//! TWAP 분할 실행 통합 테스트

use std::sync::Arc;
use tokio::sync::RwLock;

use xOrder::cli::run_twap;
use xOrder::exchange::mocks::MockExchange;
use xOrder::exchange::traits::Exchange;
use xOrder::models::order::{OrderSide, OrderType};
use xOrder::TradingError;

#[tokio::test]
async fn test_twap_even_slices() {
  let mock = Arc::new(RwLock::new(MockExchange::new()));
  let exchange: Arc<RwLock<dyn Exchange>> = mock.clone();

  // 총 10개를 5회로 분할, 지연 0분
  let reports = run_twap(exchange, "btcusdt", "BUY", "10", 0, 5).await.unwrap();

  assert_eq!(reports.len(), 5);
  for report in &reports {
    assert_eq!(report.symbol, "BTCUSDT");
    assert_eq!(report.side, OrderSide::Buy);
    assert_eq!(report.order_type, OrderType::Market);
    assert!((report.orig_qty - 2.0).abs() < 1e-12);
  }

  let mock = mock.read().await;
  assert_eq!(mock.submitted_orders().len(), 5);
}

#[tokio::test]
async fn test_twap_aborts_on_slice_failure() {
  // 3번째 제출부터 실패하도록 설정
  let mock = Arc::new(RwLock::new(MockExchange::new().fail_after(2)));
  let exchange: Arc<RwLock<dyn Exchange>> = mock.clone();

  let result = run_twap(exchange, "BTCUSDT", "SELL", "10", 0, 5).await;
  assert!(matches!(result, Err(TradingError::ApiError { code: -2019, .. })));

  // 실패 이후 분할은 제출되지 않아야 한다
  let mock = mock.read().await;
  assert_eq!(mock.submitted_orders().len(), 2);
}

#[tokio::test]
async fn test_twap_rejects_bad_inputs() {
  let mock = Arc::new(RwLock::new(MockExchange::new()));

  let exchange: Arc<RwLock<dyn Exchange>> = mock.clone();
  let result = run_twap(exchange, "BTCUSDT", "HOLD", "10", 0, 5).await;
  assert!(matches!(result, Err(TradingError::InvalidParameter(_))));

  let exchange: Arc<RwLock<dyn Exchange>> = mock.clone();
  let result = run_twap(exchange, "BTCUSDT", "BUY", "-10", 0, 5).await;
  assert!(matches!(result, Err(TradingError::InvalidParameter(_))));

  let exchange: Arc<RwLock<dyn Exchange>> = mock.clone();
  let result = run_twap(exchange, "BTCUSDT", "BUY", "10", 0, 0).await;
  assert!(matches!(result, Err(TradingError::InvalidParameter(_))));

  // 검증 실패 시 아무 주문도 제출되지 않는다
  assert!(mock.read().await.submitted_orders().is_empty());
}
