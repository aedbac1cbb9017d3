/**
* filename : twap_splitter
* author : HAMA
* date: 2025. 5. 21.
* description:
**/

use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{sleep, Duration};

use crate::error::TradingError;
use crate::exchange::traits::Exchange;
use crate::models::order::{Order, OrderSide};
use crate::models::report::OrderReport;
use crate::order_core::validator;

/// TWAP 기반 주문 분할기
///
/// 총 수량을 균등 분할해 시장가 주문을 순차 제출한다. 분할 사이에는
/// 고정 간격으로 대기하며, 어느 분할이라도 실패하면 나머지 분할을
/// 즉시 중단한다 (이미 제출된 분할은 보상하지 않음).
pub struct TwapSplitter {
  /// 거래소 인스턴스
  exchange: Arc<RwLock<dyn Exchange>>,
  /// 거래 심볼
  symbol: String,
  /// 주문 방향 (매수/매도)
  side: OrderSide,
  /// 총 주문 수량
  total_quantity: f64,
  /// 전체 실행 시간
  duration: Duration,
  /// 분할 수
  num_slices: usize,
  /// 이미 실행한 수량
  executed_quantity: f64,
  /// 실행 중 여부
  is_active: bool,
  /// 제출된 분할 주문 응답 목록
  reports: Vec<OrderReport>,
}

impl TwapSplitter {
  /// 새 TWAP 분할기 생성
  pub fn new(
    exchange: Arc<RwLock<dyn Exchange>>,
    symbol: impl Into<String>,
    side: OrderSide,
    total_quantity: f64,
    duration: Duration,
    num_slices: usize,
  ) -> Self {
    TwapSplitter {
      exchange,
      symbol: symbol.into(),
      side,
      total_quantity,
      duration,
      num_slices,
      executed_quantity: 0.0,
      is_active: false,
      reports: Vec::new(),
    }
  }

  /// TWAP 실행 시작
  pub async fn start(&mut self) -> Result<(), TradingError> {
    if self.is_active {
      return Err(TradingError::AlreadyRunning("TWAP execution already running".to_string()));
    }

    let symbol = validator::normalize_symbol(&self.symbol)?;
    if self.num_slices == 0 {
      return Err(TradingError::InvalidParameter("Intervals must be positive".to_string()));
    }
    if self.total_quantity <= 0.0 {
      return Err(TradingError::InvalidParameter("Total quantity must be positive".to_string()));
    }

    self.is_active = true;
    self.executed_quantity = 0.0;
    self.reports.clear();

    // 분할 크기와 간격 계산
    let slice_quantity = self.total_quantity / self.num_slices as f64;
    let delay = self.duration / self.num_slices as u32;

    let mut remaining_quantity = self.total_quantity;

    for i in 0..self.num_slices {
      // 마지막 분할에 반올림 오차 흡수
      let quantity = if i == self.num_slices - 1 {
        remaining_quantity
      } else {
        slice_quantity.min(remaining_quantity)
      };

      let order = Order::market(symbol.clone(), self.side, quantity);
      let result = {
        let mut exchange = self.exchange.write().await;
        exchange.submit_order(order).await
      };

      match result {
        Ok(report) => {
          log::info!(
            "TWAP slice {}/{} placed: id={} qty={}",
            i + 1, self.num_slices, report.order_id, report.orig_qty
          );
          self.reports.push(report);
          remaining_quantity -= quantity;
          self.executed_quantity += quantity;
        }
        Err(e) => {
          log::error!(
            "TWAP slice {}/{} failed, aborting remaining slices: {}",
            i + 1, self.num_slices, e
          );
          self.is_active = false;
          return Err(e);
        }
      }

      // 마지막 분할 이후에는 대기하지 않음
      if i < self.num_slices - 1 {
        sleep(delay).await;
      }
    }

    self.is_active = false;
    Ok(())
  }

  /// TWAP 실행 상태 조회
  pub fn status(&self) -> (bool, f64, f64) {
    (self.is_active, self.executed_quantity, self.total_quantity)
  }

  /// 제출된 분할 주문 응답
  pub fn reports(&self) -> &[OrderReport] {
    &self.reports
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::exchange::mocks::MockExchange;
  use crate::models::order::OrderType;

  #[tokio::test]
  async fn test_twap_splits_evenly() {
    let exchange = Arc::new(RwLock::new(MockExchange::new()));

    let mut twap = TwapSplitter::new(
      exchange.clone(),
      "BTCUSDT",
      OrderSide::Buy,
      1.0,
      Duration::from_millis(0),
      5,
    );

    twap.start().await.unwrap();

    let (is_active, executed, total) = twap.status();
    assert!(!is_active);
    assert!((executed - 1.0).abs() < 1e-12);
    assert_eq!(total, 1.0);

    assert_eq!(twap.reports().len(), 5);
    for report in twap.reports() {
      assert_eq!(report.order_type, OrderType::Market);
      assert!((report.orig_qty - 0.2).abs() < 1e-12);
    }
  }

  #[tokio::test]
  async fn test_twap_rejects_zero_intervals() {
    let exchange = Arc::new(RwLock::new(MockExchange::new()));
    let mut twap = TwapSplitter::new(
      exchange,
      "BTCUSDT",
      OrderSide::Buy,
      1.0,
      Duration::from_millis(0),
      0,
    );

    assert!(matches!(
      twap.start().await,
      Err(TradingError::InvalidParameter(_))
    ));
  }
}
