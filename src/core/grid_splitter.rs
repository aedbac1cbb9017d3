/**
* filename : grid_splitter
* author : HAMA
* date: 2025. 5. 21.
* description:
**/

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::TradingError;
use crate::exchange::traits::Exchange;
use crate::models::order::{Order, OrderSide};
use crate::models::report::OrderReport;
use crate::order_core::validator;

/// 그리드 주문 분할기
///
/// 기준가 아래로 매수 지정가, 위로 매도 지정가를 선형 간격으로 깔아
/// 즉시 순차 제출한다. 레벨별로 매수/매도를 번갈아 제출하며, 첫 실패에서
/// 나머지 주문을 중단한다.
pub struct GridSplitter {
  /// 거래소 인스턴스
  exchange: Arc<RwLock<dyn Exchange>>,
  /// 거래 심볼
  symbol: String,
  /// 기준 가격
  base_price: f64,
  /// 기준가 대비 범위 (퍼센트)
  range_percent: f64,
  /// 한 방향당 주문 수
  num_levels: usize,
  /// 주문당 수량
  quantity_per_order: f64,
  /// 실행 중 여부
  is_active: bool,
  /// 제출된 주문 응답 목록
  reports: Vec<OrderReport>,
}

impl GridSplitter {
  /// 새 그리드 분할기 생성
  pub fn new(
    exchange: Arc<RwLock<dyn Exchange>>,
    symbol: impl Into<String>,
    base_price: f64,
    range_percent: f64,
    num_levels: usize,
    quantity_per_order: f64,
  ) -> Self {
    GridSplitter {
      exchange,
      symbol: symbol.into(),
      base_price,
      range_percent,
      num_levels,
      quantity_per_order,
      is_active: false,
      reports: Vec::new(),
    }
  }

  /// 그리드 주문 제출 시작
  pub async fn start(&mut self) -> Result<(), TradingError> {
    if self.is_active {
      return Err(TradingError::AlreadyRunning("Grid execution already running".to_string()));
    }

    let symbol = validator::normalize_symbol(&self.symbol)?;
    if self.num_levels == 0 {
      return Err(TradingError::InvalidParameter("Number of orders must be positive".to_string()));
    }
    if self.base_price <= 0.0 {
      return Err(TradingError::InvalidParameter("Base price must be positive".to_string()));
    }
    if self.quantity_per_order <= 0.0 {
      return Err(TradingError::InvalidParameter("Quantity per order must be positive".to_string()));
    }
    // 범위가 100%를 넘으면 매수 레벨 가격이 0 이하가 된다
    if self.range_percent <= 0.0 || self.range_percent >= 100.0 {
      return Err(TradingError::InvalidParameter(format!(
        "Range percent must be in (0, 100), got {}",
        self.range_percent
      )));
    }

    self.is_active = true;
    self.reports.clear();

    for level in 1..=self.num_levels {
      let offset = self.range_percent / 100.0 * level as f64 / self.num_levels as f64;

      // 기준가 아래 매수 주문
      let buy_price = self.base_price * (1.0 - offset);
      if let Err(e) = self.submit_level(&symbol, OrderSide::Buy, buy_price, level).await {
        self.is_active = false;
        return Err(e);
      }

      // 기준가 위 매도 주문
      let sell_price = self.base_price * (1.0 + offset);
      if let Err(e) = self.submit_level(&symbol, OrderSide::Sell, sell_price, level).await {
        self.is_active = false;
        return Err(e);
      }
    }

    self.is_active = false;
    Ok(())
  }

  /// 제출된 주문 응답
  pub fn reports(&self) -> &[OrderReport] {
    &self.reports
  }

  async fn submit_level(
    &mut self,
    symbol: &str,
    side: OrderSide,
    price: f64,
    level: usize,
  ) -> Result<(), TradingError> {
    let order = Order::limit(symbol, side, self.quantity_per_order, price);
    let result = {
      let mut exchange = self.exchange.write().await;
      exchange.submit_order(order).await
    };

    match result {
      Ok(report) => {
        log::info!(
          "Grid {} order {}/{} placed: id={} price={}",
          side.as_str(), level, self.num_levels, report.order_id, report.price
        );
        self.reports.push(report);
        Ok(())
      }
      Err(e) => {
        log::error!(
          "Grid {} order {}/{} failed, aborting remaining orders: {}",
          side.as_str(), level, self.num_levels, e
        );
        Err(e)
      }
    }
  }
}
