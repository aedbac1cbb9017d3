use async_trait::async_trait;

use crate::error::TradingError;
use crate::exchange::traits::Exchange;
use crate::models::order::{Order, OrderId, OrderStatus};
use crate::models::report::OrderReport;
use crate::utils::current_timestamp_ms;

/// A no-op connector that acknowledges orders without sending them
pub struct DryRunExchange {
  order_id_counter: u64,
}

impl DryRunExchange {
  pub fn new() -> Self {
    DryRunExchange { order_id_counter: 0 }
  }
}

impl Default for DryRunExchange {
  fn default() -> Self {
    DryRunExchange::new()
  }
}

#[async_trait]
impl Exchange for DryRunExchange {
  async fn submit_order(&mut self, order: Order) -> Result<OrderReport, TradingError> {
    self.order_id_counter += 1;
    log::info!("dry-run: would submit {:?} {} {} qty {}",
               order.order_type, order.side.as_str(), order.symbol, order.quantity);

    Ok(OrderReport {
      order_id: OrderId(self.order_id_counter),
      client_order_id: order.client_order_id.clone(),
      symbol: order.symbol.clone(),
      side: order.side,
      order_type: order.order_type,
      status: OrderStatus::New,
      price: order.price.unwrap_or(0.0),
      avg_price: 0.0,
      orig_qty: order.quantity,
      executed_qty: 0.0,
      stop_price: order.stop_price.unwrap_or(0.0),
      time_in_force: Some(order.time_in_force),
      update_time: current_timestamp_ms(),
    })
  }

  async fn cancel_order(&mut self, _symbol: &str, order_id: &OrderId) -> Result<OrderReport, TradingError> {
    Err(TradingError::OrderNotFound(*order_id))
  }

  async fn query_order(&self, _symbol: &str, order_id: &OrderId) -> Result<OrderReport, TradingError> {
    Err(TradingError::OrderNotFound(*order_id))
  }
}
