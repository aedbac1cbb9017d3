use async_trait::async_trait;

use crate::error::TradingError;
use crate::models::order::{Order, OrderId};
use crate::models::report::OrderReport;

/// The `Exchange` trait defines the interface for the futures order API.
/// It is implemented by the real connector and by mock implementations.
#[async_trait]
pub trait Exchange: Send + Sync {
    /// Submit a new order and return the exchange acknowledgement
    async fn submit_order(&mut self, order: Order) -> Result<OrderReport, TradingError>;

    /// Cancel a resting order
    async fn cancel_order(&mut self, symbol: &str, order_id: &OrderId) -> Result<OrderReport, TradingError>;

    /// Query the current state of an order
    async fn query_order(&self, symbol: &str, order_id: &OrderId) -> Result<OrderReport, TradingError>;
}
