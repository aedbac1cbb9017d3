use std::collections::HashMap;

use async_trait::async_trait;
use rand::Rng;

use crate::error::TradingError;
use crate::exchange::traits::Exchange;
use crate::models::order::{Order, OrderId, OrderStatus, OrderType};
use crate::models::report::OrderReport;
use crate::utils::current_timestamp_ms;

/// A mock implementation of the Exchange trait for testing and development.
/// Market orders fill immediately at a jittered mark price, limit-priced
/// orders rest as NEW. `fail_after` makes every submission past the given
/// count fail with the margin-insufficient API error.
pub struct MockExchange {
    orders: HashMap<u64, OrderReport>,
    submitted: Vec<Order>,
    canceled: Vec<OrderId>,
    mark_prices: HashMap<String, f64>,
    order_id_counter: u64,
    fail_after: Option<usize>,
}

impl MockExchange {
    pub fn new() -> Self {
        let mut mark_prices = HashMap::new();
        mark_prices.insert("BTCUSDT".to_string(), 50000.0);
        mark_prices.insert("ETHUSDT".to_string(), 3000.0);

        MockExchange {
            orders: HashMap::new(),
            submitted: Vec::new(),
            canceled: Vec::new(),
            mark_prices,
            order_id_counter: 0,
            fail_after: None,
        }
    }

    /// Succeed for the first `successes` submissions, fail afterwards
    pub fn fail_after(mut self, successes: usize) -> Self {
        self.fail_after = Some(successes);
        self
    }

    pub fn submitted_orders(&self) -> &[Order] {
        &self.submitted
    }

    pub fn canceled_ids(&self) -> &[OrderId] {
        &self.canceled
    }

    fn generate_order_id(&mut self) -> OrderId {
        self.order_id_counter += 1;
        OrderId(self.order_id_counter)
    }

    fn mark_price(&self, symbol: &str) -> f64 {
        let base = self.mark_prices.get(symbol).copied().unwrap_or(100.0);
        let jitter = rand::thread_rng().gen_range(-0.0005..0.0005);
        base * (1.0 + jitter)
    }
}

impl Default for MockExchange {
    fn default() -> Self {
        MockExchange::new()
    }
}

#[async_trait]
impl Exchange for MockExchange {
    async fn submit_order(&mut self, order: Order) -> Result<OrderReport, TradingError> {
        if let Some(limit) = self.fail_after {
            if self.submitted.len() >= limit {
                return Err(TradingError::ApiError {
                    code: -2019,
                    msg: "Margin is insufficient.".to_string(),
                });
            }
        }

        let order_id = self.generate_order_id();

        // Immediate fill for market orders, resting NEW for the rest
        let (status, executed_qty, avg_price) = match order.order_type {
            OrderType::Market => (OrderStatus::Filled, order.quantity, self.mark_price(&order.symbol)),
            _ => (OrderStatus::New, 0.0, 0.0),
        };

        let report = OrderReport {
            order_id,
            client_order_id: order.client_order_id.clone(),
            symbol: order.symbol.clone(),
            side: order.side,
            order_type: order.order_type,
            status,
            price: order.price.unwrap_or(0.0),
            avg_price,
            orig_qty: order.quantity,
            executed_qty,
            stop_price: order.stop_price.unwrap_or(0.0),
            time_in_force: Some(order.time_in_force),
            update_time: current_timestamp_ms(),
        };

        self.orders.insert(order_id.0, report.clone());
        self.submitted.push(order);

        Ok(report)
    }

    async fn cancel_order(&mut self, _symbol: &str, order_id: &OrderId) -> Result<OrderReport, TradingError> {
        match self.orders.get_mut(&order_id.0) {
            Some(report) => {
                report.status = OrderStatus::Canceled;
                report.update_time = current_timestamp_ms();
                self.canceled.push(*order_id);
                Ok(report.clone())
            }
            None => Err(TradingError::OrderNotFound(*order_id)),
        }
    }

    async fn query_order(&self, _symbol: &str, order_id: &OrderId) -> Result<OrderReport, TradingError> {
        self.orders
            .get(&order_id.0)
            .cloned()
            .ok_or(TradingError::OrderNotFound(*order_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::OrderSide;

    #[tokio::test]
    async fn test_market_order_fills() {
        let mut exchange = MockExchange::new();
        let report = exchange
            .submit_order(Order::market("BTCUSDT", OrderSide::Buy, 0.5))
            .await
            .unwrap();

        assert_eq!(report.status, OrderStatus::Filled);
        assert_eq!(report.executed_qty, 0.5);
        assert!(report.avg_price > 0.0);
    }

    #[tokio::test]
    async fn test_limit_order_rests_and_cancels() {
        let mut exchange = MockExchange::new();
        let report = exchange
            .submit_order(Order::limit("BTCUSDT", OrderSide::Buy, 0.5, 45000.0))
            .await
            .unwrap();
        assert_eq!(report.status, OrderStatus::New);

        let canceled = exchange.cancel_order("BTCUSDT", &report.order_id).await.unwrap();
        assert_eq!(canceled.status, OrderStatus::Canceled);
        assert_eq!(exchange.canceled_ids(), &[report.order_id]);

        let queried = exchange.query_order("BTCUSDT", &report.order_id).await.unwrap();
        assert_eq!(queried.status, OrderStatus::Canceled);
    }

    #[tokio::test]
    async fn test_query_unknown_order() {
        let exchange = MockExchange::new();
        let err = exchange.query_order("BTCUSDT", &OrderId(99)).await.unwrap_err();
        assert!(matches!(err, TradingError::OrderNotFound(OrderId(99))));
    }

    #[tokio::test]
    async fn test_fail_after_rejects_with_api_error() {
        let mut exchange = MockExchange::new().fail_after(1);

        assert!(exchange
            .submit_order(Order::market("BTCUSDT", OrderSide::Buy, 1.0))
            .await
            .is_ok());

        let err = exchange
            .submit_order(Order::market("BTCUSDT", OrderSide::Buy, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, TradingError::ApiError { code: -2019, .. }));
    }
}
