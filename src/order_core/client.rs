use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::TradingError;
use crate::exchange::traits::Exchange;
use crate::models::order::Order;
use crate::models::report::{OcoReport, OrderReport};
use crate::order_core::validator::{
    self, BasicOrderValidator, OrderValidator,
};

/// 주문 클라이언트 - 주문 유형별 제출 창구
///
/// Validates raw inputs, builds the request with the exchange-required
/// fixed fields and returns the acknowledgement unchanged. Exchange
/// failures are logged and propagated as-is.
pub struct OrderClient {
    exchange: Arc<RwLock<dyn Exchange>>,
    validators: Vec<Box<dyn OrderValidator>>,
}

impl OrderClient {
    pub fn new(exchange: Arc<RwLock<dyn Exchange>>) -> Self {
        OrderClient {
            exchange,
            validators: vec![Box::new(BasicOrderValidator::default())],
        }
    }

    /// 주문 검증기 추가
    pub fn add_validator(&mut self, validator: Box<dyn OrderValidator>) {
        self.validators.push(validator);
    }

    pub async fn place_market_order(
        &self,
        symbol: &str,
        side: &str,
        quantity: &str,
    ) -> Result<OrderReport, TradingError> {
        let symbol = validator::normalize_symbol(symbol)?;
        let side = validator::parse_side(side)?;
        let quantity = validator::parse_quantity(quantity)?;

        self.submit(Order::market(symbol, side, quantity), "market").await
    }

    pub async fn place_limit_order(
        &self,
        symbol: &str,
        side: &str,
        quantity: &str,
        price: &str,
    ) -> Result<OrderReport, TradingError> {
        let symbol = validator::normalize_symbol(symbol)?;
        let side = validator::parse_side(side)?;
        let quantity = validator::parse_quantity(quantity)?;
        let price = validator::parse_price(price)?;

        self.submit(Order::limit(symbol, side, quantity, price), "limit").await
    }

    pub async fn place_stop_limit_order(
        &self,
        symbol: &str,
        side: &str,
        quantity: &str,
        stop_price: &str,
        limit_price: &str,
    ) -> Result<OrderReport, TradingError> {
        let symbol = validator::normalize_symbol(symbol)?;
        let side = validator::parse_side(side)?;
        let quantity = validator::parse_quantity(quantity)?;
        let stop_price = validator::parse_price(stop_price)?;
        let limit_price = validator::parse_price(limit_price)?;

        self.submit(
            Order::stop_limit(symbol, side, quantity, stop_price, limit_price),
            "stop-limit",
        )
        .await
    }

    /// OCO 주문: 이익 실현 지정가 + 손절 스탑 지정가 쌍
    ///
    /// /fapi has no native OCO endpoint, so the pair is two orders. If the
    /// stop leg is rejected the resting take-profit leg is cancelled
    /// (best effort) before the rejection propagates.
    pub async fn place_oco_order(
        &self,
        symbol: &str,
        side: &str,
        quantity: &str,
        price: &str,
        stop_price: &str,
        stop_limit_price: &str,
    ) -> Result<OcoReport, TradingError> {
        let symbol = validator::normalize_symbol(symbol)?;
        let side = validator::parse_side(side)?;
        let quantity = validator::parse_quantity(quantity)?;
        let price = validator::parse_price(price)?;
        let stop_price = validator::parse_price(stop_price)?;
        let stop_limit_price = validator::parse_price(stop_limit_price)?;

        let take_profit = self
            .submit(Order::limit(symbol.clone(), side, quantity, price), "take-profit")
            .await?;

        let stop_order = Order::stop_limit(symbol.clone(), side, quantity, stop_price, stop_limit_price);
        match self.submit(stop_order, "stop-loss").await {
            Ok(stop_loss) => Ok(OcoReport { take_profit, stop_loss }),
            Err(e) => {
                log::warn!(
                    "OCO stop leg rejected, cancelling take-profit leg {}",
                    take_profit.order_id
                );
                let mut exchange = self.exchange.write().await;
                if let Err(cancel_err) = exchange.cancel_order(&symbol, &take_profit.order_id).await {
                    log::error!(
                        "Failed to cancel take-profit leg {}: {}",
                        take_profit.order_id,
                        cancel_err
                    );
                }
                Err(e)
            }
        }
    }

    async fn submit(&self, mut order: Order, label: &str) -> Result<OrderReport, TradingError> {
        for validator in &self.validators {
            validator.validate(&order)?;
        }

        if order.client_order_id.is_none() {
            order.client_order_id = Some(Uuid::new_v4().to_string());
        }

        let result = {
            let mut exchange = self.exchange.write().await;
            exchange.submit_order(order).await
        };

        match &result {
            Ok(report) => log::info!(
                "{} order placed: id={} symbol={} status={:?} qty={}",
                label, report.order_id, report.symbol, report.status, report.orig_qty
            ),
            Err(e) => log::error!("Error placing {} order: {}", label, e),
        }

        result
    }
}
