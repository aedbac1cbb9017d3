use crate::error::TradingError;
use crate::models::order::{Order, OrderSide};

/// Quote assets we accept at the end of a futures symbol
const QUOTE_SUFFIXES: [&str; 2] = ["USDT", "BUSD"];

/// 심볼 정규화: 공백 제거, 대문자 변환, 쿼트 자산 접미사 확인
pub fn normalize_symbol(raw: &str) -> Result<String, TradingError> {
    let symbol = raw.trim().to_uppercase();

    if symbol.is_empty() {
        return Err(TradingError::InvalidParameter("Symbol must not be empty".to_string()));
    }

    if !QUOTE_SUFFIXES.iter().any(|suffix| symbol.ends_with(suffix) && symbol.len() > suffix.len()) {
        return Err(TradingError::InvalidParameter(format!(
            "Invalid symbol '{}': must end with one of {:?}",
            symbol, QUOTE_SUFFIXES
        )));
    }

    Ok(symbol)
}

/// 주문 방향 파싱 (대소문자 무시)
pub fn parse_side(raw: &str) -> Result<OrderSide, TradingError> {
    match raw.trim().to_uppercase().as_str() {
        "BUY" => Ok(OrderSide::Buy),
        "SELL" => Ok(OrderSide::Sell),
        other => Err(TradingError::InvalidParameter(format!(
            "Side must be BUY or SELL, got '{}'",
            other
        ))),
    }
}

pub fn parse_quantity(raw: &str) -> Result<f64, TradingError> {
    parse_positive(raw, "Quantity")
}

pub fn parse_price(raw: &str) -> Result<f64, TradingError> {
    parse_positive(raw, "Price")
}

fn parse_positive(raw: &str, what: &str) -> Result<f64, TradingError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| TradingError::InvalidParameter(format!("{} must be a number, got '{}'", what, raw.trim())))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(TradingError::InvalidParameter(format!(
            "{} must be positive, got {}",
            what, value
        )));
    }

    Ok(value)
}

/// 주문 검증기 인터페이스
pub trait OrderValidator: Send + Sync {
    /// 주문 검증
    fn validate(&self, order: &Order) -> Result<(), TradingError>;
}

/// 기본 주문 검증기
pub struct BasicOrderValidator {
    min_order_size: f64,
    max_order_size: f64,
}

impl BasicOrderValidator {
    pub fn new(min_order_size: f64, max_order_size: f64) -> Self {
        BasicOrderValidator {
            min_order_size,
            max_order_size,
        }
    }
}

impl Default for BasicOrderValidator {
    fn default() -> Self {
        BasicOrderValidator::new(1e-8, 1_000_000.0)
    }
}

impl OrderValidator for BasicOrderValidator {
    fn validate(&self, order: &Order) -> Result<(), TradingError> {
        normalize_symbol(&order.symbol)?;

        if order.quantity < self.min_order_size {
            return Err(TradingError::InvalidParameter(format!(
                "Order quantity too small, minimum: {}",
                self.min_order_size
            )));
        }

        if order.quantity > self.max_order_size {
            return Err(TradingError::InvalidParameter(format!(
                "Order quantity too large, maximum: {}",
                self.max_order_size
            )));
        }

        if let Some(price) = order.price {
            if price <= 0.0 {
                return Err(TradingError::InvalidParameter("Price must be positive".to_string()));
            }
        }

        if let Some(stop_price) = order.stop_price {
            if stop_price <= 0.0 {
                return Err(TradingError::InvalidParameter("Stop price must be positive".to_string()));
            }
        }

        Ok(())
    }
}
