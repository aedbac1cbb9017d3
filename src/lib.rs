//! 선물 주문 봇 라이브러리
//!
//! Binance USDT-M 선물 API에 시장가/지정가/스탑-지정가/OCO 주문과
//! TWAP, 그리드 분할 실행을 제출하는 클라이언트입니다.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod exchange;
pub mod models;
pub mod order_core;
pub mod utils;

// 핵심 타입 재노출
pub use crate::error::TradingError;
pub use crate::exchange::traits::Exchange;
pub use crate::models::order::{Order, OrderId, OrderSide, OrderStatus, OrderType, TimeInForce};
pub use crate::models::report::{OcoReport, OrderReport};
pub use crate::order_core::client::OrderClient;

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, TradingError>;
