pub mod display;
pub mod menu;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::sync::RwLock;
use tokio::time::Duration;

use crate::core::{GridSplitter, TwapSplitter};
use crate::error::TradingError;
use crate::exchange::traits::Exchange;
use crate::models::report::OrderReport;
use crate::order_core::validator;

#[derive(Debug, Parser)]
#[command(name = "xorder", version)]
#[command(about = "Binance USDT-M futures order bot", long_about = None)]
pub struct Cli {
    /// Use the built-in mock exchange (no credentials needed)
    #[arg(long, global = true)]
    pub mock: bool,

    /// Acknowledge orders locally without sending anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Send orders to production instead of the futures testnet
    #[arg(long, global = true)]
    pub live: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Place a market order
    Market {
        /// Trading symbol, e.g. BTCUSDT
        symbol: String,
        /// Order side (BUY/SELL)
        side: String,
        /// Order quantity
        quantity: String,
    },
    /// Place a limit order
    Limit {
        symbol: String,
        side: String,
        quantity: String,
        price: String,
    },
    /// Place a stop-limit order
    StopLimit {
        symbol: String,
        side: String,
        quantity: String,
        stop_price: String,
        limit_price: String,
    },
    /// Place a paired take-profit / stop-loss order
    Oco {
        symbol: String,
        side: String,
        quantity: String,
        /// Take-profit price
        price: String,
        stop_price: String,
        stop_limit_price: String,
    },
    /// Slice a market order evenly over time
    Twap {
        symbol: String,
        side: String,
        total_quantity: String,
        /// Duration in minutes
        duration_minutes: u64,
        /// Number of intervals
        intervals: usize,
    },
    /// Ladder buy/sell limit orders around a base price
    Grid {
        symbol: String,
        base_price: String,
        /// Range percentage around the base price
        range_percent: String,
        /// Number of orders per side
        num_orders: usize,
        quantity_per_order: String,
    },
    /// Interactive menu
    Menu,
}

/// TWAP 실행: 파라미터 정규화 후 분할기 구동
pub async fn run_twap(
    exchange: Arc<RwLock<dyn Exchange>>,
    symbol: &str,
    side: &str,
    total_quantity: &str,
    duration_minutes: u64,
    intervals: usize,
) -> Result<Vec<OrderReport>, TradingError> {
    let side = validator::parse_side(side)?;
    let total_quantity = validator::parse_quantity(total_quantity)?;
    let duration = Duration::from_secs(duration_minutes * 60);

    let mut splitter = TwapSplitter::new(exchange, symbol, side, total_quantity, duration, intervals);
    splitter.start().await?;
    Ok(splitter.reports().to_vec())
}

/// 그리드 실행: 파라미터 정규화 후 분할기 구동
pub async fn run_grid(
    exchange: Arc<RwLock<dyn Exchange>>,
    symbol: &str,
    base_price: &str,
    range_percent: &str,
    num_orders: usize,
    quantity_per_order: &str,
) -> Result<Vec<OrderReport>, TradingError> {
    let base_price = validator::parse_price(base_price)?;
    let range_percent: f64 = range_percent.trim().parse().map_err(|_| {
        TradingError::InvalidParameter(format!("Range percent must be a number, got '{}'", range_percent))
    })?;
    let quantity_per_order = validator::parse_quantity(quantity_per_order)?;

    let mut splitter = GridSplitter::new(
        exchange,
        symbol,
        base_price,
        range_percent,
        num_orders,
        quantity_per_order,
    );
    splitter.start().await?;
    Ok(splitter.reports().to_vec())
}
