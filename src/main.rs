/**
* filename : main
* author : HAMA
* date: 2025. 5. 21.
* description:
**/

use std::sync::Arc;

use clap::Parser;
use tokio::sync::RwLock;

use xOrder::cli::{self, display, menu, Cli, Command};
use xOrder::config::Config;
use xOrder::exchange::binance_futures::BinanceFuturesExchange;
use xOrder::exchange::dry_run::DryRunExchange;
use xOrder::exchange::mocks::MockExchange;
use xOrder::exchange::traits::Exchange;
use xOrder::order_core::client::OrderClient;
use xOrder::utils::logging;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Cli::parse();

    // 설정 로드 및 로깅 초기화
    let config = Config::load()?;
    logging::init(&config.logging)?;
    log::info!("xOrder {} starting", xOrder::VERSION);

    let exchange = build_exchange(&args, &config)?;
    let client = OrderClient::new(exchange.clone());

    match args.command {
        Some(Command::Market { symbol, side, quantity }) => {
            let report = client.place_market_order(&symbol, &side, &quantity).await?;
            println!("Market order placed:");
            display::print_report(&report);
        }
        Some(Command::Limit { symbol, side, quantity, price }) => {
            let report = client.place_limit_order(&symbol, &side, &quantity, &price).await?;
            println!("Limit order placed:");
            display::print_report(&report);
        }
        Some(Command::StopLimit { symbol, side, quantity, stop_price, limit_price }) => {
            let report = client
                .place_stop_limit_order(&symbol, &side, &quantity, &stop_price, &limit_price)
                .await?;
            println!("Stop-Limit order placed:");
            display::print_report(&report);
        }
        Some(Command::Oco { symbol, side, quantity, price, stop_price, stop_limit_price }) => {
            let report = client
                .place_oco_order(&symbol, &side, &quantity, &price, &stop_price, &stop_limit_price)
                .await?;
            println!("OCO order placed:");
            display::print_oco(&report);
        }
        Some(Command::Twap { symbol, side, total_quantity, duration_minutes, intervals }) => {
            let reports = cli::run_twap(
                exchange.clone(),
                &symbol,
                &side,
                &total_quantity,
                duration_minutes,
                intervals,
            )
            .await?;
            println!("TWAP orders placed: {}", reports.len());
            display::print_report_lines(&reports);
        }
        Some(Command::Grid { symbol, base_price, range_percent, num_orders, quantity_per_order }) => {
            let reports = cli::run_grid(
                exchange.clone(),
                &symbol,
                &base_price,
                &range_percent,
                num_orders,
                &quantity_per_order,
            )
            .await?;
            println!("Grid orders placed: {}", reports.len());
            display::print_report_lines(&reports);
        }
        Some(Command::Menu) | None => {
            menu::run(&client, exchange.clone()).await?;
        }
    }

    Ok(())
}

/// 실행 모드에 따른 거래소 커넥터 선택
fn build_exchange(args: &Cli, config: &Config) -> Result<Arc<RwLock<dyn Exchange>>, anyhow::Error> {
    if args.mock || config.exchange.use_mock {
        log::info!("Using mock exchange");
        let exchange: Arc<RwLock<dyn Exchange>> = Arc::new(RwLock::new(MockExchange::new()));
        return Ok(exchange);
    }

    if args.dry_run {
        log::info!("Dry-run mode, orders will not be sent");
        let exchange: Arc<RwLock<dyn Exchange>> = Arc::new(RwLock::new(DryRunExchange::new()));
        return Ok(exchange);
    }

    let (api_key, api_secret) = config.credentials()?;
    let base_url = config.base_url(args.live);
    log::info!("Using Binance futures endpoint {}", base_url);

    let exchange: Arc<RwLock<dyn Exchange>> =
        Arc::new(RwLock::new(BinanceFuturesExchange::new(base_url, api_key, api_secret)));
    Ok(exchange)
}
