//! 대화형 메뉴
//!
//! 원하는 주문 유형을 번호로 고르고 파라미터를 차례로 입력받는다.
//! 개별 주문의 오류는 출력만 하고 루프는 계속 돈다.

use std::io::{self, Write};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cli::{display, run_grid, run_twap};
use crate::error::TradingError;
use crate::exchange::traits::Exchange;
use crate::order_core::client::OrderClient;

pub async fn run(
    client: &OrderClient,
    exchange: Arc<RwLock<dyn Exchange>>,
) -> Result<(), TradingError> {
    loop {
        println!();
        println!("Binance Futures Order Bot");
        println!("1. Market Order");
        println!("2. Limit Order");
        println!("3. Stop-Limit Order");
        println!("4. OCO Order");
        println!("5. TWAP Order");
        println!("6. Grid Orders");
        println!("7. Exit");

        let choice = prompt("Choose an option")?;

        match choice.as_str() {
            "1" => {
                let symbol = prompt("Symbol")?;
                let side = prompt("Side (BUY/SELL)")?;
                let quantity = prompt("Quantity")?;

                match client.place_market_order(&symbol, &side, &quantity).await {
                    Ok(report) => {
                        println!("Order placed:");
                        display::print_report(&report);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "2" => {
                let symbol = prompt("Symbol")?;
                let side = prompt("Side (BUY/SELL)")?;
                let quantity = prompt("Quantity")?;
                let price = prompt("Price")?;

                match client.place_limit_order(&symbol, &side, &quantity, &price).await {
                    Ok(report) => {
                        println!("Order placed:");
                        display::print_report(&report);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "3" => {
                let symbol = prompt("Symbol")?;
                let side = prompt("Side (BUY/SELL)")?;
                let quantity = prompt("Quantity")?;
                let stop_price = prompt("Stop Price")?;
                let limit_price = prompt("Limit Price")?;

                match client
                    .place_stop_limit_order(&symbol, &side, &quantity, &stop_price, &limit_price)
                    .await
                {
                    Ok(report) => {
                        println!("Order placed:");
                        display::print_report(&report);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "4" => {
                let symbol = prompt("Symbol")?;
                let side = prompt("Side (BUY/SELL)")?;
                let quantity = prompt("Quantity")?;
                let price = prompt("Take-Profit Price")?;
                let stop_price = prompt("Stop Price")?;
                let stop_limit_price = prompt("Stop Limit Price")?;

                match client
                    .place_oco_order(&symbol, &side, &quantity, &price, &stop_price, &stop_limit_price)
                    .await
                {
                    Ok(report) => {
                        println!("Order placed:");
                        display::print_oco(&report);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "5" => {
                let symbol = prompt("Symbol")?;
                let side = prompt("Side (BUY/SELL)")?;
                let total_quantity = prompt("Total Quantity")?;
                let duration_minutes = prompt("Duration (minutes)")?;
                let intervals = prompt("Intervals")?;

                let result = match (parse_u64(&duration_minutes, "Duration"), parse_usize(&intervals, "Intervals")) {
                    (Ok(duration_minutes), Ok(intervals)) => {
                        run_twap(exchange.clone(), &symbol, &side, &total_quantity, duration_minutes, intervals).await
                    }
                    (Err(e), _) | (_, Err(e)) => Err(e),
                };

                match result {
                    Ok(reports) => {
                        println!("Orders placed: {}", reports.len());
                        display::print_report_lines(&reports);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "6" => {
                let symbol = prompt("Symbol")?;
                let base_price = prompt("Base Price")?;
                let range_percent = prompt("Range Percent")?;
                let num_orders = prompt("Number of Orders per Side")?;
                let quantity_per_order = prompt("Quantity per Order")?;

                let result = match parse_usize(&num_orders, "Number of orders") {
                    Ok(num_orders) => {
                        run_grid(
                            exchange.clone(),
                            &symbol,
                            &base_price,
                            &range_percent,
                            num_orders,
                            &quantity_per_order,
                        )
                        .await
                    }
                    Err(e) => Err(e),
                };

                match result {
                    Ok(reports) => {
                        println!("Orders placed: {}", reports.len());
                        display::print_report_lines(&reports);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "7" => break,
            _ => println!("Invalid choice."),
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String, TradingError> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn parse_u64(raw: &str, what: &str) -> Result<u64, TradingError> {
    raw.parse()
        .map_err(|_| TradingError::InvalidParameter(format!("{} must be a whole number, got '{}'", what, raw)))
}

fn parse_usize(raw: &str, what: &str) -> Result<usize, TradingError> {
    raw.parse()
        .map_err(|_| TradingError::InvalidParameter(format!("{} must be a whole number, got '{}'", what, raw)))
}
