//! 주문 응답 테이블 출력

use crate::models::report::{OcoReport, OrderReport};
use crate::utils::{fmt_decimal, format_timestamp};

/// Print an acknowledgement as a bordered key/value table
pub fn print_report(report: &OrderReport) {
    let rows = report_rows(report);
    let key_width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0);

    let border = format!("+-{}-+-{}-+", "-".repeat(key_width), "-".repeat(value_width));

    println!("{}", border);
    for (key, value) in &rows {
        println!("| {:<key_width$} | {:<value_width$} |", key, value);
    }
    println!("{}", border);
}

pub fn print_oco(report: &OcoReport) {
    println!("Take-profit leg:");
    print_report(&report.take_profit);
    println!("Stop-loss leg:");
    print_report(&report.stop_loss);
}

/// One summary line per order, for sliced executions
pub fn print_report_lines(reports: &[OrderReport]) {
    for (i, report) in reports.iter().enumerate() {
        println!(
            "Order {}: id={} {} {} {} qty={} price={} status={:?}",
            i + 1,
            report.order_id,
            report.symbol,
            report.side.as_str(),
            report.order_type.as_str(),
            fmt_decimal(report.orig_qty),
            fmt_decimal(report.price),
            report.status,
        );
    }
}

fn report_rows(report: &OrderReport) -> Vec<(&'static str, String)> {
    vec![
        ("orderId", report.order_id.to_string()),
        ("clientOrderId", report.client_order_id.clone().unwrap_or_default()),
        ("symbol", report.symbol.clone()),
        ("side", report.side.as_str().to_string()),
        ("type", report.order_type.as_str().to_string()),
        ("status", format!("{:?}", report.status)),
        ("price", fmt_decimal(report.price)),
        ("avgPrice", fmt_decimal(report.avg_price)),
        ("origQty", fmt_decimal(report.orig_qty)),
        ("executedQty", fmt_decimal(report.executed_qty)),
        ("stopPrice", fmt_decimal(report.stop_price)),
        (
            "timeInForce",
            report.time_in_force.map(|t| t.as_str().to_string()).unwrap_or_default(),
        ),
        (
            "updateTime",
            format_timestamp(report.update_time, "%Y-%m-%d %H:%M:%S%.3f"),
        ),
    ]
}
