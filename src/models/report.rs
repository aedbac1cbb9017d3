use serde::{Deserialize, Deserializer, Serialize};

use crate::models::order::{OrderId, OrderSide, OrderStatus, OrderType, TimeInForce};

/// Order acknowledgement as returned by the futures REST API.
/// Decimal fields arrive as JSON strings ("origQty":"10"), hence the
/// custom deserializer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReport {
    pub order_id: OrderId,
    #[serde(default)]
    pub client_order_id: Option<String>,
    pub symbol: String,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub status: OrderStatus,
    #[serde(default, deserialize_with = "de_decimal")]
    pub price: f64,
    #[serde(default, deserialize_with = "de_decimal")]
    pub avg_price: f64,
    #[serde(default, deserialize_with = "de_decimal")]
    pub orig_qty: f64,
    #[serde(default, deserialize_with = "de_decimal")]
    pub executed_qty: f64,
    #[serde(default, deserialize_with = "de_decimal")]
    pub stop_price: f64,
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default)]
    pub update_time: i64,
}

/// Paired take-profit / stop-loss acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcoReport {
    pub take_profit: OrderReport,
    pub stop_loss: OrderReport,
}

fn de_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) if s.is_empty() => Ok(0.0),
        serde_json::Value::String(s) => s.parse::<f64>().map_err(serde::de::Error::custom),
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("number out of f64 range")),
        serde_json::Value::Null => Ok(0.0),
        other => Err(serde::de::Error::custom(format!(
            "expected decimal string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_api_json() {
        let raw = r#"{
            "orderId": 4055048554,
            "symbol": "BTCUSDT",
            "status": "NEW",
            "clientOrderId": "x-3f2a1b",
            "price": "50000",
            "avgPrice": "0.00000",
            "origQty": "0.010",
            "executedQty": "0",
            "stopPrice": "",
            "timeInForce": "GTC",
            "type": "LIMIT",
            "side": "BUY",
            "updateTime": 1716300000123
        }"#;

        let report: OrderReport = serde_json::from_str(raw).unwrap();
        assert_eq!(report.order_id, OrderId(4055048554));
        assert_eq!(report.symbol, "BTCUSDT");
        assert_eq!(report.status, OrderStatus::New);
        assert_eq!(report.side, OrderSide::Buy);
        assert_eq!(report.order_type, OrderType::Limit);
        assert_eq!(report.price, 50000.0);
        assert_eq!(report.orig_qty, 0.01);
        assert_eq!(report.stop_price, 0.0);
        assert_eq!(report.update_time, 1716300000123);
    }

    #[test]
    fn test_stop_wire_name_round_trip() {
        let report: OrderReport = serde_json::from_str(
            r#"{"orderId":1,"symbol":"ETHUSDT","status":"NEW","side":"SELL",
                "type":"STOP","price":"2900","stopPrice":"2950","origQty":"1",
                "executedQty":"0","avgPrice":"0","updateTime":0}"#,
        )
        .unwrap();
        assert_eq!(report.order_type, OrderType::StopLimit);
        assert_eq!(report.stop_price, 2950.0);
    }
}
