/**
* filename : error
* author : HAMA
* date: 2025. 5. 21.
* description:
**/

use thiserror::Error;

use crate::models::order::OrderId;

#[derive(Error, Debug)]
pub enum TradingError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("Already running: {0}")]
    AlreadyRunning(String),

    #[error("Exchange error: {0}")]
    ExchangeError(String),

    /// Error payload returned by the exchange, passed through unchanged
    #[error("Exchange rejected request (code {code}): {msg}")]
    ApiError { code: i64, msg: String },

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Missing credentials: set BINANCE_API_KEY and BINANCE_API_SECRET")]
    MissingCredentials,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
