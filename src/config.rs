/**
* filename : config
* author : HAMA
* date: 2025. 5. 21.
* description:
**/

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::TradingError;
use crate::exchange::binance_futures::{MAINNET_BASE_URL, TESTNET_BASE_URL};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub exchange: ExchangeConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub base_url: Option<String>,
    pub testnet: bool,
    pub use_mock: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
}

impl Config {
    /// Load configuration from config.json when present, defaults otherwise
    pub fn load() -> Result<Self, TradingError> {
        let config_path = Path::new("config.json");

        if config_path.exists() {
            let mut file = File::open(config_path)
                .map_err(|e| TradingError::ConfigError(format!("Failed to open config file: {}", e)))?;

            let mut contents = String::new();
            file.read_to_string(&mut contents)
                .map_err(|e| TradingError::ConfigError(format!("Failed to read config file: {}", e)))?;

            let mut cfg: Config = serde_json::from_str(&contents)
                .map_err(|e| TradingError::ConfigError(format!("Failed to parse config file: {}", e)))?;
            // environment overrides
            cfg.apply_env_overrides();
            Ok(cfg)
        } else {
            let mut cfg = Config::default();
            cfg.apply_env_overrides();
            Ok(cfg)
        }
    }

    /// Apply environment variable overrides for sensitive/runtime fields
    fn apply_env_overrides(&mut self) {
        use std::env;
        if let Ok(v) = env::var("BINANCE_API_KEY") { if !v.is_empty() { self.exchange.api_key = Some(v); } }
        if let Ok(v) = env::var("BINANCE_API_SECRET") { if !v.is_empty() { self.exchange.api_secret = Some(v); } }
        if let Ok(v) = env::var("BINANCE_BASE_URL") { if !v.is_empty() { self.exchange.base_url = Some(v); } }
        if let Ok(v) = env::var("USE_TESTNET") {
            let lower = v.to_lowercase();
            if ["1", "true", "yes"].contains(&lower.as_str()) { self.exchange.testnet = true; }
            if ["0", "false", "no"].contains(&lower.as_str()) { self.exchange.testnet = false; }
        }
        if let Ok(v) = env::var("USE_MOCK") {
            let lower = v.to_lowercase();
            if ["1", "true", "yes"].contains(&lower.as_str()) { self.exchange.use_mock = true; }
            if ["0", "false", "no"].contains(&lower.as_str()) { self.exchange.use_mock = false; }
        }
    }

    /// API credentials, required for any run that talks to the exchange
    pub fn credentials(&self) -> Result<(String, String), TradingError> {
        match (&self.exchange.api_key, &self.exchange.api_secret) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
                Ok((key.clone(), secret.clone()))
            }
            _ => Err(TradingError::MissingCredentials),
        }
    }

    /// Resolved REST base URL; explicit config wins over the testnet toggle
    pub fn base_url(&self, live: bool) -> String {
        if let Some(url) = &self.exchange.base_url {
            return url.clone();
        }
        if live || !self.exchange.testnet {
            MAINNET_BASE_URL.to_string()
        } else {
            TESTNET_BASE_URL.to_string()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            exchange: ExchangeConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        ExchangeConfig {
            api_key: None,
            api_secret: None,
            base_url: None,
            testnet: true,
            use_mock: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file_path: Some("bot.log".to_string()),
        }
    }
}
