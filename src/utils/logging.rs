//! 로깅 유틸리티
//!
//! 로그 초기화 (파일 추가 기록 지원)

use std::env;
use std::fs::OpenOptions;

use env_logger::{Builder, Target};
use log::LevelFilter;

use crate::config::LoggingConfig;
use crate::error::TradingError;

/// 로깅 시스템 초기화
///
/// 레벨은 설정값을 따르되 RUST_LOG 환경변수가 우선한다. file_path가
/// 설정되어 있으면 로그를 해당 파일에 추가 기록한다.
pub fn init(config: &LoggingConfig) -> Result<(), TradingError> {
    let mut builder = Builder::from_default_env();

    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| config.level.clone());

    let level_filter = match log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    builder
        .filter_level(level_filter)
        .format_timestamp_millis();

    if let Some(path) = &config.file_path {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.init();

    log::info!("Logging initialized: level = {}", log_level);

    Ok(())
}
