//! 로깅 유틸리티
//!
//! 로그 초기화 및 유틸리티 함수 제공

use env_logger::Builder;
use log::LevelFilter;
use std::env;

use crate::config::LoggingConfig;
use crate::error::AnalyticsError;

fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// 로깅 시스템 초기화 (RUST_LOG 기준)
pub fn init() -> Result<(), AnalyticsError> {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    init_with_level(&log_level)
}

/// 지정한 레벨로 로깅 시스템 초기화
pub fn init_with_level(log_level: &str) -> Result<(), AnalyticsError> {
    Builder::from_default_env()
        .filter_level(parse_level(log_level))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| AnalyticsError::ConfigError(format!("Failed to initialize logger: {}", e)))?;

    log::info!("로깅 시스템 초기화 완료: 레벨 = {}", log_level);

    Ok(())
}

/// 설정 파일의 로깅 레벨로 초기화
pub fn init_from_config(config: &LoggingConfig) -> Result<(), AnalyticsError> {
    init_with_level(&config.level)
}

/// 분석 작업 시작 로그
pub fn log_analysis_start(operation: &str, trade_count: usize) {
    log::debug!("분석 시작: {} - 거래 수: {}", operation, trade_count);
}

/// 분석 작업 종료 로그
pub fn log_analysis_end(operation: &str, trade_count: usize, result: &str) {
    log::debug!("분석 종료: {} - 거래 수: {} - 결과: {}", operation, trade_count, result);
}

/// 오류 로그
pub fn log_error(context: &str, error: &AnalyticsError) {
    log::error!("오류 발생 - {}: {}", context, error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("verbose"), LevelFilter::Info);
    }
}
