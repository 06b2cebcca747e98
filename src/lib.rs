//! 트레이딩 저널 성과 분석 라이브러리
//!
//! 거래 기록 목록으로부터 자산 곡선, 손실폭, 연속 기록, 성과 지표,
//! 전략/태그별 비교, 달력 집계를 계산합니다.

pub mod analytics;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;
pub mod worker;

// 핵심 타입 재노출
pub use crate::analytics::{
    calculate_metrics, AnalyticsReport, DrawdownAnalysis, EquityPoint, GroupKey, GroupSort,
    PerformanceMetrics,
};
pub use crate::config::AnalyticsConfig;
pub use crate::error::AnalyticsError;
pub use crate::models::trade::{TradeOutcome, TradeRecord, Verdict};

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, AnalyticsError>;
