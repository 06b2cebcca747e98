/**
* filename : worker
* author : HAMA
* date: 2025. 6. 5.
* description: 분석 파이프라인을 블로킹 스레드 풀에서 실행
**/

use std::sync::Arc;

use tokio::task;

use crate::analytics::metrics::{calculate_metrics_with, PerformanceMetrics};
use crate::analytics::report::AnalyticsReport;
use crate::config::AnalyticsConfig;
use crate::error::AnalyticsError;
use crate::models::trade::TradeRecord;

async fn run_blocking<T, F>(operation: &'static str, job: F) -> Result<T, AnalyticsError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    task::spawn_blocking(job).await.map_err(|e| {
        let err = AnalyticsError::WorkerError(format!("{} failed: {}", operation, e));
        crate::utils::logging::log_error("worker", &err);
        err
    })
}

/// 성과 지표를 백그라운드에서 계산
///
/// 반환된 future를 버리면 결과도 버려진다. 진행 중인 계산은 중단되지 않는다.
pub async fn compute_metrics(
    trades: Arc<[TradeRecord]>,
    config: AnalyticsConfig,
) -> Result<PerformanceMetrics, AnalyticsError> {
    run_blocking("compute_metrics", move || calculate_metrics_with(&trades, &config)).await
}

/// 전체 리포트를 백그라운드에서 계산
pub async fn compute_report(
    trades: Arc<[TradeRecord]>,
    config: AnalyticsConfig,
) -> Result<AnalyticsReport, AnalyticsError> {
    run_blocking("compute_report", move || AnalyticsReport::build(&trades, &config)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::*;

    #[tokio::test]
    async fn test_worker_matches_synchronous_result() {
        let trades: Arc<[TradeRecord]> = vec![priced(0, 100.0), priced(1, -50.0)].into();
        let config = AnalyticsConfig::default();

        let background = compute_metrics(trades.clone(), config.clone()).await.unwrap();
        assert_eq!(background, calculate_metrics_with(&trades, &config));
    }
}
