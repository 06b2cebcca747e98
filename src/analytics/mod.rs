/**
* filename : mod
* author : HAMA
* date: 2025. 6. 2.
* description: 거래 기록 기반 성과 분석
**/

pub mod calendar;
pub mod drawdown;
pub mod equity;
pub mod grouping;
pub mod metrics;
pub mod ratios;
pub mod report;
pub mod streaks;
pub mod window;

pub use calendar::{bucket_by_day, bucket_by_month, bucket_range, month_summary, DayBucket, MonthSummary};
pub use drawdown::{analyze_curve, analyze_drawdown, DrawdownAnalysis, DrawdownPeriod};
pub use equity::{build_equity_curve, EquityPoint};
pub use grouping::{compare_strategies, group_performance, GroupKey, GroupPerformance, GroupSort};
pub use metrics::{calculate_metrics, calculate_metrics_with, PerformanceMetrics};
pub use report::AnalyticsReport;
pub use streaks::{consistency_report, ConsistencyReport};
pub use window::{filter_window, TimeWindow};

use crate::models::trade::TradeRecord;

/// 타임스탬프 오름차순으로 정렬된 참조 목록 (입력은 변경하지 않음)
///
/// 안정 정렬이므로 같은 시각의 거래는 입력 순서를 유지한다.
pub fn sorted_by_time(trades: &[TradeRecord]) -> Vec<&TradeRecord> {
    let mut sorted: Vec<&TradeRecord> = trades.iter().collect();
    sorted.sort_by_key(|t| t.timestamp);
    sorted
}

/// 손익이 기록된 거래만 시간순으로
pub fn priced_by_time(trades: &[TradeRecord]) -> Vec<(&TradeRecord, f64)> {
    sorted_by_time(trades)
        .into_iter()
        .filter_map(|t| t.pnl.map(|pnl| (t, pnl)))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_sorted_by_time_does_not_assume_order() {
        let trades = vec![priced(3, 10.0), priced(1, 20.0), priced(2, 30.0)];
        let pnls: Vec<f64> = priced_by_time(&trades).into_iter().map(|(_, p)| p).collect();
        assert_eq!(pnls, vec![20.0, 30.0, 10.0]);
        // 입력 순서 유지
        assert_eq!(trades[0].pnl, Some(10.0));
    }

    #[test]
    fn test_priced_by_time_skips_unpriced() {
        let trades = vec![trade_at(0), priced(1, 5.0)];
        assert_eq!(priced_by_time(&trades).len(), 1);
    }
}
