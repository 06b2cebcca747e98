/**
* filename : report
* author : HAMA
* date: 2025. 6. 5.
* description: 대시보드용 분석 결과 묶음
**/

use serde::{Deserialize, Serialize};

use crate::analytics::drawdown::{analyze_curve, DrawdownAnalysis};
use crate::analytics::equity::{build_equity_curve, EquityPoint};
use crate::analytics::grouping::{compare_strategies, GroupPerformance};
use crate::analytics::metrics::{calculate_metrics_with, PerformanceMetrics};
use crate::analytics::streaks::{consistency_report, ConsistencyReport};
use crate::config::AnalyticsConfig;
use crate::models::trade::TradeRecord;

/// 대시보드 한 화면에 필요한 분석 결과 묶음
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub metrics: PerformanceMetrics,
    pub equity_curve: Vec<EquityPoint>,
    pub drawdown: DrawdownAnalysis,
    pub strategies: Vec<GroupPerformance>,
    pub consistency: ConsistencyReport,
}

impl AnalyticsReport {
    pub fn build(trades: &[TradeRecord], config: &AnalyticsConfig) -> Self {
        let equity_curve = build_equity_curve(trades, config.starting_balance);
        let drawdown = analyze_curve(&equity_curve);

        AnalyticsReport {
            metrics: calculate_metrics_with(trades, config),
            drawdown,
            equity_curve,
            strategies: compare_strategies(trades, config.starting_balance),
            consistency: consistency_report(trades),
        }
    }
}
