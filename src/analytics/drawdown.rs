/**
* filename : drawdown
* author : HAMA
* date: 2025. 6. 3.
* description:
**/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::equity::{build_equity_curve, EquityPoint};
use crate::models::trade::TradeRecord;

/// 고점 아래로 내려갔다가 회복하기까지의 구간
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawdownPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub peak_balance: f64,
    pub trough_balance: f64,
    /// 구간 내 최대 하락폭 (금액)
    pub depth: f64,
    /// 구간 내 최대 하락률 (%)
    pub depth_percent: f64,
    /// false면 마지막 데이터 시점까지 회복하지 못한 구간
    pub recovered: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawdownAnalysis {
    pub max_drawdown: f64,
    pub max_drawdown_percent: f64,
    pub current_drawdown: f64,
    pub periods: Vec<DrawdownPeriod>,
    pub max_drawdown_period: Option<DrawdownPeriod>,
}

/// 거래 목록에서 직접 손실폭 분석 (시작 잔고 포함)
pub fn analyze_drawdown(trades: &[TradeRecord], starting_balance: f64) -> DrawdownAnalysis {
    analyze_curve(&build_equity_curve(trades, starting_balance))
}

/// 자산 곡선 손실폭 분석
pub fn analyze_curve(points: &[EquityPoint]) -> DrawdownAnalysis {
    let Some(first) = points.first() else {
        return DrawdownAnalysis::default();
    };

    let mut analysis = DrawdownAnalysis::default();
    let mut peak = first.balance;
    let mut open: Option<DrawdownPeriod> = None;

    for point in points {
        let balance = point.balance;

        if balance >= peak {
            // 고점 회복 시 구간 종료
            if let Some(mut period) = open.take() {
                period.end = point.date;
                period.recovered = true;
                analysis.periods.push(period);
            }
            peak = balance;
            continue;
        }

        let depth = peak - balance;
        let depth_percent = if peak > 0.0 { depth / peak * 100.0 } else { 0.0 };

        analysis.max_drawdown = analysis.max_drawdown.max(depth);
        analysis.max_drawdown_percent = analysis.max_drawdown_percent.max(depth_percent);

        let period = open.get_or_insert_with(|| DrawdownPeriod {
            start: point.date,
            end: point.date,
            peak_balance: peak,
            trough_balance: balance,
            depth: 0.0,
            depth_percent: 0.0,
            recovered: false,
        });
        period.end = point.date;
        if depth > period.depth {
            period.depth = depth;
            period.trough_balance = balance;
        }
        period.depth_percent = period.depth_percent.max(depth_percent);
    }

    if let Some(period) = open {
        analysis.periods.push(period);
    }

    if let Some(last) = points.last() {
        analysis.current_drawdown = if peak > 0.0 && last.balance < peak {
            (peak - last.balance) / peak * 100.0
        } else {
            0.0
        };
    }

    // 동일 깊이면 먼저 발생한 구간
    analysis.max_drawdown_period = analysis
        .periods
        .iter()
        .fold(None::<&DrawdownPeriod>, |deepest, p| match deepest {
            Some(d) if d.depth >= p.depth => Some(d),
            _ => Some(p),
        })
        .cloned();

    log::debug!(
        "손실폭 분석: 최대 {:.2} ({:.3}%), 구간 {}개",
        analysis.max_drawdown,
        analysis.max_drawdown_percent,
        analysis.periods.len()
    );

    analysis
}
