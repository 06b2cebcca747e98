/**
* filename : equity
* author : HAMA
* date: 2025. 6. 2.
* description:
**/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::priced_by_time;
use crate::models::trade::TradeRecord;

/// 자산 곡선의 한 점
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityPoint {
    pub date: DateTime<Utc>,
    pub balance: f64,
    /// 고점 대비 하락률 (%)
    pub drawdown: f64,
    pub trade_number: usize,
    pub pnl: f64,
    pub peak: f64,
}

fn drawdown_percent(peak: f64, balance: f64) -> f64 {
    if peak > 0.0 && balance < peak {
        (peak - balance) / peak * 100.0
    } else {
        0.0
    }
}

/// 손익이 기록된 거래로 자산 곡선 생성
///
/// 시작 잔고의 0번 점을 포함한다. 손익 기록이 없으면 빈 곡선.
pub fn build_equity_curve(trades: &[TradeRecord], starting_balance: f64) -> Vec<EquityPoint> {
    let priced = priced_by_time(trades);
    let Some((first, _)) = priced.first() else {
        return Vec::new();
    };

    let mut curve = Vec::with_capacity(priced.len() + 1);
    curve.push(EquityPoint {
        date: first.timestamp,
        balance: starting_balance,
        drawdown: 0.0,
        trade_number: 0,
        pnl: 0.0,
        peak: starting_balance,
    });

    let mut balance = starting_balance;
    let mut peak = starting_balance;

    for (i, (trade, pnl)) in priced.iter().enumerate() {
        balance += pnl;
        if balance > peak {
            peak = balance;
        }

        curve.push(EquityPoint {
            date: trade.timestamp,
            balance,
            drawdown: drawdown_percent(peak, balance),
            trade_number: i + 1,
            pnl: *pnl,
            peak,
        });
    }

    log::debug!(
        "자산 곡선 생성: 거래 {}건, 최종 잔고 {:.2}",
        priced.len(),
        balance
    );

    curve
}

/// 시작 잔고를 포함한 잔고 시계열 (수익률 계산용)
pub fn balance_series(trades: &[TradeRecord], starting_balance: f64) -> Vec<f64> {
    let mut balance = starting_balance;
    let mut series = vec![starting_balance];

    for (_, pnl) in priced_by_time(trades) {
        balance += pnl;
        series.push(balance);
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::*;

    #[test]
    fn test_empty_curve() {
        assert!(build_equity_curve(&[], 10_000.0).is_empty());
        // 손익 없는 거래만 있어도 빈 곡선
        assert!(build_equity_curve(&[trade_at(0)], 10_000.0).is_empty());
    }

    #[test]
    fn test_curve_balances_and_drawdown() {
        let trades = vec![priced(0, 100.0), priced(1, -50.0), priced(2, 200.0)];
        let curve = build_equity_curve(&trades, 10_000.0);

        assert_eq!(curve.len(), 4);
        assert_eq!(curve[0].trade_number, 0);
        assert_eq!(curve[0].balance, 10_000.0);
        assert_eq!(curve[1].balance, 10_100.0);
        assert_eq!(curve[2].balance, 10_050.0);
        assert!((curve[2].drawdown - 50.0 / 10_100.0 * 100.0).abs() < 1e-9);
        assert_eq!(curve[3].balance, 10_250.0);
        assert_eq!(curve[3].drawdown, 0.0);
        assert_eq!(curve[3].trade_number, 3);
    }

    #[test]
    fn test_tie_at_peak_is_not_drawdown() {
        let trades = vec![priced(0, 100.0), priced(1, -100.0), priced(2, 100.0)];
        let curve = build_equity_curve(&trades, 1_000.0);
        assert!(curve[2].drawdown > 0.0);
        assert_eq!(curve[3].balance, curve[3].peak);
        assert_eq!(curve[3].drawdown, 0.0);
    }

    #[test]
    fn test_peak_is_monotonic() {
        let pnls = [50.0, -80.0, 20.0, 300.0, -10.0, -400.0, 90.0];
        let trades: Vec<_> = pnls.iter().enumerate().map(|(i, p)| priced(i as i64, *p)).collect();
        let curve = build_equity_curve(&trades, 1_000.0);

        for pair in curve.windows(2) {
            assert!(pair[1].peak >= pair[0].peak);
        }
        assert!(curve.iter().all(|p| p.drawdown >= 0.0));
    }

    #[test]
    fn test_balance_series_has_seed() {
        assert_eq!(balance_series(&[], 500.0), vec![500.0]);
        let trades = vec![priced(1, -20.0), priced(0, 10.0)];
        assert_eq!(balance_series(&trades, 500.0), vec![500.0, 510.0, 490.0]);
    }
}
