/**
* filename : streaks
* author : HAMA
* date: 2025. 6. 3.
* description: 연속 기록 및 일관성 지표
**/

use serde::{Deserialize, Serialize};

use crate::analytics::sorted_by_time;
use crate::models::trade::{TradeOutcome, TradeRecord};
use crate::utils::math::{average, clamp, percentage, population_variance};

/// 기간 내 체크리스트 일관성 요약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyReport {
    pub total_trades: usize,
    pub a_plus_count: usize,
    pub a_plus_rate: f64,
    pub average_score: f64,
    pub priced_trades: usize,
    pub win_rate: f64,
    pub current_streak: usize,
    pub longest_streak: usize,
    pub max_consecutive_wins: usize,
    pub max_consecutive_losses: usize,
    pub risk_discipline_score: f64,
}

/// A+ 연속 기록 (현재, 최장)
///
/// 현재 기록은 가장 최근 거래부터 역순으로, 최장 기록은 전체 이력에서 계산.
pub fn a_plus_streaks(trades: &[TradeRecord]) -> (usize, usize) {
    let sorted = sorted_by_time(trades);

    let current = sorted.iter().rev().take_while(|t| t.is_a_plus()).count();

    let mut longest = 0;
    let mut run = 0;
    for trade in &sorted {
        if trade.is_a_plus() {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }

    (current, longest)
}

/// 최대 연승, 최대 연패 (결과 기준, 시간순)
///
/// 본전이나 결과 미기록 거래는 양쪽 모두 초기화한다.
pub fn consecutive_outcomes(trades: &[TradeRecord]) -> (usize, usize) {
    let mut max_wins = 0;
    let mut max_losses = 0;
    let mut wins = 0;
    let mut losses = 0;

    for trade in sorted_by_time(trades) {
        match trade.outcome {
            Some(TradeOutcome::Win) => {
                wins += 1;
                losses = 0;
                max_wins = max_wins.max(wins);
            }
            Some(TradeOutcome::Loss) => {
                losses += 1;
                wins = 0;
                max_losses = max_losses.max(losses);
            }
            Some(TradeOutcome::Breakeven) | None => {
                wins = 0;
                losses = 0;
            }
        }
    }

    (max_wins, max_losses)
}

/// A+ 비율 (%), 손익 기록 여부와 무관
pub fn a_plus_rate(trades: &[TradeRecord]) -> f64 {
    let a_plus = trades.iter().filter(|t| t.is_a_plus()).count();
    percentage(a_plus, trades.len())
}

/// 리스크 규율 점수 (0 ~ 100)
///
/// 리스크 금액의 분산/평균 비율이 작을수록 높다. 리스크 기록이 없으면 100.
pub fn risk_discipline_score(trades: &[TradeRecord]) -> f64 {
    let risks: Vec<f64> = trades
        .iter()
        .filter_map(|t| t.risk_amount)
        .filter(|r| *r > 0.0 && r.is_finite())
        .collect();

    let (Some(mean), Some(variance)) = (average(&risks), population_variance(&risks)) else {
        return 100.0;
    };

    if mean <= 0.0 {
        return 100.0;
    }

    clamp(100.0 - (variance / mean) * 100.0, 0.0, 100.0)
}

/// 평균 체크리스트 달성률 (%)
pub fn average_score(trades: &[TradeRecord]) -> f64 {
    let scores: Vec<f64> = trades.iter().map(TradeRecord::score_percent).collect();
    average(&scores).unwrap_or(0.0)
}

/// 기간 필터를 적용한 거래 목록의 일관성 요약
pub fn consistency_report(trades: &[TradeRecord]) -> ConsistencyReport {
    let (current_streak, longest_streak) = a_plus_streaks(trades);
    let (max_consecutive_wins, max_consecutive_losses) = consecutive_outcomes(trades);

    let priced: Vec<f64> = trades.iter().filter_map(|t| t.pnl).collect();
    let wins = priced.iter().filter(|p| **p > 0.0).count();

    ConsistencyReport {
        total_trades: trades.len(),
        a_plus_count: trades.iter().filter(|t| t.is_a_plus()).count(),
        a_plus_rate: a_plus_rate(trades),
        average_score: average_score(trades),
        priced_trades: priced.len(),
        win_rate: percentage(wins, priced.len()),
        current_streak,
        longest_streak,
        max_consecutive_wins,
        max_consecutive_losses,
        risk_discipline_score: risk_discipline_score(trades),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::*;
    use crate::models::trade::Verdict;

    fn with_verdict(hours: i64, verdict: Verdict) -> TradeRecord {
        let mut trade = trade_at(hours);
        trade.verdict = verdict;
        trade
    }

    #[test]
    fn test_a_plus_streaks() {
        let trades = vec![
            with_verdict(0, Verdict::APlus),
            with_verdict(1, Verdict::APlus),
            with_verdict(2, Verdict::NotAPlus),
            with_verdict(3, Verdict::APlus),
        ];
        assert_eq!(a_plus_streaks(&trades), (1, 2));
    }

    #[test]
    fn test_current_streak_zero_when_last_breaks() {
        let trades = vec![with_verdict(0, Verdict::APlus), with_verdict(1, Verdict::NotAPlus)];
        assert_eq!(a_plus_streaks(&trades), (0, 1));
        assert_eq!(a_plus_streaks(&[]), (0, 0));
    }

    #[test]
    fn test_streak_uses_timestamp_order() {
        // 입력 순서가 아니라 시간순
        let trades = vec![
            with_verdict(3, Verdict::NotAPlus),
            with_verdict(0, Verdict::APlus),
            with_verdict(1, Verdict::APlus),
            with_verdict(2, Verdict::APlus),
        ];
        assert_eq!(a_plus_streaks(&trades), (0, 3));
    }

    #[test]
    fn test_consecutive_outcomes_reset_on_breakeven() {
        let trades = vec![
            priced(0, 10.0),
            priced(1, 10.0),
            priced(2, 0.0),
            priced(3, 10.0),
            priced(4, -5.0),
            priced(5, -5.0),
            trade_at(6),
            priced(7, -5.0),
        ];
        assert_eq!(consecutive_outcomes(&trades), (2, 2));
    }

    #[test]
    fn test_a_plus_rate_counts_unpriced() {
        let trades = vec![
            with_verdict(0, Verdict::APlus),
            priced(1, 10.0),
            with_verdict(2, Verdict::NotAPlus),
            with_verdict(3, Verdict::NotAPlus),
        ];
        assert_eq!(a_plus_rate(&trades), 50.0);
        assert_eq!(a_plus_rate(&[]), 0.0);
    }

    #[test]
    fn test_risk_discipline() {
        assert_eq!(risk_discipline_score(&[]), 100.0);
        assert_eq!(risk_discipline_score(&[trade_at(0).with_risk(0.0)]), 100.0);

        // 동일한 리스크 -> 분산 0
        let same = vec![trade_at(0).with_risk(100.0), trade_at(1).with_risk(100.0)];
        assert_eq!(risk_discipline_score(&same), 100.0);

        // 평균 1.5, 분산 0.25 -> 100 - 16.67
        let close = vec![trade_at(0).with_risk(1.0), trade_at(1).with_risk(2.0)];
        assert!((risk_discipline_score(&close) - (100.0 - 0.25 / 1.5 * 100.0)).abs() < 1e-9);

        // 큰 분산은 0으로 제한
        let wild = vec![trade_at(0).with_risk(10.0), trade_at(1).with_risk(500.0)];
        assert_eq!(risk_discipline_score(&wild), 0.0);
    }

    #[test]
    fn test_consistency_report() {
        let mut unpriced = trade_at(2);
        unpriced.score = 5;
        let trades = vec![priced(0, 100.0), priced(1, -20.0), unpriced];
        let report = consistency_report(&trades);

        assert_eq!(report.total_trades, 3);
        assert_eq!(report.priced_trades, 2);
        assert_eq!(report.win_rate, 50.0);
        assert_eq!(report.a_plus_count, 3);
        assert_eq!(report.current_streak, 3);
        assert!((report.average_score - 70.0).abs() < 1e-9);
    }
}
