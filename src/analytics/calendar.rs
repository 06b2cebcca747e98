/**
* filename : calendar
* author : HAMA
* date: 2025. 6. 5.
* description: 일/월 단위 집계 (히트맵용)
**/

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;
use crate::models::trade::TradeRecord;
use crate::utils::days_in_month;
use crate::utils::math::{percentage, safe_div};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    pub date: NaiveDate,
    pub trade_count: usize,
    pub a_plus_count: usize,
    pub priced_count: usize,
    pub win_count: usize,
    pub total_pnl: f64,
    /// 승리 / 손익 기록 거래 (%)
    pub win_rate: f64,
    pub average_score: f64,
    #[serde(skip)]
    score_sum: f64,
}

impl DayBucket {
    fn new(date: NaiveDate) -> Self {
        DayBucket {
            date,
            trade_count: 0,
            a_plus_count: 0,
            priced_count: 0,
            win_count: 0,
            total_pnl: 0.0,
            win_rate: 0.0,
            average_score: 0.0,
            score_sum: 0.0,
        }
    }

    fn add(&mut self, trade: &TradeRecord) {
        self.trade_count += 1;
        self.score_sum += trade.score_percent();
        if trade.is_a_plus() {
            self.a_plus_count += 1;
        }
        if let Some(pnl) = trade.pnl {
            self.priced_count += 1;
            self.total_pnl += pnl;
            if pnl > 0.0 {
                self.win_count += 1;
            }
        }
        self.win_rate = percentage(self.win_count, self.priced_count);
        self.average_score = safe_div(self.score_sum, self.trade_count as f64);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub total_trades: usize,
    pub trading_days: usize,
    pub a_plus_count: usize,
    pub a_plus_rate: f64,
    pub priced_trades: usize,
    pub win_count: usize,
    pub win_rate: f64,
    pub total_pnl: f64,
    pub average_trades_per_day: f64,
    pub days: BTreeMap<NaiveDate, DayBucket>,
}

impl MonthSummary {
    fn from_days(year: i32, month: u32, days: BTreeMap<NaiveDate, DayBucket>) -> Self {
        let total_trades: usize = days.values().map(|d| d.trade_count).sum();
        let a_plus_count: usize = days.values().map(|d| d.a_plus_count).sum();
        let priced_trades: usize = days.values().map(|d| d.priced_count).sum();
        let win_count: usize = days.values().map(|d| d.win_count).sum();
        let total_pnl: f64 = days.values().map(|d| d.total_pnl).sum();
        let trading_days = days.len();

        MonthSummary {
            year,
            month,
            total_trades,
            trading_days,
            a_plus_count,
            a_plus_rate: percentage(a_plus_count, total_trades),
            priced_trades,
            win_count,
            win_rate: percentage(win_count, priced_trades),
            total_pnl,
            average_trades_per_day: safe_div(total_trades as f64, trading_days as f64),
            days,
        }
    }
}

/// 거래를 UTC 날짜별로 집계. 거래가 없는 날은 포함하지 않는다.
pub fn bucket_by_day(trades: &[TradeRecord]) -> BTreeMap<NaiveDate, DayBucket> {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for trade in trades {
        let date = trade.timestamp.date_naive();
        buckets.entry(date).or_insert_with(|| DayBucket::new(date)).add(trade);
    }

    buckets
}

/// [start, end] 날짜 범위의 일별 집계
pub fn bucket_range(
    trades: &[TradeRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<BTreeMap<NaiveDate, DayBucket>, AnalyticsError> {
    if start > end {
        return Err(AnalyticsError::InvalidParameter(format!(
            "range start {} is after end {}",
            start, end
        )));
    }

    let in_range: Vec<TradeRecord> = trades
        .iter()
        .filter(|t| {
            let date = t.timestamp.date_naive();
            date >= start && date <= end
        })
        .cloned()
        .collect();

    Ok(bucket_by_day(&in_range))
}

/// 특정 월의 요약
pub fn month_summary(trades: &[TradeRecord], year: i32, month: u32) -> Result<MonthSummary, AnalyticsError> {
    let last_day = days_in_month(year, month)
        .ok_or_else(|| AnalyticsError::InvalidParameter(format!("invalid month {}-{}", year, month)))?;

    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AnalyticsError::InvalidParameter(format!("invalid month {}-{}", year, month)))?;
    let end = NaiveDate::from_ymd_opt(year, month, last_day)
        .ok_or_else(|| AnalyticsError::InvalidParameter(format!("invalid month {}-{}", year, month)))?;

    let days = bucket_range(trades, start, end)?;
    Ok(MonthSummary::from_days(year, month, days))
}

/// 거래가 있는 모든 월의 요약
pub fn bucket_by_month(trades: &[TradeRecord]) -> BTreeMap<(i32, u32), MonthSummary> {
    let mut months: BTreeMap<(i32, u32), BTreeMap<NaiveDate, DayBucket>> = BTreeMap::new();

    for (date, bucket) in bucket_by_day(trades) {
        months
            .entry((date.year(), date.month()))
            .or_default()
            .insert(date, bucket);
    }

    months
        .into_iter()
        .map(|((year, month), days)| ((year, month), MonthSummary::from_days(year, month, days)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::*;
    use crate::models::trade::Verdict;

    #[test]
    fn test_bucket_by_day() {
        // base_time: 2024-03-04 09:00
        let mut not_a_plus = priced(2, -30.0);
        not_a_plus.verdict = Verdict::NotAPlus;
        let trades = vec![priced(0, 50.0), not_a_plus, trade_at(1), priced(24, 10.0)];

        let buckets = bucket_by_day(&trades);
        assert_eq!(buckets.len(), 2);

        let day = &buckets[&NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()];
        assert_eq!(day.trade_count, 3);
        assert_eq!(day.a_plus_count, 2);
        assert_eq!(day.priced_count, 2);
        assert_eq!(day.win_count, 1);
        assert_eq!(day.win_rate, 50.0);
        assert_eq!(day.total_pnl, 20.0);
        assert!((day.average_score - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_days_absent() {
        let trades = vec![priced(0, 1.0), priced(24 * 3, 1.0)];
        let buckets = bucket_by_day(&trades);
        assert_eq!(buckets.len(), 2);
        assert!(!buckets.contains_key(&NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()));
    }

    #[test]
    fn test_month_summary() {
        let trades = vec![
            priced(0, 50.0),
            priced(1, -10.0),
            priced(24, 5.0),
            priced(24 * 30, 100.0), // 4월
        ];
        let summary = month_summary(&trades, 2024, 3).unwrap();

        assert_eq!(summary.total_trades, 3);
        assert_eq!(summary.trading_days, 2);
        assert_eq!(summary.average_trades_per_day, 1.5);
        assert_eq!(summary.a_plus_rate, 100.0);
        assert_eq!(summary.total_pnl, 45.0);
        assert!((summary.win_rate - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_month() {
        let summary = month_summary(&[], 2024, 2).unwrap();
        assert_eq!(summary.total_trades, 0);
        assert_eq!(summary.average_trades_per_day, 0.0);
        assert!(summary.days.is_empty());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(month_summary(&[], 2024, 13).is_err());
        let start = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(bucket_range(&[], start, end).is_err());
    }

    #[test]
    fn test_bucket_by_month() {
        let trades = vec![priced(0, 1.0), priced(24 * 30, 2.0), priced(24 * 31, 3.0)];
        let months = bucket_by_month(&trades);

        assert_eq!(months.len(), 2);
        assert_eq!(months[&(2024, 3)].total_trades, 1);
        assert_eq!(months[&(2024, 4)].total_trades, 2);
        assert_eq!(months[&(2024, 4)].trading_days, 2);
    }
}
