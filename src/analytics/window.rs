/**
* filename : window
* author : HAMA
* date: 2025. 6. 3.
* description: 기간별 거래 필터
**/

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::trade::TradeRecord;
use crate::utils::start_of_week;

/// 집계 기간
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    Today,
    /// 월요일 시작 (ISO 주)
    ThisWeek,
    ThisMonth,
    AllTime,
    /// [start, end) 범위
    Range { start: DateTime<Utc>, end: DateTime<Utc> },
}

impl TimeWindow {
    /// `now` 기준으로 타임스탬프가 기간에 속하는지
    pub fn contains(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let date = timestamp.date_naive();
        let today = now.date_naive();

        match self {
            TimeWindow::Today => date == today,
            TimeWindow::ThisWeek => start_of_week(date) == start_of_week(today),
            TimeWindow::ThisMonth => date.year() == today.year() && date.month() == today.month(),
            TimeWindow::AllTime => true,
            TimeWindow::Range { start, end } => timestamp >= *start && timestamp < *end,
        }
    }
}

/// 기간에 속하는 거래만 복사해서 반환
pub fn filter_window(trades: &[TradeRecord], window: TimeWindow, now: DateTime<Utc>) -> Vec<TradeRecord> {
    trades
        .iter()
        .filter(|t| window.contains(t.timestamp, now))
        .cloned()
        .collect()
}
