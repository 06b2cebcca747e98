/**
* filename : grouping
* author : HAMA
* date: 2025. 6. 4.
* description: 전략/태그별 성과 비교
**/

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analytics::equity::{build_equity_curve, EquityPoint};
use crate::analytics::ratios::PnlBreakdown;
use crate::analytics::streaks::average_score;
use crate::models::trade::TradeRecord;
use crate::utils::math::percentage;

/// 그룹 기준
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Strategy,
    Pair,
    Session,
    Setup,
    /// 태그별 (여러 태그를 가진 거래는 각 그룹에 모두 포함)
    Tag,
}

impl GroupKey {
    /// 거래가 속하는 그룹 이름들. 해당 값이 없으면 빈 목록.
    pub fn extract<'a>(&self, trade: &'a TradeRecord) -> Vec<&'a str> {
        let single = |value: Option<&'a String>| -> Vec<&'a str> {
            value
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .into_iter()
                .collect()
        };

        match self {
            GroupKey::Strategy => single(Some(&trade.strategy_name)),
            GroupKey::Pair => single(trade.pair.as_ref()),
            GroupKey::Session => single(trade.session.as_ref()),
            GroupKey::Setup => single(trade.setup.as_ref()),
            GroupKey::Tag => {
                let mut tags: Vec<&str> = trade
                    .tags
                    .iter()
                    .map(|t| t.trim())
                    .filter(|t| !t.is_empty())
                    .collect();
                // 같은 태그가 중복되어도 한 번만 집계
                tags.sort_unstable();
                tags.dedup();
                tags
            }
        }
    }
}

/// 그룹 정렬 기준 (내림차순)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupSort {
    WinRate,
    TotalPnl,
    TradeCount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPerformance {
    pub key: String,
    pub total_trades: usize,
    pub priced_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
    pub total_pnl: f64,
    pub average_pnl: f64,
    #[serde(with = "crate::analytics::ratios::profit_factor_format")]
    pub profit_factor: f64,
    pub average_score: f64,
    pub a_plus_count: usize,
    pub a_plus_rate: f64,
    pub equity_curve: Vec<EquityPoint>,
}

impl GroupPerformance {
    fn from_trades(key: String, trades: &[TradeRecord], starting_balance: f64) -> Self {
        let pnl = PnlBreakdown::from_trades(trades);
        let a_plus_count = trades.iter().filter(|t| t.is_a_plus()).count();

        GroupPerformance {
            key,
            total_trades: trades.len(),
            priced_trades: pnl.priced_trades,
            winning_trades: pnl.winning_trades,
            losing_trades: pnl.losing_trades,
            win_rate: pnl.win_rate(),
            total_pnl: pnl.total_pnl,
            average_pnl: pnl.expectancy(),
            profit_factor: pnl.profit_factor(),
            average_score: average_score(trades),
            a_plus_count,
            a_plus_rate: percentage(a_plus_count, trades.len()),
            equity_curve: build_equity_curve(trades, starting_balance),
        }
    }

    fn compare(&self, other: &Self, sort: GroupSort) -> Ordering {
        let primary = match sort {
            GroupSort::WinRate => other.win_rate.total_cmp(&self.win_rate),
            GroupSort::TotalPnl => other.total_pnl.total_cmp(&self.total_pnl),
            GroupSort::TradeCount => other.total_trades.cmp(&self.total_trades),
        };
        primary.then_with(|| self.key.cmp(&other.key))
    }
}

/// 그룹별 성과 계산
pub fn group_performance(
    trades: &[TradeRecord],
    key: GroupKey,
    sort: GroupSort,
    starting_balance: f64,
) -> Vec<GroupPerformance> {
    let mut groups: BTreeMap<&str, Vec<TradeRecord>> = BTreeMap::new();

    for trade in trades {
        for name in key.extract(trade) {
            groups.entry(name).or_default().push(trade.clone());
        }
    }

    let mut result: Vec<GroupPerformance> = groups
        .into_iter()
        .map(|(name, members)| GroupPerformance::from_trades(name.to_string(), &members, starting_balance))
        .collect();

    result.sort_by(|a, b| a.compare(b, sort));

    log::debug!("그룹 집계 완료: 기준 {:?}, 그룹 {}개", key, result.len());

    result
}

/// 전략별 비교 (총 손익 순)
pub fn compare_strategies(trades: &[TradeRecord], starting_balance: f64) -> Vec<GroupPerformance> {
    group_performance(trades, GroupKey::Strategy, GroupSort::TotalPnl, starting_balance)
}
