/**
* filename : ratios
* author : HAMA
* date: 2025. 6. 3.
* description: 손익 기반 위험/비율 지표
**/

use crate::analytics::equity::balance_series;
use crate::models::trade::TradeRecord;
use crate::utils::math::{average, safe_div, standard_deviation};

/// 연간 거래일 수
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// 손익 기록 거래의 승/패 통계
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PnlBreakdown {
    pub priced_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub breakeven_trades: usize,
    pub gross_profit: f64,
    /// 손실 합계 (양수)
    pub gross_loss: f64,
    pub total_pnl: f64,
    pub largest_win: f64,
    /// 가장 큰 손실 (음수), 손실이 없으면 0
    pub largest_loss: f64,
}

impl PnlBreakdown {
    pub fn from_trades(trades: &[TradeRecord]) -> Self {
        let mut breakdown = PnlBreakdown::default();

        for pnl in trades.iter().filter_map(|t| t.pnl) {
            breakdown.priced_trades += 1;
            breakdown.total_pnl += pnl;

            if pnl > 0.0 {
                breakdown.winning_trades += 1;
                breakdown.gross_profit += pnl;
                breakdown.largest_win = breakdown.largest_win.max(pnl);
            } else if pnl < 0.0 {
                breakdown.losing_trades += 1;
                breakdown.gross_loss += pnl.abs();
                breakdown.largest_loss = breakdown.largest_loss.min(pnl);
            } else {
                breakdown.breakeven_trades += 1;
            }
        }

        breakdown
    }

    pub fn win_rate(&self) -> f64 {
        safe_div(self.winning_trades as f64, self.priced_trades as f64) * 100.0
    }

    pub fn loss_rate(&self) -> f64 {
        safe_div(self.losing_trades as f64, self.priced_trades as f64) * 100.0
    }

    pub fn average_win(&self) -> f64 {
        safe_div(self.gross_profit, self.winning_trades as f64)
    }

    pub fn average_loss(&self) -> f64 {
        safe_div(self.gross_loss, self.losing_trades as f64)
    }

    pub fn expectancy(&self) -> f64 {
        safe_div(self.total_pnl, self.priced_trades as f64)
    }

    pub fn profit_factor(&self) -> f64 {
        profit_factor_from(self.gross_profit, self.gross_loss)
    }
}

fn profit_factor_from(gross_profit: f64, gross_loss: f64) -> f64 {
    if gross_loss == 0.0 {
        return if gross_profit > 0.0 { f64::INFINITY } else { 0.0 };
    }

    gross_profit / gross_loss
}

/// 수익 팩터 (총이익 / 총손실)
///
/// 손실 없이 이익만 있으면 무한대, 둘 다 없으면 0.
pub fn profit_factor(trades: &[TradeRecord]) -> f64 {
    PnlBreakdown::from_trades(trades).profit_factor()
}

/// 수익 팩터 직렬화
///
/// 무한대는 JSON `null`로 쓰고, `null`은 다시 무한대로 읽는다.
/// 유한한 값은 그대로 숫자로 쓴다.
pub mod profit_factor_format {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

/// 거래당 기대 손익
pub fn expectancy(trades: &[TradeRecord]) -> f64 {
    PnlBreakdown::from_trades(trades).expectancy()
}

/// 평균 손익비 (양수 값만)
pub fn average_risk_reward(trades: &[TradeRecord]) -> f64 {
    let ratios: Vec<f64> = trades
        .iter()
        .filter_map(|t| t.risk_reward_ratio)
        .filter(|r| *r > 0.0 && r.is_finite())
        .collect();

    average(&ratios).unwrap_or(0.0)
}

/// 거래별 수익률 시계열
pub fn trade_returns(trades: &[TradeRecord], starting_balance: f64) -> Vec<f64> {
    balance_series(trades, starting_balance)
        .windows(2)
        .filter(|pair| pair[0] != 0.0)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect()
}

/// 샤프 비율 (거래 단위, 연간화하지 않음)
pub fn sharpe_ratio(trades: &[TradeRecord], starting_balance: f64, annual_risk_free_rate: f64) -> f64 {
    let returns = trade_returns(trades, starting_balance);

    let (Some(mean_return), Some(std_dev)) = (average(&returns), standard_deviation(&returns)) else {
        return 0.0;
    };

    if std_dev == 0.0 || !std_dev.is_finite() {
        return 0.0;
    }

    let daily_risk_free = annual_risk_free_rate / TRADING_DAYS_PER_YEAR;
    safe_div(mean_return - daily_risk_free, std_dev)
}

/// 거래 단위 샤프 비율을 연간화 (√252)
pub fn annualize_sharpe(sharpe: f64) -> f64 {
    sharpe * TRADING_DAYS_PER_YEAR.sqrt()
}

/// 칼마 비율 (총수익률 / 최대 손실률)
pub fn calmar_ratio(total_pnl: f64, starting_balance: f64, max_drawdown_percent: f64) -> f64 {
    if max_drawdown_percent == 0.0 {
        return 0.0;
    }

    let return_percent = safe_div(total_pnl, starting_balance) * 100.0;
    safe_div(return_percent, max_drawdown_percent)
}
