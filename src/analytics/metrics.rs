/**
* filename : metrics
* author : HAMA
* date: 2025. 6. 4.
* description:
**/

use serde::{Deserialize, Serialize};

use crate::analytics::drawdown::analyze_drawdown;
use crate::analytics::ratios::{average_risk_reward, calmar_ratio, sharpe_ratio, PnlBreakdown};
use crate::analytics::streaks::{a_plus_streaks, average_score, consecutive_outcomes, risk_discipline_score};
use crate::config::AnalyticsConfig;
use crate::models::trade::TradeRecord;
use crate::utils::logging::{log_analysis_end, log_analysis_start};
use crate::utils::math::{percentage, safe_div};

/// 성과 지표 요약
///
/// `profit_factor`는 손실 없이 이익만 있을 때 무한대가 될 수 있다.
/// JSON에서는 `null`로 쓰고 읽을 때 다시 무한대로 복원한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub total_trades: usize,
    pub priced_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub breakeven_trades: usize,
    pub win_rate: f64,
    pub loss_rate: f64,
    pub total_pnl: f64,
    pub average_win: f64,
    pub average_loss: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    #[serde(with = "crate::analytics::ratios::profit_factor_format")]
    pub profit_factor: f64,
    pub expectancy: f64,
    pub average_risk_reward: f64,
    pub starting_balance: f64,
    pub final_balance: f64,
    pub return_percent: f64,
    pub max_drawdown: f64,
    pub max_drawdown_percent: f64,
    pub current_drawdown: f64,
    pub sharpe_ratio: f64,
    pub calmar_ratio: f64,
    pub a_plus_count: usize,
    pub a_plus_rate: f64,
    pub average_score: f64,
    pub current_streak: usize,
    pub longest_streak: usize,
    pub max_consecutive_wins: usize,
    pub max_consecutive_losses: usize,
    pub risk_discipline_score: f64,
}

impl PerformanceMetrics {
    /// 거래가 없을 때의 중립값
    pub fn empty(starting_balance: f64) -> Self {
        PerformanceMetrics {
            total_trades: 0,
            priced_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            breakeven_trades: 0,
            win_rate: 0.0,
            loss_rate: 0.0,
            total_pnl: 0.0,
            average_win: 0.0,
            average_loss: 0.0,
            largest_win: 0.0,
            largest_loss: 0.0,
            profit_factor: 0.0,
            expectancy: 0.0,
            average_risk_reward: 0.0,
            starting_balance,
            final_balance: starting_balance,
            return_percent: 0.0,
            max_drawdown: 0.0,
            max_drawdown_percent: 0.0,
            current_drawdown: 0.0,
            sharpe_ratio: 0.0,
            calmar_ratio: 0.0,
            a_plus_count: 0,
            a_plus_rate: 0.0,
            average_score: 0.0,
            current_streak: 0,
            longest_streak: 0,
            max_consecutive_wins: 0,
            max_consecutive_losses: 0,
            risk_discipline_score: 100.0,
        }
    }

    /// 결과 요약 문자열 생성
    pub fn summary(&self) -> String {
        format!(
            "성과 요약:\n\
             거래 수: {} (손익 기록 {})\n\
             승률: {:.2}%\n\
             총 손익: {:.2} ({:.2}%)\n\
             수익 팩터: {:.2}\n\
             최대 손실폭: {:.2} ({:.2}%)\n\
             샤프 비율: {:.4}\n\
             A+ 비율: {:.2}%",
            self.total_trades,
            self.priced_trades,
            self.win_rate,
            self.total_pnl,
            self.return_percent,
            self.profit_factor,
            self.max_drawdown,
            self.max_drawdown_percent,
            self.sharpe_ratio,
            self.a_plus_rate,
        )
    }
}

/// 기본 무위험 이자율로 성과 지표 계산
pub fn calculate_metrics(trades: &[TradeRecord], starting_balance: f64) -> PerformanceMetrics {
    let config = AnalyticsConfig {
        starting_balance,
        ..AnalyticsConfig::default()
    };
    calculate_metrics_with(trades, &config)
}

/// 설정값으로 성과 지표 계산
pub fn calculate_metrics_with(trades: &[TradeRecord], config: &AnalyticsConfig) -> PerformanceMetrics {
    let starting_balance = config.starting_balance;
    log_analysis_start("performance_metrics", trades.len());

    if trades.is_empty() {
        return PerformanceMetrics::empty(starting_balance);
    }

    let pnl = PnlBreakdown::from_trades(trades);
    let drawdown = analyze_drawdown(trades, starting_balance);
    let (current_streak, longest_streak) = a_plus_streaks(trades);
    let (max_consecutive_wins, max_consecutive_losses) = consecutive_outcomes(trades);
    let a_plus_count = trades.iter().filter(|t| t.is_a_plus()).count();

    let metrics = PerformanceMetrics {
        total_trades: trades.len(),
        priced_trades: pnl.priced_trades,
        winning_trades: pnl.winning_trades,
        losing_trades: pnl.losing_trades,
        breakeven_trades: pnl.breakeven_trades,
        win_rate: pnl.win_rate(),
        loss_rate: pnl.loss_rate(),
        total_pnl: pnl.total_pnl,
        average_win: pnl.average_win(),
        average_loss: pnl.average_loss(),
        largest_win: pnl.largest_win,
        largest_loss: pnl.largest_loss,
        profit_factor: pnl.profit_factor(),
        expectancy: pnl.expectancy(),
        average_risk_reward: average_risk_reward(trades),
        starting_balance,
        final_balance: starting_balance + pnl.total_pnl,
        return_percent: safe_div(pnl.total_pnl, starting_balance) * 100.0,
        max_drawdown: drawdown.max_drawdown,
        max_drawdown_percent: drawdown.max_drawdown_percent,
        current_drawdown: drawdown.current_drawdown,
        sharpe_ratio: sharpe_ratio(trades, starting_balance, config.annual_risk_free_rate),
        calmar_ratio: calmar_ratio(pnl.total_pnl, starting_balance, drawdown.max_drawdown_percent),
        a_plus_count,
        a_plus_rate: percentage(a_plus_count, trades.len()),
        average_score: average_score(trades),
        current_streak,
        longest_streak,
        max_consecutive_wins,
        max_consecutive_losses,
        risk_discipline_score: risk_discipline_score(trades),
    };

    log_analysis_end(
        "performance_metrics",
        trades.len(),
        &format!("win_rate={:.2}, total_pnl={:.2}", metrics.win_rate, metrics.total_pnl),
    );

    metrics
}
