/**
* filename : analytics_tests
* author : HAMA
* date: 2025. 6. 6.
* description:
**/

use chrono::{Duration, TimeZone, Utc};
use journal_analytics::analytics::{
  analyze_drawdown, build_equity_curve, calculate_metrics, consistency_report, filter_window, TimeWindow,
};
use journal_analytics::analytics::ratios::annualize_sharpe;
use journal_analytics::models::trade::{parse_trades_json, TradeOutcome, TradeRecord, Verdict};
use rstest::rstest;

fn trade(minutes: i64, verdict: Verdict) -> TradeRecord {
  let ts = Utc.with_ymd_and_hms(2024, 5, 6, 8, 0, 0).unwrap() + Duration::minutes(minutes);
  TradeRecord::new(ts.timestamp_millis(), "NY Open", 9, 10, verdict, ts)
}

fn scenario_trades() -> Vec<TradeRecord> {
  vec![
    trade(0, Verdict::APlus).with_pnl(100.0).with_outcome(TradeOutcome::Win),
    trade(30, Verdict::APlus).with_pnl(-50.0).with_outcome(TradeOutcome::Loss),
    trade(60, Verdict::APlus).with_pnl(200.0).with_outcome(TradeOutcome::Win),
  ]
}

#[test]
fn test_three_trade_scenario() {
  let metrics = calculate_metrics(&scenario_trades(), 10_000.0);

  assert_eq!(metrics.final_balance, 10_250.0);
  assert!((metrics.win_rate - 66.67).abs() < 0.01);
  assert_eq!(metrics.profit_factor, 6.0);
  assert_eq!(metrics.max_drawdown, 50.0);
  // 고점 10100 대비 50 하락
  assert!((metrics.max_drawdown_percent - 50.0 / 10_100.0 * 100.0).abs() < 1e-9);
  assert_eq!(metrics.current_drawdown, 0.0);
  assert_eq!(metrics.largest_win, 200.0);
  assert_eq!(metrics.largest_loss, -50.0);
  assert_eq!(metrics.average_win, 150.0);
  assert_eq!(metrics.average_loss, 50.0);
  assert!((metrics.expectancy - 250.0 / 3.0).abs() < 1e-9);
  assert!((metrics.return_percent - 2.5).abs() < 1e-9);
  assert!(metrics.calmar_ratio > 0.0);
  assert!(metrics.sharpe_ratio > 0.0);
}

#[test]
fn test_empty_input_is_neutral() {
  let metrics = calculate_metrics(&[], 10_000.0);

  assert_eq!(metrics.total_trades, 0);
  assert_eq!(metrics.priced_trades, 0);
  assert_eq!(metrics.win_rate, 0.0);
  assert_eq!(metrics.total_pnl, 0.0);
  assert_eq!(metrics.profit_factor, 0.0);
  assert_eq!(metrics.max_drawdown, 0.0);
  assert_eq!(metrics.sharpe_ratio, 0.0);
  assert_eq!(metrics.calmar_ratio, 0.0);
  assert_eq!(metrics.current_streak, 0);
  assert!(build_equity_curve(&[], 10_000.0).is_empty());
}

#[test]
fn test_unpriced_trade_counts_only_in_checklist_aggregates() {
  let mut trades = scenario_trades();
  trades.push(trade(90, Verdict::NotAPlus));

  let metrics = calculate_metrics(&trades, 10_000.0);
  assert_eq!(metrics.total_trades, 4);
  assert_eq!(metrics.priced_trades, 3);
  assert_eq!(metrics.winning_trades, 2);
  assert_eq!(metrics.losing_trades, 1);
  assert_eq!(metrics.total_pnl, 250.0);
  assert_eq!(metrics.a_plus_rate, 75.0);
  assert_eq!(metrics.current_streak, 0);
  assert_eq!(metrics.longest_streak, 3);
}

#[test]
fn test_streak_scenario() {
  let trades = vec![
    trade(0, Verdict::APlus),
    trade(1, Verdict::APlus),
    trade(2, Verdict::NotAPlus),
    trade(3, Verdict::APlus),
  ];
  let report = consistency_report(&trades);
  assert_eq!(report.longest_streak, 2);
  assert_eq!(report.current_streak, 1);
}

#[test]
fn test_determinism_and_non_mutation() {
  let mut trades = scenario_trades();
  trades.reverse();
  trades.push(trade(15, Verdict::NotAPlus).with_risk(120.0).with_risk_reward(2.0));
  let snapshot = trades.clone();

  let first = calculate_metrics(&trades, 10_000.0);
  let second = calculate_metrics(&trades, 10_000.0);

  assert_eq!(first, second);
  assert_eq!(first.sharpe_ratio.to_bits(), second.sharpe_ratio.to_bits());
  assert_eq!(trades, snapshot);
  assert_eq!(build_equity_curve(&trades, 10_000.0), build_equity_curve(&trades, 10_000.0));
}

#[test]
fn test_input_order_does_not_matter() {
  let ordered = scenario_trades();
  let mut shuffled = ordered.clone();
  shuffled.swap(0, 2);

  assert_eq!(calculate_metrics(&ordered, 10_000.0), calculate_metrics(&shuffled, 10_000.0));
  assert_eq!(analyze_drawdown(&ordered, 10_000.0), analyze_drawdown(&shuffled, 10_000.0));
}

#[rstest]
#[case(vec![120.0, 80.0], 10.0)]
#[case(vec![-30.0, -10.0, 5.0], 0.0)]
#[case(vec![0.0, 0.0, 50.0], 0.0)]
fn test_equity_curve_invariants(#[case] pnls: Vec<f64>, #[case] start_offset: f64) {
  let trades: Vec<TradeRecord> = pnls
    .iter()
    .enumerate()
    .map(|(i, pnl)| trade(i as i64, Verdict::APlus).with_pnl(*pnl))
    .collect();
  let curve = build_equity_curve(&trades, 1_000.0 + start_offset);

  assert_eq!(curve.len(), pnls.len() + 1);
  for (i, point) in curve.iter().enumerate() {
    assert_eq!(point.trade_number, i);
    assert!(point.drawdown >= 0.0);
    assert!(point.balance <= point.peak);
  }
  for pair in curve.windows(2) {
    assert!(pair[1].peak >= pair[0].peak);
  }
}

#[test]
fn test_windowed_consistency() {
  let now = Utc.with_ymd_and_hms(2024, 5, 8, 12, 0, 0).unwrap();
  let mut trades = scenario_trades();
  trades.push(trade(-60 * 24 * 10, Verdict::NotAPlus));

  let week = filter_window(&trades, TimeWindow::ThisWeek, now);
  assert_eq!(consistency_report(&week).a_plus_rate, 100.0);
  assert_eq!(consistency_report(&trades).a_plus_rate, 75.0);
}

#[test]
fn test_parse_journal_json() {
  let json = r#"[
    {"id": 1714982400000, "strategyName": "NY Open", "score": 9, "possible": 10,
     "verdict": "A+", "timestamp": "2024-05-06T08:00:00.000Z", "pnl": 100, "outcome": "win"},
    {"id": 1714984200000, "strategyName": "NY Open", "score": 4, "possible": 10,
     "verdict": "Not A+", "timestamp": "2024-05-06T08:30:00.000Z"}
  ]"#;
  let trades = parse_trades_json(json).unwrap();
  let metrics = calculate_metrics(&trades, 10_000.0);

  assert_eq!(metrics.total_trades, 2);
  assert_eq!(metrics.priced_trades, 1);
  assert!(metrics.profit_factor.is_infinite());
  assert!((metrics.average_score - 65.0).abs() < 1e-9);
  assert!(annualize_sharpe(metrics.sharpe_ratio).is_finite());
}
