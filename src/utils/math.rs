//! 수학 관련 유틸리티
//!
//! 통계 계산과 0 나누기 방지 함수 제공

use statrs::statistics::Statistics;

/// 값을 범위 내로 제한
pub fn clamp<T: PartialOrd>(value: T, min_value: T, max_value: T) -> T {
  if value < min_value {
    min_value
  } else if value > max_value {
    max_value
  } else {
    value
  }
}

/// 평균 계산
pub fn average(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    return None;
  }

  Some(values.iter().mean())
}

/// 모분산 계산
pub fn population_variance(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    return None;
  }

  Some(values.iter().population_variance())
}

/// 모표준편차 계산
pub fn standard_deviation(values: &[f64]) -> Option<f64> {
  population_variance(values).map(f64::sqrt)
}

/// 분모가 0이면 0.0 반환
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
  if denominator == 0.0 || !denominator.is_finite() {
    return 0.0;
  }

  let result = numerator / denominator;
  if result.is_finite() { result } else { 0.0 }
}

/// 백분율 계산 (count / total * 100), total이 0이면 0.0
pub fn percentage(count: usize, total: usize) -> f64 {
  if total == 0 {
    return 0.0;
  }

  count as f64 / total as f64 * 100.0
}
