//! 시간 관련 유틸리티
//!
//! 타임스탬프 파싱, 변환, 날짜 계산 함수 제공

pub mod logging;
pub mod math;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::AnalyticsError;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M",
];

/// 저널 타임스탬프 문자열을 DateTime<Utc>로 파싱
///
/// RFC 3339, 오프셋 없는 날짜+시간(UTC로 간주), 날짜만(자정) 순서로 시도한다.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, AnalyticsError> {
  let trimmed = value.trim();

  if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
    return Ok(dt.with_timezone(&Utc));
  }

  for format in NAIVE_DATETIME_FORMATS {
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
      return Ok(Utc.from_utc_datetime(&naive));
    }
  }

  if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
    if let Some(naive) = date.and_hms_opt(0, 0, 0) {
      return Ok(Utc.from_utc_datetime(&naive));
    }
  }

  Err(AnalyticsError::InvalidTimestamp(value.to_string()))
}

/// 타임스탬프(밀리초)를 DateTime<Utc>로 변환
pub fn timestamp_to_datetime(timestamp_ms: i64) -> Option<DateTime<Utc>> {
  Utc.timestamp_millis_opt(timestamp_ms).single()
}

/// 해당 월의 일 수
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
  let first = NaiveDate::from_ymd_opt(year, month, 1)?;
  let next = if month == 12 {
    NaiveDate::from_ymd_opt(year + 1, 1, 1)?
  } else {
    NaiveDate::from_ymd_opt(year, month + 1, 1)?
  };
  Some(next.signed_duration_since(first).num_days() as u32)
}

/// 해당 주의 월요일 (ISO 주 기준)
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
  date - chrono::Duration::days(date.weekday().num_days_from_monday() as i64)
}
