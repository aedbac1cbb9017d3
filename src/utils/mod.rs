//! 시간/숫자 유틸리티
//!
//! 타임스탬프 변환과 API 쿼리용 숫자 포맷팅 제공

pub mod logging;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// 타임스탬프(밀리초)를 DateTime<Utc>로 변환
pub fn timestamp_to_datetime(timestamp_ms: i64) -> DateTime<Utc> {
  let secs = timestamp_ms / 1000;
  let nsecs = ((timestamp_ms % 1000) * 1_000_000) as u32;
  let naive = NaiveDateTime::from_timestamp_opt(secs, nsecs).unwrap_or_default();
  Utc.from_utc_datetime(&naive)
}

/// DateTime<Utc>를 타임스탬프(밀리초)로 변환
pub fn datetime_to_timestamp(dt: DateTime<Utc>) -> i64 {
  dt.timestamp() * 1000 + dt.timestamp_subsec_millis() as i64
}

/// 현재 시간을 타임스탬프(밀리초)로 반환
pub fn current_timestamp_ms() -> i64 {
  datetime_to_timestamp(Utc::now())
}

/// 타임스탬프(밀리초)를 포맷팅된 문자열로 변환
pub fn format_timestamp(timestamp_ms: i64, format: &str) -> String {
  let dt = timestamp_to_datetime(timestamp_ms);
  dt.format(format).to_string()
}

/// 수량/가격을 쿼리 문자열용으로 포맷팅 (소수점 8자리, 뒤쪽 0 제거)
pub fn fmt_decimal(value: f64) -> String {
  let formatted = format!("{:.8}", value);
  let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
  trimmed.to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_timestamp_conversion() {
    let now = Utc::now();
    let ts = datetime_to_timestamp(now);
    let dt = timestamp_to_datetime(ts);

    // 밀리초 변환으로 인한 약간의 손실 허용 (1초 이내)
    let diff = (now - dt).num_milliseconds().abs();
    assert!(diff < 1000);
  }

  #[test]
  fn test_fmt_decimal() {
    assert_eq!(fmt_decimal(2.0), "2");
    assert_eq!(fmt_decimal(0.5), "0.5");
    assert_eq!(fmt_decimal(0.010), "0.01");
    assert_eq!(fmt_decimal(95.00000000000001), "95");
    assert_eq!(fmt_decimal(50000.0), "50000");
  }
}
