//! Date arithmetic for attendance and leave records.
//!
//! Inputs are the strings the backend sends: RFC 3339 timestamps
//! (`2025-01-18T08:00:00.000000Z`), `YYYY-MM-DD HH:MM:SS`, or plain dates.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc, Weekday};

/// Parse a backend timestamp. Plain dates are taken at midnight UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
  let s = s.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.with_timezone(&Utc));
  }
  if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
    return Some(dt.and_utc());
  }
  parse_date(s).and_then(|d| d.and_hms_opt(0, 0, 0)).map(|dt| dt.and_utc())
}

/// Parse the date part of a backend date or timestamp.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
  let s = s.trim();
  let head = s.get(..10).unwrap_or(s);
  NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Human label for the span between two dates, counting 30-day months.
///
/// `"N/A"` when either side is missing or unparseable, `"Invalid dates"` when
/// the end precedes the start, and a same-day span counts as one day.
pub fn duration_label(start: Option<&str>, end: Option<&str>) -> String {
  let (Some(start), Some(end)) = (start.and_then(parse_timestamp), end.and_then(parse_timestamp)) else {
    return "N/A".to_string();
  };

  let days = (end - start).num_days();
  if days < 0 {
    return "Invalid dates".to_string();
  }
  if days <= 1 {
    return "1 day".to_string();
  }
  if days < 30 {
    return format!("{} days", days);
  }

  let months = days / 30;
  let rest = days % 30;
  match (months, rest) {
    (1, 0) => "1 month".to_string(),
    (1, d) => format!("1 month {} days", d),
    (m, 0) => format!("{} months", m),
    (m, d) => format!("{} months {} days", m, d),
  }
}

/// Worked time between check-in and check-out as `"{h}h {m}m"`.
pub fn working_hours(check_in: Option<&str>, check_out: Option<&str>) -> Option<String> {
  let start = parse_timestamp(check_in?)?;
  let end = parse_timestamp(check_out?)?;
  let minutes = (end - start).num_minutes();
  Some(format!("{}h {}m", minutes / 60, minutes % 60))
}

/// Weekdays (Monday to Friday) between two dates, both ends included.
pub fn working_days(start: NaiveDate, end: NaiveDate) -> u32 {
  if start > end {
    return 0;
  }
  start
    .iter_days()
    .take_while(|d| *d <= end)
    .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
    .count() as u32
}

/// Coarse relative age: "Just now", "N hours ago", "1 day ago", "N days ago".
pub fn time_ago(timestamp: &str, now: DateTime<Utc>) -> Option<String> {
  let then = parse_timestamp(timestamp)?;
  let elapsed = now - then;
  let hours = elapsed.num_hours();
  let days = hours / 24;

  Some(if elapsed < Duration::hours(1) {
    "Just now".to_string()
  } else if hours < 24 {
    format!("{} hours ago", hours)
  } else if days == 1 {
    "1 day ago".to_string()
  } else {
    format!("{} days ago", days)
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn test_duration_label() {
    assert_eq!(duration_label(None, Some("2025-01-01")), "N/A");
    assert_eq!(duration_label(Some("2025-01-10"), Some("2025-01-01")), "Invalid dates");
    assert_eq!(duration_label(Some("2025-01-01"), Some("2025-01-01")), "1 day");
    assert_eq!(duration_label(Some("2025-01-01"), Some("2025-01-02")), "1 day");
    assert_eq!(duration_label(Some("2025-01-01"), Some("2025-01-11")), "10 days");
    assert_eq!(duration_label(Some("2025-01-01"), Some("2025-01-31")), "1 month");
    assert_eq!(duration_label(Some("2025-01-01"), Some("2025-02-05")), "1 month 5 days");
    assert_eq!(duration_label(Some("2025-01-01"), Some("2025-03-02")), "2 months");
    assert_eq!(duration_label(Some("2025-01-01"), Some("2025-03-05")), "2 months 3 days");
  }

  #[test]
  fn test_working_hours() {
    assert_eq!(
      working_hours(Some("2025-01-18T08:00:00Z"), Some("2025-01-18T17:30:00Z")).as_deref(),
      Some("9h 30m")
    );
    assert_eq!(
      working_hours(Some("2025-01-18 08:15:00"), Some("2025-01-18 09:00:00")).as_deref(),
      Some("0h 45m")
    );
    assert_eq!(working_hours(Some("2025-01-18T08:00:00Z"), None), None);
  }

  #[test]
  fn test_working_days() {
    // Mon 2025-01-13 .. Sun 2025-01-19
    assert_eq!(working_days(date(2025, 1, 13), date(2025, 1, 19)), 5);
    assert_eq!(working_days(date(2025, 1, 18), date(2025, 1, 19)), 0);
    assert_eq!(working_days(date(2025, 1, 15), date(2025, 1, 15)), 1);
    assert_eq!(working_days(date(2025, 1, 20), date(2025, 1, 13)), 0);
  }

  #[test]
  fn test_time_ago() {
    let now = Utc.with_ymd_and_hms(2025, 1, 18, 12, 0, 0).unwrap();
    assert_eq!(time_ago("2025-01-18T11:30:00Z", now).as_deref(), Some("Just now"));
    assert_eq!(time_ago("2025-01-18T07:00:00Z", now).as_deref(), Some("5 hours ago"));
    assert_eq!(time_ago("2025-01-17T10:00:00Z", now).as_deref(), Some("1 day ago"));
    assert_eq!(time_ago("2025-01-10T12:00:00Z", now).as_deref(), Some("8 days ago"));
    assert_eq!(time_ago("garbage", now), None);
  }

  #[test]
  fn test_parse_microsecond_timestamps() {
    assert!(parse_timestamp("2025-01-18T08:00:00.000000Z").is_some());
    assert_eq!(parse_date("2025-01-18T08:00:00.000000Z"), Some(date(2025, 1, 18)));
  }
}
