use chrono::{TimeZone, Utc};

/// `YYYY-MM-DD` of a unix timestamp, in UTC.
pub fn timestamp_to_date(timestamp: i64) -> Option<String> {
  Utc
    .timestamp_opt(timestamp, 0)
    .single()
    .map(|time| time.format("%Y-%m-%d").to_string())
}

/// `.../games/2023/11` -> `2023-11`
pub fn archive_name(archive_url: &str) -> String {
  let mut parts = archive_url.trim_end_matches('/').rsplit('/');
  match (parts.next(), parts.next()) {
    (Some(month), Some(year)) => format!("{year}-{month}"),
    _ => archive_url.to_string(),
  }
}
