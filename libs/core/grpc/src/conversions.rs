//! Conversions between wire timestamps and `chrono`.
//!
//! Timestamps travel as signed 64-bit Unix seconds.

use chrono::{DateTime, Utc};

/// Convert a `DateTime<Utc>` to Unix seconds.
pub fn datetime_to_timestamp(dt: DateTime<Utc>) -> i64 {
  dt.timestamp()
}

/// Convert Unix seconds to a `DateTime<Utc>`.
///
/// Values outside chrono's representable range are rejected rather than
/// silently clamped.
pub fn timestamp_to_datetime(secs: i64) -> Result<DateTime<Utc>, String> {
  DateTime::from_timestamp(secs, 0).ok_or_else(|| format!("timestamp {} is out of range", secs))
}
