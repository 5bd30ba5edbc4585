use chrono::{DateTime, Utc};

const UTC_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Formats `at` as `YYYY-MM-DD HH:MM:SS UTC`.
pub fn format_utc_timestamp(at: DateTime<Utc>) -> String {
    at.format(UTC_TIMESTAMP_FORMAT).to_string()
}

/// Returns the current wall-clock time formatted by [`format_utc_timestamp`].
pub fn utc_timestamp_now() -> String {
    format_utc_timestamp(Utc::now())
}
