//! Date and path rendering shared by the entry model and operations.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::path::Path;

/// Deletion date format used by trash info metadata.
pub const TRASHINFO_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Returns a user-safe, trimmed path string that can be used in logs and messages.
pub fn sanitize_user_path(path: &Path) -> String {
    path.display().to_string().trim().to_string()
}

/// Parses a trash info deletion date into a UTC datetime.
///
/// The trash info format has no zone designator; values are taken as UTC.
/// RFC 3339 strings are accepted as a fallback.
pub fn parse_trash_datetime(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), TRASHINFO_TIME_FORMAT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
        .or_else(|| DateTime::parse_from_rfc3339(value.trim()).ok().map(|dt| dt.with_timezone(&Utc)))
}

/// Renders a deletion date in trash info format.
pub fn format_trash_datetime(time: &DateTime<Utc>) -> String {
    time.format(TRASHINFO_TIME_FORMAT).to_string()
}
