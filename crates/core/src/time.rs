use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{AppError, AppResult};

/// Parses a client supplied timestamp.
///
/// Accepts RFC 3339 (`2025-03-01T09:30:00Z`), a naive date-time
/// (`2025-03-01T09:30:00`, read as UTC) or a bare date (`2025-03-01`, read as
/// midnight UTC). `message` is reported when nothing matches.
pub fn parse_timestamp(value: &str, message: &str) -> AppResult<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(parsed.and_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| AppError::Validation(message.to_owned()))
}
