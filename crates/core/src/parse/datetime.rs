use super::ParseError;
use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a timestamp as either RFC 3339 or the `ctime`-style format PBS
/// uses for `ctime`/`mtime`/`qtime`/`stime` fields (`"Mon Jan  2 15:04:05
/// 2006"`): ISO-8601 is tried first, falling back to the `ctime` layout.
///
/// The `ctime`-style branch carries no timezone; it is interpreted as UTC
/// since the scheduler host's local zone is not reliably known to the
/// tracking process.
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, ParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%a %b %e %H:%M:%S %Y") {
        return Ok(naive.and_utc());
    }

    Err(ParseError::Datetime(value.to_string()))
}
