use chrono::{DateTime, NaiveDate};
use langfuse_types::{Error, Result};

/// Normalize a user-supplied time filter to RFC 3339.
///
/// Accepts a full RFC 3339 timestamp (passed through unchanged) or a bare
/// `YYYY-MM-DD` date, which becomes midnight UTC of that day.
pub fn parse_timestamp(raw: &str) -> Result<String> {
    if DateTime::parse_from_rfc3339(raw).is_ok() {
        return Ok(raw.to_string());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(format!("{}T00:00:00Z", date.format("%Y-%m-%d")));
    }
    Err(Error::InvalidInput(format!(
        "invalid timestamp '{}': expected RFC 3339 or YYYY-MM-DD",
        raw
    )))
}

/// Normalize an optional flag, surfacing parse failures.
pub fn parse_timestamp_opt(raw: &Option<String>) -> Result<Option<String>> {
    raw.as_deref().map(parse_timestamp).transpose()
}
