use crate::utils::error::{ContentError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Display format used by the site (fr-FR short date).
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Formats a CMS date field for display.
///
/// Contentful stores dates as `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM` or with an
/// offset (`YYYY-MM-DDTHH:MM+01:00`, full RFC 3339). The calendar day is taken
/// as written, without shifting between time zones.
pub fn format_display_date(raw: &str, format: &str) -> Result<String> {
    let raw = raw.trim();

    let date = if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        dt.date_naive()
    } else if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z") {
        dt.date_naive()
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        dt.date()
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        dt.date()
    } else {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ContentError::InvalidDate {
            value: raw.to_string(),
        })?
    };

    Ok(date.format(format).to_string())
}

/// `None` stays `None`; present values must parse.
pub fn format_optional_date(raw: Option<&str>, format: &str) -> Result<Option<String>> {
    raw.map(|value| format_display_date(value, format)).transpose()
}
