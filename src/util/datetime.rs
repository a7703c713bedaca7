use chrono::{DateTime, NaiveDate, Utc};

/// Parses a W3C datetime as used in `lastmod` and `rs:md` timestamps.
///
/// Accepts full RFC 3339 values and bare dates (`YYYY-MM-DD`, read as midnight
/// UTC). Surrounding whitespace is ignored; anything else yields `None`.
pub fn parse_w3c_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_rfc3339() {
        let dt = parse_w3c_datetime("2013-01-02T12:00:00Z").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2013, 1, 2, 12));
    }

    #[test]
    fn test_offset_is_normalised_to_utc() {
        let dt = parse_w3c_datetime("2013-01-02T12:00:00+02:00").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_date_only() {
        let dt = parse_w3c_datetime(" 2024-01-15 ").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2024, 1, 15, 0));
    }

    #[test]
    fn test_garbage_and_empty() {
        assert!(parse_w3c_datetime("").is_none());
        assert!(parse_w3c_datetime("yesterday").is_none());
    }
}
