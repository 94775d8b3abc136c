//! Date helper functions

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Parse a date string in the formats content editors actually use
pub fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
        // Try parsing date only
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
    }

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}

/// Format a date in long form (like "March 5, 2024")
pub fn full_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format(format).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date_string() {
        let dt = parse_date_string("2024-03-05").unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-03-05");

        let dt = parse_date_string("2024/03/05 10:30:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-03-05 10:30");
    }

    #[test]
    fn test_parse_rfc3339() {
        assert!(parse_date_string("2024-03-05T10:30:00+02:00").is_some());
    }

    #[test]
    fn test_parse_invalid_date() {
        assert!(parse_date_string("next tuesday").is_none());
        assert!(parse_date_string("").is_none());
    }

    #[test]
    fn test_full_date() {
        let date = Local.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(full_date(&date, "%B %-d, %Y"), "March 5, 2024");
    }
}
