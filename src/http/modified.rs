//! Last-Modified handling
//!
//! Formats file modification times as IMF-fixdate and evaluates
//! `If-Modified-Since`.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::time::SystemTime;

const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a timestamp as an HTTP date, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(IMF_FIXDATE).to_string()
}

/// Parse an HTTP date, `None` for anything that is not IMF-fixdate or RFC 2822
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, IMF_FIXDATE)
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc2822(value).map(|dt| dt.with_timezone(&Utc)))
        .ok()
}

/// Whether the client copy is still fresh
///
/// The modification time is truncated to whole seconds since HTTP dates
/// carry no sub-second precision.
pub fn is_not_modified(if_modified_since: Option<&str>, modified: SystemTime) -> bool {
    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };
    DateTime::<Utc>::from(modified).timestamp() <= since.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // 1994-11-06T08:49:37Z
    fn rfc_example() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777)
    }

    #[test]
    fn test_format_http_date() {
        assert_eq!(format_http_date(rfc_example()), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_parse_http_date() {
        let parsed = parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT").unwrap();
        assert_eq!(parsed.timestamp(), 784_111_777);
        assert!(parse_http_date("yesterday").is_none());
        assert!(parse_http_date("").is_none());
    }

    #[test]
    fn test_not_modified() {
        let mtime = rfc_example() + Duration::from_millis(400);
        assert!(is_not_modified(Some("Sun, 06 Nov 1994 08:49:37 GMT"), mtime));
        assert!(is_not_modified(Some("Mon, 07 Nov 1994 00:00:00 GMT"), mtime));
        assert!(!is_not_modified(Some("Sun, 06 Nov 1994 08:49:36 GMT"), mtime));
    }

    #[test]
    fn test_unparseable_header_is_modified() {
        assert!(!is_not_modified(Some("garbage"), rfc_example()));
        assert!(!is_not_modified(None, rfc_example()));
    }
}
