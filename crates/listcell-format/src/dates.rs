use chrono::{DateTime, NaiveDate, NaiveDateTime};

const INVARIANT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Derive a moment-style date format from the server's rendering of 6 April 1999.
///
/// `4/6/1999` → `M/D/YYYY`, `06.04.1999` → `DD.MM.YYYY`, `1999-04-06` → `YYYY-MM-DD`.
pub fn derive_web_date_format(sample: &str) -> String {
    let format = sample
        .replace('9', "Y")
        .replacen('1', "Y", 1)
        .replacen("04", "MM", 1)
        .replacen('4', "M", 1);
    format
        .chars()
        .map(|c| if c.is_ascii_digit() { 'D' } else { c })
        .collect()
}

#[derive(Clone, Copy, PartialEq)]
enum Direction {
    Format,
    Parse,
}

/// Translate moment tokens (`YYYY`, `YY`, `MM`, `M`, `DD`, `D`) into a chrono pattern
fn to_chrono_pattern(moment: &str, direction: Direction) -> String {
    let mut out = String::with_capacity(moment.len() * 2);
    let mut rest = moment;
    while !rest.is_empty() {
        let (token, len) = if rest.starts_with("YYYY") {
            ("%Y", 4)
        } else if rest.starts_with("YY") {
            ("%y", 2)
        } else if rest.starts_with("MM") {
            ("%m", 2)
        } else if rest.starts_with('M') {
            (if direction == Direction::Format { "%-m" } else { "%m" }, 1)
        } else if rest.starts_with("DD") {
            ("%d", 2)
        } else if rest.starts_with('D') {
            (if direction == Direction::Format { "%-d" } else { "%d" }, 1)
        } else if rest.starts_with('%') {
            ("%%", 1)
        } else {
            let c = rest.chars().next().unwrap_or_default();
            out.push(c);
            rest = &rest[c.len_utf8()..];
            continue;
        };
        out.push_str(token);
        rest = &rest[len..];
    }
    out
}

/// Format a date with the web date format
pub fn format_date(date: NaiveDate, web_date_format: &str) -> String {
    date.format(&to_chrono_pattern(web_date_format, Direction::Format))
        .to_string()
}

/// Parse a date written in the web date format
pub fn parse_date(value: &str, web_date_format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(
        value.trim(),
        &to_chrono_pattern(web_date_format, Direction::Parse),
    )
    .ok()
}

/// Re-format a web-format date string as `MM/DD/YYYY`; `None` if it does not parse
pub fn deformat_date(value: &str, web_date_format: &str) -> Option<String> {
    parse_date(value, web_date_format).map(|d| d.format(INVARIANT_DATE_FORMAT).to_string())
}

/// Loose validity check for date strings coming from the host
pub fn is_valid_date(value: &str) -> bool {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(value, INVARIANT_DATE_FORMAT).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_us_format() {
        assert_eq!(derive_web_date_format("4/6/1999"), "M/D/YYYY");
    }

    #[test]
    fn test_derive_european_format() {
        assert_eq!(derive_web_date_format("06.04.1999"), "DD.MM.YYYY");
    }

    #[test]
    fn test_derive_iso_format() {
        assert_eq!(derive_web_date_format("1999-04-06"), "YYYY-MM-DD");
    }

    #[test]
    fn test_format_date() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(d, "MM/DD/YYYY"), "03/05/2024");
        assert_eq!(format_date(d, "D.M.YYYY"), "5.3.2024");
        assert_eq!(format_date(d, "YYYY-MM-DD"), "2024-03-05");
    }

    #[test]
    fn test_parse_and_deformat() {
        assert_eq!(
            parse_date("05.03.2024", "DD.MM.YYYY"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(deformat_date("5.3.2024", "D.M.YYYY").as_deref(), Some("03/05/2024"));
        assert_eq!(deformat_date("not a date", "D.M.YYYY"), None);
    }

    #[test]
    fn test_is_valid_date() {
        assert!(is_valid_date("2024-03-05T10:00:00Z"));
        assert!(is_valid_date("03/05/2024"));
        assert!(!is_valid_date("yesterday"));
    }
}
