use chrono::NaiveDate;

/// Accepted cell date formats, tried in order; the first that parses wins.
/// ISO first, then common regional orders, then two long-form month-name
/// shapes. `%B` parses English month names regardless of system locale.
pub const INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y-%d-%m",
    "%d-%m-%Y",
    "%m-%d-%Y",
    "%Y/%m/%d",
    "%Y/%d/%m",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%d %B, %Y",
];

/// Storage format for the rate table and all derived output.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Parse a cell against the accepted formats in order.
pub fn parse_flexible(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

pub fn to_canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flexible_iso() {
        assert_eq!(
            parse_flexible("2020-01-15"),
            NaiveDate::from_ymd_opt(2020, 1, 15)
        );
    }

    #[test]
    fn test_parse_flexible_slash_orders() {
        assert_eq!(
            parse_flexible("2020/01/15"),
            NaiveDate::from_ymd_opt(2020, 1, 15)
        );
        // Day > 12 forces the dd/MM reading.
        assert_eq!(
            parse_flexible("25/01/2020"),
            NaiveDate::from_ymd_opt(2020, 1, 25)
        );
    }

    #[test]
    fn test_parse_flexible_first_format_wins() {
        // 03-04 is ambiguous; dd-MM-yyyy comes before MM-dd-yyyy in the list.
        assert_eq!(
            parse_flexible("03-04-2020"),
            NaiveDate::from_ymd_opt(2020, 4, 3)
        );
    }

    #[test]
    fn test_parse_flexible_month_names() {
        assert_eq!(
            parse_flexible("January 15, 2020"),
            NaiveDate::from_ymd_opt(2020, 1, 15)
        );
        assert_eq!(
            parse_flexible("15 January, 2020"),
            NaiveDate::from_ymd_opt(2020, 1, 15)
        );
    }

    #[test]
    fn test_parse_flexible_rejects_garbage() {
        assert_eq!(parse_flexible("not a date"), None);
        assert_eq!(parse_flexible("2020-13-45"), None);
        assert_eq!(parse_flexible(""), None);
    }

    #[test]
    fn test_to_canonical() {
        let d = NaiveDate::from_ymd_opt(2020, 1, 5).unwrap();
        assert_eq!(to_canonical(d), "2020-01-05");
    }
}
