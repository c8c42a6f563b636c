use chrono::NaiveDate;

/// The format the page renders trade dates in, e.g. `12 Aug 25`.
const TRADE_DATE_FORMAT: &str = "%d %b %y";

/// Renderings seen in exports and older snapshots of the page, tried
/// only after the strict format fails.
const FALLBACK_FORMATS: &[&str] = &[
    "%d %b %Y",
    "%d %B %Y",
    "%d %B %y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
];

/// Parse a trade-date cell: strict `day month-abbrev 2-digit-year` first,
/// then the permissive fallback list. `None` if every format fails.
pub fn parse_trade_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, TRADE_DATE_FORMAT) {
        return Some(date);
    }
    FALLBACK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn strict_format_parses() {
        assert_eq!(parse_trade_date("12 Aug 25"), Some(ymd(2025, 8, 12)));
        assert_eq!(parse_trade_date(" 1 Jan 24 "), Some(ymd(2024, 1, 1)));
    }

    #[test]
    fn fallback_formats_parse() {
        assert_eq!(parse_trade_date("12 Aug 2025"), Some(ymd(2025, 8, 12)));
        assert_eq!(parse_trade_date("12 August 2025"), Some(ymd(2025, 8, 12)));
        assert_eq!(parse_trade_date("2025-08-12"), Some(ymd(2025, 8, 12)));
        assert_eq!(parse_trade_date("2025/08/12"), Some(ymd(2025, 8, 12)));
        assert_eq!(parse_trade_date("12/08/2025"), Some(ymd(2025, 8, 12)));
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_trade_date(""), None);
        assert_eq!(parse_trade_date("--"), None);
        assert_eq!(parse_trade_date("yesterday"), None);
        assert_eq!(parse_trade_date("31 Feb 25"), None);
    }
}
