use once_cell::sync::Lazy;
use regex::Regex;

/// Token the source renders for "no value".
pub const PLACEHOLDER: &str = "--";

static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.]").expect("non-numeric regex"));

/// Trim a cell and collapse empty or placeholder values to `None`.
/// Applied uniformly before any typed parsing.
pub fn scrub(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == PLACEHOLDER {
        None
    } else {
        Some(trimmed)
    }
}

/// Parse a price or volume cell. Missing, placeholder and unparsable
/// values all come back as `None`; this never errors.
///
/// Strips everything that is not a digit or a dot before parsing, which
/// removes thousands separators and currency signs. Known limitation: a
/// leading minus is stripped too, so a negative cell parses as its
/// absolute value.
pub fn numeric_clean(raw: &str) -> Option<f64> {
    let s = scrub(raw)?;
    if s == "-" {
        return None;
    }
    let digits = NON_NUMERIC.replace_all(s, "");
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok()
}

/// Reduce a rendered company cell to the leading short code. The page
/// suffixes the code with a ticker annotation like `[BLS]` or a plain
/// name; only the prefix before the first whitespace or bracket is the
/// identifier of record. Empty values and the literal missing renderings
/// come back as `None`.
pub fn company_code(raw: &str) -> Option<String> {
    let s = scrub(raw)?;
    let head = s
        .split(|c: char| c.is_whitespace() || c == '[')
        .next()
        .unwrap_or("");
    match head {
        "" | "nan" | "None" => None,
        code => Some(code.to_string()),
    }
}
