//! Candidate cleanup and acceptance rules shared by both cascades.

use chrono::NaiveDate;

use super::patterns::{
    DAY_MONTH_YEAR, ISO_DATE, MONTH_DAY_YEAR, ORDINAL_SUFFIX, SLASH_DATE, TRAILING_BRACKET,
    TRAILING_CASE_NUMBER, WHITESPACE,
};
use crate::models::SENTINEL;
use crate::render::decode_entities;

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Clean a title candidate and decide whether to accept it.
///
/// Titles must be strictly longer than `min_length` characters and must not
/// be the scanned-image sentinel.
pub fn accept_title(candidate: &str, min_length: usize) -> Option<String> {
    let title = collapse_whitespace(candidate);
    let title = TRAILING_BRACKET.replace(&title, "");
    let title = TRAILING_CASE_NUMBER.replace(&title, "");
    let title = collapse_whitespace(&decode_entities(&title));

    if title.chars().count() <= min_length || title.eq_ignore_ascii_case(SENTINEL) {
        return None;
    }
    Some(title)
}

/// Normalize a date candidate to a calendar date.
///
/// Written dates are tried day-first then month-first; slash dates are read
/// as day/month/year, and only when that is not a real date as
/// month/day/year.
pub fn parse_date(candidate: &str) -> Option<NaiveDate> {
    let candidate = candidate.trim();

    if let Some(m) = DAY_MONTH_YEAR.find(candidate) {
        if let Some(date) = parse_written(m.as_str(), "%d %B %Y") {
            return Some(date);
        }
    }

    if let Some(m) = MONTH_DAY_YEAR.find(candidate) {
        if let Some(date) = parse_written(m.as_str(), "%B %d %Y") {
            return Some(date);
        }
    }

    if let Some(caps) = SLASH_DATE.captures(candidate) {
        let a: u32 = caps["a"].parse().ok()?;
        let b: u32 = caps["b"].parse().ok()?;
        let year: i32 = caps["year"].parse().ok()?;
        if let Some(date) =
            NaiveDate::from_ymd_opt(year, b, a).or_else(|| NaiveDate::from_ymd_opt(year, a, b))
        {
            return Some(date);
        }
    }

    if let Some(caps) = ISO_DATE.captures(candidate) {
        let year: i32 = caps["year"].parse().ok()?;
        let month: u32 = caps["month"].parse().ok()?;
        let day: u32 = caps["day"].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

/// Normalize a date candidate to `YYYY-MM-DD`.
///
/// With `keep_unparsed`, a candidate of at least ten characters that no
/// format accepts is returned as written instead of being dropped.
pub fn accept_date(candidate: &str, keep_unparsed: bool) -> Option<String> {
    match parse_date(candidate) {
        Some(date) => Some(date.format("%Y-%m-%d").to_string()),
        None if keep_unparsed => {
            let raw = collapse_whitespace(candidate);
            (raw.chars().count() >= 10).then_some(raw)
        }
        None => None,
    }
}

/// "26TH  MARCH, 2004" -> "26 March 2004", then parse with `format`.
fn parse_written(text: &str, format: &str) -> Option<NaiveDate> {
    let text = ORDINAL_SUFFIX.replace_all(text, "$n").replace(',', "");
    let text = text
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");
    NaiveDate::parse_from_str(&text, format).ok()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_accept_title_strips_suffixes() {
        assert_eq!(
            accept_title("JOHN  DOE v. JANE ROE [2020]", 10).as_deref(),
            Some("JOHN DOE v. JANE ROE")
        );
        assert_eq!(
            accept_title("KOFI ANSAH v. AMA SERWAA H1/23/2004 (unreported)", 10).as_deref(),
            Some("KOFI ANSAH v. AMA SERWAA")
        );
        assert_eq!(
            accept_title("ADU &amp; ORS v. BOATENG", 10).as_deref(),
            Some("ADU & ORS v. BOATENG")
        );
    }

    #[test]
    fn test_accept_title_rejects_short_and_sentinel() {
        assert_eq!(accept_title("A v. B", 10), None);
        assert_eq!(accept_title("0123456789", 10), None);
        assert_eq!(accept_title("PAGES.GIF", 10), None);
        assert_eq!(accept_title("pages.gif", 0), None);
        assert!(accept_title("01234567890", 10).is_some());
    }

    #[test]
    fn test_parse_written_dates() {
        assert_eq!(parse_date("26th March, 2004"), ymd(2004, 3, 26));
        assert_eq!(parse_date("15TH NOVEMBER, 2006"), ymd(2006, 11, 15));
        assert_eq!(parse_date("1 May 1998"), ymd(1998, 5, 1));
        assert_eq!(parse_date("March 26th, 2004"), ymd(2004, 3, 26));
    }

    #[test]
    fn test_parse_slash_dates() {
        assert_eq!(parse_date("03/04/2004"), ymd(2004, 4, 3));
        assert_eq!(parse_date("13/04/2004"), ymd(2004, 4, 13));
        assert_eq!(parse_date("04/13/2004"), ymd(2004, 4, 13));
        assert_eq!(parse_date("31/31/2004"), None);
    }

    #[test]
    fn test_parse_iso() {
        assert_eq!(parse_date("2004-03-26"), ymd(2004, 3, 26));
    }

    #[test]
    fn test_invalid_written_date() {
        assert_eq!(parse_date("31st February, 2004"), None);
        assert_eq!(accept_date("31st February, 2004", false), None);
        assert_eq!(
            accept_date("31st February, 2004", true).as_deref(),
            Some("31st February, 2004")
        );
    }

    #[test]
    fn test_accept_date_formats() {
        assert_eq!(accept_date("26th March, 2004", false).as_deref(), Some("2004-03-26"));
        assert_eq!(accept_date("9/1/1999", false).as_deref(), Some("1999-01-09"));
    }
}
