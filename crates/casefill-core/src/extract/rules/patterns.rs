//! Common regex patterns for case title and judgment date extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// A party name: uppercase words, initials, numbers, and joiners, with the
/// "& ANO", "& ORS" and "ETC" tails that stand for further parties.
const PARTY: &str = r"[A-Z][A-Z\s&.,'\-\d()]+(?:\s+&(?:\s+ANO?\.?)?)?(?:\s+&(?:\s+ORS?\.?)?)?(?:\s+ETC\.?)?";

/// Separator between the parties.
const SEPARATOR: &str = r"(?i:versus|vrs\.?|vs\.?|v\.?)";

/// Inline formatting markup that may sit inside a title in raw HTML.
const INLINE_TAG: &str = r"</?(?i:b|i|u|s|em|strong|span|font|sup|sub|small|big|a|o:p)(?:\s[^>]*)?>";

/// Character reference in raw HTML.
const ENTITY: &str = r"&(?:[a-zA-Z]+|#\d+);";

const MONTHS: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

fn raw_party() -> String {
    format!(r"[A-Z](?:{ENTITY}|{INLINE_TAG}|[A-Z\s&.,'\-\d()])+")
}

fn raw_gap() -> String {
    format!(r"(?:{ENTITY}|{INLINE_TAG}|\s)+")
}

/// "26th March, 2004", "15TH NOVEMBER 2006", "1 May 1998".
fn written_date() -> String {
    format!(r"\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTHS}),?\s+\d{{4}}")
}

lazy_static! {
    // Title patterns over rendered lines
    pub static ref SINGLE_LINE_TITLE: Regex = Regex::new(&format!(
        r"^(?P<plaintiff>{PARTY})\s+(?P<sep>{SEPARATOR})\s+(?P<defendant>{PARTY})(?:\s+\[[^\]]*\])?"
    )).unwrap();

    pub static ref REPUBLIC_TITLE: Regex = Regex::new(&format!(
        r"^(?P<plaintiff>(?i:THE\s+REPUBLIC))\s+(?P<sep>{SEPARATOR})\s+(?P<defendant>{PARTY})"
    )).unwrap();

    pub static ref SEPARATOR_TOKEN: Regex = Regex::new(
        r"\b(?P<sep>VERSUS|VRS\.?|VS\.?|V\.?)\b"
    ).unwrap();

    pub static ref PARTY_PREFIX: Regex = Regex::new(
        r"^[A-Z][A-Z\s&.,'\-\d()]+"
    ).unwrap();

    pub static ref MATTER_OF: Regex = Regex::new(
        r"(?i)IN\s+THE\s+MATTER\s+OF[^.]+"
    ).unwrap();

    // Title patterns over raw HTML
    pub static ref RAW_TITLE: Regex = Regex::new(&format!(
        r"(?P<plaintiff>{party}){gap}(?P<sep>{SEPARATOR}){gap}(?P<defendant>{party})",
        party = raw_party(),
        gap = raw_gap(),
    )).unwrap();

    pub static ref RAW_REPUBLIC_TITLE: Regex = Regex::new(&format!(
        r"(?P<plaintiff>(?i:THE(?:{ENTITY}|{INLINE_TAG}|\s)+REPUBLIC)){gap}(?P<sep>{SEPARATOR}){gap}(?P<defendant>{party})",
        party = raw_party(),
        gap = raw_gap(),
    )).unwrap();

    pub static ref SCRIPT_BLOCK: Regex = Regex::new(
        r"(?is)<script[^>]*>.*?</script>"
    ).unwrap();

    pub static ref STYLE_BLOCK: Regex = Regex::new(
        r"(?is)<style[^>]*>.*?</style>"
    ).unwrap();

    // Word's `<![if !supportLists]>` and `<![endif]>` markers; CDATA never matches
    pub static ref CONDITIONAL_MARKER: Regex = Regex::new(
        r"<!\[[^\[\]>]*\]>"
    ).unwrap();

    // `<` that cannot open a tag, comment, or declaration
    pub static ref STRAY_ANGLE: Regex = Regex::new(
        r"<(?P<next>[^A-Za-z/!?]|$)"
    ).unwrap();

    pub static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();

    // Title cleanup
    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    pub static ref TRAILING_BRACKET: Regex = Regex::new(r"\s*\[.*?\]\s*$").unwrap();

    pub static ref TRAILING_CASE_NUMBER: Regex = Regex::new(r"\s*H\d+/\d+/\d+.*?$").unwrap();

    // Dates split across markup: <u>15<sup>TH</sup> NOVEMBER, 2006</u>
    pub static ref SPLIT_TAG_DATE: Regex = Regex::new(&format!(
        r"(?i)<[^>]*>\s*(?P<day>\d{{1,2}})\s*<[^>]*>(?:st|nd|rd|th)<[^>]*>\s*(?P<month>{MONTHS}),?\s*(?P<year>\d{{4}})"
    )).unwrap();

    pub static ref UNDERLINED_DATE: Regex = Regex::new(&format!(
        r"(?i)<u(?:\s[^>]*)?>\s*(?P<date>{})",
        written_date()
    )).unwrap();

    // Dates in rendered text
    pub static ref BRACKETED_NUMERIC_DATE: Regex = Regex::new(
        r"\[(?P<date>\d{1,2}/\d{1,2}/\d{4})\]"
    ).unwrap();

    pub static ref BRACKETED_WRITTEN_DATE: Regex = Regex::new(&format!(
        r"(?i)\[(?P<date>{})\]",
        written_date()
    )).unwrap();

    pub static ref CASE_NUMBER_ANCHORED_DATE: Regex = Regex::new(&format!(
        r"(?i)(?:H\d+/\d+/\d+|NO\.?\s*[A-Z]?\.?\d+/\d+|J\.\d+/\d+)[^.]*?(?P<date>{})",
        written_date()
    )).unwrap();

    pub static ref CORAM_ANCHORED_DATE: Regex = Regex::new(&format!(
        r"(?i)Coram[^.]*?(?P<date>{})",
        written_date()
    )).unwrap();

    pub static ref JUDGMENT_ANCHORED_DATE: Regex = Regex::new(&format!(
        r"(?i)Judgment[^.]*?(?P<date>{})",
        written_date()
    )).unwrap();

    pub static ref LEADING_WRITTEN_DATE: Regex = Regex::new(&format!(
        r"(?i)^(?P<date>{})",
        written_date()
    )).unwrap();

    pub static ref CONNECTOR_WORD: Regex = Regex::new(
        r"(?i)\b(?:FROM|TO|ON|AT|BEFORE|AFTER|DURING)\b"
    ).unwrap();

    pub static ref NUMERIC_DATE: Regex = Regex::new(
        r"\b(?P<date>\d{1,2}/\d{1,2}/\d{4})\b"
    ).unwrap();

    // Date normalization
    pub static ref DAY_MONTH_YEAR: Regex = Regex::new(&format!(
        r"(?i)\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTHS}),?\s+\d{{4}}"
    )).unwrap();

    pub static ref MONTH_DAY_YEAR: Regex = Regex::new(&format!(
        r"(?i)\b(?:{MONTHS})\s+\d{{1,2}}(?:st|nd|rd|th)?,?\s+\d{{4}}"
    )).unwrap();

    pub static ref SLASH_DATE: Regex = Regex::new(
        r"(?P<a>\d{1,2})/(?P<b>\d{1,2})/(?P<year>\d{4})"
    ).unwrap();

    pub static ref ISO_DATE: Regex = Regex::new(
        r"(?P<year>\d{4})-(?P<month>\d{1,2})-(?P<day>\d{1,2})"
    ).unwrap();

    pub static ref ORDINAL_SUFFIX: Regex = Regex::new(
        r"(?i)(?P<n>\d+)(?:st|nd|rd|th)"
    ).unwrap();
}
