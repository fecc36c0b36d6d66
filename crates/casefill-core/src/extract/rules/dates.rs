//! Judgment date strategies over raw HTML and rendered lines.

use regex::Regex;

use super::patterns::{
    BRACKETED_NUMERIC_DATE, BRACKETED_WRITTEN_DATE, CASE_NUMBER_ANCHORED_DATE, CONNECTOR_WORD,
    CORAM_ANCHORED_DATE, JUDGMENT_ANCHORED_DATE, LEADING_WRITTEN_DATE, NUMERIC_DATE,
    SPLIT_TAG_DATE, UNDERLINED_DATE,
};
use super::validate::accept_date;
use super::Evidence;
use crate::models::CasefillConfig;

const BRACKET_WINDOW: usize = 50;
const ANCHOR_WINDOW: usize = 50;
const STANDALONE_WINDOW: usize = 30;
const NUMERIC_WINDOW: usize = 20;

/// Lines before and after a numeric date that count as its context.
const CONTEXT_RADIUS: usize = 2;

/// Tokens that tie a nearby numeric date to the case itself.
const CASE_CONTEXT_TOKENS: [&str; 6] = ["V.", "VRS", "VERSUS", "H1/", "NO.", "CASE"];

/// `<u>15<sup>TH</sup> NOVEMBER, 2006</u>`, which rendering would tear apart.
pub fn split_tag(evidence: &Evidence<'_>, config: &CasefillConfig) -> Option<String> {
    let keep_unparsed = config.extraction.keep_unparsed_dates;
    let markup = evidence.markup();

    SPLIT_TAG_DATE
        .captures_iter(markup)
        .find_map(|caps| {
            let candidate = format!("{} {} {}", &caps["day"], &caps["month"], &caps["year"]);
            accept_date(&candidate, keep_unparsed)
        })
        .or_else(|| first_accepted(&UNDERLINED_DATE, markup, keep_unparsed))
}

/// `[26/03/2004]` or `[26th March, 2004]` near the top of the document.
pub fn bracketed(evidence: &Evidence<'_>, config: &CasefillConfig) -> Option<String> {
    let text = evidence.joined(BRACKET_WINDOW);
    let patterns: [&Regex; 2] = [&BRACKETED_NUMERIC_DATE, &BRACKETED_WRITTEN_DATE];

    patterns
        .iter()
        .find_map(|re| first_accepted(re, &text, config.extraction.keep_unparsed_dates))
}

/// A written date in the same sentence as a case number, "Coram" or "Judgment".
pub fn anchored(evidence: &Evidence<'_>, config: &CasefillConfig) -> Option<String> {
    let text = evidence.joined(ANCHOR_WINDOW);
    let patterns: [&Regex; 3] = [
        &CASE_NUMBER_ANCHORED_DATE,
        &CORAM_ANCHORED_DATE,
        &JUDGMENT_ANCHORED_DATE,
    ];

    patterns
        .iter()
        .find_map(|re| first_accepted(re, &text, config.extraction.keep_unparsed_dates))
}

/// A line that opens with a written date and is not a fragment of prose.
pub fn standalone(evidence: &Evidence<'_>, config: &CasefillConfig) -> Option<String> {
    evidence
        .head(STANDALONE_WINDOW)
        .iter()
        .filter(|line| !CONNECTOR_WORD.is_match(line))
        .find_map(|line| {
            let caps = LEADING_WRITTEN_DATE.captures(line)?;
            accept_date(&caps["date"], config.extraction.keep_unparsed_dates)
        })
}

/// An early `D/M/YYYY` date, only when the surrounding lines mention the case.
pub fn numeric_in_context(evidence: &Evidence<'_>, config: &CasefillConfig) -> Option<String> {
    let lines = evidence.lines();

    evidence
        .head(NUMERIC_WINDOW)
        .iter()
        .enumerate()
        .find_map(|(i, line)| {
            let caps = NUMERIC_DATE.captures(line)?;
            let start = i.saturating_sub(CONTEXT_RADIUS);
            let end = (i + CONTEXT_RADIUS + 1).min(lines.len());
            let context = lines[start..end].join(" ").to_uppercase();

            if !CASE_CONTEXT_TOKENS.iter().any(|token| context.contains(token)) {
                return None;
            }
            accept_date(&caps["date"], config.extraction.keep_unparsed_dates)
        })
}

fn first_accepted(re: &Regex, text: &str, keep_unparsed: bool) -> Option<String> {
    re.captures_iter(text)
        .find_map(|caps| accept_date(&caps["date"], keep_unparsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(strategy: super::super::Strategy, html: &str, raw_lines: &[&str]) -> Option<String> {
        let lines: Vec<String> = raw_lines.iter().map(|s| s.to_string()).collect();
        strategy(&Evidence::new(html, &lines), &CasefillConfig::default())
    }

    #[test]
    fn test_split_tag_superscript() {
        let html = "<body><p align=center><u>15<sup>TH</sup> NOVEMBER, 2006</u></p></body>";
        assert_eq!(run(split_tag, html, &[]), Some("2006-11-15".to_string()));
    }

    #[test]
    fn test_split_tag_underlined() {
        let html = "<body><u>26th March, 2004</u></body>";
        assert_eq!(run(split_tag, html, &[]), Some("2004-03-26".to_string()));
    }

    #[test]
    fn test_split_tag_ignores_script() {
        let html = "<script>document.write('<u>26th March, 2004</u>')</script><body></body>";
        assert_eq!(run(split_tag, html, &[]), None);
    }

    #[test]
    fn test_bracketed() {
        assert_eq!(
            run(bracketed, "", &["KOFI ANSAH v. AMA SERWAA [26th March, 2004]"]),
            Some("2004-03-26".to_string())
        );
        assert_eq!(
            run(bracketed, "", &["KOFI ANSAH v. AMA SERWAA [13/04/2004]"]),
            Some("2004-04-13".to_string())
        );
        assert_eq!(
            run(bracketed, "", &["[03/04/2004]"]),
            Some("2004-04-03".to_string())
        );
    }

    #[test]
    fn test_bracketed_skips_impossible_dates() {
        assert_eq!(
            run(bracketed, "", &["[31/31/2004]", "[1st May, 1998]"]),
            Some("1998-05-01".to_string())
        );
    }

    #[test]
    fn test_anchored() {
        assert_eq!(
            run(anchored, "", &["CIVIL APPEAL NO. H1/23/2004", "26th March, 2004"]),
            Some("2004-03-26".to_string())
        );
        assert_eq!(
            run(anchored, "", &["CORAM: WOOD JSC, 12th May, 2005"]),
            Some("2005-05-12".to_string())
        );
        assert_eq!(
            run(anchored, "", &["JUDGMENT delivered on 1st June, 1999"]),
            Some("1999-06-01".to_string())
        );
    }

    #[test]
    fn test_anchored_stays_in_sentence() {
        assert_eq!(
            run(anchored, "", &["JUDGMENT of the court.", "The loan was taken on 1st June, 1999"]),
            None
        );
    }

    #[test]
    fn test_standalone_skips_connector_lines() {
        let lines = ["IN THE SUPREME COURT", "3RD MAY, 2004 TO 5TH MAY, 2004", "26TH OCTOBER, 2004"];
        assert_eq!(run(standalone, "", &lines), Some("2004-10-26".to_string()));
    }

    #[test]
    fn test_standalone_needs_leading_date() {
        assert_eq!(run(standalone, "", &["Delivered 26th March, 2004"]), None);
    }

    #[test]
    fn test_numeric_in_context() {
        assert_eq!(
            run(numeric_in_context, "", &["KOFI ANSAH VRS AMA SERWAA", "03/04/2004"]),
            Some("2004-04-03".to_string())
        );
        assert_eq!(
            run(numeric_in_context, "", &["SUIT NO. 12/2003", "FILLER", "13/04/2004"]),
            Some("2004-04-13".to_string())
        );
    }

    #[test]
    fn test_numeric_without_context() {
        assert_eq!(run(numeric_in_context, "", &["13/04/2004"]), None);
        assert_eq!(
            run(numeric_in_context, "", &["KOFI ANSAH VRS AMA SERWAA", "A", "B", "03/04/2004"]),
            None
        );
    }
}
