//! Case title strategies over rendered lines and raw HTML.

use regex::Regex;

use super::patterns::{
    MATTER_OF, PARTY_PREFIX, RAW_REPUBLIC_TITLE, RAW_TITLE, REPUBLIC_TITLE, SEPARATOR_TOKEN,
    SINGLE_LINE_TITLE, TAG, TRAILING_CASE_NUMBER,
};
use super::validate::{accept_title, collapse_whitespace};
use super::Evidence;
use crate::models::CasefillConfig;

const SINGLE_LINE_WINDOW: usize = 30;
const SPLIT_LINE_WINDOW: usize = 20;
const MATTER_WINDOW: usize = 30;

/// Words that mark a line as document scaffolding rather than a party name.
const SCAFFOLDING_WORDS: [&str; 6] = [
    "PLAINTIFF",
    "DEFENDANT",
    "RESPONDENT",
    "APPELLANT",
    "CORAM",
    "JUDGMENT",
];

/// "KOFI ANSAH v. AMA SERWAA [2004] GHASC 12" on a single early line.
pub fn single_line(evidence: &Evidence<'_>, config: &CasefillConfig) -> Option<String> {
    let min_length = config.extraction.min_title_length;
    let patterns: [&Regex; 2] = [&SINGLE_LINE_TITLE, &REPUBLIC_TITLE];

    evidence.head(SINGLE_LINE_WINDOW).iter().find_map(|line| {
        // The party class stops at '/', so a trailing case number would
        // otherwise leave a dangling "H1" on the defendant.
        let line = TRAILING_CASE_NUMBER.replace(line, "");
        patterns
            .iter()
            .filter_map(|re| re.find(&line))
            .find_map(|m| accept_title(m.as_str(), min_length))
    })
}

/// Plaintiff, separator, and defendant on three consecutive lines.
pub fn split_line(evidence: &Evidence<'_>, config: &CasefillConfig) -> Option<String> {
    let min_length = config.extraction.min_title_length;

    evidence
        .lines()
        .windows(3)
        .take(SPLIT_LINE_WINDOW)
        .find_map(|triple| {
            let middle = triple[1].to_uppercase();
            let separator = SEPARATOR_TOKEN.captures(&middle)?;
            let plaintiff = party_prefix(&triple[0])?;
            let defendant = party_prefix(&triple[2])?;

            if is_scaffolding(&plaintiff) || is_scaffolding(&defendant) {
                return None;
            }

            let title = format!(
                "{} {} {}",
                plaintiff,
                normalize_separator(&separator["sep"]),
                defendant
            );
            accept_title(&title, min_length)
        })
}

/// "IN THE MATTER OF ..." up to the next period.
pub fn matter_of(evidence: &Evidence<'_>, config: &CasefillConfig) -> Option<String> {
    let text = evidence.joined(MATTER_WINDOW);
    MATTER_OF
        .find(&text)
        .and_then(|m| accept_title(m.as_str(), config.extraction.min_title_length))
}

/// Party patterns over the leading raw HTML, tolerating inline markup.
pub fn raw_html(evidence: &Evidence<'_>, config: &CasefillConfig) -> Option<String> {
    let min_length = config.extraction.min_title_length;
    let window = char_prefix(evidence.markup(), config.extraction.raw_html_window);
    let patterns: [&Regex; 2] = [&RAW_TITLE, &RAW_REPUBLIC_TITLE];

    patterns
        .iter()
        .flat_map(|re| re.find_iter(window))
        .find_map(|m| accept_title(&TAG.replace_all(m.as_str(), ""), min_length))
}

fn party_prefix(line: &str) -> Option<String> {
    PARTY_PREFIX
        .find(line)
        .map(|m| collapse_whitespace(m.as_str()))
        .filter(|party| !party.is_empty())
}

fn is_scaffolding(party: &str) -> bool {
    let upper = party.to_uppercase();
    SCAFFOLDING_WORDS.iter().any(|word| upper.contains(word))
}

fn normalize_separator(token: &str) -> &'static str {
    if token.starts_with("VERSUS") {
        "VERSUS"
    } else if token.starts_with("VRS") {
        "VRS"
    } else {
        "v."
    }
}

fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
