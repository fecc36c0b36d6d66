//! Rule-based strategies for case titles and judgment dates.
//!
//! Every strategy is a plain function with the [`Strategy`] signature. The
//! cascades in [`crate::extract`] are ordered lists of these functions.

pub mod dates;
pub mod filename;
pub mod patterns;
pub mod titles;
pub mod validate;

pub use filename::title_from_filename;
pub use validate::{accept_date, accept_title, collapse_whitespace, parse_date};

use std::borrow::Cow;
use std::cell::OnceCell;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::CasefillConfig;
use patterns::{SCRIPT_BLOCK, STYLE_BLOCK};

const NO_LINES: &[String] = &[];

/// A single extraction attempt: evidence in, accepted value out.
pub type Strategy = fn(&Evidence<'_>, &CasefillConfig) -> Option<String>;

/// Everything a strategy may look at for one document.
#[derive(Debug)]
pub struct Evidence<'a> {
    html: &'a str,
    lines: &'a [String],
    record_name: Option<&'a str>,
    markup: OnceCell<Cow<'a, str>>,
}

impl<'a> Evidence<'a> {
    pub fn new(html: &'a str, lines: &'a [String]) -> Self {
        Self {
            html,
            lines,
            record_name: None,
            markup: OnceCell::new(),
        }
    }

    /// Evidence for a record whose document could not be read.
    pub fn empty() -> Self {
        Self::new("", NO_LINES)
    }

    /// Attach the record's filename for the filename fallback.
    pub fn with_record_name(mut self, record_name: Option<&'a str>) -> Self {
        self.record_name = record_name;
        self
    }

    /// Unrendered HTML.
    pub fn html(&self) -> &'a str {
        self.html
    }

    /// Rendered lines.
    pub fn lines(&self) -> &'a [String] {
        self.lines
    }

    /// The first `n` rendered lines.
    pub fn head(&self, n: usize) -> &'a [String] {
        &self.lines[..n.min(self.lines.len())]
    }

    /// The first `n` rendered lines joined by single spaces.
    pub fn joined(&self, n: usize) -> String {
        self.head(n).join(" ")
    }

    pub fn record_name(&self) -> Option<&'a str> {
        self.record_name
    }

    /// Unrendered HTML with script and style blocks removed.
    pub fn markup(&self) -> &str {
        self.markup.get_or_init(|| strip_scripts(self.html))
    }
}

pub(crate) fn strip_scripts(html: &str) -> Cow<'_, str> {
    match SCRIPT_BLOCK.replace_all(html, "") {
        Cow::Borrowed(rest) => STYLE_BLOCK.replace_all(rest, ""),
        Cow::Owned(rest) => Cow::Owned(STYLE_BLOCK.replace_all(&rest, "").into_owned()),
    }
}

/// Which title strategy produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleStrategy {
    SingleLine,
    SplitLine,
    MatterOf,
    RawHtml,
    Filename,
}

impl TitleStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SingleLine => "single_line",
            Self::SplitLine => "split_line",
            Self::MatterOf => "matter_of",
            Self::RawHtml => "raw_html",
            Self::Filename => "filename",
        }
    }
}

impl fmt::Display for TitleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which date strategy produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStrategy {
    SplitTag,
    Bracketed,
    Anchored,
    Standalone,
    NumericInContext,
}

impl DateStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SplitTag => "split_tag",
            Self::Bracketed => "bracketed",
            Self::Anchored => "anchored",
            Self::Standalone => "standalone",
            Self::NumericInContext => "numeric_in_context",
        }
    }
}

impl fmt::Display for DateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_strips_script_and_style() {
        let html = "<head><STYLE>p{}</STYLE></head><body><script>\nvar a = '<u>1st May, 2001</u>';\n</script>KEEP</body>";
        let evidence = Evidence::new(html, NO_LINES);
        assert_eq!(evidence.markup(), "<head></head><body>KEEP</body>");
    }

    #[test]
    fn test_head_and_joined() {
        let lines = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let evidence = Evidence::new("", &lines);
        assert_eq!(evidence.head(2).len(), 2);
        assert_eq!(evidence.head(9).len(), 3);
        assert_eq!(evidence.joined(2), "A B");
    }
}
