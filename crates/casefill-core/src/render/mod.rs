//! Bounded HTML to text projection.
//!
//! The renderer makes one pass over the markup event stream and keeps only
//! text that sits inside `<body>` and outside `<script>`/`<style>`. Each text
//! chunk is entity-decoded, split on newlines, trimmed, and appended line by
//! line until the cap is reached. No tree is built.
//!
//! Legacy and Word-exported HTML is rarely well formed. Script and style
//! bodies and Word's `<![if ...]>` markers are removed before reading, and
//! anything else the reader rejects is skipped rather than ending the pass.

mod entities;

pub use entities::decode_entities;

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, trace};

use crate::extract::rules::patterns::{CONDITIONAL_MARKER, STRAY_ANGLE};
use crate::extract::rules::strip_scripts;

/// Ordered, trimmed, non-empty lines from a document body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedText {
    lines: Vec<String>,
}

impl RenderedText {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The first `n` lines (or fewer).
    pub fn head(&self, n: usize) -> &[String] {
        &self.lines[..n.min(self.lines.len())]
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<String>> for RenderedText {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

/// Render at most `max_lines` lines of body text from `html`.
///
/// Markup the reader rejects is skipped up to the next `>` and rendering
/// resumes after it. When nothing is left to resume from, whatever was
/// collected so far is returned.
pub fn render_lines(html: &str, max_lines: usize) -> RenderedText {
    let markup = prepare_markup(html);
    let mut projection = Projection::new(max_lines);

    let mut offset = 0;
    while offset < markup.len() && !projection.is_full() {
        match projection.read(&markup[offset..]) {
            Some(resume) => offset += resume,
            None => break,
        }
    }

    trace!("rendered {} lines", projection.lines.len());
    RenderedText {
        lines: projection.lines,
    }
}

/// Remove what an XML tokenizer cannot read: script and style bodies, Word
/// conditional markers, and bare `<` in text (escaped, decoded back later).
fn prepare_markup(html: &str) -> Cow<'_, str> {
    let mut markup = strip_scripts(html);
    if CONDITIONAL_MARKER.is_match(&markup) {
        markup = Cow::Owned(CONDITIONAL_MARKER.replace_all(&markup, "").into_owned());
    }
    if STRAY_ANGLE.is_match(&markup) {
        markup = Cow::Owned(STRAY_ANGLE.replace_all(&markup, "&lt;${next}").into_owned());
    }
    markup
}

/// Lines collected so far and where the reader is in the document.
struct Projection {
    lines: Vec<String>,
    max_lines: usize,
    in_body: bool,
    raw_depth: usize,
}

impl Projection {
    fn new(max_lines: usize) -> Self {
        Self {
            lines: Vec::new(),
            max_lines,
            in_body: false,
            raw_depth: 0,
        }
    }

    fn is_full(&self) -> bool {
        self.lines.len() >= self.max_lines
    }

    fn is_visible(&self) -> bool {
        self.in_body && self.raw_depth == 0
    }

    /// Read `markup` until the end, the cap, or an error.
    ///
    /// Returns the offset just past the `>` following a rejected construct,
    /// or `None` when there is nothing more to read.
    fn read(&mut self, markup: &str) -> Option<usize> {
        let mut reader = Reader::from_str(markup);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.check_comments = false;

        while !self.is_full() {
            match reader.read_event() {
                Ok(Event::Start(tag)) => {
                    let name = tag.name();
                    if name.as_ref().eq_ignore_ascii_case(b"body") {
                        self.in_body = true;
                    } else if is_raw_text_element(name.as_ref()) {
                        self.raw_depth += 1;
                    }
                }
                Ok(Event::End(tag)) => {
                    let name = tag.name();
                    if name.as_ref().eq_ignore_ascii_case(b"body") {
                        self.in_body = false;
                    } else if is_raw_text_element(name.as_ref()) {
                        self.raw_depth = self.raw_depth.saturating_sub(1);
                    }
                }
                Ok(Event::Text(text)) if self.is_visible() => {
                    if let Ok(chunk) = reader.decoder().decode(&text) {
                        push_chunk(&mut self.lines, &decode_entities(&chunk), self.max_lines);
                    }
                }
                Ok(Event::CData(data)) if self.is_visible() => {
                    if let Ok(chunk) = reader.decoder().decode(&data) {
                        push_chunk(&mut self.lines, &chunk, self.max_lines);
                    }
                }
                Ok(Event::Eof) => return None,
                Err(err) => {
                    let position = usize::try_from(reader.error_position()).unwrap_or(usize::MAX);
                    let resume = markup
                        .get(position..)
                        .and_then(|rest| rest.find('>'))
                        .map(|end| position + end + 1);
                    debug!(
                        position,
                        kept = self.lines.len(),
                        resumed = resume.is_some(),
                        "skipped malformed markup: {}",
                        err
                    );
                    return resume;
                }
                Ok(_) => {}
            }
        }
        None
    }
}

fn is_raw_text_element(name: &[u8]) -> bool {
    name.eq_ignore_ascii_case(b"script") || name.eq_ignore_ascii_case(b"style")
}

fn push_chunk(lines: &mut Vec<String>, chunk: &str, max_lines: usize) {
    for line in chunk.split('\n') {
        if lines.len() >= max_lines {
            break;
        }
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(html: &str, max: usize) -> Vec<String> {
        render_lines(html, max).lines().to_vec()
    }

    #[test]
    fn test_body_only() {
        let html = "<html><head><title>IGNORED TITLE</title></head>\
                    <body><p>IN THE SUPREME COURT</p><p>ACCRA</p></body></html>";
        assert_eq!(render(html, 50), vec!["IN THE SUPREME COURT", "ACCRA"]);
    }

    #[test]
    fn test_script_and_style_excluded() {
        let html = "<body><style>p { color: red }</style><p>KOFI ANSAH</p>\
                    <script type=\"text/javascript\">var x = 1;</script><p>VRS</p></body>";
        assert_eq!(render(html, 50), vec!["KOFI ANSAH", "VRS"]);
    }

    #[test]
    fn test_chunks_split_on_newlines_and_trimmed() {
        let html = "<body>\n  <p>  FIRST LINE\n\n   SECOND LINE  </p>\n<p>THIRD</p></body>";
        assert_eq!(render(html, 50), vec!["FIRST LINE", "SECOND LINE", "THIRD"]);
    }

    #[test]
    fn test_cap_spans_chunks() {
        let html = "<body><p>ONE\nTWO</p><p>THREE\nFOUR</p><p>FIVE</p></body>";
        assert_eq!(render(html, 3), vec!["ONE", "TWO", "THREE"]);
    }

    #[test]
    fn test_entities_decoded_and_blank_nbsp_lines_dropped() {
        let html = "<body><p>&nbsp;</p><p>ADU &amp; ORS</p></body>";
        assert_eq!(render(html, 50), vec!["ADU & ORS"]);
    }

    #[test]
    fn test_unclosed_html_tags() {
        let html = "<BODY><P>MENSAH<BR>v.<BR>ADJEI</P></BODY>";
        assert_eq!(render(html, 50), vec!["MENSAH", "v.", "ADJEI"]);
    }

    #[test]
    fn test_no_body_renders_nothing() {
        assert!(render_lines("<p>JOHN DOE v. JANE ROE</p>", 50).is_empty());
    }

    #[test]
    fn test_head_is_prefix() {
        let text = render_lines("<body><p>A\nB\nC</p></body>", 50);
        assert_eq!(text.head(2), ["A".to_string(), "B".to_string()]);
        assert_eq!(text.head(10).len(), 3);
    }

    #[test]
    fn test_word_conditional_markers() {
        let html = "<body><p>JOHN DOE</p><p><![if !supportLists]>1.<![endif]>Intro</p>\
                    <p>KOFI ANSAH v. AMA SERWAA</p><p>26th March, 2004</p></body>";
        assert_eq!(
            render(html, 50),
            vec!["JOHN DOE", "1.Intro", "KOFI ANSAH v. AMA SERWAA", "26th March, 2004"]
        );
    }

    #[test]
    fn test_head_script_with_angle_brackets() {
        let html = "<html><head><script>for(i=0;i<n;i++){x()}</script>\
                    <style>p<span { color: red }</style></head>\
                    <body><p>KOFI ANSAH v. AMA SERWAA</p><p>26th March, 2004</p></body></html>";
        assert_eq!(render(html, 50), vec!["KOFI ANSAH v. AMA SERWAA", "26th March, 2004"]);
    }

    #[test]
    fn test_bare_angle_brackets_in_text() {
        let html = "<body><p>if a < b then</p><p>x <= 3 <</p></body>";
        assert_eq!(render(html, 50), vec!["if a < b then", "x <= 3 <"]);
    }

    #[test]
    fn test_rejected_markup_is_skipped() {
        let html = "<body><p>ONE</p><!x-weird declaration><p>TWO</p></body>";
        assert_eq!(render(html, 50), vec!["ONE", "TWO"]);
    }

    #[test]
    fn test_unrecoverable_markup_keeps_earlier_lines() {
        let html = "<body><p>ONE</p><p>TWO</p><!-- never closed";
        assert_eq!(render(html, 50), vec!["ONE", "TWO"]);
    }
}
