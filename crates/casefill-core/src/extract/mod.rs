//! Title and date extraction.
//!
//! Each field is extracted by a cascade: an ordered list of strategies tried
//! one after another until one yields an accepted value. A document is
//! rendered once and both cascades read from the same rendered lines.

pub mod rules;

pub use rules::{DateStrategy, Evidence, Strategy, TitleStrategy};

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::models::{CasefillConfig, Document};
use crate::render::{RenderedText, render_lines};
use rules::{dates, filename, titles};

/// Title strategies in the order they are tried.
pub const TITLE_CASCADE: [(TitleStrategy, Strategy); 5] = [
    (TitleStrategy::SingleLine, titles::single_line),
    (TitleStrategy::SplitLine, titles::split_line),
    (TitleStrategy::MatterOf, titles::matter_of),
    (TitleStrategy::RawHtml, titles::raw_html),
    (TitleStrategy::Filename, filename::filename),
];

/// Date strategies in the order they are tried.
pub const DATE_CASCADE: [(DateStrategy, Strategy); 5] = [
    (DateStrategy::SplitTag, dates::split_tag),
    (DateStrategy::Bracketed, dates::bracketed),
    (DateStrategy::Anchored, dates::anchored),
    (DateStrategy::Standalone, dates::standalone),
    (DateStrategy::NumericInContext, dates::numeric_in_context),
];

/// An accepted value and the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extracted<S> {
    pub value: String,
    pub strategy: S,
}

/// Result of running the cascades over one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub title: Option<Extracted<TitleStrategy>>,
    pub date: Option<Extracted<DateStrategy>>,
}

/// Which cascades to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSelection {
    pub title: bool,
    pub date: bool,
}

impl FieldSelection {
    pub fn all() -> Self {
        Self { title: true, date: true }
    }

    pub fn none() -> Self {
        Self { title: false, date: false }
    }

    pub fn is_empty(&self) -> bool {
        !self.title && !self.date
    }
}

impl Default for FieldSelection {
    fn default() -> Self {
        Self::all()
    }
}

/// Runs the title and date cascades with a given configuration.
#[derive(Debug, Clone, Default)]
pub struct CaseExtractor {
    config: CasefillConfig,
}

impl CaseExtractor {
    pub fn new(config: CasefillConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CasefillConfig {
        &self.config
    }

    /// Render a document once, deep enough for both cascades.
    pub fn render(&self, document: &Document) -> RenderedText {
        let extraction = &self.config.extraction;
        render_lines(
            document.html(),
            extraction.title_max_lines.max(extraction.date_max_lines),
        )
    }

    /// Extract the selected fields.
    ///
    /// Without a document only the filename fallback can produce a title and
    /// no date is produced.
    pub fn extract(
        &self,
        document: Option<&Document>,
        record_name: Option<&str>,
        fields: FieldSelection,
    ) -> Extraction {
        let rendered = match document {
            Some(document) if !fields.is_empty() => self.render(document),
            _ => RenderedText::default(),
        };
        let html = document.map(Document::html).unwrap_or_default();
        let limits = &self.config.extraction;

        let title = if fields.title {
            let evidence = Evidence::new(html, rendered.head(limits.title_max_lines))
                .with_record_name(record_name);
            run_cascade(&TITLE_CASCADE, &evidence, &self.config)
        } else {
            None
        };

        let date = match document {
            Some(_) if fields.date => {
                let evidence = Evidence::new(html, rendered.head(limits.date_max_lines));
                run_cascade(&DATE_CASCADE, &evidence, &self.config)
            }
            _ => None,
        };

        Extraction { title, date }
    }

    pub fn extract_title(
        &self,
        document: Option<&Document>,
        record_name: Option<&str>,
    ) -> Option<Extracted<TitleStrategy>> {
        let fields = FieldSelection { title: true, date: false };
        self.extract(document, record_name, fields).title
    }

    pub fn extract_date(&self, document: &Document) -> Option<Extracted<DateStrategy>> {
        let fields = FieldSelection { title: false, date: true };
        self.extract(Some(document), None, fields).date
    }
}

/// Extract a case title from HTML with the default configuration.
pub fn extract_title(html: &str, record_name: Option<&str>) -> Option<String> {
    CaseExtractor::default()
        .extract_title(Some(&Document::from(html)), record_name)
        .map(|found| found.value)
}

/// Extract a judgment date (`YYYY-MM-DD`) from HTML with the default configuration.
pub fn extract_date(html: &str) -> Option<String> {
    CaseExtractor::default()
        .extract_date(&Document::from(html))
        .map(|found| found.value)
}

fn run_cascade<S>(
    cascade: &[(S, Strategy)],
    evidence: &Evidence<'_>,
    config: &CasefillConfig,
) -> Option<Extracted<S>>
where
    S: Copy + fmt::Display,
{
    cascade.iter().find_map(|&(strategy, attempt)| match attempt(evidence, config) {
        Some(value) => {
            debug!(%strategy, "accepted {:?}", value);
            Some(Extracted { value, strategy })
        }
        None => {
            trace!(%strategy, "no match");
            None
        }
    })
}
