//! Core library for backfilling legal case records.
//!
//! This crate provides:
//! - Bounded rendering of case HTML into body text lines
//! - Case title extraction (single-line, split-line, "in the matter of",
//!   raw-HTML, and filename strategies)
//! - Judgment date extraction and normalization to `YYYY-MM-DD`
//! - Record updates that only fill absent or placeholder fields

pub mod error;
pub mod extract;
pub mod models;
pub mod render;
pub mod update;

pub use error::{CasefillError, RecordError, Result};
pub use extract::{
    CaseExtractor, DateStrategy, Extracted, Extraction, FieldSelection, TitleStrategy,
    extract_date, extract_title,
};
pub use models::{CaseRecord, CasefillConfig, Document, RecordField, SENTINEL};
pub use render::{RenderedText, render_lines};
pub use update::{RecordUpdater, UpdateOutcome};
