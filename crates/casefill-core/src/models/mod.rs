//! Data models: configuration, source documents, and case records.

pub mod config;
pub mod document;
pub mod record;

pub use config::CasefillConfig;
pub use document::Document;
pub use record::{CaseRecord, RecordField, SENTINEL};
