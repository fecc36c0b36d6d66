//! Persisted case records.
//!
//! Records are kept as an ordered JSON object so that fields this crate does
//! not know about survive a rewrite unchanged and in their original order.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RecordError;

/// Placeholder written for scanned-image documents with no extractable text.
pub const SENTINEL: &str = "pages.gif";

/// A backfillable record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    /// `caseTitle`
    CaseTitle,
    /// `trialDate`
    TrialDate,
}

impl RecordField {
    /// JSON key of the field.
    pub fn key(self) -> &'static str {
        match self {
            Self::CaseTitle => "caseTitle",
            Self::TrialDate => "trialDate",
        }
    }
}

/// One case record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseRecord {
    fields: Map<String, Value>,
}

impl CaseRecord {
    /// Load a record from a JSON file.
    pub fn load(path: &Path) -> Result<Self, RecordError> {
        let content = std::fs::read_to_string(path).map_err(|source| RecordError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&content).map_err(|source| RecordError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(RecordError::NotAnObject(path.to_path_buf())),
        }
    }

    /// Write the record back as indented UTF-8 JSON.
    pub fn save(&self, path: &Path) -> Result<(), RecordError> {
        let content = self.to_json_pretty().map_err(|e| RecordError::Write {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()),
        })?;
        std::fs::write(path, content).map_err(|source| RecordError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize with two-space indentation, non-ASCII written verbatim.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.fields)
    }

    /// Current value of a field, if it is a string.
    pub fn get(&self, field: RecordField) -> Option<&str> {
        self.fields.get(field.key()).and_then(Value::as_str)
    }

    pub fn case_title(&self) -> Option<&str> {
        self.get(RecordField::CaseTitle)
    }

    pub fn trial_date(&self) -> Option<&str> {
        self.get(RecordField::TrialDate)
    }

    /// `metadata.sourcePath`, when present and non-empty.
    pub fn source_path(&self) -> Option<&str> {
        self.fields
            .get("metadata")
            .and_then(|m| m.get("sourcePath"))
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
    }

    /// Whether a field is absent, null, empty, or the sentinel.
    ///
    /// Any other value, including non-string values, is left alone.
    pub fn needs(&self, field: RecordField) -> bool {
        match self.fields.get(field.key()) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty() || s == SENTINEL,
            Some(_) => false,
        }
    }

    /// Set a field, keeping its position if it already exists.
    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        self.fields
            .insert(field.key().to_string(), Value::String(value.into()));
    }
}

impl From<Map<String, Value>> for CaseRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}
