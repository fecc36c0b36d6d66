//! Configuration structures for the backfill pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CasefillError, Result};

/// Main configuration for the casefill pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CasefillConfig {
    /// Corpus locations.
    pub paths: PathsConfig,

    /// Extraction limits and switches.
    pub extraction: ExtractionConfig,

    /// Filename fallback rules.
    pub filename: FilenameConfig,
}

/// Where records and their source documents live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding one JSON record per case.
    pub records_dir: PathBuf,

    /// Root that `metadata.sourcePath` is relative to.
    pub documents_root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            records_dir: PathBuf::from("law-finder-json"),
            documents_root: PathBuf::from("LAW FINDER"),
        }
    }
}

/// Extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Rendered line cap for the title cascade.
    pub title_max_lines: usize,

    /// Rendered line cap for the date cascade.
    pub date_max_lines: usize,

    /// Number of leading raw-HTML characters scanned by the raw title pattern.
    pub raw_html_window: usize,

    /// Titles must be strictly longer than this many characters.
    pub min_title_length: usize,

    /// Return an unparsable date candidate verbatim instead of rejecting it.
    pub keep_unparsed_dates: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            title_max_lines: 50,
            date_max_lines: 150,
            raw_html_window: 5000,
            min_title_length: 10,
            keep_unparsed_dates: false,
        }
    }
}

/// Rules for deriving a title from a record filename.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilenameConfig {
    /// Institutional prefixes stripped from the start of a record filename.
    pub prefixes: Vec<String>,

    /// Folder segments that never name a case.
    pub ignored_segments: Vec<String>,
}

impl Default for FilenameConfig {
    fn default() -> Self {
        Self {
            prefixes: vec![
                "COURT OF APPEAL__".to_string(),
                "SUPREME COURT__".to_string(),
                "WACA__".to_string(),
                "WALR__".to_string(),
            ],
            ignored_segments: vec!["TEMP".to_string()],
        }
    }
}

impl CasefillConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| CasefillError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| CasefillError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve a record's `sourcePath` against the documents root.
    pub fn document_path(&self, source_path: &str) -> PathBuf {
        self.paths.documents_root.join(source_path)
    }
}
