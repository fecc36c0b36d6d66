//! Source HTML documents.

use std::path::Path;

/// Raw HTML of one case file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    html: String,
}

impl Document {
    /// Decode a document permissively: invalid UTF-8 sequences are dropped.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut html = String::with_capacity(bytes.len());
        for chunk in bytes.utf8_chunks() {
            html.push_str(chunk.valid());
        }
        Self { html }
    }

    /// Read and decode a document from disk.
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(&bytes))
    }

    /// The raw, unrendered HTML.
    pub fn html(&self) -> &str {
        &self.html
    }
}

impl From<String> for Document {
    fn from(html: String) -> Self {
        Self { html }
    }
}

impl From<&str> for Document {
    fn from(html: &str) -> Self {
        Self { html: html.to_string() }
    }
}
