//! Backfilling missing fields on case records.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::extract::{CaseExtractor, DateStrategy, Extracted, FieldSelection, TitleStrategy};
use crate::models::{CaseRecord, CasefillConfig, Document, RecordField};

/// What an update wrote into a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub title: Option<Extracted<TitleStrategy>>,
    pub date: Option<Extracted<DateStrategy>>,
}

impl UpdateOutcome {
    /// Whether any field was written.
    pub fn is_updated(&self) -> bool {
        self.title.is_some() || self.date.is_some()
    }
}

/// Fills `caseTitle` and `trialDate` on records that lack them.
///
/// Only absent, null, empty, or sentinel values are replaced. Anything else
/// already on the record is kept, so running an update twice changes nothing
/// the second time.
#[derive(Debug, Clone, Default)]
pub struct RecordUpdater {
    extractor: CaseExtractor,
    fields: FieldSelection,
}

impl RecordUpdater {
    pub fn new(config: CasefillConfig) -> Self {
        Self {
            extractor: CaseExtractor::new(config),
            fields: FieldSelection::all(),
        }
    }

    /// Restrict which fields are backfilled.
    pub fn with_fields(mut self, fields: FieldSelection) -> Self {
        self.fields = fields;
        self
    }

    pub fn extractor(&self) -> &CaseExtractor {
        &self.extractor
    }

    pub fn fields(&self) -> FieldSelection {
        self.fields
    }

    /// Backfill one record in memory.
    ///
    /// `record_name` is the record's filename, used for the title fallback.
    pub fn update(&self, record: &mut CaseRecord, record_name: Option<&str>) -> UpdateOutcome {
        let needed = FieldSelection {
            title: self.fields.title && record.needs(RecordField::CaseTitle),
            date: self.fields.date && record.needs(RecordField::TrialDate),
        };
        if needed.is_empty() {
            debug!("record already has the requested fields");
            return UpdateOutcome::default();
        }

        let document = self.load_document(record);
        let extraction = self.extractor.extract(document.as_ref(), record_name, needed);

        if let Some(title) = &extraction.title {
            record.set(RecordField::CaseTitle, title.value.clone());
        }
        if let Some(date) = &extraction.date {
            record.set(RecordField::TrialDate, date.value.clone());
        }

        let outcome = UpdateOutcome {
            title: extraction.title,
            date: extraction.date,
        };
        if outcome.is_updated() {
            info!(
                title = ?outcome.title.as_ref().map(|t| t.value.as_str()),
                date = ?outcome.date.as_ref().map(|d| d.value.as_str()),
                "updated {}",
                record_name.unwrap_or("record")
            );
        }
        outcome
    }

    /// Load, backfill, and (unless `dry_run`) rewrite a record file.
    ///
    /// The file is only written when a field actually changed.
    pub fn update_file(&self, path: &Path, dry_run: bool) -> Result<UpdateOutcome> {
        let mut record = CaseRecord::load(path)?;
        let record_name = path.file_name().and_then(|n| n.to_str());

        let outcome = self.update(&mut record, record_name);
        if outcome.is_updated() && !dry_run {
            record.save(path)?;
        }
        Ok(outcome)
    }

    fn load_document(&self, record: &CaseRecord) -> Option<Document> {
        let Some(source_path) = record.source_path() else {
            debug!("record has no sourcePath");
            return None;
        };

        let path = self.extractor.config().document_path(source_path);
        match Document::read(&path) {
            Ok(document) => Some(document),
            Err(e) => {
                debug!("source document {} unavailable: {}", path.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const RECORD_NAME: &str = "SUPREME COURT__2004__KOFI ANSAH v AMA SERWAA.json";

    fn record(value: serde_json::Value) -> CaseRecord {
        serde_json::from_value(value).unwrap()
    }

    fn updater_for(root: &Path) -> RecordUpdater {
        let mut config = CasefillConfig::default();
        config.paths.documents_root = root.to_path_buf();
        RecordUpdater::new(config)
    }

    #[test]
    fn test_existing_values_are_not_touched() {
        let original = record(json!({
            "caseTitle": "MENSAH v. ADJEI",
            "trialDate": "2001-02-03",
            "metadata": {"sourcePath": "missing.htm"}
        }));
        let mut rec = original.clone();

        let outcome = RecordUpdater::default().update(&mut rec, Some(RECORD_NAME));

        assert!(!outcome.is_updated());
        assert_eq!(rec, original);
    }

    #[test]
    fn test_missing_document_falls_back_to_filename() {
        let dir = TempDir::new().unwrap();
        let mut rec = record(json!({
            "caseTitle": "pages.gif",
            "metadata": {"sourcePath": "SUPREME COURT/missing.htm"}
        }));

        let outcome = updater_for(dir.path()).update(&mut rec, Some(RECORD_NAME));

        assert_eq!(outcome.title.map(|t| t.strategy), Some(TitleStrategy::Filename));
        assert_eq!(outcome.date, None);
        assert_eq!(rec.case_title(), Some("KOFI ANSAH v AMA SERWAA"));
        assert_eq!(rec.trial_date(), None);
    }

    #[test]
    fn test_only_missing_fields_are_filled() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("case.htm"),
            "<body><p>JOHN DOE v. JANE ROE</p><p>26th March, 2004</p></body>",
        )
        .unwrap();
        let mut rec = record(json!({
            "caseTitle": "MENSAH v. ADJEI",
            "trialDate": "",
            "metadata": {"sourcePath": "case.htm"}
        }));

        let outcome = updater_for(dir.path()).update(&mut rec, None);

        assert_eq!(outcome.title, None);
        assert_eq!(rec.case_title(), Some("MENSAH v. ADJEI"));
        assert_eq!(rec.trial_date(), Some("2004-03-26"));
    }

    #[test]
    fn test_field_selection_limits_update() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("case.htm"),
            "<body><p>JOHN DOE v. JANE ROE</p><p>26th March, 2004</p></body>",
        )
        .unwrap();
        let mut rec = record(json!({"metadata": {"sourcePath": "case.htm"}}));

        let updater = updater_for(dir.path()).with_fields(FieldSelection {
            title: true,
            date: false,
        });
        updater.update(&mut rec, None);

        assert_eq!(rec.case_title(), Some("JOHN DOE v. JANE ROE"));
        assert_eq!(rec.trial_date(), None);
    }

    #[test]
    fn test_update_file_and_dry_run() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("case.htm"),
            "<body><p>KOFI ANSAH v. AMA SERWAA [13/04/2004]</p></body>",
        )
        .unwrap();
        let record_path = dir.path().join("record.json");
        let original = r#"{"id": "gh-1", "caseTitle": null, "metadata": {"sourcePath": "case.htm"}}"#;
        fs::write(&record_path, original).unwrap();
        let updater = updater_for(dir.path());

        let outcome = updater.update_file(&record_path, true).unwrap();
        assert!(outcome.is_updated());
        assert_eq!(fs::read_to_string(&record_path).unwrap(), original);

        updater.update_file(&record_path, false).unwrap();
        let saved = CaseRecord::load(&record_path).unwrap();
        assert_eq!(saved.case_title(), Some("KOFI ANSAH v. AMA SERWAA"));
        assert_eq!(saved.trial_date(), Some("2004-04-13"));

        let again = updater.update_file(&record_path, false).unwrap();
        assert!(!again.is_updated());
    }

    #[test]
    fn test_update_file_reports_bad_json() {
        let dir = TempDir::new().unwrap();
        let record_path = dir.path().join("broken.json");
        fs::write(&record_path, "{not json").unwrap();

        assert!(RecordUpdater::default().update_file(&record_path, false).is_err());
    }
}
