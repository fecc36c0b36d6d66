//! Title fallback derived from a record's filename.
//!
//! Record files are named after the folder path of their source document,
//! with `__` standing in for path separators:
//!
//! ```text
//! SUPREME COURT__supreme court rep cases (1)__2006A__KOFI ANSAH v AMA SERWAA.json
//! ```

use std::path::Path;

use super::validate::{accept_title, collapse_whitespace};
use super::Evidence;
use crate::models::config::FilenameConfig;
use crate::models::CasefillConfig;

const SEGMENT_SEPARATOR: &str = "__";

/// Derive a title candidate from a record filename.
///
/// When an institutional prefix is present, the last segment that is not a
/// number, a year folder, or an ignored segment is taken as the title.
/// Otherwise the whole name is used with separators turned into spaces.
pub fn title_from_filename(name: &str, rules: &FilenameConfig) -> Option<String> {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name);
    let base = base.strip_suffix(".json").unwrap_or(base);

    let mut candidate = base;
    if let Some(rest) = rules
        .prefixes
        .iter()
        .find_map(|prefix| base.strip_prefix(prefix.as_str()))
    {
        candidate = rest
            .rsplit(SEGMENT_SEPARATOR)
            .find(|segment| is_title_segment(segment, rules))
            .unwrap_or(rest);
    }

    let title = collapse_whitespace(&candidate.replace(SEGMENT_SEPARATOR, " "));
    (!title.is_empty()).then_some(title)
}

/// Last resort: the record's own filename.
pub fn filename(evidence: &Evidence<'_>, config: &CasefillConfig) -> Option<String> {
    let candidate = title_from_filename(evidence.record_name()?, &config.filename)?;
    accept_title(&candidate, config.extraction.min_title_length)
}

fn is_title_segment(segment: &str, rules: &FilenameConfig) -> bool {
    let segment = segment.trim();
    !segment.is_empty()
        && !segment.chars().all(|c| c.is_ascii_digit())
        && !is_year_folder(segment)
        && !rules
            .ignored_segments
            .iter()
            .any(|ignored| ignored.eq_ignore_ascii_case(segment))
}

/// "2006", "2006A", "1998-9".
fn is_year_folder(segment: &str) -> bool {
    if segment.len() > 6 {
        return false;
    }
    segment
        .get(..4)
        .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
        .and_then(|year| year.parse::<u16>().ok())
        .is_some_and(|year| (1800..=2099).contains(&year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn derive(name: &str) -> Option<String> {
        title_from_filename(name, &FilenameConfig::default())
    }

    #[test]
    fn test_prefixed_name_takes_last_title_segment() {
        assert_eq!(
            derive("SUPREME COURT__supreme court rep cases (1)__2006A__KOFI ANSAH v AMA SERWAA.json"),
            Some("KOFI ANSAH v AMA SERWAA".to_string())
        );
        assert_eq!(
            derive("/data/records/COURT OF APPEAL__2001__BOATENG v. ADU__TEMP.json"),
            Some("BOATENG v. ADU".to_string())
        );
        assert_eq!(
            derive("SUPREME COURT__OLD MENSAH v ADJEI__2004__KOFI ANSAH v AMA SERWAA__12__TEMP.json"),
            Some("KOFI ANSAH v AMA SERWAA".to_string())
        );
    }

    #[test]
    fn test_unprefixed_name_keeps_all_segments() {
        assert_eq!(derive("MENSAH__v__ADJEI.json"), Some("MENSAH v ADJEI".to_string()));
    }

    #[test]
    fn test_prefixed_name_without_title_segment() {
        assert_eq!(derive("WACA__1956__TEMP.json"), Some("1956 TEMP".to_string()));
    }

    #[test]
    fn test_year_folders() {
        assert!(is_year_folder("2006"));
        assert!(is_year_folder("2006A"));
        assert!(is_year_folder("1998-9"));
        assert!(!is_year_folder("2004 GHASC 12"));
        assert!(!is_year_folder("3000"));
        assert!(!is_year_folder("WACA"));
    }

    #[test]
    fn test_filename_strategy_applies_acceptance() {
        let config = CasefillConfig::default();
        let run = |name: &'static str| filename(&Evidence::empty().with_record_name(Some(name)), &config);

        assert_eq!(
            run("WALR__1957__KWAME MENSAH v ABENA OWUSU.json"),
            Some("KWAME MENSAH v ABENA OWUSU".to_string())
        );
        assert_eq!(run("WACA__1956__TEMP.json"), None);
        assert_eq!(run("pages.gif"), None);
        assert_eq!(filename(&Evidence::empty(), &config), None);
    }
}
