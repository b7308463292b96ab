//! Catalogue ingestion — JSON rows into [`BookRecord`]s, plus the optional
//! repair pass that substitutes fallback dimensions.

use std::path::Path;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{BookRecord, FieldValue};
use crate::shelves::validate;

/// Width given to a record whose width is unusable.
pub const FALLBACK_WIDTH: u32 = 42;
/// Height given to a record whose height is unusable.
pub const FALLBACK_HEIGHT: u32 = 150;

/// Parse a JSON array of catalogue rows. Rows with no content at all are
/// dropped; nothing else is validated here.
pub fn parse_catalogue_json(json: &str) -> Result<Vec<BookRecord>> {
    let rows: Vec<BookRecord> = serde_json::from_str(json)?;
    let total = rows.len();
    let records: Vec<BookRecord> = rows.into_iter().filter(|r| !r.is_blank()).collect();
    if records.len() < total {
        debug!("dropped {} blank catalogue rows", total - records.len());
    }
    Ok(records)
}

/// Read and parse a JSON catalogue file.
pub fn parse_catalogue_file<P: AsRef<Path>>(path: P) -> Result<Vec<BookRecord>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalogue_json(&json)
}

/// Give an invalid record fallback dimensions so it can still be shelved.
///
/// Any width or height that is not a positive integer is replaced and the
/// record is flagged with `missing_data_present`. Returns whether the record
/// was touched. A record without a shelf cannot be repaired and stays invalid.
pub fn repair(record: &mut BookRecord) -> bool {
    if validate(record) {
        return false;
    }

    let usable = |v: &Option<FieldValue>| {
        v.as_ref()
            .and_then(FieldValue::as_integer)
            .is_some_and(|n| n > 0 && n <= i64::from(u32::MAX))
    };
    if !usable(&record.width) {
        record.width = Some(FALLBACK_WIDTH.into());
    }
    if !usable(&record.height) {
        record.height = Some(FALLBACK_HEIGHT.into());
    }
    record.missing_data_present = true;

    if record.shelf.is_none() {
        warn!("record {:?} has no shelf and cannot be laid out", record.shelfmark);
    } else {
        warn!("record {:?} given fallback dimensions", record.shelfmark);
    }
    true
}

/// Apply [`repair`] to every record.
pub fn prepare_catalogue(mut records: Vec<BookRecord>) -> Vec<BookRecord> {
    let repaired = records.iter_mut().map(repair).filter(|&r| r).count();
    if repaired > 0 {
        debug!("repaired {repaired} of {} records", records.len());
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repair_substitutes_only_the_broken_dimension() {
        let mut record = BookRecord::new("A").on_shelf("X", "1").with_size("", "210");
        assert!(repair(&mut record));
        assert!(record.missing_data_present);
        assert_eq!(record.width, Some(FieldValue::Number(42.0)));
        assert_eq!(record.height, Some(FieldValue::from("210")));
        assert!(validate(&record));
    }

    #[test]
    fn repair_leaves_valid_records_alone() {
        let mut record = BookRecord::new("A").on_shelf("X", "1").with_size(30u32, 200u32);
        let before = record.clone();
        assert!(!repair(&mut record));
        assert_eq!(record, before);
    }

    #[test]
    fn shelfless_record_stays_invalid() {
        let mut record = BookRecord::new("A").with_size("n/a", "n/a");
        assert!(repair(&mut record));
        assert_eq!(record.height, Some(FieldValue::Number(150.0)));
        assert!(!validate(&record));
    }

    #[test]
    fn blank_trailing_row_is_dropped() {
        let json = r#"[
            {"Shelfmark": "A1", "Shelf": "X", "Shelf_section": "1", "width": "10", "height": "100"},
            {"Shelfmark": "", "Shelf": "", "Shelf_section": "", "width": "", "height": ""}
        ]"#;
        let records = parse_catalogue_json(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].shelfmark, "A1");
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = parse_catalogue_file("does/not/exist.json").unwrap_err();
        assert!(matches!(err, Error::Io { ref path, .. } if path.ends_with("exist.json")));
    }
}
