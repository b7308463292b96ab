//! Record validation and the shelf → bay grouping consumed by the layout engine.

use indexmap::IndexMap;
use log::debug;

use crate::error::{Dimension, Error, InvalidReason, Result};
use crate::model::{BookRecord, FieldValue};

/// Returns true if the record has positive integer dimensions and a shelf.
pub fn validate(record: &BookRecord) -> bool {
    check(record).is_ok()
}

/// Check a record for layout, returning its coerced `(width, height)`.
pub fn check(record: &BookRecord) -> std::result::Result<(u32, u32), InvalidReason> {
    let width = dimension(record.width.as_ref(), Dimension::Width)?;
    let height = dimension(record.height.as_ref(), Dimension::Height)?;
    if record.shelf.is_none() {
        return Err(InvalidReason::MissingShelf);
    }
    Ok((width, height))
}

fn dimension(value: Option<&FieldValue>, which: Dimension) -> std::result::Result<u32, InvalidReason> {
    let value = value.ok_or(InvalidReason::MissingDimension(which))?;
    let n = value.as_number().ok_or(InvalidReason::NonInteger(which))?;
    if n.fract() != 0.0 {
        return Err(InvalidReason::NonInteger(which));
    }
    if n <= 0.0 {
        return Err(InvalidReason::NonPositive(which));
    }
    if n > f64::from(u32::MAX) {
        return Err(InvalidReason::OutOfRange(which));
    }
    Ok(n as u32)
}

/// A validated record with its coerced dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShelvedBook<'a> {
    pub record: &'a BookRecord,
    pub width: u32,
    pub height: u32,
}

impl<'a> ShelvedBook<'a> {
    /// Validate `record`; `index` is its position in the input, for error reporting.
    pub fn new(index: usize, record: &'a BookRecord) -> Result<Self> {
        let (width, height) = check(record).map_err(|reason| Error::InvalidRecord {
            index,
            shelfmark: record.shelfmark.clone(),
            reason,
        })?;
        Ok(Self { record, width, height })
    }
}

/// The bays of one shelf, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shelf<'a> {
    bays: IndexMap<String, Vec<ShelvedBook<'a>>>,
}

impl<'a> Shelf<'a> {
    pub fn bays(&self) -> impl Iterator<Item = (&str, &[ShelvedBook<'a>])> {
        self.bays.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn bay(&self, id: &str) -> Option<&[ShelvedBook<'a>]> {
        self.bays.get(id).map(Vec::as_slice)
    }

    pub fn bay_count(&self) -> usize {
        self.bays.len()
    }

    pub fn books(&self) -> impl Iterator<Item = &ShelvedBook<'a>> {
        self.bays.values().flatten()
    }

    /// Height of the tallest book on the shelf; this sets the shelf's vertical extent.
    pub fn max_height(&self) -> u32 {
        self.books().map(|b| b.height).max().unwrap_or(0)
    }
}

/// Records partitioned by shelf, then bay. Built once from a dataset and
/// never modified; rebuild it when the dataset changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShelfGrouping<'a> {
    shelves: IndexMap<String, Shelf<'a>>,
}

impl<'a> ShelfGrouping<'a> {
    pub fn shelves(&self) -> impl Iterator<Item = (&str, &Shelf<'a>)> {
        self.shelves.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn shelf(&self, id: &str) -> Option<&Shelf<'a>> {
        self.shelves.get(id)
    }

    pub fn len(&self) -> usize {
        self.shelves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shelves.is_empty()
    }

    /// All records, shelf by shelf and bay by bay.
    pub fn books(&self) -> impl Iterator<Item = &ShelvedBook<'a>> {
        self.shelves.values().flat_map(Shelf::books)
    }

    pub fn book_count(&self) -> usize {
        self.books().count()
    }
}

/// Group records by `(Shelf, Shelf_section)`, keeping input order within each
/// bay. Fails on the first record that does not validate.
pub fn group(records: &[BookRecord]) -> Result<ShelfGrouping<'_>> {
    let mut grouping = ShelfGrouping::default();

    for (index, record) in records.iter().enumerate() {
        let book = ShelvedBook::new(index, record)?;
        let shelf = record.shelf.as_deref().unwrap_or_default();
        grouping
            .shelves
            .entry(shelf.to_string())
            .or_default()
            .bays
            .entry(record.bay_key().to_string())
            .or_default()
            .push(book);
    }

    debug!(
        "grouped {} records into {} shelves",
        records.len(),
        grouping.shelves.len()
    );
    Ok(grouping)
}
