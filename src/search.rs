//! Catalogue search: one predicate per query field, combined with AND.
//!
//! Search is deliberately forgiving of dirty data. An empty query value, an
//! unknown field name or a date bound that is not a number simply does not
//! constrain the result.

use log::debug;
use serde::Serialize;

use crate::model::BookRecord;

const AUTHOR_COLUMN: &str = "Heading";
const TITLE_COLUMN: &str = "Title";
const DATE_COLUMN: &str = "Date1";
const COUNTRY_COLUMN: &str = "Country";

/// Prefix of the display id attached to every hit.
pub const RESULT_ID_PREFIX: &str = "search-result-";

/// Query fields understood by [`search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Shelfmark,
    Author,
    Title,
    DateRangeStart,
    DateRangeEnd,
    Country,
    AnyField,
}

impl SearchField {
    pub const ALL: [SearchField; 7] = [
        SearchField::Shelfmark,
        SearchField::Author,
        SearchField::Title,
        SearchField::DateRangeStart,
        SearchField::DateRangeEnd,
        SearchField::Country,
        SearchField::AnyField,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Name of the query input this field is read from.
    pub fn name(self) -> &'static str {
        match self {
            SearchField::Shelfmark => "shelfmark",
            SearchField::Author => "author",
            SearchField::Title => "title",
            SearchField::DateRangeStart => "daterangestart",
            SearchField::DateRangeEnd => "daterangeend",
            SearchField::Country => "country",
            SearchField::AnyField => "anyfield",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    Shelfmark(String),
    /// Lowercased needle matched against one column
    Contains(&'static str, String),
    Equals(&'static str, String),
    YearFrom(i64),
    YearTo(i64),
    /// Lowercased needle matched against every value on the record
    AnyField(String),
}

impl Predicate {
    fn compile(field: SearchField, value: &str) -> Option<Self> {
        let predicate = match field {
            SearchField::Shelfmark => Predicate::Shelfmark(value.to_string()),
            SearchField::Author => Predicate::Contains(AUTHOR_COLUMN, value.to_lowercase()),
            SearchField::Title => Predicate::Contains(TITLE_COLUMN, value.to_lowercase()),
            SearchField::Country => Predicate::Equals(COUNTRY_COLUMN, value.to_string()),
            SearchField::AnyField => Predicate::AnyField(value.to_lowercase()),
            SearchField::DateRangeStart | SearchField::DateRangeEnd => {
                let Some(year) = leading_integer(value) else {
                    debug!("ignoring non-numeric {} bound {value:?}", field.name());
                    return None;
                };
                if field == SearchField::DateRangeStart {
                    Predicate::YearFrom(year)
                } else {
                    Predicate::YearTo(year)
                }
            }
        };
        Some(predicate)
    }

    fn matches(&self, record: &BookRecord) -> bool {
        match self {
            Predicate::Shelfmark(mark) => record.shelfmark == *mark,
            Predicate::Contains(column, needle) => record
                .field(column)
                .is_some_and(|v| v.as_text().to_lowercase().contains(needle.as_str())),
            Predicate::Equals(column, expected) => {
                record.field(column).is_some_and(|v| v.as_text() == expected.as_str())
            }
            Predicate::YearFrom(start) => year_of(record).is_some_and(|y| y >= *start as f64),
            Predicate::YearTo(end) => year_of(record).is_some_and(|y| y <= *end as f64),
            Predicate::AnyField(needle) => record
                .text_values()
                .any(|v| v.to_lowercase().contains(needle.as_str())),
        }
    }
}

/// A parsed set of query fields, reusable across datasets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    predicates: Vec<Predicate>,
}

impl SearchQuery {
    /// Build a query from `(field name, value)` pairs. Empty values and
    /// unrecognised names are dropped.
    pub fn parse<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut predicates = Vec::new();
        for (name, value) in fields {
            let (name, value) = (name.as_ref(), value.as_ref());
            if value.is_empty() {
                continue;
            }
            let Some(field) = SearchField::from_name(name) else {
                debug!("ignoring unrecognised search field {name:?}");
                continue;
            };
            predicates.extend(Predicate::compile(field, value));
        }
        Self { predicates }
    }

    /// True when no field constrains the result, so every record matches.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, record: &BookRecord) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }

    /// Matching records in input order.
    pub fn run<'a>(&self, records: &'a [BookRecord]) -> Vec<SearchHit<'a>> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .map(SearchHit::new)
            .collect()
    }
}

/// A matching record and the id it is displayed under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit<'a> {
    pub id: String,
    pub record: &'a BookRecord,
}

impl<'a> SearchHit<'a> {
    fn new(record: &'a BookRecord) -> Self {
        Self {
            id: format!("{RESULT_ID_PREFIX}{}", record.shelfmark),
            record,
        }
    }
}

/// Return the records for which every non-empty, recognised field matches.
pub fn search<'a, I, K, V>(records: &'a [BookRecord], fields: I) -> Vec<SearchHit<'a>>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let query = SearchQuery::parse(fields);
    let hits = query.run(records);
    debug!("search matched {} of {} records", hits.len(), records.len());
    hits
}

fn year_of(record: &BookRecord) -> Option<f64> {
    // Blank dates are unknown here, not year 0 as `as_number` would have it.
    record
        .field(DATE_COLUMN)
        .filter(|v| !v.is_blank())
        .and_then(|v| v.as_number())
}

/// Parse the integer a string starts with, ignoring leading whitespace and
/// any trailing text ("1750s" is 1750).
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_integer_matches_loose_parsing() {
        assert_eq!(leading_integer("1750"), Some(1750));
        assert_eq!(leading_integer("  1750s"), Some(1750));
        assert_eq!(leading_integer("-44"), Some(-44));
        assert_eq!(leading_integer("c. 1750"), None);
        assert_eq!(leading_integer(""), None);
    }

    #[test]
    fn field_names_round_trip() {
        for field in SearchField::ALL {
            assert_eq!(SearchField::from_name(field.name()), Some(field));
        }
        assert_eq!(SearchField::from_name("publisher"), None);
    }

    #[test]
    fn empty_and_unknown_fields_are_dropped() {
        let query = SearchQuery::parse([("title", ""), ("publisher", "Elsevier"), ("daterangeend", "soon")]);
        assert!(query.is_empty());
        assert!(query.matches(&BookRecord::new("anything")));
    }

    #[test]
    fn missing_columns_do_not_match() {
        let record = BookRecord::new("A1");
        assert!(!SearchQuery::parse([("author", "smith")]).matches(&record));
        assert!(!SearchQuery::parse([("daterangestart", "1700")]).matches(&record));
        assert!(SearchQuery::parse([("anyfield", "a1")]).matches(&record));
    }
}
