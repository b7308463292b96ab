//! Data model for catalogue records.
//!
//! Rows usually come from a header-mode CSV export, so every column may
//! arrive as a string. Numeric coercion happens here rather than at load time.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// A single catalogue value, typed by the shape it arrived in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Loose numeric coercion: text is trimmed, blank text counts as zero,
    /// anything else must parse as a finite decimal number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Some(0.0);
                }
                s.parse::<f64>().ok().filter(|n| n.is_finite())
            }
            _ => None,
        }
    }

    /// The value as an integer, if it coerces to a number with no fraction.
    pub fn as_integer(&self) -> Option<i64> {
        self.as_number()
            .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
            .map(|n| n as i64)
    }

    /// String form used for text matching.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    fn into_key(self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Text(s) => Some(s),
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Number(f64::from(n))
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

/// One catalogued physical volume.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookRecord {
    /// Unique identifier (e.g. "Fag.H.3.60")
    #[serde(rename = "Shelfmark", default, deserialize_with = "de_shelfmark")]
    pub shelfmark: String,
    /// Shelf the volume stands on
    #[serde(rename = "Shelf", default, deserialize_with = "de_key")]
    pub shelf: Option<String>,
    /// Bay (sub-section) within the shelf
    #[serde(rename = "Shelf_section", default, deserialize_with = "de_key")]
    pub shelf_section: Option<String>,
    /// Spine width, as supplied
    #[serde(default)]
    pub width: Option<FieldValue>,
    /// Spine height, as supplied
    #[serde(default)]
    pub height: Option<FieldValue>,
    /// Set when the loader substituted fallback dimensions
    #[serde(
        rename = "missingDataPresent",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub missing_data_present: bool,
    /// Every other column (Title, Heading, Country, Date1, ...) in source order
    #[serde(flatten)]
    pub fields: IndexMap<String, FieldValue>,
}

impl BookRecord {
    pub fn new(shelfmark: impl Into<String>) -> Self {
        Self {
            shelfmark: shelfmark.into(),
            ..Self::default()
        }
    }

    pub fn on_shelf(mut self, shelf: impl Into<String>, bay: impl Into<String>) -> Self {
        self.shelf = Some(shelf.into());
        self.shelf_section = Some(bay.into());
        self
    }

    pub fn with_size(mut self, width: impl Into<FieldValue>, height: impl Into<FieldValue>) -> Self {
        self.width = Some(width.into());
        self.height = Some(height.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Look up a descriptive column by its header name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Bay key used for grouping; a record without a section shares the
    /// empty-string bay.
    pub fn bay_key(&self) -> &str {
        self.shelf_section.as_deref().unwrap_or("")
    }

    /// String forms of every non-null value on the record, identity columns first.
    pub fn text_values(&self) -> impl Iterator<Item = Cow<'_, str>> {
        let identity = [
            Some(Cow::Borrowed(self.shelfmark.as_str())),
            self.shelf.as_deref().map(Cow::Borrowed),
            self.shelf_section.as_deref().map(Cow::Borrowed),
        ];
        let dimensions = [self.width.as_ref(), self.height.as_ref()];

        identity
            .into_iter()
            .flatten()
            .chain(
                dimensions
                    .into_iter()
                    .flatten()
                    .chain(self.fields.values())
                    .filter(|v| !matches!(v, FieldValue::Null))
                    .map(FieldValue::as_text),
            )
    }

    /// True when every column is empty, as with the trailing row some CSV
    /// exporters emit.
    pub fn is_blank(&self) -> bool {
        self.shelfmark.trim().is_empty()
            && self.shelf.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.shelf_section.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.width.as_ref().map_or(true, FieldValue::is_blank)
            && self.height.as_ref().map_or(true, FieldValue::is_blank)
            && self.fields.values().all(FieldValue::is_blank)
    }
}

fn de_key<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<FieldValue>::deserialize(deserializer)?;
    Ok(value.and_then(FieldValue::into_key))
}

fn de_shelfmark<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(de_key(deserializer)?.unwrap_or_default())
}
