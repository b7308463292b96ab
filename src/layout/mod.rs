//! Layout engine — turns shelved records into positioned rectangles.
//!
//! Two modes share one output type:
//! - [`layout_library`] draws every shelf of a [`ShelfGrouping`], bays packed
//!   into fixed-width columns;
//! - [`layout_subset`] lines an arbitrary selection of records up on a single
//!   shelf above a measuring ruler.
//!
//! Coordinates follow SVG conventions: origin at the top left, y grows
//! downwards, and books stand with their bottom edge on the shelf line.
//!
//! [`ShelfGrouping`]: crate::shelves::ShelfGrouping

mod config;
mod library;
mod subshelf;

use std::fmt;

use serde::Serialize;

use crate::model::BookRecord;

pub use config::*;
pub use library::layout_library;
pub use subshelf::{distance_label, layout_subset, RULER_LABEL_OFFSET, SUBSHELF_BASELINE};

// ═══════════════════════════════════════════════════════════════════════
// Geometry
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Minimal area enclosing a generated layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Value for an SVG `viewBox` attribute.
    pub fn to_property_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Placement hook
// ═══════════════════════════════════════════════════════════════════════

/// What a placement hook wants done with a book's computed rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Keep,
    Replace(Rect),
}

impl Placement {
    fn resolve(self, computed: Rect) -> Rect {
        match self {
            Placement::Keep => computed,
            Placement::Replace(rect) => rect,
        }
    }
}

/// Hook that leaves every rectangle as computed.
pub fn keep(_record: &BookRecord, _rect: &Rect, _index: usize) -> Placement {
    Placement::Keep
}

// ═══════════════════════════════════════════════════════════════════════
// Output
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBook<'a> {
    pub record: &'a BookRecord,
    pub rect: Rect,
    /// Position within the shelf (library mode) or the row (subset mode)
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarKind {
    /// Bar above the first shelf
    TopShelf,
    /// Horizontal bar each shelf's books stand on
    Shelf,
    /// Vertical separator at the left end of a shelf
    ShelfEnd,
    /// Vertical separator closing a bay
    BaySeparator,
    /// Single shelf of the subset view
    BottomShelf,
    RulerTick,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bar {
    pub kind: BarKind,
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelKind {
    Shelf,
    Ruler,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub kind: LabelKind,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// One horizontal row of books: the baseline they stand on and the height
/// of the tallest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// Shelf identifier; `None` for the subset view
    pub shelf: Option<String>,
    pub baseline: f64,
    pub max_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult<'a> {
    pub books: Vec<PlacedBook<'a>>,
    pub bars: Vec<Bar>,
    pub labels: Vec<Label>,
    pub rows: Vec<Row>,
    pub view_box: ViewBox,
}

impl<'a> LayoutResult<'a> {
    fn new() -> Self {
        Self {
            books: Vec::new(),
            bars: Vec::new(),
            labels: Vec::new(),
            rows: Vec::new(),
            view_box: ViewBox {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            },
        }
    }

    fn bar(&mut self, kind: BarKind, x: f64, y: f64, width: f64, height: f64) {
        self.bars.push(Bar {
            kind,
            rect: Rect::new(x, y, width, height),
        });
    }

    fn label(&mut self, kind: LabelKind, x: f64, y: f64, text: impl Into<String>) {
        self.labels.push(Label {
            kind,
            x,
            y,
            text: text.into(),
        });
    }

    pub fn bars_of(&self, kind: BarKind) -> impl Iterator<Item = &Bar> {
        self.bars.iter().filter(move |b| b.kind == kind)
    }

    pub fn labels_of(&self, kind: LabelKind) -> impl Iterator<Item = &Label> {
        self.labels.iter().filter(move |l| l.kind == kind)
    }

    /// Find a placed book by shelfmark.
    pub fn book(&self, shelfmark: &str) -> Option<&PlacedBook<'a>> {
        self.books.iter().find(|b| b.record.shelfmark == shelfmark)
    }
}
