//! Shared constants for the SVG renderer (all in SVG user units).

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const BOOK_COLOR: &str = "#a67c52";
pub(super) const MISSING_DATA_BOOK_COLOR: &str = "#d9d0c1";
pub(super) const BOOK_STROKE_COLOR: &str = "#3b2a1a";
pub(super) const LABEL_COLOR: &str = "grey";
pub(super) const RULER_COLOR: &str = "grey";

// ── Text ────────────────────────────────────────────────────────────
pub(super) const SHELF_LABEL_SIZE: f64 = 40.0;
pub(super) const RULER_LABEL_SIZE: f64 = 10.0;

// ── Strokes ─────────────────────────────────────────────────────────
pub(super) const BOOK_STROKE_WIDTH: f64 = 0.5;
