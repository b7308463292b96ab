//! SVG builder — accumulates SVG elements and produces the final string.

use crate::layout::{Rect, ViewBox};

use super::constants::*;

// ═══════════════════════════════════════════════════════════════════════
// SvgBuilder
// ═══════════════════════════════════════════════════════════════════════

pub(super) struct SvgBuilder {
    pub(super) elements: Vec<String>,
    view_box: ViewBox,
}

impl SvgBuilder {
    pub(super) fn new(view_box: ViewBox) -> Self {
        Self {
            elements: Vec::new(),
            view_box,
        }
    }

    pub(super) fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{}" width="{}" height="{}">"#,
            self.view_box.to_property_string(),
            self.view_box.width,
            self.view_box.height
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub(super) fn rect(&mut self, r: &Rect, fill: &str) {
        self.elements.push(format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            r.x,
            r.y,
            r.width,
            r.height,
            escape(fill)
        ));
    }

    /// A book spine, addressable by its shelfmark.
    pub(super) fn book(&mut self, r: &Rect, id: &str, missing_data: bool) {
        let (class, fill) = if missing_data {
            ("book missing-data", MISSING_DATA_BOOK_COLOR)
        } else {
            ("book", BOOK_COLOR)
        };
        self.elements.push(format!(
            r#"<rect id="{}" class="{}" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" stroke="{}" stroke-width="{:.1}"/>"#,
            escape(id),
            class,
            r.x,
            r.y,
            r.width,
            r.height,
            fill,
            BOOK_STROKE_COLOR,
            BOOK_STROKE_WIDTH
        ));
    }

    pub(super) fn text(&mut self, x: f64, y: f64, content: &str, size: f64, fill: &str) {
        self.elements.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.0}" fill="{}">{}</text>"#,
            x,
            y,
            size,
            fill,
            escape(content)
        ));
    }
}

/// Escape text for use in element content and double-quoted attributes.
pub(super) fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
