//! Shelf renderer — converts a computed layout into SVG output.
//!
//! The renderer only draws what the layout engine placed; it computes no
//! geometry of its own. Bars come first so books and labels sit on top.

mod constants;
mod svg_builder;

use crate::layout::{BarKind, LabelKind, LayoutConfig, LayoutResult};
use constants::*;
use svg_builder::SvgBuilder;

/// Render a layout into a complete SVG string.
///
/// Shelf bars and separators use `cfg.shelf_colour`. Each book becomes a
/// `<rect class="book">` whose `id` is its shelfmark.
pub fn render_layout_to_svg(layout: &LayoutResult<'_>, cfg: &LayoutConfig) -> String {
    let mut svg = SvgBuilder::new(layout.view_box);

    for bar in &layout.bars {
        let fill = match bar.kind {
            BarKind::RulerTick => RULER_COLOR,
            _ => cfg.shelf_colour.as_str(),
        };
        svg.rect(&bar.rect, fill);
    }

    for label in &layout.labels {
        let size = match label.kind {
            LabelKind::Shelf => SHELF_LABEL_SIZE,
            LabelKind::Ruler => RULER_LABEL_SIZE,
        };
        svg.text(label.x, label.y, &label.text, size, LABEL_COLOR);
    }

    for book in &layout.books {
        svg.book(&book.rect, &book.record.shelfmark, book.record.missing_data_present);
    }

    svg.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{keep, layout_library, layout_subset};
    use crate::model::BookRecord;
    use crate::shelves::group;

    #[test]
    fn library_svg_has_books_labels_and_bars() {
        let mut patched = BookRecord::new("F.2").on_shelf("F", "1").with_size(20u32, 180u32);
        patched.missing_data_present = true;
        let records = vec![
            BookRecord::new("F.1").on_shelf("F", "1").with_size(30u32, 200u32),
            patched,
        ];
        let grouping = group(&records).unwrap();
        let cfg = LayoutConfig::default();
        let layout = layout_library(&grouping, &cfg, keep);
        let svg = render_layout_to_svg(&layout, &cfg);

        assert!(svg.contains(&format!(r#"viewBox="{}""#, layout.view_box)));
        assert!(svg.contains(r#"id="F.1" class="book""#));
        assert!(svg.contains(r#"id="F.2" class="book missing-data""#));
        assert!(svg.contains(r#"font-size="40" fill="grey">F</text>"#));
        assert_eq!(svg.matches(r##"fill="#241710""##).count(), layout.bars.len());
    }

    #[test]
    fn subshelf_svg_draws_grey_ruler() {
        let records = vec![BookRecord::new("A").on_shelf("X", "1").with_size(120u32, 200u32)];
        let cfg = LayoutConfig::default();
        let layout = layout_subset(&records, &cfg, keep).unwrap();
        let svg = render_layout_to_svg(&layout, &cfg);

        assert!(svg.contains(">0mm</text>"));
        assert!(svg.contains(">5cm</text>"));
        assert!(svg.contains(">10cm</text>"));
        assert!(svg.contains(r#"width="1.0" height="30.0" fill="grey""#));
    }
}
