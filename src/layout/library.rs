//! Full-library layout: every shelf stacked top to bottom.

use log::debug;

use super::{BarKind, LabelKind, LayoutConfig, LayoutResult, PlacedBook, Placement, Rect, Row, ViewBox};
use crate::model::BookRecord;
use crate::shelves::ShelfGrouping;

/// Lay out every shelf of `grouping`.
///
/// Each shelf is as tall as its tallest book plus `gap_height`. Within a
/// shelf, bays occupy fixed `bay_width` columns regardless of how much of
/// the column their books fill; a bay whose books run past its column
/// overlaps the next one, and that overflow still counts towards the view
/// box width.
///
/// `hook` is called once per book with the computed rectangle and the
/// book's index within its shelf.
pub fn layout_library<'a, F>(grouping: &ShelfGrouping<'a>, cfg: &LayoutConfig, mut hook: F) -> LayoutResult<'a>
where
    F: FnMut(&BookRecord, &Rect, usize) -> Placement,
{
    let mut out = LayoutResult::new();
    let left = cfg.left_edge();
    let shelf_span = cfg.bay_width * 3.0;

    let mut y = 0.0;
    let mut max_width = left + shelf_span;

    out.bar(BarKind::TopShelf, left, y, shelf_span, cfg.shelf_visual_height);

    for (name, shelf) in grouping.shelves() {
        let max_height = f64::from(shelf.max_height());
        let separator_height = max_height + cfg.gap_height;
        y += separator_height;

        out.label(LabelKind::Shelf, cfg.padding, y - cfg.padding, name);
        out.bar(BarKind::Shelf, left, y, shelf_span, cfg.shelf_visual_height);
        out.bar(
            BarKind::ShelfEnd,
            left,
            y - separator_height,
            cfg.shelf_visual_width,
            separator_height,
        );
        out.rows.push(Row {
            shelf: Some(name.to_string()),
            baseline: y,
            max_height,
        });

        let mut x = left + cfg.shelf_visual_width + cfg.book_spacing;
        let mut furthest = x;
        let mut index = 0;

        for (bay_number, (_, bay)) in shelf.bays().enumerate() {
            for book in bay {
                let (w, h) = (f64::from(book.width), f64::from(book.height));
                let computed = Rect::new(x, y - h, w, h);
                let rect = hook(book.record, &computed, index).resolve(computed);
                out.books.push(PlacedBook {
                    record: book.record,
                    rect,
                    index,
                });

                x += w + cfg.book_spacing;
                index += 1;
            }
            furthest = furthest.max(x);

            x = left + cfg.bay_width * (bay_number + 1) as f64;
            out.bar(
                BarKind::BaySeparator,
                x,
                y - separator_height,
                cfg.shelf_visual_width,
                separator_height,
            );
            x += cfg.shelf_visual_width + cfg.book_spacing;
        }

        let extent = x.max(furthest) + cfg.padding;
        max_width = max_width.max(extent);
    }

    y += cfg.gap_height + cfg.padding;
    out.view_box = ViewBox {
        x: 0.0,
        y: 0.0,
        width: max_width,
        height: y,
    };

    debug!(
        "laid out {} books on {} shelves, view box {}",
        out.books.len(),
        out.rows.len(),
        out.view_box
    );
    out
}
