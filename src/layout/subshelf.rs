//! Subshelf layout: an arbitrary selection of books on one shelf, with a
//! ruler underneath showing how much shelf space they take up.

use log::debug;

use super::{BarKind, LabelKind, LayoutConfig, LayoutResult, PlacedBook, Placement, Rect, Row, ViewBox};
use crate::error::Result;
use crate::model::BookRecord;
use crate::shelves::ShelvedBook;

/// Y coordinate of the shelf line in the subset view.
pub const SUBSHELF_BASELINE: f64 = 500.0;
/// Vertical distance from the bottom of a ruler tick to its label.
pub const RULER_LABEL_OFFSET: f64 = 15.0;

/// Lay `records` out left to right in input order.
///
/// Every record is validated before anything is placed; the first invalid
/// one fails the whole call.
pub fn layout_subset<'a, I, F>(records: I, cfg: &LayoutConfig, mut hook: F) -> Result<LayoutResult<'a>>
where
    I: IntoIterator<Item = &'a BookRecord>,
    F: FnMut(&BookRecord, &Rect, usize) -> Placement,
{
    cfg.validate()?;
    let books = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| ShelvedBook::new(index, record))
        .collect::<Result<Vec<_>>>()?;

    let mut out = LayoutResult::new();
    let left = cfg.left_edge();
    let y = SUBSHELF_BASELINE;
    let mut x = left;
    let mut max_height = 0.0_f64;

    for (index, book) in books.iter().enumerate() {
        let (w, h) = (f64::from(book.width), f64::from(book.height));
        let computed = Rect::new(x, y - h, w, h);
        let rect = hook(book.record, &computed, index).resolve(computed);
        out.books.push(PlacedBook {
            record: book.record,
            rect,
            index,
        });

        x += w + cfg.book_spacing;
        max_height = max_height.max(h);
    }

    let placed_width = x - left;
    out.bar(BarKind::BottomShelf, left, y, placed_width, cfg.shelf_visual_height);
    out.rows.push(Row {
        shelf: None,
        baseline: y,
        max_height,
    });

    let ruler_top = y + cfg.shelf_visual_height;
    let mut tick = 0_usize;
    loop {
        let distance = tick as f64 * cfg.ruler_tick_rate;
        if distance >= placed_width {
            break;
        }
        let tick_height = if tick % 2 == 0 {
            cfg.ruler_tick_height
        } else {
            cfg.ruler_tick_height * 2.0
        };
        let tick_x = left + distance;
        out.bar(BarKind::RulerTick, tick_x, ruler_top, 1.0, tick_height);
        out.label(
            LabelKind::Ruler,
            tick_x,
            ruler_top + tick_height + RULER_LABEL_OFFSET,
            distance_label(distance),
        );
        tick += 1;
    }

    out.view_box = ViewBox {
        x: 0.0,
        y: 0.0,
        width: x + cfg.padding,
        height: ruler_top + cfg.ruler_tick_height * 2.0 + RULER_LABEL_OFFSET + cfg.padding,
    };

    debug!(
        "laid out {} books on a subshelf with {} ruler ticks",
        out.books.len(),
        tick
    );
    Ok(out)
}

/// Human-readable form of a distance in millimetres.
///
/// Whole units only, truncating: 999mm reads "99cm" and 1999mm reads "1m".
pub fn distance_label(mm: f64) -> String {
    let mm = mm.max(0.0).trunc() as u64;
    if mm >= 1000 {
        format!("{}m", mm / 1000)
    } else if mm >= 10 {
        format!("{}cm", mm / 10)
    } else {
        format!("{mm}mm")
    }
}
