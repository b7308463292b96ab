//! shelflib — lays a book catalogue out as library shelving and searches it.
//!
//! Records are grouped by shelf and bay, placed as rectangles standing on
//! their shelf line, and optionally rendered to SVG.
//!
//! # Example
//! ```no_run
//! use shelflib::{group, keep, layout_library, parse_catalogue_file, LayoutConfig};
//!
//! let records = parse_catalogue_file("catalogue.json").unwrap();
//! let grouping = group(&records).unwrap();
//! let layout = layout_library(&grouping, &LayoutConfig::default(), keep);
//! println!("Shelves: {}", layout.rows.len());
//! println!("View box: {}", layout.view_box);
//! ```

pub mod catalogue;
pub mod error;
pub mod layout;
pub mod model;
pub mod renderer;
pub mod search;
pub mod shelves;

pub use catalogue::{parse_catalogue_file, parse_catalogue_json, prepare_catalogue, repair};
pub use error::{Dimension, Error, InvalidReason, Result};
pub use layout::{
    keep, layout_library, layout_subset, LayoutConfig, LayoutResult, Placement, Rect, ViewBox,
};
pub use model::{BookRecord, FieldValue};
pub use renderer::render_layout_to_svg;
pub use search::{search, SearchField, SearchHit, SearchQuery};
pub use shelves::{check, group, validate, ShelfGrouping};

/// Serialize a layout to a JSON string.
/// Useful for passing data across FFI boundaries.
pub fn layout_to_json(layout: &LayoutResult<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(layout)?)
}

/// Parse a JSON catalogue, give broken rows fallback dimensions, and render
/// the whole library to SVG.
///
/// `cfg` of `None` uses the default layout configuration.
pub fn render_catalogue_to_svg(json: &str, cfg: Option<&LayoutConfig>) -> Result<String> {
    let default_cfg;
    let cfg = match cfg {
        Some(cfg) => cfg,
        None => {
            default_cfg = LayoutConfig::default();
            &default_cfg
        }
    };
    cfg.validate()?;

    let records = prepare_catalogue(parse_catalogue_json(json)?);
    let grouping = group(&records)?;
    let layout = layout_library(&grouping, cfg, keep);
    Ok(render_layout_to_svg(&layout, cfg))
}

/// Search a JSON catalogue and render the hits side by side on a single
/// measured shelf.
pub fn render_search_subshelf_to_svg<I, K, V>(
    json: &str,
    fields: I,
    cfg: Option<&LayoutConfig>,
) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let cfg = cfg.cloned().unwrap_or_default();
    let records = prepare_catalogue(parse_catalogue_json(json)?);
    let hits = search(&records, fields);
    let layout = layout_subset(hits.iter().map(|h| h.record), &cfg, keep)?;
    Ok(render_layout_to_svg(&layout, &cfg))
}

/// Search a JSON catalogue and return the hits as a JSON array.
pub fn search_catalogue_json<I, K, V>(json: &str, fields: I) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let records = parse_catalogue_json(json)?;
    let hits = search(&records, fields);
    Ok(serde_json::to_string_pretty(&hits)?)
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI — for embedding in native shells
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

unsafe fn str_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

fn into_c_string(result: Result<String>) -> *mut c_char {
    match result {
        Ok(s) => CString::new(s).map_or(std::ptr::null_mut(), CString::into_raw),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Render a JSON catalogue to SVG and return it as a C string.
/// The caller must free the returned string with `shelflib_free_string`.
///
/// `cfg_json` may be null to use the default layout; otherwise it is a JSON
/// object with any subset of the layout options.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 C string. `cfg_json` must be
/// null or a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn shelflib_render_catalogue(
    json: *const c_char,
    cfg_json: *const c_char,
) -> *mut c_char {
    let Some(json) = (unsafe { str_arg(json) }) else {
        return std::ptr::null_mut();
    };
    let cfg = if cfg_json.is_null() {
        LayoutConfig::default()
    } else {
        let Some(cfg_json) = (unsafe { str_arg(cfg_json) }) else {
            return std::ptr::null_mut();
        };
        match LayoutConfig::from_json(cfg_json) {
            Ok(cfg) => cfg,
            Err(_) => return std::ptr::null_mut(),
        }
    };

    into_c_string(render_catalogue_to_svg(json, Some(&cfg)))
}

/// Search a JSON catalogue and return the hits as a JSON C string.
/// The caller must free the returned string with `shelflib_free_string`.
///
/// `query_json` is an array of `[field, value]` pairs, e.g.
/// `[["title", "history"], ["country", "France"]]`.
///
/// # Safety
/// Both arguments must be valid null-terminated UTF-8 C strings.
#[no_mangle]
pub unsafe extern "C" fn shelflib_search(
    json: *const c_char,
    query_json: *const c_char,
) -> *mut c_char {
    let (Some(json), Some(query_json)) = (unsafe { str_arg(json) }, unsafe { str_arg(query_json) })
    else {
        return std::ptr::null_mut();
    };
    let fields: Vec<(String, String)> = match serde_json::from_str(query_json) {
        Ok(fields) => fields,
        Err(_) => return std::ptr::null_mut(),
    };

    into_c_string(search_catalogue_json(json, fields))
}

/// Free a string previously returned by shelflib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a shelflib function, or null.
#[no_mangle]
pub unsafe extern "C" fn shelflib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
