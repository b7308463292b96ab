//! Layout options. All lengths are in catalogue units (millimetres).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ── Defaults ────────────────────────────────────────────────────────
pub const DEFAULT_GAP_HEIGHT: f64 = 24.0;
pub const DEFAULT_BOOK_SPACING: f64 = 1.0;
pub const DEFAULT_PADDING: f64 = 24.0;
pub const DEFAULT_MARGIN_LEFT: f64 = 120.0;
pub const DEFAULT_BAY_WIDTH: f64 = 1150.0;
pub const DEFAULT_SHELF_VISUAL_WIDTH: f64 = 24.0;
pub const DEFAULT_SHELF_VISUAL_HEIGHT: f64 = 24.0;
pub const DEFAULT_SHELF_COLOUR: &str = "#241710";
pub const DEFAULT_RULER_TICK_HEIGHT: f64 = 15.0;
pub const DEFAULT_RULER_TICK_RATE: f64 = 50.0;
/// Finest ruler resolution accepted; smaller rates would emit a tick per fraction of a millimetre.
pub const MIN_RULER_TICK_RATE: f64 = 1.0;

/// Geometry options shared by both layout modes. Missing keys in a JSON
/// config fall back to the defaults above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Vertical gap between a shelf's tallest book and the shelf above
    pub gap_height: f64,
    /// Horizontal gap between adjacent books
    pub book_spacing: f64,
    /// Outer margin
    pub padding: f64,
    /// Room left of the shelving for shelf labels
    pub margin_left: f64,
    /// Fixed horizontal budget of each bay
    pub bay_width: f64,
    /// Thickness of vertical separators
    pub shelf_visual_width: f64,
    /// Thickness of horizontal shelf bars
    pub shelf_visual_height: f64,
    pub shelf_colour: String,
    /// Subshelf mode only: height of the short ruler ticks
    pub ruler_tick_height: f64,
    /// Subshelf mode only: distance between ruler ticks
    pub ruler_tick_rate: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gap_height: DEFAULT_GAP_HEIGHT,
            book_spacing: DEFAULT_BOOK_SPACING,
            padding: DEFAULT_PADDING,
            margin_left: DEFAULT_MARGIN_LEFT,
            bay_width: DEFAULT_BAY_WIDTH,
            shelf_visual_width: DEFAULT_SHELF_VISUAL_WIDTH,
            shelf_visual_height: DEFAULT_SHELF_VISUAL_HEIGHT,
            shelf_colour: DEFAULT_SHELF_COLOUR.to_string(),
            ruler_tick_height: DEFAULT_RULER_TICK_HEIGHT,
            ruler_tick_rate: DEFAULT_RULER_TICK_RATE,
        }
    }
}

impl LayoutConfig {
    /// Parse a (possibly partial) JSON config object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// X coordinate where shelving starts, right of the label margin.
    pub fn left_edge(&self) -> f64 {
        self.padding + self.margin_left
    }

    /// Reject geometry no layout can be computed from.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("gapHeight", self.gap_height),
            ("bookSpacing", self.book_spacing),
            ("padding", self.padding),
            ("marginLeft", self.margin_left),
            ("bayWidth", self.bay_width),
            ("shelfVisualWidth", self.shelf_visual_width),
            ("shelfVisualHeight", self.shelf_visual_height),
            ("rulerTickHeight", self.ruler_tick_height),
            ("rulerTickRate", self.ruler_tick_rate),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a finite, non-negative length (got {value})"
                )));
            }
        }
        if self.ruler_tick_rate < MIN_RULER_TICK_RATE {
            return Err(Error::InvalidConfig(format!(
                "rulerTickRate must be at least {MIN_RULER_TICK_RATE} (got {})",
                self.ruler_tick_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = LayoutConfig::from_json(r#"{"bookSpacing": 1, "gapHeight": 100}"#).unwrap();
        assert_eq!(cfg.gap_height, 100.0);
        assert_eq!(cfg.book_spacing, 1.0);
        assert_eq!(cfg.bay_width, DEFAULT_BAY_WIDTH);
        assert_eq!(cfg.shelf_colour, DEFAULT_SHELF_COLOUR);
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let cfg = LayoutConfig {
            ruler_tick_rate: 0.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn sub_millimetre_tick_rate_is_rejected() {
        let cfg = LayoutConfig::from_json(r#"{"rulerTickRate": 0.0001}"#).unwrap();
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));

        let finest = LayoutConfig {
            ruler_tick_rate: MIN_RULER_TICK_RATE,
            ..LayoutConfig::default()
        };
        assert!(finest.validate().is_ok());
    }

    #[test]
    fn negative_padding_is_rejected() {
        let cfg = LayoutConfig {
            padding: -1.0,
            ..LayoutConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
