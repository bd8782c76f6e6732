//! Boundary to the text shaping engine.
//!
//! The engine breaks lines, resolves runs and positions glyphs. This crate
//! only consumes its output. Coordinates are y-up, as font engines report
//! them; the composer flips them at the end of the pipeline.

use kurbo::{BezPath, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::text::{AttributedText, FontSpec, RunAttributes};

/// Glyph identifier within a font.
pub type GlyphId = u16;

/// Produces line/run/glyph data and glyph outlines.
pub trait Shaper: Send + Sync {
    /// Lay out `text` inside `bounds`.
    fn shape(&self, text: &AttributedText, bounds: Size) -> Result<ShapedLayout, ShapeError>;

    /// Outline of `glyph` in `font`, in glyph-local coordinates.
    ///
    /// `None` when the font has no drawable shape for the glyph.
    fn glyph_outline(&self, font: &FontSpec, glyph: GlyphId) -> Option<BezPath>;
}

/// Engine output for a whole layout request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapedLayout {
    /// Size the engine suggests for the frame holding the text.
    pub frame_size: Size,
    /// Lines, top to bottom.
    pub lines: Vec<ShapedLine>,
}

/// One shaped line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapedLine {
    /// Baseline origin in frame space.
    pub origin: Point,
    /// Typographic bounds (ascent/descent based), relative to `origin`.
    pub line_bounds: Rect,
    /// Bounds of the glyph outlines, relative to `origin`.
    pub text_bounds: Rect,
    pub ascent: f64,
    pub descent: f64,
    pub leading: f64,
    pub runs: Vec<ShapedRun>,
}

/// A run of glyphs sharing one set of attributes.
///
/// `glyphs`, `positions` and `advances` are parallel arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapedRun {
    /// Resolved attributes; `None` means the engine reported none.
    #[serde(default)]
    pub attributes: Option<RunAttributes>,
    /// Run typographic ascent.
    pub ascent: f64,
    /// Run typographic descent.
    pub descent: f64,
    #[serde(default)]
    pub leading: f64,
    pub glyphs: Vec<GlyphId>,
    /// Pen positions relative to the line origin.
    pub positions: Vec<Point>,
    pub advances: Vec<Vec2>,
}

impl ShapedRun {
    pub fn is_consistent(&self) -> bool {
        self.positions.len() == self.glyphs.len() && self.advances.len() == self.glyphs.len()
    }
}
