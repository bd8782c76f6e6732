//! Structured result of a layout request: frames, lines and glyphs.
//!
//! Ownership runs strictly frame → line → glyph. A glyph refers back to
//! its line and run by index only.

use kurbo::{BezPath, Point, Rect, Size, Vec2};

use crate::text::{AttributedText, RunAttributes};

/// Root result of [`compute_path`](crate::compute_path).
#[derive(Debug, Clone)]
pub struct ComposedTextPath {
    /// Source text the path was composed from.
    pub text: AttributedText,
    /// Normalized composed path; `None` when only metrics were requested.
    pub path: Option<BezPath>,
    /// `origin`: offset removed by the origin pass, in engine space.
    /// `size`: size of the normalized path.
    pub composed_bounds: Rect,
    pub frames: Vec<Frame>,
}

impl ComposedTextPath {
    pub fn glyph_count(&self) -> usize {
        self.frames.iter().map(|frame| frame.glyphs().count()).sum()
    }

    pub fn line_count(&self) -> usize {
        self.frames.iter().map(|frame| frame.lines.len()).sum()
    }

    /// Curve-command text of the composed path, empty without a path.
    pub fn curve_text(&self) -> String {
        self.path
            .as_ref()
            .map(crate::curve::to_curve_text)
            .unwrap_or_default()
    }
}

/// One layout region.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Boundary shape of the region.
    pub path: BezPath,
    /// Lines holding at least one glyph, top to bottom.
    pub lines: Vec<Line>,
}

impl Frame {
    /// Rectangular frame of the given size.
    pub fn rect(size: Size) -> Self {
        Self {
            path: kurbo::Shape::to_path(&Rect::from_origin_size(Point::ZERO, size), 0.1),
            lines: Vec::new(),
        }
    }

    /// All glyphs with their lines, in reading order.
    pub fn glyphs(&self) -> impl Iterator<Item = (&Line, &Glyph)> + '_ {
        self.lines
            .iter()
            .flat_map(|line| line.glyphs.iter().map(move |glyph| (line, glyph)))
    }

    pub(crate) fn glyphs_mut(&mut self) -> impl Iterator<Item = &mut Glyph> + '_ {
        self.lines.iter_mut().flat_map(|line| line.glyphs.iter_mut())
    }

    /// Resolve a glyph's line reference.
    pub fn line_of(&self, glyph: &Glyph) -> Option<&Line> {
        self.lines.iter().find(|line| line.index == glyph.line)
    }
}

/// One shaped line.
#[derive(Debug, Clone, Default)]
pub struct Line {
    /// 0-based among retained lines.
    pub index: usize,
    /// Typographic bounds (ascent/descent based).
    pub line_bounds: Rect,
    /// Bounds of the glyph outlines. Smaller than `line_bounds`.
    pub text_bounds: Rect,
    pub leading: f64,
    pub ascent: f64,
    pub descent: f64,
    /// Ascent implied by visible glyphs only. Usually equal to `ascent`;
    /// smaller when a line break inherits a larger font from the next run.
    pub effective_ascent: f64,
    /// Descent implied by visible glyphs only.
    pub effective_descent: f64,
    /// One entry per processed run, when attributes were requested.
    pub attributes: Option<Vec<RunAttributes>>,
    pub glyphs: Vec<Glyph>,
}

impl Line {
    /// Attributes of the run a glyph came from.
    pub fn attributes_for(&self, glyph: &Glyph) -> Option<&RunAttributes> {
        self.attributes.as_ref()?.get(glyph.run)
    }
}

/// One rendered character.
#[derive(Debug, Clone)]
pub struct Glyph {
    /// Unicode-scalar index into the source text.
    pub index: usize,
    /// Outline with its own bounding box corner at (0, 0).
    pub path: BezPath,
    /// Placement of the outline's corner. Top-left after normalization.
    pub position: Point,
    pub advance: Vec2,
    /// x: horizontal bearing, y: offset to baseline.
    pub origin_offset: Point,
    /// Index of the owning run on the line.
    pub run: usize,
    /// Index of the owning line.
    pub line: usize,
}
