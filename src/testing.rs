//! Synthetic fixed-pitch shaper for tests.
//!
//! Every font is a box font: advance 0.6em, ascent 0.8em, descent 0.2em.
//! Glyph outlines are rectangles (ellipses for `o` and `e`) so expected
//! coordinates can be worked out by hand. Output is y-up with the first
//! line at the top of the bounds.

use kurbo::{BezPath, Ellipse, Point, Rect, Shape, Size, Vec2};

use crate::error::ShapeError;
use crate::shaping::{GlyphId, ShapedLayout, ShapedLine, ShapedRun, Shaper};
use crate::text::{Alignment, AttributedText, FontSpec, RunAttributes};

pub(crate) const ASCENT: f64 = 0.8;
pub(crate) const DESCENT: f64 = 0.2;
pub(crate) const ADVANCE: f64 = 0.6;

#[derive(Debug, Clone, Default)]
pub(crate) struct BoxShaper {
    leading: f64,
    missing: Vec<char>,
    failing: Vec<String>,
    corrupt_runs: bool,
}

impl BoxShaper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leading(mut self, leading: f64) -> Self {
        self.leading = leading;
        self
    }

    /// Report no outline for `c`.
    pub fn missing(mut self, c: char) -> Self {
        self.missing.push(c);
        self
    }

    /// Fail whenever the plain text equals `text`.
    pub fn failing_on(mut self, text: &str) -> Self {
        self.failing.push(text.to_string());
        self
    }

    /// Drop the last position of every run.
    pub fn corrupting_runs(mut self) -> Self {
        self.corrupt_runs = true;
        self
    }

    /// Local bounds of the outline drawn for `c` at `size`.
    pub fn glyph_rect(c: char, size: f64) -> Rect {
        match c {
            '-' => Rect::new(0.1 * size, 0.25 * size, 0.5 * size, 0.35 * size),
            'g' | 'j' | 'p' | 'q' | 'y' => Rect::new(0.05 * size, -0.2 * size, 0.55 * size, 0.5 * size),
            c if c.is_uppercase() => Rect::new(0.05 * size, 0.0, 0.55 * size, 0.7 * size),
            _ => Rect::new(0.05 * size, 0.0, 0.55 * size, 0.5 * size),
        }
    }

    pub fn dash_height(&self, size: f64) -> f64 {
        Self::glyph_rect('-', size).height()
    }

    fn glyph_id(c: char) -> GlyphId {
        GlyphId::try_from(c as u32).unwrap_or(GlyphId::MAX)
    }

    fn shape_line(
        &self,
        text: &AttributedText,
        chars: &[(usize, char)],
        bounds: Size,
        defaults: &RunAttributes,
    ) -> ShapedLine {
        // Group consecutive chars sharing attributes.
        let mut groups: Vec<(&RunAttributes, Vec<char>)> = Vec::new();
        for &(index, c) in chars {
            let attrs = text.attributes_at(index, defaults);
            let continues = groups.last().is_some_and(|(current, _)| *current == attrs);
            if continues {
                if let Some((_, group)) = groups.last_mut() {
                    group.push(c);
                }
            } else {
                groups.push((attrs, vec![c]));
            }
        }

        let mut runs = Vec::with_capacity(groups.len());
        let mut pen = 0.0;
        let mut text_bounds: Option<Rect> = None;
        for (attrs, group) in &groups {
            let size = attrs.font.size;
            let mut run = ShapedRun {
                attributes: Some((*attrs).clone()),
                ascent: ASCENT * size,
                descent: DESCENT * size,
                leading: 0.0,
                ..ShapedRun::default()
            };
            for &c in group {
                run.glyphs.push(Self::glyph_id(c));
                run.positions.push(Point::new(pen, 0.0));
                run.advances.push(Vec2::new(ADVANCE * size, 0.0));
                if !c.is_whitespace() {
                    let rect = Self::glyph_rect(c, size) + Vec2::new(pen, 0.0);
                    text_bounds = Some(text_bounds.map_or(rect, |r| r.union(rect)));
                }
                pen += ADVANCE * size;
            }
            if self.corrupt_runs {
                run.positions.pop();
            }
            runs.push(run);
        }

        let ascent = runs.iter().map(|r| r.ascent).fold(0.0, f64::max);
        let descent = runs.iter().map(|r| r.descent).fold(0.0, f64::max);
        let alignment = groups.first().map(|(a, _)| a.alignment).unwrap_or_default();
        let x = match alignment {
            Alignment::Right => bounds.width - pen,
            Alignment::Center => (bounds.width - pen) / 2.0,
            Alignment::Left | Alignment::Justified => 0.0,
        };

        ShapedLine {
            origin: Point::new(x, 0.0),
            line_bounds: Rect::new(0.0, -descent, pen, ascent),
            text_bounds: text_bounds.unwrap_or(Rect::ZERO),
            ascent,
            descent,
            leading: self.leading,
            runs,
        }
    }
}

impl Shaper for BoxShaper {
    fn shape(&self, text: &AttributedText, bounds: Size) -> Result<ShapedLayout, ShapeError> {
        if self.failing.iter().any(|t| t == text.plain()) {
            return Err(ShapeError::Failed(format!("refusing {:?}", text.plain())));
        }
        let defaults = RunAttributes::default();

        // A line ends after its line break, which stays on the line.
        let mut line_chars: Vec<Vec<(usize, char)>> = vec![Vec::new()];
        for (index, c) in text.plain().chars().enumerate() {
            if let Some(current) = line_chars.last_mut() {
                current.push((index, c));
            }
            if c == '\n' {
                line_chars.push(Vec::new());
            }
        }
        line_chars.retain(|chars| !chars.is_empty());

        let mut top = bounds.height;
        let mut lines = Vec::with_capacity(line_chars.len());
        for chars in &line_chars {
            let mut line = self.shape_line(text, chars, bounds, &defaults);
            line.origin.y = top - line.ascent;
            top -= line.ascent + line.descent + line.leading;
            lines.push(line);
        }

        Ok(ShapedLayout {
            frame_size: bounds,
            lines,
        })
    }

    fn glyph_outline(&self, font: &FontSpec, glyph: GlyphId) -> Option<BezPath> {
        let c = char::from_u32(glyph as u32)?;
        if self.missing.contains(&c) {
            return None;
        }
        let rect = Self::glyph_rect(c, font.size);
        match c {
            'o' | 'e' => Some(Ellipse::from_rect(rect).to_path(0.1)),
            _ => Some(rect.to_path(0.1)),
        }
    }
}

/// Bold 38pt attributes used by scenario tests.
pub(crate) fn bold(size: f64) -> RunAttributes {
    RunAttributes::new(FontSpec::new("Box", size).bold())
}
