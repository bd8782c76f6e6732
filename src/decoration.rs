//! Strikethrough and underline bars.
//!
//! Decorations are gated per line by the first run's attributes. Bar
//! thickness is two thirds of the height of a probe glyph ("-" by default)
//! shaped alone in the line's font.

use kurbo::{BezPath, Point, Rect, Shape, Size};

use crate::config::ComposeConfig;
use crate::shaping::Shaper;
use crate::text::{AttributedText, FontSpec, RunAttributes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationKind {
    Strikethrough,
    Underline,
}

/// A placed decoration bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub rect: Rect,
}

impl Decoration {
    pub fn to_path(&self) -> BezPath {
        self.rect.to_path(0.1)
    }
}

/// Where bars of one line are anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineAnchor {
    /// Typographic bounds of the line.
    pub line_bounds: Rect,
    /// x of the first placed glyph's origin.
    pub start_x: f64,
    /// Baseline y after drift correction.
    pub baseline_y: f64,
}

/// Bars requested by `attributes` for one line, strikethrough first.
///
/// `thickness` is only evaluated when at least one bar is drawn.
pub fn line_decorations(
    anchor: &LineAnchor,
    attributes: &RunAttributes,
    thickness: impl FnOnce() -> f64,
) -> Vec<Decoration> {
    let strike = attributes.has_strikethrough();
    let underline = attributes.has_underline();
    if !strike && !underline {
        return Vec::new();
    }

    let thickness = thickness();
    let x = anchor.start_x;
    let size = Size::new(anchor.line_bounds.width(), thickness);
    let mut bars = Vec::with_capacity(2);
    if strike {
        let y = anchor.baseline_y + anchor.line_bounds.center().y * 2.0 / 3.0;
        bars.push(Decoration {
            kind: DecorationKind::Strikethrough,
            rect: Rect::from_origin_size(Point::new(x, y), size),
        });
    }
    if underline {
        let y = anchor.baseline_y - 2.0 * thickness;
        bars.push(Decoration {
            kind: DecorationKind::Underline,
            rect: Rect::from_origin_size(Point::new(x, y), size),
        });
    }
    bars
}

/// Measure bar thickness for `font` by shaping the probe text alone.
pub fn probe_thickness(shaper: &dyn Shaper, font: &FontSpec, config: &ComposeConfig) -> f64 {
    let probe = AttributedText::styled(
        config.decoration_probe.as_str(),
        RunAttributes::new(font.clone()),
    );
    match shaper.shape(&probe, config.probe_bounds) {
        Ok(layout) => match layout.lines.first() {
            Some(line) => line.text_bounds.height() * 2.0 / 3.0,
            None => {
                log::debug!("decoration probe produced no lines, using fallback");
                config.fallback_thickness
            }
        },
        Err(err) => {
            log::warn!("decoration probe failed ({err}), using fallback thickness");
            config.fallback_thickness
        }
    }
}
