//! textpath: styled text → one normalized vector path.
//!
//! Turns the output of a text shaping engine into a composed path with
//! strikethrough/underline bars, plus a line/glyph model whose per-glyph
//! geometry lives in the same coordinate space. The path serializes to a
//! compact curve-command string for export.
//!
//! # Example
//!
//! ```no_run
//! use textpath::{compute_path, AttributedText, ComposeConfig, RecordedShaper, Recording};
//! use kurbo::Size;
//!
//! let recording = Recording::load(std::path::Path::new("layout.json"))?;
//! let shaper = RecordedShaper::from_recording(&recording)?;
//! let text = AttributedText::new("Example\ntext");
//! let result = compute_path(&shaper, &text, Size::new(160.67, 61.67), &ComposeConfig::default())?;
//! if let Some(composed) = result {
//!     println!("{}", composed.curve_text());
//! }
//! # Ok::<(), textpath::TextPathError>(())
//! ```

#![forbid(unsafe_code)]

mod compose;
mod config;
mod decoration;
mod geom;
mod layout;
mod offset;
mod recording;
mod shaping;
mod text;
mod worker;

pub mod curve;
pub mod error;
pub mod model;

#[cfg(test)]
mod testing;

// Re-export kurbo so downstream users get the same version
// used by the model's paths and points.
pub use kurbo;

pub use config::{ComposeConfig, IgnoredChars};
pub use curve::to_curve_text;
pub use error::{ShapeError, TextPathError};
pub use model::{ComposedTextPath, Frame, Glyph, Line};
pub use recording::{RecordedLayout, RecordedOutline, RecordedShaper, Recording};
pub use shaping::{GlyphId, ShapedLayout, ShapedLine, ShapedRun, Shaper};
pub use text::{Alignment, AttributedText, Color, FontSpec, RunAttributes, Span};
pub use worker::{compute_paths, PathWorker};

use kurbo::Size;

/// Full pipeline: styled text → normalized composed path and model.
///
/// Pipeline: shaping, line/glyph aggregation with drift correction,
/// decoration bars, composition, origin + flip normalization.
/// Returns `Ok(None)` for empty text.
pub fn compute_path(
    shaper: &dyn Shaper,
    text: &AttributedText,
    bounds: Size,
    config: &ComposeConfig,
) -> Result<Option<ComposedTextPath>, TextPathError> {
    if text.is_empty() {
        return Ok(None);
    }

    // ── Shape ─────────────────────────────────────────────
    let layout = shaper.shape(text, bounds)?;
    log::debug!(
        "shape: {} lines in {:.2}x{:.2}",
        layout.lines.len(),
        layout.frame_size.width,
        layout.frame_size.height,
    );

    // ── Aggregate ─────────────────────────────────────────
    let lines = layout::aggregate(shaper, text, &layout, config)?;

    // ── Decorate ──────────────────────────────────────────
    let decorations: Vec<Vec<decoration::Decoration>> = lines
        .iter()
        .map(|aggregated| match aggregated.first_run() {
            Some(attributes) => decoration::line_decorations(&aggregated.anchor, attributes, || {
                decoration::probe_thickness(shaper, &attributes.font, config)
            }),
            None => Vec::new(),
        })
        .collect();
    let bars: usize = decorations.iter().map(Vec::len).sum();

    let mut frame = Frame::rect(layout.frame_size);
    frame.lines = lines.into_iter().map(|aggregated| aggregated.line).collect();
    let glyphs = frame.glyphs().count();
    log::debug!(
        "aggregate: {} of {} lines kept, {} glyphs, {} bars",
        frame.lines.len(),
        layout.lines.len(),
        glyphs,
        bars,
    );

    // ── Compose & normalize ───────────────────────────────
    let mut path = compose::merge(&frame, &decorations);
    let mut frames = vec![frame];
    let composed_bounds = compose::normalize(&mut path, &mut frames);
    log::debug!(
        "compose: {} elements, {:.2}x{:.2} at offset ({:.2}, {:.2})",
        path.elements().len(),
        composed_bounds.width(),
        composed_bounds.height(),
        composed_bounds.x0,
        composed_bounds.y0,
    );

    Ok(Some(ComposedTextPath {
        text: text.clone(),
        path: config.include_path.then_some(path),
        composed_bounds,
        frames,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{BezPath, PathEl, Point, Shape};

    use crate::geom::path_bounds;
    use crate::testing::{bold, BoxShaper};

    const BOUNDS: Size = Size::new(160.66666666666666, 61.666666666666664);

    fn scenario_text() -> AttributedText {
        let mut attrs = bold(38.0);
        attrs.alignment = Alignment::Right;
        attrs.strikethrough = Some(1);
        attrs.underline = Some(1);
        AttributedText::styled("Example\ntext", attrs)
    }

    /// Split a path into subpaths at each MoveTo.
    fn subpaths(path: &BezPath) -> Vec<Vec<PathEl>> {
        let mut out: Vec<Vec<PathEl>> = Vec::new();
        for el in path.elements() {
            if matches!(el, PathEl::MoveTo(_)) || out.is_empty() {
                out.push(Vec::new());
            }
            if let Some(current) = out.last_mut() {
                current.push(*el);
            }
        }
        out
    }

    fn is_axis_rect(subpath: &[PathEl], width: f64) -> bool {
        let lines = subpath.iter().filter(|el| matches!(el, PathEl::LineTo(_))).count();
        let rect = path_bounds(&BezPath::from_vec(subpath.to_vec()));
        lines == 3
            && matches!(subpath.last(), Some(PathEl::ClosePath))
            && (rect.width() - width).abs() < 1e-6
    }

    #[test]
    fn empty_text_yields_none() {
        let shaper = BoxShaper::new();
        let result = compute_path(&shaper, &AttributedText::new(""), BOUNDS, &ComposeConfig::default());
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn decorated_scenario_has_both_bars() {
        let shaper = BoxShaper::new();
        let composed = compute_path(&shaper, &scenario_text(), BOUNDS, &ComposeConfig::default())
            .unwrap()
            .expect("non-empty text");

        let text = composed.curve_text();
        assert!(!text.is_empty());
        assert!(text.contains('Z'));

        assert_eq!(composed.frames.len(), 1);
        assert_eq!(composed.line_count(), 2);
        assert_eq!(composed.glyph_count(), "Exampletext".len());

        // Bars span the typographic width: 8 and 4 advances, line break included.
        let path = composed.path.as_ref().unwrap();
        let subs = subpaths(path);
        let first_width = 8.0 * 0.6 * 38.0;
        let second_width = 4.0 * 0.6 * 38.0;
        let wide = subs.iter().filter(|s| is_axis_rect(s, first_width)).count();
        let narrow = subs.iter().filter(|s| is_axis_rect(s, second_width)).count();
        assert_eq!(wide, 2, "strikethrough + underline on the first line");
        assert_eq!(narrow, 2, "strikethrough + underline on the second line");
    }

    #[test]
    fn normalized_path_starts_at_origin() {
        let shaper = BoxShaper::new();
        let composed = compute_path(&shaper, &scenario_text(), BOUNDS, &ComposeConfig::default())
            .unwrap()
            .unwrap();
        let bounds = path_bounds(composed.path.as_ref().unwrap());
        assert!(bounds.x0.abs() < 1e-9 && bounds.y0.abs() < 1e-9);
        assert!(bounds.width() >= 0.0 && bounds.height() >= 0.0);
        assert!((composed.composed_bounds.width() - bounds.width()).abs() < 1e-9);
        assert!((composed.composed_bounds.height() - bounds.height()).abs() < 1e-9);
    }

    #[test]
    fn output_is_deterministic() {
        let shaper = BoxShaper::new();
        let config = ComposeConfig::default();
        let a = compute_path(&shaper, &scenario_text(), BOUNDS, &config).unwrap().unwrap();
        let b = compute_path(&shaper, &scenario_text(), BOUNDS, &config).unwrap().unwrap();
        assert_eq!(a.curve_text(), b.curve_text());
    }

    #[test]
    fn curve_text_round_trips_through_svg_parser() {
        let shaper = BoxShaper::new();
        let text = AttributedText::styled("one\ngo", bold(20.0));
        let composed = compute_path(&shaper, &text, BOUNDS, &ComposeConfig::default())
            .unwrap()
            .unwrap();
        let curve = composed.curve_text();
        let parsed = BezPath::from_svg(&curve).expect("parsable");
        assert_eq!(parsed.elements().len(), composed.path.unwrap().elements().len());
        assert_eq!(to_curve_text(&parsed), curve);
    }

    #[test]
    fn glyphs_line_up_with_composed_path() {
        let shaper = BoxShaper::new();
        let text = AttributedText::styled("Ag\npe", bold(20.0));
        let composed = compute_path(&shaper, &text, BOUNDS, &ComposeConfig::default())
            .unwrap()
            .unwrap();
        let path = composed.path.as_ref().unwrap();
        let frame = &composed.frames[0];

        // Every glyph, moved to its position, lands inside the composed path.
        let outer = path_bounds(path).inflate(1e-6, 1e-6);
        for (_, glyph) in frame.glyphs() {
            let mut placed = glyph.path.clone();
            placed.apply_affine(kurbo::Affine::translate(glyph.position.to_vec2()));
            let b = path_bounds(&placed);
            assert!(outer.contains(b.origin()) && outer.contains(Point::new(b.x1, b.y1)));
        }

        // Lines read top to bottom in y-down.
        let tops: Vec<f64> = frame
            .lines
            .iter()
            .map(|line| line.glyphs.iter().map(|g| g.position.y).fold(f64::MAX, f64::min))
            .collect();
        assert!(tops[0] < tops[1]);
    }

    #[test]
    fn whitespace_line_is_dropped_but_still_spaces_lines() {
        let leading = 5.0;
        let shaper = BoxShaper::new().with_leading(leading);
        let size = 20.0;
        let config = ComposeConfig::default();

        let with_gap = AttributedText::styled("Ab\n   \nCd", bold(size));
        let without_gap = AttributedText::styled("Ab\nCd", bold(size));
        let gap = compute_path(&shaper, &with_gap, BOUNDS, &config).unwrap().unwrap();
        let tight = compute_path(&shaper, &without_gap, BOUNDS, &config).unwrap().unwrap();

        assert_eq!(gap.line_count(), 2);
        let indices: Vec<usize> = gap.frames[0].lines[1].glyphs.iter().map(|g| g.index).collect();
        assert_eq!(indices, vec![7, 8]);

        // Distance between the two visible lines grows by the blank line's leading.
        let spread = |c: &ComposedTextPath| {
            let lines = &c.frames[0].lines;
            lines[1].glyphs[0].position.y - lines[0].glyphs[0].position.y
        };
        assert!(spread(&gap) > spread(&tight));
        assert!((spread(&gap) - spread(&tight) - leading).abs() < 1e-9);
    }

    #[test]
    fn decoration_needs_style_one_on_first_run() {
        let shaper = BoxShaper::new();
        let mut styled = bold(20.0);
        styled.strikethrough = Some(2);
        styled.underline = None;
        let mut underlined = bold(20.0);
        underlined.underline = Some(1);

        // Second run's underline is not consulted.
        let text = AttributedText::new("").push("ab", styled).push("cd", underlined);
        let composed = compute_path(&shaper, &text, BOUNDS, &ComposeConfig::default())
            .unwrap()
            .unwrap();
        let subs = subpaths(composed.path.as_ref().unwrap());
        assert_eq!(subs.len(), 4, "four glyph outlines, no bars");
    }

    #[test]
    fn omitted_attributes_draw_no_bars() {
        let shaper = BoxShaper::new();
        let config = ComposeConfig {
            include_attributes: false,
            ..ComposeConfig::default()
        };
        let plain = compute_path(&shaper, &scenario_text(), BOUNDS, &config)
            .unwrap()
            .unwrap();
        let decorated = compute_path(&shaper, &scenario_text(), BOUNDS, &ComposeConfig::default())
            .unwrap()
            .unwrap();

        assert!(plain.frames[0].lines.iter().all(|line| line.attributes.is_none()));
        let glyph_outlines = subpaths(plain.path.as_ref().unwrap()).len();
        assert_eq!(glyph_outlines, "Exampletext".len());
        assert_eq!(subpaths(decorated.path.as_ref().unwrap()).len(), glyph_outlines + 4);
    }

    #[test]
    fn metrics_only_request_keeps_model() {
        let shaper = BoxShaper::new();
        let config = ComposeConfig {
            include_path: false,
            ..ComposeConfig::default()
        };
        let composed = compute_path(&shaper, &scenario_text(), BOUNDS, &config)
            .unwrap()
            .unwrap();
        assert!(composed.path.is_none());
        assert_eq!(composed.curve_text(), "");
        assert_eq!(composed.glyph_count(), 11);
        assert!(composed.composed_bounds.width() > 0.0);
    }

    #[test]
    fn all_whitespace_text_composes_empty_path() {
        let shaper = BoxShaper::new();
        let composed = compute_path(&shaper, &AttributedText::new("  \n "), BOUNDS, &ComposeConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(composed.line_count(), 0);
        assert_eq!(composed.curve_text(), "");
        assert_eq!(composed.composed_bounds, kurbo::Rect::ZERO);
    }

    #[test]
    fn shaping_failure_aborts_request() {
        let shaper = BoxShaper::new().failing_on("boom");
        let err = compute_path(&shaper, &AttributedText::new("boom"), BOUNDS, &ComposeConfig::default())
            .unwrap_err();
        assert!(matches!(err, TextPathError::Shaping(ShapeError::Failed(_))));
    }

    #[test]
    fn frame_outline_covers_engine_frame() {
        let shaper = BoxShaper::new();
        let composed = compute_path(&shaper, &scenario_text(), BOUNDS, &ComposeConfig::default())
            .unwrap()
            .unwrap();
        let frame = &composed.frames[0];
        assert_eq!(frame.path.bounding_box().size(), BOUNDS);
    }
}
