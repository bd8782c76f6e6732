//! Walks shaping output and builds the line/glyph model.
//!
//! A single cursor runs over the source text's Unicode scalars and moves
//! one step per glyph, retained or not, so glyph indices keep pointing at
//! the right character even though whitespace glyphs are dropped.

use kurbo::{Point, Rect};

use crate::config::ComposeConfig;
use crate::decoration::LineAnchor;
use crate::error::TextPathError;
use crate::geom::{path_bounds, translate};
use crate::model::{Glyph, Line};
use crate::offset::{LineMetrics, LineShift};
use crate::shaping::{ShapedLayout, ShapedLine, Shaper};
use crate::text::{AttributedText, RunAttributes};

/// A retained line plus where its decoration bars are anchored.
#[derive(Debug, Clone)]
pub struct AggregatedLine {
    pub line: Line,
    pub anchor: LineAnchor,
}

impl AggregatedLine {
    /// Attributes gating the line's decorations: the first slot of its
    /// attribute table. `None` when the table was not requested.
    pub fn first_run(&self) -> Option<&RunAttributes> {
        self.line.attributes.as_ref().and_then(|table| table.first())
    }
}

/// Build retained lines from `layout`, with drift correction applied.
pub fn aggregate(
    shaper: &dyn Shaper,
    text: &AttributedText,
    layout: &ShapedLayout,
    config: &ComposeConfig,
) -> Result<Vec<AggregatedLine>, TextPathError> {
    let chars: Vec<char> = text.plain().chars().collect();
    let mut cursor = 0usize;
    let mut shift = LineShift::new();
    let mut lines: Vec<AggregatedLine> = Vec::new();

    for (line_no, shaped) in layout.lines.iter().enumerate() {
        let mut line = Line {
            index: lines.len(),
            line_bounds: shaped.line_bounds,
            text_bounds: shaped.text_bounds,
            leading: shaped.leading,
            ascent: shaped.ascent,
            descent: shaped.descent,
            ..Line::default()
        };

        let scan = scan_runs(shaper, &chars, &mut cursor, line_no, shaped, &mut line, config)?;
        let metrics = LineMetrics {
            ascent: shaped.ascent,
            descent: shaped.descent,
            effective_ascent: scan.effective_ascent,
            effective_descent: scan.effective_descent,
        };

        let start_x = line
            .glyphs
            .first()
            .map(|glyph| glyph.position.x + glyph.origin_offset.x);
        if let Some(start_x) = start_x {
            line.effective_ascent = scan.effective_ascent;
            line.effective_descent = scan.effective_descent;

            let dy = shift.glyph_offset(&metrics);
            for glyph in &mut line.glyphs {
                glyph.position.y += dy;
            }

            if config.include_attributes {
                line.attributes = Some(scan.attributes);
            }
            log::trace!(
                "line {}: {} glyphs, shift {:.2}",
                line.index,
                line.glyphs.len(),
                dy
            );
            lines.push(AggregatedLine {
                anchor: LineAnchor {
                    line_bounds: shaped.line_bounds,
                    start_x,
                    baseline_y: shaped.origin.y + dy,
                },
                line,
            });
        } else {
            log::trace!("shaped line {line_no} has no visible glyphs");
        }

        shift.advance(&metrics);
    }
    log::trace!("accumulated line shift {:.2}", shift.value());

    Ok(lines)
}

/// Per-line results of scanning runs.
struct RunScan {
    attributes: Vec<RunAttributes>,
    effective_ascent: f64,
    effective_descent: f64,
}

fn scan_runs(
    shaper: &dyn Shaper,
    chars: &[char],
    cursor: &mut usize,
    line_no: usize,
    shaped: &ShapedLine,
    line: &mut Line,
    config: &ComposeConfig,
) -> Result<RunScan, TextPathError> {
    let mut scan = RunScan {
        attributes: Vec::with_capacity(shaped.runs.len()),
        effective_ascent: 0.0,
        effective_descent: 0.0,
    };

    for (run_no, run) in shaped.runs.iter().enumerate() {
        if run.glyphs.is_empty() {
            continue;
        }
        if !run.is_consistent() {
            return Err(TextPathError::InconsistentRun {
                line: line_no,
                run: run_no,
                glyphs: run.glyphs.len(),
                positions: run.positions.len(),
                advances: run.advances.len(),
            });
        }

        let attributes = run
            .attributes
            .clone()
            .unwrap_or_else(|| config.default_attributes.clone());
        let run_index = scan.attributes.len();

        let glyphs = run.glyphs.iter().zip(&run.positions).zip(&run.advances);
        for ((&glyph_id, &pen), &advance) in glyphs {
            let index = *cursor;
            *cursor += 1;
            let c = *chars.get(index).ok_or(TextPathError::TextOverrun {
                line: line_no,
                run: run_no,
            })?;
            if config.ignored.contains(c) {
                continue;
            }

            scan.effective_ascent = scan.effective_ascent.max(run.ascent.abs());
            scan.effective_descent = scan.effective_descent.max(run.descent.abs());

            let Some(outline) = shaper.glyph_outline(&attributes.font, glyph_id) else {
                log::debug!("no outline for glyph {glyph_id} ({c:?}), skipping");
                continue;
            };
            let bounds: Rect = path_bounds(&outline);
            line.glyphs.push(Glyph {
                index,
                path: translate(&outline, -bounds.x0, -bounds.y0),
                position: Point::new(
                    shaped.origin.x + pen.x + bounds.x0,
                    shaped.origin.y + pen.y + bounds.y0,
                ),
                advance,
                origin_offset: Point::new(-bounds.x0, bounds.y0),
                run: run_index,
                line: line.index,
            });
        }

        scan.attributes.push(attributes);
    }

    Ok(scan)
}
