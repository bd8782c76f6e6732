//! Path composition and normalization.
//!
//! Merges glyph outlines and decoration bars into one path, then moves it
//! so its bounds start at (0, 0) and flips it to y-down. Every retained
//! glyph gets the same treatment so per-glyph geometry matches the
//! composed path.

use kurbo::{Affine, BezPath, Rect, Vec2};

use crate::decoration::Decoration;
use crate::geom::{append, flip_y, path_bounds};
use crate::model::Frame;

/// Merge in line order, glyphs before the line's decorations.
///
/// `decorations` runs parallel to `frame.lines`.
pub fn merge(frame: &Frame, decorations: &[Vec<Decoration>]) -> BezPath {
    let mut path = BezPath::new();
    for (i, line) in frame.lines.iter().enumerate() {
        for glyph in &line.glyphs {
            append(&mut path, &glyph.path, Affine::translate(glyph.position.to_vec2()));
        }
        for bar in decorations.get(i).into_iter().flatten() {
            append(&mut path, &bar.to_path(), Affine::IDENTITY);
        }
    }
    path
}

/// Normalize `path` and the glyphs of `frames` in place.
///
/// Returns the composed bounds: the offset removed by the origin pass as
/// origin, the normalized path's size as size.
pub fn normalize(path: &mut BezPath, frames: &mut [Frame]) -> Rect {
    let offset = to_origin(path, frames);
    flip(path, frames);
    Rect::from_origin_size(offset, path_bounds(path).size())
}

/// Move the path so its bounds start at (0, 0). Returns the removed offset.
pub fn to_origin(path: &mut BezPath, frames: &mut [Frame]) -> kurbo::Point {
    let offset = path_bounds(path).origin();
    let shift = Affine::translate(-offset.to_vec2());
    path.apply_affine(shift);
    for glyph in frames.iter_mut().flat_map(|frame| frame.glyphs_mut()) {
        glyph.position = shift * glyph.position;
    }
    offset
}

/// Flip an origin-normalized path to y-down.
///
/// Glyph outlines are flipped about their own height and repositioned so
/// `position` becomes their top-left corner.
pub fn flip(path: &mut BezPath, frames: &mut [Frame]) {
    let flip = flip_y(path_bounds(path).height());
    path.apply_affine(flip);
    for glyph in frames.iter_mut().flat_map(|frame| frame.glyphs_mut()) {
        let height = path_bounds(&glyph.path).height();
        glyph.path.apply_affine(flip_y(height));
        glyph.position = flip * glyph.position - Vec2::new(0.0, height);
    }
}
