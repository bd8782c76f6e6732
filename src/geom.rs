//! Shared geometry utilities.

use kurbo::{Affine, BezPath, Rect, Shape, Vec2};

/// Tight bounding box of a path; zero rect when it draws nothing.
pub fn path_bounds(path: &BezPath) -> Rect {
    if path.segments().next().is_none() {
        return Rect::ZERO;
    }
    path.bounding_box()
}

/// Copy of `path` moved by (dx, dy).
pub fn translate(path: &BezPath, dx: f64, dy: f64) -> BezPath {
    let mut translated = path.clone();
    translated.apply_affine(Affine::translate(Vec2::new(dx, dy)));
    translated
}

/// Append every element of `other`, transformed, to `path`.
pub fn append(path: &mut BezPath, other: &BezPath, transform: Affine) {
    for el in other.elements() {
        path.push(transform * *el);
    }
}

/// Vertical flip about a band of height `height`: y → height − y.
pub fn flip_y(height: f64) -> Affine {
    Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, height])
}
