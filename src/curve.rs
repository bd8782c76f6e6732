//! Curve-command text: the path serialization used for export.
//!
//! One command letter per element followed by its coordinates with two
//! decimals, no separators between commands:
//! `M x,y`, `L x,y`, `Q cx,cy,x,y`, `C c1x,c1y,c2x,c2y,x,y`, `Z`.

use std::fmt::Write;

use kurbo::{BezPath, PathEl, Point};

/// Serialize a path. An empty path gives an empty string.
pub fn to_curve_text(path: &BezPath) -> String {
    path.elements()
        .iter()
        .fold(String::new(), |mut out, el| {
            write_element(&mut out, el);
            out
        })
}

fn write_element(out: &mut String, el: &PathEl) {
    match *el {
        PathEl::MoveTo(p) => command(out, 'M', &[p]),
        PathEl::LineTo(p) => command(out, 'L', &[p]),
        PathEl::QuadTo(c, p) => command(out, 'Q', &[c, p]),
        PathEl::CurveTo(c1, c2, p) => command(out, 'C', &[c1, c2, p]),
        PathEl::ClosePath => out.push('Z'),
    }
}

fn command(out: &mut String, letter: char, points: &[Point]) {
    out.push(letter);
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{:.2},{:.2}", p.x, p.y);
    }
}
