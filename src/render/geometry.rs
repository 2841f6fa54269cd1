//! Polygon helpers shared by the hatch and pattern planners.

use glam::{DVec2, dvec2};

/// Axis-aligned bounds of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

/// The four corners of a rectangle centered on `(cx, cy)`, counter-clockwise.
pub fn rect_poly(cx: f64, cy: f64, width: f64, height: f64) -> Vec<DVec2> {
    let hw = width * 0.5;
    let hh = height * 0.5;
    vec![
        dvec2(cx - hw, cy - hh),
        dvec2(cx + hw, cy - hh),
        dvec2(cx + hw, cy + hh),
        dvec2(cx - hw, cy + hh),
    ]
}

/// Rotate every vertex around the origin by `angle_degrees` (counter-clockwise).
pub fn rotate_poly(poly: &[DVec2], angle_degrees: f64) -> Vec<DVec2> {
    let rotation = DVec2::from_angle(angle_degrees.to_radians());
    poly.iter().map(|&p| rotation.rotate(p)).collect()
}

/// Bounding box of a polygon. Empty input yields a degenerate box at the origin.
pub fn poly_bounds(poly: &[DVec2]) -> Bounds {
    let mut min = DVec2::ZERO;
    let mut max = DVec2::ZERO;
    if let Some((&first, rest)) = poly.split_first() {
        min = first;
        max = first;
        for &p in rest {
            min = min.min(p);
            max = max.max(p);
        }
    }
    Bounds { min, max }
}
