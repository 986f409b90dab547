//! Point classification against a polygon (vertex / edge / inner / outer).

use super::predicates::{on_segment, ray_cast_contains};
use super::types::{GeomCfg, Position, Pt2};

/// Classify `point` against the cyclic vertex list `polygon`.
///
/// Order of tests: vertex (per-coordinate within `cfg.eps`), then edge, then
/// the crossing-number test. The result does not depend on which vertex is
/// listed first.
pub fn classify(point: Pt2, polygon: &[Pt2], cfg: GeomCfg) -> Position {
    let eps = cfg.eps;
    if polygon
        .iter()
        .any(|v| (point.x - v.x).abs() <= eps && (point.y - v.y).abs() <= eps)
    {
        return Position::Vertex;
    }
    let n = polygon.len();
    if (0..n).any(|i| on_segment(point, polygon[i], polygon[(i + 1) % n], eps)) {
        return Position::Edge;
    }
    if ray_cast_contains(point, polygon, eps, cfg.eps_denominator) {
        Position::Inner
    } else {
        Position::Outer
    }
}
