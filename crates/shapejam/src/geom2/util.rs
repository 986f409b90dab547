use super::predicates::segments_intersect;
use super::types::Pt2;

/// Linear interpolation `p1 → p2`; `t` is clamped to `[0, 1]`.
#[inline]
pub fn interpolate(p1: Pt2, p2: Pt2, t: f64) -> Pt2 {
    let t = t.clamp(0.0, 1.0);
    p1 * (1.0 - t) + p2 * t
}

/// Arithmetic mean of three points.
#[inline]
pub fn centroid(a: Pt2, b: Pt2, c: Pt2) -> Pt2 {
    (a + b + c) / 3.0
}

/// `2·width + 2·height` of the axis-aligned box around `a, b, c`.
///
/// Used only to normalize deformation steps, not as a true perimeter.
#[inline]
pub fn quasi_perimeter(a: Pt2, b: Pt2, c: Pt2) -> f64 {
    let w = a.x.max(b.x).max(c.x) - a.x.min(b.x).min(c.x);
    let h = a.y.max(b.y).max(c.y) - a.y.min(b.y).min(c.y);
    2.0 * w + 2.0 * h
}

/// Shoelace signed area (positive for counterclockwise order).
pub fn signed_area(polygon: &[Pt2]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let p = polygon[i];
            let q = polygon[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum();
    0.5 * twice
}

/// Enclosed area regardless of winding.
#[inline]
pub fn area(polygon: &[Pt2]) -> f64 {
    signed_area(polygon).abs()
}

/// No two non-adjacent edges of the cyclic polygon intersect.
///
/// O(n²) pairwise check; adjacent edges are skipped since they always share a
/// vertex.
pub fn is_simple(polygon: &[Pt2], eps: f64) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        let (a1, a2) = (polygon[i], polygon[(i + 1) % n]);
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (b1, b2) = (polygon[j], polygon[(j + 1) % n]);
            if segments_intersect(a1, a2, b1, b2, eps) {
                return false;
            }
        }
    }
    true
}
