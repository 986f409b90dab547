//! Numeric leaf predicates: orientation, segment membership, point in
//! triangle, crossing-number containment, segment intersection.
//!
//! All predicates are plain `f64` tests with explicit tolerances; none of them
//! allocate. Boundary handling differs per predicate and is documented on each.

use super::types::{Orientation, Pt2};

/// Twice the signed area of the triangle `(p1, p2, p3)`.
#[inline]
pub fn cross3(p1: Pt2, p2: Pt2, p3: Pt2) -> f64 {
    (p2.x - p1.x) * (p3.y - p1.y) - (p2.y - p1.y) * (p3.x - p1.x)
}

/// Orientation of the ordered triple `(p1, p2, p3)`.
///
/// `Degenerate` wins over everything when two points coincide exactly;
/// `Collinear` when the absolute signed area is below `eps`.
pub fn orientation(p1: Pt2, p2: Pt2, p3: Pt2, eps: f64) -> Orientation {
    if p1 == p2 || p2 == p3 || p1 == p3 {
        return Orientation::Degenerate;
    }
    let cross = cross3(p1, p2, p3);
    if cross.abs() < eps {
        Orientation::Collinear
    } else if cross > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}

/// `p` is collinear with `a`–`b` and inside their bounding box grown by `eps`.
///
/// Endpoints are *not* reported: `p == a` makes the triple degenerate. The
/// classifier tests vertices first, so this never matters there.
pub fn on_segment(p: Pt2, a: Pt2, b: Pt2, eps: f64) -> bool {
    if orientation(a, b, p, eps) != Orientation::Collinear {
        return false;
    }
    let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
    let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));
    (min_x - eps..=max_x + eps).contains(&p.x) && (min_y - eps..=max_y + eps).contains(&p.y)
}

/// Closed-segment membership, endpoints included.
///
/// Collinearity via `|ab × ap| <= eps`, betweenness via `0 <= ap·ab <= |ab|²`.
pub fn lies_on_segment(p: Pt2, a: Pt2, b: Pt2, eps: f64) -> bool {
    let ap = p - a;
    let ab = b - a;
    let cross = ab.x * ap.y - ab.y * ap.x;
    if cross.abs() > eps {
        return false;
    }
    let dot = ap.dot(&ab);
    dot >= 0.0 && dot <= ab.dot(&ab)
}

#[inline]
fn sign(p1: Pt2, p2: Pt2, p3: Pt2) -> f64 {
    (p1.x - p3.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p3.y)
}

/// `p` lies strictly inside the triangle `(v1, v2, v3)` (either winding).
///
/// A zero sign on any edge counts as outside.
pub fn point_in_triangle(p: Pt2, v1: Pt2, v2: Pt2, v3: Pt2) -> bool {
    let d1 = sign(p, v1, v2);
    let d2 = sign(p, v2, v3);
    let d3 = sign(p, v3, v1);
    (d1 < 0.0 && d2 < 0.0 && d3 < 0.0) || (d1 > 0.0 && d2 > 0.0 && d3 > 0.0)
}

/// Crossing-number test with a horizontal ray towards +x.
///
/// Only meaningful for points off the boundary; callers check vertices and
/// edges first. `eps_den` keeps horizontal edges from dividing by zero.
pub fn ray_cast_contains(p: Pt2, polygon: &[Pt2], eps: f64, eps_den: f64) -> bool {
    let n = polygon.len();
    let mut inside = false;
    for i in 0..n {
        let vi = polygon[i];
        let vj = polygon[(i + n - 1) % n];
        if (vi.y > p.y) != (vj.y > p.y) {
            let x_hit = (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y + eps_den) + vi.x;
            if x_hit > p.x + eps {
                inside = !inside;
            }
        }
    }
    inside
}

/// Closed segments `p1–p2` and `q1–q2` share at least one point.
pub fn segments_intersect(p1: Pt2, p2: Pt2, q1: Pt2, q2: Pt2, eps: f64) -> bool {
    let side = |a: Pt2, b: Pt2, c: Pt2| -> i8 {
        let v = cross3(a, b, c);
        if v.abs() < eps {
            0
        } else if v > 0.0 {
            1
        } else {
            -1
        }
    };
    let o1 = side(p1, p2, q1);
    let o2 = side(p1, p2, q2);
    let o3 = side(q1, q2, p1);
    let o4 = side(q1, q2, p2);
    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == 0 && lies_on_segment(q1, p1, p2, eps))
        || (o2 == 0 && lies_on_segment(q2, p1, p2, eps))
        || (o3 == 0 && lies_on_segment(p1, q1, q2, eps))
        || (o4 == 0 && lies_on_segment(p2, q1, q2, eps))
}
