//! Polygon deformer: erode (`jam_in`) and dilate (`jam_out`).
//!
//! Each pass reads the current polygon and builds a new one of the same
//! length. A vertex `b` with cyclic neighbours `a`, `c` moves towards the
//! centroid of `[a, b, c]` when
//! - no other vertex lies strictly inside `[a, b, c]` (locality guard), and
//! - the centroid is inside the polygon (erode) or outside it (dilate).
//!
//! The step is `tempo / sqrt(quasi_perimeter)`, clamped to `[0, 1]`, so large
//! ears move proportionally less than small ones.

use std::fmt;

use crate::geom2::{centroid, classify, interpolate, quasi_perimeter, GeomCfg, Position, Pt2};

/// Which way the polygon is pushed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JamDirection {
    /// Erode: move vertices whose ear centroid is inside.
    In,
    /// Dilate: move vertices whose ear centroid is outside.
    Out,
}

impl JamDirection {
    #[inline]
    fn required(self) -> Position {
        match self {
            JamDirection::In => Position::Inner,
            JamDirection::Out => Position::Outer,
        }
    }
}

/// Input rejected before a pass starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JamError {
    TooFewVertices { actual: usize },
    InvalidTempo { tempo: f64 },
}

impl fmt::Display for JamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JamError::TooFewVertices { actual } => write!(
                f,
                "polygon must have at least 3 vertices to form triangles, got {actual}"
            ),
            JamError::InvalidTempo { tempo } => {
                write!(f, "tempo must be finite and > 0, got {tempo}")
            }
        }
    }
}

impl std::error::Error for JamError {}

/// One erosion pass.
pub fn jam_in(polygon: &[Pt2], tempo: f64, cfg: GeomCfg) -> Result<Vec<Pt2>, JamError> {
    jam(polygon, JamDirection::In, tempo, cfg)
}

/// One dilation pass.
pub fn jam_out(polygon: &[Pt2], tempo: f64, cfg: GeomCfg) -> Result<Vec<Pt2>, JamError> {
    jam(polygon, JamDirection::Out, tempo, cfg)
}

/// One deformation pass in `direction`. O(n²): every vertex runs the locality
/// guard over every other vertex.
pub fn jam(
    polygon: &[Pt2],
    direction: JamDirection,
    tempo: f64,
    cfg: GeomCfg,
) -> Result<Vec<Pt2>, JamError> {
    let n = polygon.len();
    if n < 3 {
        return Err(JamError::TooFewVertices { actual: n });
    }
    if !(tempo.is_finite() && tempo > 0.0) {
        return Err(JamError::InvalidTempo { tempo });
    }
    let required = direction.required();
    let mut moved = 0usize;
    let out: Vec<Pt2> = (0..n)
        .map(|i| {
            let (ia, ic) = ((i + n - 1) % n, (i + 1) % n);
            let (a, b, c) = (polygon[ia], polygon[i], polygon[ic]);
            let ear = [a, b, c];
            let occupied = polygon
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != ia && *j != i && *j != ic)
                .any(|(_, p)| classify(*p, &ear, cfg) == Position::Inner);
            if occupied {
                return b;
            }
            let g = centroid(a, b, c);
            if classify(g, polygon, cfg) != required {
                return b;
            }
            moved += 1;
            interpolate(b, g, tempo / quasi_perimeter(a, b, c).sqrt())
        })
        .collect();
    tracing::trace!(?direction, moved, vertices = n, "jam pass");
    Ok(out)
}

#[cfg(test)]
mod tests;
