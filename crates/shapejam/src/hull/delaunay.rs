//! Delaunay triangulation in input-index space, backed by `spade`.
//!
//! The extractor only needs the hull edges and the triangles as index
//! triples; this module owns the translation from spade handles to the
//! caller's point indices.

use std::collections::BTreeMap;
use std::fmt;

use spade::{DelaunayTriangulation, Point2, Triangulation};

use super::edges::Edge;
use crate::geom2::Pt2;

/// Triangulation of a point set, expressed in the caller's point indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Delaunay {
    /// Convex-hull boundary edges.
    pub hull: Vec<Edge>,
    /// Triangles as index triples.
    pub simplices: Vec<[usize; 3]>,
}

/// Errors surfaced while triangulating.
#[derive(Debug, Clone, PartialEq)]
pub enum TriangulationError {
    /// Fewer than three input points.
    TooFewPoints { actual: usize },
    /// `spade` refused a point (non-finite or out of its coordinate range).
    Insertion { index: usize, reason: String },
}

impl fmt::Display for TriangulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriangulationError::TooFewPoints { actual } => {
                write!(f, "triangulation needs at least 3 points, got {actual}")
            }
            TriangulationError::Insertion { index, reason } => {
                write!(f, "point {index} rejected by triangulation: {reason}")
            }
        }
    }
}

impl std::error::Error for TriangulationError {}

impl Delaunay {
    /// Map each triangle edge to the triangles incident to it (at most two).
    pub fn triangles_by_edge(&self) -> BTreeMap<Edge, Vec<[usize; 3]>> {
        let mut map: BTreeMap<Edge, Vec<[usize; 3]>> = BTreeMap::new();
        for simplex in &self.simplices {
            for k in 0..3 {
                let e = Edge::new(simplex[k], simplex[(k + 1) % 3]);
                map.entry(e).or_default().push(*simplex);
            }
        }
        map
    }
}

/// Triangulate `points` with spade's incremental Delaunay triangulation.
///
/// Exact duplicates collapse onto the first index carrying that position; the
/// later indices never show up in `hull` or `simplices`. For input with all
/// points on a line there are no triangles and the hull is the line itself.
pub fn triangulate(points: &[Pt2]) -> Result<Delaunay, TriangulationError> {
    if points.len() < 3 {
        return Err(TriangulationError::TooFewPoints {
            actual: points.len(),
        });
    }
    let mut dt: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    // spade vertex index -> input index
    let mut input_of: Vec<usize> = Vec::with_capacity(points.len());
    for (index, p) in points.iter().enumerate() {
        let handle = dt
            .insert(Point2::new(p.x, p.y))
            .map_err(|err| TriangulationError::Insertion {
                index,
                reason: format!("{err:?}"),
            })?;
        if handle.index() == input_of.len() {
            input_of.push(index);
        } else {
            tracing::trace!(index, first = input_of[handle.index()], "duplicate point");
        }
    }

    let hull: Vec<Edge> = if dt.all_vertices_on_line() {
        dt.undirected_edges()
            .filter_map(|e| {
                let [a, b] = e.vertices();
                Edge::try_new(input_of[a.fix().index()], input_of[b.fix().index()])
            })
            .collect()
    } else {
        dt.convex_hull()
            .filter_map(|e| {
                let [a, b] = e.vertices();
                Edge::try_new(input_of[a.fix().index()], input_of[b.fix().index()])
            })
            .collect()
    };
    let simplices: Vec<[usize; 3]> = dt
        .inner_faces()
        .map(|face| {
            let [a, b, c] = face.vertices();
            [
                input_of[a.fix().index()],
                input_of[b.fix().index()],
                input_of[c.fix().index()],
            ]
        })
        .collect();
    tracing::debug!(
        points = points.len(),
        hull = hull.len(),
        triangles = simplices.len(),
        "triangulated"
    );
    Ok(Delaunay { hull, simplices })
}
