//! Greedy boundary extraction on top of a Delaunay triangulation.
//!
//! Model
//! - Start from the convex hull and carve inwards: an edge whose incident
//!   triangle has a third vertex not yet on the boundary is replaced by the
//!   triangle's two other edges.
//! - Points the carving never reaches are patched in by absorbing a whole
//!   triangle, provided it is empty of other input points.
//!
//! Both passes take the first qualifying candidate in ascending canonical
//! order and restart the scan after every change; the output depends on that
//! order. Nothing here checks that the result is a single simple cycle; the
//! chain orderer rejects edge sets it cannot walk.

use std::collections::{BTreeMap, BTreeSet};

use super::delaunay::{triangulate, Delaunay, TriangulationError};
use super::edges::{Edge, EdgeSet};
use crate::geom2::{lies_on_segment, point_in_triangle, GeomCfg, Pt2};

type TriangleIndex = BTreeMap<Edge, Vec<[usize; 3]>>;

/// Triangulate `points` and extract the boundary edge set.
///
/// Returns the triangulation alongside the edges for callers that draw or
/// inspect it.
pub fn build_polygon_edges(
    points: &[Pt2],
    cfg: GeomCfg,
) -> Result<(EdgeSet, Delaunay), TriangulationError> {
    let tri = triangulate(points)?;
    let edges = extract_boundary(points, &tri, cfg);
    Ok((edges, tri))
}

/// Boundary edge set for `points` given their triangulation `tri`.
///
/// Best effort: points that neither pass reaches are left out silently.
pub fn extract_boundary(points: &[Pt2], tri: &Delaunay, cfg: GeomCfg) -> EdgeSet {
    let mut edges: EdgeSet = tri.hull.iter().copied().collect();
    let index = tri.triangles_by_edge();
    let carved = carve(points, &index, &mut edges, cfg.eps_segment);
    let patched = patch_missing(points, &index, &mut edges);
    let missing = points.len() - edges.vertices().len();
    if missing > 0 {
        tracing::debug!(missing, "boundary leaves points uncovered");
    }
    tracing::debug!(carved, patched, edges = edges.len(), "boundary extracted");
    edges
}

#[inline]
fn third_vertex(simplex: &[usize; 3], e: &Edge) -> Option<usize> {
    simplex.iter().copied().find(|&v| !e.contains(v))
}

fn lies_on_any_edge(p: Pt2, points: &[Pt2], edges: &EdgeSet, eps: f64) -> bool {
    edges
        .iter()
        .any(|e| lies_on_segment(p, points[e.lo], points[e.hi], eps))
}

/// Carving pass; returns the number of replacements.
///
/// Every replacement pulls in a vertex that was not on any edge, so the loop
/// runs at most once per point.
pub(crate) fn carve(
    points: &[Pt2],
    index: &TriangleIndex,
    edges: &mut EdgeSet,
    eps: f64,
) -> usize {
    let mut replaced = 0usize;
    loop {
        let mut hit: Option<(Edge, usize)> = None;
        'scan: for e in edges.iter() {
            let Some(triangles) = index.get(e) else {
                continue;
            };
            for simplex in triangles {
                let Some(k) = third_vertex(simplex, e) else {
                    continue;
                };
                if !lies_on_any_edge(points[k], points, edges, eps) {
                    hit = Some((*e, k));
                    break 'scan;
                }
            }
        }
        let Some((e, k)) = hit else {
            return replaced;
        };
        edges.remove(&e);
        edges.insert(Edge::new(e.lo, k));
        edges.insert(Edge::new(e.hi, k));
        replaced += 1;
        tracing::trace!(lo = e.lo, hi = e.hi, pulled = k, "carve");
    }
}

fn triangle_is_empty(points: &[Pt2], [i, j, m]: [usize; 3]) -> bool {
    let (a, b, c) = (points[i], points[j], points[m]);
    points
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != i && *idx != j && *idx != m)
        .all(|(_, p)| !point_in_triangle(*p, a, b, c))
}

/// Patch pass; returns the number of absorbed triangles.
///
/// The edge the triangle hangs off is removed and then re-added with the
/// other two sides, so it stays in the set.
pub(crate) fn patch_missing(points: &[Pt2], index: &TriangleIndex, edges: &mut EdgeSet) -> usize {
    let covered = edges.vertices();
    let mut missing: BTreeSet<usize> = (0..points.len()).filter(|v| !covered.contains(v)).collect();
    let mut absorbed = 0usize;
    while !missing.is_empty() {
        let mut hit: Option<(usize, Edge)> = None;
        'scan: for &m in &missing {
            for e in edges.iter() {
                let Some(triangles) = index.get(e) else {
                    continue;
                };
                for simplex in triangles {
                    if third_vertex(simplex, e) != Some(m) {
                        continue;
                    }
                    if triangle_is_empty(points, [e.lo, e.hi, m]) {
                        hit = Some((m, *e));
                        break 'scan;
                    }
                }
            }
        }
        let Some((m, e)) = hit else {
            break;
        };
        edges.remove(&e);
        edges.insert(Edge::new(e.lo, e.hi));
        edges.insert(Edge::new(e.hi, m));
        edges.insert(Edge::new(m, e.lo));
        missing.remove(&m);
        absorbed += 1;
        tracing::trace!(lo = e.lo, hi = e.hi, absorbed = m, "patch");
    }
    absorbed
}
