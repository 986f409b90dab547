//! Boundary extraction: from a point cloud to an edge set meant to form one
//! polygon through every point.
//!
//! Purpose
//! - Wrap the external Delaunay capability (`spade`) behind an index-based
//!   `Delaunay` value.
//! - Run the carving and patch passes over an explicit, ordered `EdgeSet`.
//!
//! The extractor is a heuristic shape hull, not an alpha shape or a concave
//! hull with guarantees; full point coverage is best effort.

mod delaunay;
mod edges;
mod extract;

pub use delaunay::{triangulate, Delaunay, TriangulationError};
pub use edges::{Edge, EdgeSet};
pub use extract::{build_polygon_edges, extract_boundary};
