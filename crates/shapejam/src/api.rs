//! Curated internal API (UNSTABLE).
//!
//! One import path for the CLI and benches; breaking changes are allowed.

// Geometry primitives
pub use crate::geom2::{
    area, centroid, classify, interpolate, is_simple, orientation, quasi_perimeter, signed_area,
    GeomCfg, Orientation, Position, Pt2,
};
// Triangulation and boundary extraction
pub use crate::hull::{
    build_polygon_edges, extract_boundary, triangulate, Delaunay, Edge, EdgeSet,
    TriangulationError,
};
// Chain ordering
pub use crate::chain::{order_covering, order_edges, walk_to_polygon, SequencingError};
// Deformation
pub use crate::jam::{jam, jam_in, jam_out, JamDirection, JamError};
// Generation and session state
pub use crate::scene::{
    draw_points, entropy_seed, generate_from_points, generate_points_and_polygon,
    generate_replay, generate_unseeded, GenerateError, Generation, ReplayToken, SceneCfg,
};
pub use crate::session::{JamMode, Session};
