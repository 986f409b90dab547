//! Boundary polygons from random point sets, and their erosion/dilation.
//!
//! Pipeline
//! - `scene`: draw points, run the generate step as one unit.
//! - `hull`: Delaunay triangulation and index-based boundary extraction.
//! - `chain`: order the boundary edges into a single walk.
//! - `jam`: one erode or dilate pass over a polygon.
//! - `geom2`: predicates and point-in-polygon classification.
//! - `session`: headless frame state (mode toggles, ticks, probing).
//!
//! API Policy
//! - Project-internal; `api` and `prelude` are convenience surfaces, not
//!   stability promises.

pub mod api;
pub mod chain;
pub mod geom2;
pub mod hull;
pub mod jam;
pub mod scene;
pub mod session;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{GeomCfg, Position, Pt2};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::{classify, GeomCfg, Orientation, Position, Pt2};
    pub use crate::jam::{jam_in, jam_out, JamDirection};
    pub use crate::scene::{generate_replay, Generation, ReplayToken, SceneCfg};
    pub use crate::session::{JamMode, Session};
    pub use nalgebra::Vector2 as Vec2;
}
