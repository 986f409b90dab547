//! 2D geometry: predicates, point classification, small polygon utilities.
//!
//! Purpose
//! - Provide the numeric leaves everything else is built on: orientation,
//!   segment membership, strict point-in-triangle, crossing-number containment.
//! - Compose them into a single vertex/edge/inner/outer decision (`classify`).
//!
//! Tolerances
//! - All epsilons live in `GeomCfg`; defaults match the ones the deformer and
//!   the boundary extractor were tuned with (1e-12 classification, 1e-9 segment
//!   membership, 1e-20 ray-cast denominator guard).

mod classify;
pub mod predicates;
mod types;
mod util;

pub use classify::classify;
pub use predicates::{
    lies_on_segment, on_segment, orientation, point_in_triangle, ray_cast_contains,
    segments_intersect,
};
pub use types::{GeomCfg, Orientation, Position, Pt2};
pub use util::{area, centroid, interpolate, is_simple, quasi_perimeter, signed_area};
