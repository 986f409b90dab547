//! Basic 2D types and tolerances used by the predicates and the classifier.
//!
//! - `Pt2`: a point in the plane (value type, `Copy`).
//! - `GeomCfg`: centralizes the epsilons for classification, segment membership
//!   during boundary extraction, and the ray-cast denominator guard.
//! - `Orientation`, `Position`: results of the orientation test and of point
//!   classification against a polygon.

use nalgebra::Vector2;
use std::fmt;

/// A point in the plane.
pub type Pt2 = Vector2<f64>;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Classification tolerance: vertex snapping, collinearity, ray intercepts.
    pub eps: f64,
    /// Closed-segment membership tolerance used while carving the boundary.
    pub eps_segment: f64,
    /// Added to the vertical span of an edge before dividing in the ray cast.
    pub eps_denominator: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps: 1e-12,
            eps_segment: 1e-9,
            eps_denominator: 1e-20,
        }
    }
}

impl GeomCfg {
    /// Same config with a different classification tolerance.
    #[inline]
    pub fn with_eps(self, eps: f64) -> Self {
        Self { eps, ..self }
    }
}

/// Orientation of an ordered triple of points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear,
    /// Two of the three points coincide exactly.
    Degenerate,
}

/// Position of a point relative to a polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    Vertex,
    Edge,
    Inner,
    Outer,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Vertex => "vertex",
            Position::Edge => "edge",
            Position::Inner => "inner",
            Position::Outer => "outer",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
