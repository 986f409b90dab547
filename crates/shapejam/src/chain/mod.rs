//! Chain ordering: linearize an undirected edge set into one oriented walk.
//!
//! Purpose
//! - Turn the extractor's edge set into the ordered vertex sequence the
//!   deformer consumes.
//!
//! The walk never backtracks. It is correct exactly when the edges already form
//! a simple path or cycle; anything else (branching vertices, several
//! components) is reported as a `SequencingError` rather than repaired.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::geom2::Pt2;
use crate::hull::{Edge, EdgeSet};

/// The edge set cannot be walked as a single chain or cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencingError {
    /// Number of degree-1 vertices is neither 0 (cycle) nor 2 (open chain).
    EndpointCount { count: usize },
    /// The walk stopped before using every edge (branching or disconnected).
    UnusedEdges { used: usize, total: usize },
    /// An input pair joins a vertex to itself.
    SelfLoop { vertex: usize },
    /// The walk does not visit every point index exactly once.
    Coverage {
        distinct: usize,
        steps: usize,
        total: usize,
    },
}

impl fmt::Display for SequencingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequencingError::EndpointCount { count } => write!(
                f,
                "edges cannot form a chain or cycle: {count} degree-1 vertices (need 0 or 2)"
            ),
            SequencingError::UnusedEdges { used, total } => write!(
                f,
                "edges cannot form a single chain: walk used {used} of {total} edges"
            ),
            SequencingError::SelfLoop { vertex } => {
                write!(f, "self-loop at vertex {vertex}")
            }
            SequencingError::Coverage {
                distinct,
                steps,
                total,
            } => write!(
                f,
                "walk of {steps} steps visits {distinct} distinct of {total} points"
            ),
        }
    }
}

impl std::error::Error for SequencingError {}

/// Order `edges` into one walk of oriented `(from, to)` pairs.
///
/// Pairs may come in either orientation and may repeat; they are canonicalized
/// and deduplicated first. The walk starts at the smallest degree-1 vertex for
/// an open chain, or at the smallest vertex for a cycle, and always takes the
/// first unused incident edge in ascending edge order.
pub fn order_edges<I>(edges: I) -> Result<Vec<(usize, usize)>, SequencingError>
where
    I: IntoIterator,
    I::Item: Into<(usize, usize)>,
{
    let mut canonical = EdgeSet::new();
    for pair in edges {
        let (i, j) = pair.into();
        let e = Edge::try_new(i, j).ok_or(SequencingError::SelfLoop { vertex: i })?;
        canonical.insert(e);
    }
    if canonical.is_empty() {
        return Ok(Vec::new());
    }

    let mut incident: BTreeMap<usize, Vec<Edge>> = BTreeMap::new();
    for e in &canonical {
        incident.entry(e.lo).or_default().push(*e);
        incident.entry(e.hi).or_default().push(*e);
    }

    let endpoints: Vec<usize> = canonical
        .degrees()
        .into_iter()
        .filter(|&(_, degree)| degree == 1)
        .map(|(v, _)| v)
        .collect();
    if !matches!(endpoints.len(), 0 | 2) {
        return Err(SequencingError::EndpointCount {
            count: endpoints.len(),
        });
    }
    let start = match (endpoints.first(), incident.keys().next()) {
        (Some(&v), _) | (None, Some(&v)) => v,
        (None, None) => return Ok(Vec::new()),
    };

    let mut used = EdgeSet::new();
    let mut walk = Vec::with_capacity(canonical.len());
    let mut current = start;
    while let Some(e) = incident[&current].iter().find(|e| !used.contains(*e)).copied() {
        used.insert(e);
        let next = e.other(current);
        walk.push((current, next));
        current = next;
    }

    if used.len() != canonical.len() {
        return Err(SequencingError::UnusedEdges {
            used: used.len(),
            total: canonical.len(),
        });
    }
    Ok(walk)
}

/// `order_edges`, additionally requiring the walk to start from every index in
/// `0..total` exactly once (a closed tour through the whole point set).
pub fn order_covering<I>(edges: I, total: usize) -> Result<Vec<(usize, usize)>, SequencingError>
where
    I: IntoIterator,
    I::Item: Into<(usize, usize)>,
{
    let walk = order_edges(edges)?;
    let starts: BTreeSet<usize> = walk.iter().map(|&(from, _)| from).collect();
    let exact = walk.len() == total && starts.len() == total && starts.iter().all(|&v| v < total);
    if !exact {
        return Err(SequencingError::Coverage {
            distinct: starts.len(),
            steps: walk.len(),
            total,
        });
    }
    Ok(walk)
}

/// Project an oriented walk onto points: the first endpoint of every edge.
pub fn walk_to_polygon(points: &[Pt2], walk: &[(usize, usize)]) -> Vec<Pt2> {
    walk.iter().map(|&(from, _)| points[from]).collect()
}
