//! Index-based edges and the ordered edge set the extractor mutates.

use std::collections::btree_set;
use std::collections::{BTreeMap, BTreeSet};

/// Undirected edge between two point indices, stored as `lo < hi`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub lo: usize,
    pub hi: usize,
}

impl Edge {
    /// Canonical edge `{i, j}`. Self-loops are a caller bug.
    #[inline]
    pub fn new(i: usize, j: usize) -> Self {
        debug_assert_ne!(i, j, "self-loop edge {{{i}, {i}}}");
        Self {
            lo: i.min(j),
            hi: i.max(j),
        }
    }

    /// Canonical edge, or `None` for a self-loop.
    #[inline]
    pub fn try_new(i: usize, j: usize) -> Option<Self> {
        (i != j).then(|| Self::new(i, j))
    }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        self.lo == v || self.hi == v
    }

    /// The endpoint that is not `v` (assumes `v` is an endpoint).
    #[inline]
    pub fn other(&self, v: usize) -> usize {
        if self.lo == v {
            self.hi
        } else {
            self.lo
        }
    }

    #[inline]
    pub fn as_pair(&self) -> (usize, usize) {
        (self.lo, self.hi)
    }
}

impl From<(usize, usize)> for Edge {
    fn from((i, j): (usize, usize)) -> Self {
        Edge::new(i, j)
    }
}

impl From<Edge> for (usize, usize) {
    fn from(e: Edge) -> Self {
        e.as_pair()
    }
}

impl From<&Edge> for (usize, usize) {
    fn from(e: &Edge) -> Self {
        e.as_pair()
    }
}

/// Set of canonical edges iterated in ascending `(lo, hi)` order.
///
/// The ordering is part of the extractor's observable behaviour: the first
/// qualifying edge in this order is the one that gets replaced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeSet {
    edges: BTreeSet<Edge>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn insert(&mut self, e: Edge) -> bool {
        self.edges.insert(e)
    }

    #[inline]
    pub fn remove(&mut self, e: &Edge) -> bool {
        self.edges.remove(e)
    }

    #[inline]
    pub fn contains(&self, e: &Edge) -> bool {
        self.edges.contains(e)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> btree_set::Iter<'_, Edge> {
        self.edges.iter()
    }

    /// Edges as `(lo, hi)` pairs, ascending.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.edges.iter().map(Edge::as_pair).collect()
    }

    /// Indices touched by at least one edge.
    pub fn vertices(&self) -> BTreeSet<usize> {
        self.edges.iter().flat_map(|e| [e.lo, e.hi]).collect()
    }

    /// Incidence degree per touched vertex.
    pub fn degrees(&self) -> BTreeMap<usize, usize> {
        let mut deg = BTreeMap::new();
        for e in &self.edges {
            *deg.entry(e.lo).or_insert(0) += 1;
            *deg.entry(e.hi).or_insert(0) += 1;
        }
        deg
    }
}

impl FromIterator<Edge> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EdgeSet {
    type Item = &'a Edge;
    type IntoIter = btree_set::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
