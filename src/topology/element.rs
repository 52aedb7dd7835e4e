//! Canonical derived sub-elements: edges and facets.
//!
//! Edges and facets are never stored by the arena; they are derived from cell
//! connectivity on demand. Deduplication relies on a canonical identity: the
//! vertex handles sorted ascending. The same facet reached through two
//! different cells therefore compares (and hashes) equal.

use std::fmt;

use crate::topology::handle::VertexId;

/// Unordered pair of vertex handles, stored sorted by handle value.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct Edge {
    lo: VertexId,
    hi: VertexId,
}

impl Edge {
    /// Builds the canonical edge for an unordered vertex pair.
    #[inline]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        debug_assert_ne!(a, b, "edge endpoints must be distinct");
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// The two endpoints, ascending.
    #[inline]
    pub fn vertices(&self) -> [VertexId; 2] {
        [self.lo, self.hi]
    }

    /// Whether `v` is one of the endpoints.
    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        self.lo == v || self.hi == v
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Edge").field(&self.lo).field(&self.hi).finish()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lo, self.hi)
    }
}

/// A `dim`-vertex sub-element of a cell, obtained by omitting one vertex.
///
/// Canonical identity is the sorted tuple of the remaining handles, so the
/// facet shared by two cells is recognized as one object regardless of which
/// cell produced it.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Facet {
    verts: Box<[VertexId]>,
}

impl Facet {
    /// Builds the canonical facet for the given vertex set.
    pub fn from_vertices<I>(vertices: I) -> Self
    where
        I: IntoIterator<Item = VertexId>,
    {
        let mut verts: Vec<VertexId> = vertices.into_iter().collect();
        verts.sort_unstable();
        debug_assert!(
            verts.windows(2).all(|w| w[0] != w[1]),
            "facet vertices must be distinct"
        );
        Self {
            verts: verts.into_boxed_slice(),
        }
    }

    /// Vertex handles in canonical (ascending) order.
    #[inline]
    pub fn vertices(&self) -> &[VertexId] {
        &self.verts
    }

    /// Number of vertices (the facet's dimension plus one).
    #[inline]
    pub fn arity(&self) -> usize {
        self.verts.len()
    }

    /// Whether `v` belongs to this facet.
    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        // Canonical order lets us binary-search.
        self.verts.binary_search(&v).is_ok()
    }

    /// Whether both endpoints of `e` belong to this facet.
    #[inline]
    pub fn contains_edge(&self, e: &Edge) -> bool {
        let [a, b] = e.vertices();
        self.contains(a) && self.contains(b)
    }
}

impl fmt::Debug for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Facet").field(&self.verts).finish()
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.verts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "}}")
    }
}
