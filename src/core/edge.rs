//! Directed and canonical edge identifiers.
//!
//! The adjacent map is keyed by *directed* edges: `(u, v)` and `(v, u)` are
//! distinct keys belonging to the two triangles on either side of the
//! undirected edge. The constrained-edge sets store one canonical
//! representative per undirected edge, with endpoints sorted so `(a, b)` and
//! `(b, a)` map to the same entry.

use crate::core::vertex::{is_ghost_vertex, VertexId};
use serde::{Deserialize, Serialize};

/// A directed edge between two vertex indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    /// Origin vertex.
    pub u: VertexId,
    /// Destination vertex.
    pub v: VertexId,
}

impl Edge {
    /// Creates a new directed edge.
    #[inline]
    #[must_use]
    pub const fn new(u: VertexId, v: VertexId) -> Self {
        Self { u, v }
    }

    /// The same edge with its direction reversed.
    #[inline]
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self::new(self.v, self.u)
    }

    /// Canonical representative of the undirected edge: endpoints sorted
    /// ascending, so `(a, b)` and `(b, a)` compare equal after
    /// canonicalization.
    #[inline]
    #[must_use]
    pub fn canonical(self) -> Self {
        if self.u <= self.v {
            self
        } else {
            self.reversed()
        }
    }

    /// Returns `true` if either endpoint is the ghost vertex.
    #[inline]
    #[must_use]
    pub const fn is_ghost(self) -> bool {
        is_ghost_vertex(self.u) || is_ghost_vertex(self.v)
    }

    /// Both endpoints as a tuple.
    #[inline]
    #[must_use]
    pub const fn vertices(self) -> (VertexId, VertexId) {
        (self.u, self.v)
    }
}

impl From<(VertexId, VertexId)> for Edge {
    #[inline]
    fn from((u, v): (VertexId, VertexId)) -> Self {
        Self::new(u, v)
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} → {})", self.u, self.v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vertex::GHOST_VERTEX;

    #[test]
    fn canonical_sorts_endpoints() {
        assert_eq!(Edge::new(3, 1).canonical(), Edge::new(1, 3));
        assert_eq!(Edge::new(1, 3).canonical(), Edge::new(1, 3));
        assert_eq!(
            Edge::new(2, 1).canonical(),
            Edge::new(1, 2).reversed().canonical()
        );
    }

    #[test]
    fn directed_edges_are_distinct() {
        assert_ne!(Edge::new(1, 2), Edge::new(2, 1));
        assert_eq!(Edge::new(1, 2).reversed(), Edge::new(2, 1));
    }

    #[test]
    fn ghost_detection() {
        assert!(Edge::new(GHOST_VERTEX, 2).is_ghost());
        assert!(Edge::new(2, GHOST_VERTEX).is_ghost());
        assert!(!Edge::new(1, 2).is_ghost());
    }
}
