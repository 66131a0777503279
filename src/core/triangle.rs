//! Triangles as ordered vertex triples.
//!
//! A triangle `(i, j, k)` is interpreted positively oriented and is equal to
//! its cyclic shifts `(j, k, i)` and `(k, i, j)`; the reverse orientation is a
//! distinct triangle. Equality and hashing go through a canonical rotation:
//! ghost triangles store the ghost vertex last, solid triangles store their
//! smallest vertex first.

use crate::core::edge::Edge;
use crate::core::vertex::{is_ghost_vertex, VertexId};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A triangle referencing its three vertices by index.
///
/// A *solid* triangle has three positive indices; a *ghost* triangle has
/// exactly one ghost index and represents a piece of the unbounded face.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Triangle {
    vertices: [VertexId; 3],
}

impl Triangle {
    /// Creates a triangle from three vertex indices, kept in the given
    /// rotation.
    #[inline]
    #[must_use]
    pub const fn new(i: VertexId, j: VertexId, k: VertexId) -> Self {
        Self {
            vertices: [i, j, k],
        }
    }

    /// The vertex triple in storage rotation.
    #[inline]
    #[must_use]
    pub const fn vertices(self) -> [VertexId; 3] {
        self.vertices
    }

    /// Returns `true` if one of the vertices is the ghost vertex.
    #[inline]
    #[must_use]
    pub fn is_ghost(self) -> bool {
        self.vertices.iter().any(|&v| is_ghost_vertex(v))
    }

    /// Returns `true` if all vertices are real points.
    #[inline]
    #[must_use]
    pub fn is_solid(self) -> bool {
        !self.is_ghost()
    }

    /// Returns `true` if `v` is a vertex of this triangle.
    #[inline]
    #[must_use]
    pub fn contains(self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }

    /// Rotates the triple left by one position.
    #[inline]
    #[must_use]
    const fn rotated(self) -> Self {
        let [i, j, k] = self.vertices;
        Self::new(j, k, i)
    }

    /// The canonical storage rotation: the ghost vertex is rotated into the
    /// last slot for ghost triangles, and the smallest vertex into the first
    /// slot for solid ones. Orientation is preserved.
    #[must_use]
    pub fn standard_form(self) -> Self {
        let mut t = self;
        if self.is_ghost() {
            while is_ghost_vertex(t.vertices[0]) || is_ghost_vertex(t.vertices[1]) {
                t = t.rotated();
            }
        } else {
            let min = *self.vertices.iter().min().unwrap_or(&self.vertices[0]);
            while t.vertices[0] != min {
                t = t.rotated();
            }
        }
        t
    }

    /// The three directed edges in rotation order.
    #[inline]
    #[must_use]
    pub const fn edges(self) -> [Edge; 3] {
        let [i, j, k] = self.vertices;
        [Edge::new(i, j), Edge::new(j, k), Edge::new(k, i)]
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        self.standard_form().vertices == other.standard_form().vertices
    }
}

impl Eq for Triangle {}

impl Hash for Triangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.standard_form().vertices.hash(state);
    }
}

impl From<[VertexId; 3]> for Triangle {
    #[inline]
    fn from([i, j, k]: [VertexId; 3]) -> Self {
        Self::new(i, j, k)
    }
}

impl std::fmt::Display for Triangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [i, j, k] = self.vertices;
        write!(f, "({i}, {j}, {k})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vertex::GHOST_VERTEX;

    #[test]
    fn equality_under_cyclic_shift() {
        let t = Triangle::new(1, 2, 3);
        assert_eq!(t, Triangle::new(2, 3, 1));
        assert_eq!(t, Triangle::new(3, 1, 2));
        // Reverse orientation is a different triangle.
        assert_ne!(t, Triangle::new(3, 2, 1));
    }

    #[test]
    fn standard_form_rotations() {
        assert_eq!(
            Triangle::new(3, 1, 2).standard_form().vertices(),
            [1, 2, 3]
        );
        let ghost = Triangle::new(GHOST_VERTEX, 5, 2);
        assert_eq!(ghost.standard_form().vertices(), [5, 2, GHOST_VERTEX]);
        assert!(ghost.is_ghost());
        assert!(!ghost.is_solid());
    }

    #[test]
    fn hashing_respects_cyclic_equality() {
        use crate::core::collections::FastHashSet;
        let mut set = FastHashSet::default();
        set.insert(Triangle::new(1, 2, 3));
        set.insert(Triangle::new(2, 3, 1));
        set.insert(Triangle::new(3, 2, 1));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Triangle::new(3, 1, 2)));
    }

    #[test]
    fn edges_follow_rotation() {
        let t = Triangle::new(1, 2, 3);
        assert_eq!(
            t.edges(),
            [Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 1)]
        );
    }
}
