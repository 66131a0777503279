//! Edge flipping, legalisation, and local splits.
//!
//! These primitives are not needed by Bowyer–Watson insertion itself (the
//! cavity algorithm produces Delaunay triangulations directly), but they are
//! the repair kit constrained-segment insertion and external layers build on:
//! [`Triangulation::flip_edge`] swaps the diagonal of the quadrilateral
//! around an edge, [`Triangulation::legalise_edge`] flips recursively until
//! the neighbourhood of a vertex is Delaunay again, and the split operations
//! refine a single edge or triangle in place.

use crate::core::edge::Edge;
use crate::core::triangle::Triangle;
use crate::core::triangulation::{Triangulation, TriangulationError};
use crate::core::validation::InvariantViolation;
use crate::core::vertex::{is_solid_vertex, VertexId, EMPTY_VERTEX};
use crate::geometry::predicates::{edge_legality, EdgeLegality};

impl Triangulation {
    /// Classifies the edge `(u, v)`.
    ///
    /// Constrained edges and edges with a ghost triangle on either side are
    /// always legal; an interior edge is illegal exactly when the opposite
    /// vertex of one incident triangle lies strictly inside the circumcircle
    /// of the other.
    #[must_use]
    pub fn is_legal(&self, u: VertexId, v: VertexId) -> EdgeLegality {
        if self.is_constrained(u, v) {
            return EdgeLegality::Legal;
        }
        let w = self.get_adjacent(u, v);
        let x = self.get_adjacent(v, u);
        if !is_solid_vertex(w) || !is_solid_vertex(x) {
            return EdgeLegality::Legal;
        }
        edge_legality(self.point(u), self.point(v), self.point(w), self.point(x))
    }

    /// Replaces the two triangles sharing `(u, v)` with the two triangles
    /// sharing the opposite diagonal of their quadrilateral.
    ///
    /// Flipping the same edge twice restores the original triangulation.
    ///
    /// # Errors
    ///
    /// Fails if `(u, v)` does not have a solid triangle on both sides.
    pub fn flip_edge(&mut self, u: VertexId, v: VertexId) -> Result<(), TriangulationError> {
        let w = self.get_adjacent(u, v);
        let x = self.get_adjacent(v, u);
        if !is_solid_vertex(w) || !is_solid_vertex(x) {
            return Err(InvariantViolation::MissingTriangle { u, v, w: x }.into());
        }
        self.delete_triangle(u, v, w, true, false)?;
        self.delete_triangle(v, u, x, true, false)?;
        self.add_triangle(x, w, u, false);
        self.add_triangle(w, x, v, false);
        Ok(())
    }

    /// Restores the Delaunay property around the newly inserted vertex `r` by
    /// flipping `(u, v)` if it is illegal and recursing on the two edges
    /// exposed by the flip.
    ///
    /// # Errors
    ///
    /// Propagates flip failures.
    pub fn legalise_edge(
        &mut self,
        u: VertexId,
        v: VertexId,
        r: VertexId,
    ) -> Result<(), TriangulationError> {
        if self.is_legal(u, v) == EdgeLegality::Illegal {
            let e = if self.get_adjacent(u, v) == r {
                self.get_adjacent(v, u)
            } else {
                self.get_adjacent(u, v)
            };
            self.flip_edge(u, v)?;
            self.legalise_edge(u, e, r)?;
            self.legalise_edge(e, v, r)?;
        }
        Ok(())
    }

    /// Splits the edge `(u, v)` at the existing vertex `r`, replacing each
    /// incident triangle (solid or ghost) by two.
    ///
    /// `r` is assumed to lie on the open segment `(u, v)`. If the edge is
    /// constrained, the constraint is replaced by its two halves and the
    /// boundary-node bookkeeping is updated.
    ///
    /// # Errors
    ///
    /// Fails if `(u, v)` is not an edge of the triangulation.
    pub fn split_edge(
        &mut self,
        u: VertexId,
        v: VertexId,
        r: VertexId,
    ) -> Result<(), TriangulationError> {
        if self.get_adjacent(u, v) == EMPTY_VERTEX && self.get_adjacent(v, u) == EMPTY_VERTEX {
            return Err(InvariantViolation::MissingTriangle {
                u,
                v,
                w: EMPTY_VERTEX,
            }
            .into());
        }
        for (a, b) in [(u, v), (v, u)] {
            let w = self.get_adjacent(a, b);
            if w == EMPTY_VERTEX {
                continue;
            }
            self.delete_triangle(a, b, w, true, false)?;
            self.add_triangle(a, r, w, false);
            self.add_triangle(r, b, w, false);
        }
        if self.is_constrained(u, v) {
            let was_user = self.is_user_constrained(u, v);
            self.remove_constraint(Edge::new(u, v));
            self.insert_constraint(Edge::new(u, r), was_user);
            self.insert_constraint(Edge::new(r, v), was_user);
            self.split_boundary_edge(u, v, r);
        }
        Ok(())
    }

    /// Splits `t` into three triangles fanned from the existing vertex `r`,
    /// which is assumed to lie strictly inside `t`.
    ///
    /// # Errors
    ///
    /// Fails if `t` is not in the triangulation.
    pub fn split_triangle(&mut self, t: Triangle, r: VertexId) -> Result<(), TriangulationError> {
        let [i, j, k] = t.vertices();
        self.delete_triangle(i, j, k, true, false)?;
        self.add_triangle(i, j, r, false);
        self.add_triangle(j, k, r, false);
        self.add_triangle(k, i, r, false);
        Ok(())
    }
}
