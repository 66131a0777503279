//! Structural and geometric invariant checks.
//!
//! [`Triangulation::is_valid`] verifies the structural invariants that every
//! public operation must preserve:
//!
//! - **Triangle consistency** – `(u, v, w)` is in the triangle set iff its
//!   three directed edges map to the correct opposite vertices, and every
//!   adjacent entry belongs to a stored triangle.
//! - **Neighbour consistency** – the undirected graph contains exactly the
//!   edges of the stored triangles.
//! - **Orientation** – every solid triangle is positively oriented.
//! - **Ghost envelope** – when ghost triangles are present, every boundary
//!   edge has exactly one ghost triangle closing it.
//! - **Constrained-edge containment** – every constrained edge is an edge of
//!   some triangle.
//!
//! The empty-circumcircle property is checked separately by
//! [`Triangulation::validate_delaunay`] because it is quadratic-ish and only
//! holds for unconstrained interior edges.

use crate::core::triangle::Triangle;
use crate::core::triangulation::Triangulation;
use crate::core::vertex::{is_solid_vertex, VertexId};
use crate::geometry::predicates::{circumcircle_position, triangle_orientation, InCircle, Orientation};
use thiserror::Error;

/// A broken internal invariant. Surfacing one of these indicates a library
/// bug, not a caller error.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A topology edit referenced a triangle that is not present.
    #[error("triangle ({u}, {v}, {w}) is not in the triangulation")]
    MissingTriangle {
        /// First vertex.
        u: VertexId,
        /// Second vertex.
        v: VertexId,
        /// Third vertex.
        w: VertexId,
    },
    /// The triangle set and the adjacent map disagree.
    #[error("adjacency inconsistency: {message}")]
    AdjacencyInconsistency {
        /// Description of the mismatch.
        message: String,
    },
    /// The undirected graph and the triangle set disagree.
    #[error("neighbour inconsistency: {message}")]
    NeighbourInconsistency {
        /// Description of the mismatch.
        message: String,
    },
    /// A solid triangle is degenerate or negatively oriented.
    #[error("triangle ({u}, {v}, {w}) is not positively oriented")]
    NegativeOrientation {
        /// First vertex.
        u: VertexId,
        /// Second vertex.
        v: VertexId,
        /// Third vertex.
        w: VertexId,
    },
    /// An unconstrained interior edge fails the empty-circumcircle property.
    #[error(
        "vertex {x} lies strictly inside the circumcircle of ({u}, {v}, {w}); edge ({u}, {v}) is not Delaunay"
    )]
    DelaunayViolation {
        /// First edge endpoint.
        u: VertexId,
        /// Second edge endpoint.
        v: VertexId,
        /// Apex of the offending triangle.
        w: VertexId,
        /// The encroaching opposite vertex.
        x: VertexId,
    },
    /// The ghost-triangle envelope around the boundary is broken.
    #[error("ghost envelope violation: {message}")]
    GhostEnvelope {
        /// Description of the failure.
        message: String,
    },
    /// A constrained edge is not an edge of any triangle.
    #[error("constrained edge ({u}, {v}) is not an edge of any triangle")]
    MissingConstrainedEdge {
        /// First endpoint.
        u: VertexId,
        /// Second endpoint.
        v: VertexId,
    },
}

impl Triangulation {
    /// Runs all structural invariant checks, returning the first failure.
    ///
    /// # Errors
    ///
    /// Returns the corresponding [`InvariantViolation`] when a check fails.
    pub fn is_valid(&self) -> Result<(), InvariantViolation> {
        self.validate_triangle_consistency()?;
        self.validate_neighbours()?;
        self.validate_orientation()?;
        if self.has_ghost_triangles() {
            self.validate_ghost_envelope()?;
        }
        self.validate_constrained_edge_containment()?;
        Ok(())
    }

    /// Checks that the triangle set and the two edge maps describe the same
    /// complex.
    pub(crate) fn validate_triangle_consistency(&self) -> Result<(), InvariantViolation> {
        for t in self.triangles() {
            let [i, j, k] = t.standard_form().vertices();
            for (u, v, w) in [(i, j, k), (j, k, i), (k, i, j)] {
                let got = self.get_adjacent(u, v);
                if got != w {
                    return Err(InvariantViolation::AdjacencyInconsistency {
                        message: format!(
                            "triangle ({i}, {j}, {k}) expects adjacent[({u}, {v})] = {w}, found {got}"
                        ),
                    });
                }
                match self.adjacent_to_vertex(w) {
                    Some(edges) if edges.contains(&crate::core::edge::Edge::new(u, v)) => {}
                    _ => {
                        return Err(InvariantViolation::AdjacencyInconsistency {
                            message: format!(
                                "edge ({u}, {v}) missing from the inverse map entry of {w}"
                            ),
                        });
                    }
                }
            }
        }
        // Every directed edge of every triangle appears exactly once, so the
        // adjacent map cannot contain anything beyond the triangle set.
        let expected = 3 * self.num_triangles();
        let actual = self.num_adjacent_edge_entries();
        if actual != expected {
            return Err(InvariantViolation::AdjacencyInconsistency {
                message: format!(
                    "{actual} directed edges registered, expected {expected} for {} triangles",
                    self.num_triangles()
                ),
            });
        }
        for (e, w) in self.adjacent_map_entries() {
            if !self.contains_triangle(Triangle::new(e.u, e.v, w)) {
                return Err(InvariantViolation::AdjacencyInconsistency {
                    message: format!(
                        "adjacent[({}, {})] = {w} does not correspond to a stored triangle",
                        e.u, e.v
                    ),
                });
            }
        }
        Ok(())
    }

    /// Checks that the undirected graph matches the triangle edges.
    pub(crate) fn validate_neighbours(&self) -> Result<(), InvariantViolation> {
        for t in self.triangles() {
            for e in t.edges() {
                let ok = self
                    .get_neighbours(e.u)
                    .is_some_and(|n| n.contains(&e.v))
                    && self.get_neighbours(e.v).is_some_and(|n| n.contains(&e.u));
                if !ok {
                    return Err(InvariantViolation::NeighbourInconsistency {
                        message: format!("triangle edge {e} is missing from the graph"),
                    });
                }
            }
        }
        let graph_vertices: Vec<VertexId> = self.graph_vertex_ids().collect();
        for u in graph_vertices {
            let Some(neighbours) = self.get_neighbours(u) else {
                continue;
            };
            for &v in neighbours {
                if self.get_adjacent(u, v) == crate::core::vertex::EMPTY_VERTEX
                    && self.get_adjacent(v, u) == crate::core::vertex::EMPTY_VERTEX
                {
                    return Err(InvariantViolation::NeighbourInconsistency {
                        message: format!("graph edge ({u}, {v}) has no triangle"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Checks that every solid triangle is positively oriented.
    pub(crate) fn validate_orientation(&self) -> Result<(), InvariantViolation> {
        for t in self.solid_triangles() {
            let [u, v, w] = t.vertices();
            if triangle_orientation(self.point(u), self.point(v), self.point(w))
                != Orientation::POSITIVE
            {
                return Err(InvariantViolation::NegativeOrientation { u, v, w });
            }
        }
        Ok(())
    }

    /// Checks that every boundary edge is closed by exactly one ghost
    /// triangle and every ghost triangle sits on a solid boundary edge.
    pub(crate) fn validate_ghost_envelope(&self) -> Result<(), InvariantViolation> {
        for t in self.solid_triangles() {
            for e in t.edges() {
                if self.get_adjacent(e.v, e.u) == crate::core::vertex::EMPTY_VERTEX {
                    return Err(InvariantViolation::GhostEnvelope {
                        message: format!("boundary edge {e} has no ghost triangle"),
                    });
                }
            }
        }
        for t in self.ghost_triangles() {
            let [i, j, _] = t.standard_form().vertices();
            let inside = self.get_adjacent(j, i);
            if !is_solid_vertex(inside) {
                return Err(InvariantViolation::GhostEnvelope {
                    message: format!(
                        "ghost triangle {t} is not backed by a solid triangle on edge ({j}, {i})"
                    ),
                });
            }
        }
        Ok(())
    }

    /// Checks that every constrained edge is an edge of some triangle.
    pub(crate) fn validate_constrained_edge_containment(&self) -> Result<(), InvariantViolation> {
        for e in self.all_constrained_edges() {
            if self.get_adjacent(e.u, e.v) == crate::core::vertex::EMPTY_VERTEX
                && self.get_adjacent(e.v, e.u) == crate::core::vertex::EMPTY_VERTEX
            {
                return Err(InvariantViolation::MissingConstrainedEdge { u: e.u, v: e.v });
            }
        }
        Ok(())
    }

    /// Checks the empty-circumcircle property for every unconstrained
    /// interior edge.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation::DelaunayViolation`] naming the offending
    /// edge and encroaching vertex.
    pub fn validate_delaunay(&self) -> Result<(), InvariantViolation> {
        for t in self.solid_triangles() {
            let [a, b, c] = t.vertices();
            for (u, v, w) in [(a, b, c), (b, c, a), (c, a, b)] {
                if self.is_constrained(u, v) {
                    continue;
                }
                let x = self.get_adjacent(v, u);
                if !is_solid_vertex(x) {
                    continue;
                }
                if circumcircle_position(
                    self.point(u),
                    self.point(v),
                    self.point(w),
                    self.point(x),
                ) == InCircle::INSIDE
                {
                    return Err(InvariantViolation::DelaunayViolation { u, v, w, x });
                }
            }
        }
        Ok(())
    }

    /// Checks that every interior unconstrained edge is legal; identical in
    /// outcome to [`Triangulation::validate_delaunay`] but phrased per edge.
    #[must_use]
    pub fn count_illegal_edges(&self) -> usize {
        let mut illegal = 0;
        for e in self.solid_edges() {
            if self.is_constrained(e.u, e.v) {
                continue;
            }
            let w = self.get_adjacent(e.u, e.v);
            let x = self.get_adjacent(e.v, e.u);
            if !is_solid_vertex(w) || !is_solid_vertex(x) {
                continue;
            }
            if circumcircle_position(
                self.point(e.u),
                self.point(e.v),
                self.point(w),
                self.point(x),
            ) == InCircle::INSIDE
            {
                illegal += 1;
            }
        }
        illegal
    }
}
