//! Constrained segment insertion.
//!
//! [`Triangulation::add_edge`] forces a required segment into the
//! triangulation. When the segment is already an edge this only records the
//! constraint; otherwise the triangles crossed by the open segment form a
//! corridor, which is deleted and re-triangulated as two pseudo-polygons, one
//! on each side of the new edge. Each pseudo-polygon is triangulated
//! recursively from its base edge by picking the chain vertex whose
//! circumcircle is empty of the others, so the result is Delaunay within the
//! corridor.
//!
//! A vertex lying exactly on the open segment splits the insertion into the
//! two sub-segments, and a crossing with an existing constrained edge is
//! rejected before any mutation.
//!
//! # References
//!
//! - M. V. Anglada, "An improved incremental algorithm for constructing
//!   restricted Delaunay triangulations", Computers & Graphics 21 (1997).

use crate::core::collections::SmallBuffer;
use crate::core::edge::Edge;
use crate::core::triangle::Triangle;
use crate::core::triangulation::{Triangulation, TriangulationError};
use crate::core::validation::InvariantViolation;
use crate::core::vertex::{is_solid_vertex, VertexId};
use crate::geometry::predicates::{circumcircle_position, meet, orient, sameside, InCircle};
use thiserror::Error;

/// Errors raised by constrained-edge operations and vertex deletion.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConstraintError {
    /// An endpoint is not a vertex of the triangulation.
    #[error("vertex {vertex} is not a vertex of the triangulation")]
    MissingVertex {
        /// The offending index.
        vertex: VertexId,
    },
    /// Both endpoints are the same vertex.
    #[error("cannot constrain the degenerate edge ({u}, {v})")]
    DegenerateEdge {
        /// First endpoint.
        u: VertexId,
        /// Second endpoint.
        v: VertexId,
    },
    /// The segment crosses an existing constrained edge.
    #[error("segment ({u}, {v}) crosses the constrained edge ({a}, {b})")]
    CrossesConstrainedEdge {
        /// First endpoint of the new segment.
        u: VertexId,
        /// Second endpoint of the new segment.
        v: VertexId,
        /// First endpoint of the crossed constraint.
        a: VertexId,
        /// Second endpoint of the crossed constraint.
        b: VertexId,
    },
    /// The vertex cannot be deleted in its current configuration.
    #[error("vertex {vertex} cannot be deleted: {reason}")]
    UndeletableVertex {
        /// The vertex in question.
        vertex: VertexId,
        /// Why deletion was refused.
        reason: String,
    },
}

/// The corridor of triangles crossed by an interior segment, with the vertex
/// chains on either side.
struct SegmentCorridor {
    crossed: Vec<Triangle>,
    left_chain: SmallBuffer<VertexId, 8>,
    right_chain: SmallBuffer<VertexId, 8>,
    collinear_vertex: Option<VertexId>,
}

impl Triangulation {
    /// Forces the undirected edge `(u, v)` into the triangulation as a user
    /// constraint.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::MissingVertex`] or
    /// [`ConstraintError::DegenerateEdge`] for invalid endpoints, and
    /// [`ConstraintError::CrossesConstrainedEdge`] if the segment crosses an
    /// existing constraint; in all error cases the triangulation is left
    /// unchanged.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<(), TriangulationError> {
        if u == v {
            return Err(ConstraintError::DegenerateEdge { u, v }.into());
        }
        for vertex in [u, v] {
            if !is_solid_vertex(vertex) || !self.is_inserted(vertex) {
                return Err(ConstraintError::MissingVertex { vertex }.into());
            }
        }
        self.insert_segment(u, v, true)
    }

    /// Removes the user constraint on `(u, v)`. The edge itself stays in the
    /// triangulation; it is simply no longer protected.
    pub fn delete_edge(&mut self, u: VertexId, v: VertexId) {
        self.remove_constraint(Edge::new(u, v));
    }

    /// Inserts the segment `(u, v)`, re-triangulating the crossed corridor
    /// when necessary, and records the constraint (`user` selects the set).
    pub(crate) fn insert_segment(
        &mut self,
        u: VertexId,
        v: VertexId,
        user: bool,
    ) -> Result<(), TriangulationError> {
        if self
            .get_neighbours(u)
            .is_some_and(|n| n.contains(&v))
        {
            self.insert_constraint(Edge::new(u, v), user);
            return Ok(());
        }
        let corridor = self.collect_segment_corridor(u, v)?;
        if let Some(w) = corridor.collinear_vertex {
            self.insert_segment(u, w, user)?;
            self.insert_segment(w, v, user)?;
            return Ok(());
        }
        for t in &corridor.crossed {
            let [a, b, c] = t.vertices();
            self.delete_triangle(a, b, c, true, false)?;
        }
        self.triangulate_pseudo_polygon(&corridor.left_chain, u, v);
        let mut right: SmallBuffer<VertexId, 8> = corridor.right_chain;
        right.reverse();
        self.triangulate_pseudo_polygon(&right, v, u);
        self.insert_constraint(Edge::new(u, v), user);
        Ok(())
    }

    /// Collects the triangles crossed by the open segment `(u, v)` together
    /// with the chains of vertices strictly left and right of it. Read-only:
    /// a rejection leaves the triangulation untouched.
    fn collect_segment_corridor(
        &self,
        u: VertexId,
        v: VertexId,
    ) -> Result<SegmentCorridor, TriangulationError> {
        let pu = self.point(u);
        let pv = self.point(v);
        let edges = self
            .adjacent_to_vertex(u)
            .ok_or(ConstraintError::MissingVertex { vertex: u })?;

        // Find where the segment leaves the star of u: either through the
        // interior of an opposite edge, or exactly through a vertex.
        let mut first: Option<Edge> = None;
        let mut collinear_vertex = None;
        for e in edges {
            if e.is_ghost() {
                continue;
            }
            for c in [e.u, e.v] {
                if c != v
                    && orient(pu, pv, self.point(c)) == 0
                    && sameside(pu, pv, self.point(c)) == -1
                {
                    collinear_vertex = Some(c);
                }
            }
            if meet(pu, pv, self.point(e.u), self.point(e.v)) == 1 {
                first = Some(*e);
            }
        }
        if collinear_vertex.is_some() {
            return Ok(SegmentCorridor {
                crossed: Vec::new(),
                left_chain: SmallBuffer::new(),
                right_chain: SmallBuffer::new(),
                collinear_vertex,
            });
        }
        let Some(first) = first else {
            return Err(InvariantViolation::AdjacencyInconsistency {
                message: format!("no corridor from {u} toward {v}; the topology is inconsistent"),
            }
            .into());
        };

        // In the counter-clockwise star triangle (e.u, e.v, u), e.u lies to
        // the right of the segment u→v and e.v to its left.
        let mut crossed = vec![Triangle::new(first.u, first.v, u)];
        let mut right_chain: SmallBuffer<VertexId, 8> = SmallBuffer::new();
        let mut left_chain: SmallBuffer<VertexId, 8> = SmallBuffer::new();
        right_chain.push(first.u);
        left_chain.push(first.v);
        let mut cur = first;
        loop {
            if crossed.len() > self.num_triangles() {
                return Err(InvariantViolation::AdjacencyInconsistency {
                    message: format!("segment corridor from {u} to {v} does not terminate"),
                }
                .into());
            }
            if self.is_constrained(cur.u, cur.v) {
                return Err(ConstraintError::CrossesConstrainedEdge {
                    u,
                    v,
                    a: cur.u,
                    b: cur.v,
                }
                .into());
            }
            let c = self.get_adjacent(cur.v, cur.u);
            if !is_solid_vertex(c) {
                return Err(InvariantViolation::AdjacencyInconsistency {
                    message: format!("segment corridor from {u} to {v} escaped the hull"),
                }
                .into());
            }
            crossed.push(Triangle::new(cur.v, cur.u, c));
            if c == v {
                break;
            }
            match orient(pu, pv, self.point(c)) {
                0 => {
                    return Ok(SegmentCorridor {
                        crossed: Vec::new(),
                        left_chain: SmallBuffer::new(),
                        right_chain: SmallBuffer::new(),
                        collinear_vertex: Some(c),
                    });
                }
                1 => {
                    left_chain.push(c);
                    cur = Edge::new(cur.u, c);
                }
                _ => {
                    right_chain.push(c);
                    cur = Edge::new(c, cur.v);
                }
            }
        }
        Ok(SegmentCorridor {
            crossed,
            left_chain,
            right_chain,
            collinear_vertex: None,
        })
    }

    /// Triangulates the pseudo-polygon formed by `chain` and the base edge
    /// `(a, b)`, with every chain vertex strictly left of `a→b`.
    fn triangulate_pseudo_polygon(&mut self, chain: &[VertexId], a: VertexId, b: VertexId) {
        if chain.is_empty() {
            return;
        }
        let pa = self.point(a);
        let pb = self.point(b);
        let mut ci = 0;
        for (idx, &w) in chain.iter().enumerate().skip(1) {
            if circumcircle_position(pa, pb, self.point(chain[ci]), self.point(w))
                == InCircle::INSIDE
            {
                ci = idx;
            }
        }
        let c = chain[ci];
        self.triangulate_pseudo_polygon(&chain[..ci], a, c);
        self.triangulate_pseudo_polygon(&chain[ci + 1..], c, b);
        self.add_triangle(a, b, c, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::{triangulate, TriangulationOptions};
    use crate::geometry::point::Point;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn build(points: &[Point], seed: u64) -> Triangulation {
        let mut rng = StdRng::seed_from_u64(seed);
        triangulate(points, &TriangulationOptions::default(), &mut rng).unwrap()
    }

    #[test]
    fn existing_edge_only_records_the_constraint() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(2.0, 3.0),
        ];
        let mut tri = build(&points, 1);
        let before: Vec<Triangle> = tri.triangles().collect();
        tri.add_edge(1, 2).unwrap();
        assert!(tri.is_constrained(1, 2));
        assert!(tri.is_user_constrained(1, 2));
        let after: Vec<Triangle> = tri.triangles().collect();
        assert_eq!(before.len(), after.len());
        for t in before {
            assert!(tri.contains_triangle(t));
        }
        assert!(tri.is_valid().is_ok());
    }

    #[test]
    fn crossing_segment_is_forced_in() {
        // A quadrilateral whose Delaunay diagonal is (2, 4); constraining
        // (1, 3) re-triangulates the corridor around the other diagonal.
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, -1.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 1.0),
        ];
        let mut tri = build(&points, 2);
        assert!(tri.get_neighbours(2).unwrap().contains(&4));
        assert!(!tri.get_neighbours(1).unwrap().contains(&3));
        tri.add_edge(1, 3).unwrap();
        assert!(tri.get_neighbours(1).unwrap().contains(&3));
        assert!(tri.is_constrained(1, 3));
        assert!(tri.contains_triangle(Triangle::new(1, 3, 4)));
        assert!(tri.contains_triangle(Triangle::new(1, 2, 3)));
        assert!(tri.is_valid().is_ok());
    }

    #[test]
    fn longer_corridor_is_retriangulated() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, -1.0),
            Point::new(4.0, -1.2),
            Point::new(6.0, -1.0),
            Point::new(8.0, 0.0),
            Point::new(2.0, 1.0),
            Point::new(4.0, 1.2),
            Point::new(6.0, 1.0),
        ];
        let mut tri = build(&points, 3);
        tri.add_edge(1, 5).unwrap();
        assert!(tri.get_neighbours(1).unwrap().contains(&5));
        assert!(tri.is_constrained(1, 5));
        assert!(tri.is_valid().is_ok());
    }

    #[test]
    fn crossing_a_constraint_is_rejected_without_mutation() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, -1.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 1.0),
        ];
        let mut tri = build(&points, 4);
        tri.add_edge(2, 4).unwrap();
        let before: Vec<Triangle> = tri.triangles().collect();
        let result = tri.add_edge(1, 3);
        assert!(matches!(
            result,
            Err(TriangulationError::Constraint(
                ConstraintError::CrossesConstrainedEdge { .. }
            ))
        ));
        for t in before {
            assert!(tri.contains_triangle(t));
        }
        assert!(tri.is_valid().is_ok());
    }

    #[test]
    fn invalid_endpoints_are_rejected() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(2.0, 3.0),
        ];
        let mut tri = build(&points, 5);
        assert!(matches!(
            tri.add_edge(1, 1),
            Err(TriangulationError::Constraint(
                ConstraintError::DegenerateEdge { .. }
            ))
        ));
        assert!(matches!(
            tri.add_edge(1, 9),
            Err(TriangulationError::Constraint(
                ConstraintError::MissingVertex { vertex: 9 }
            ))
        ));
    }

    #[test]
    fn collinear_vertex_splits_the_constraint() {
        // Vertex 2 sits exactly on the segment (1, 3).
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, -2.0),
        ];
        let mut tri = build(&points, 6);
        tri.add_edge(1, 3).unwrap();
        assert!(tri.is_constrained(1, 2));
        assert!(tri.is_constrained(2, 3));
        assert!(tri.is_valid().is_ok());
    }

    #[test]
    fn delete_edge_unprotects() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(2.0, 3.0),
        ];
        let mut tri = build(&points, 7);
        tri.add_edge(1, 2).unwrap();
        assert!(tri.is_constrained(1, 2));
        tri.delete_edge(1, 2);
        assert!(!tri.is_constrained(1, 2));
        assert!(!tri.has_constrained_edges());
    }
}
