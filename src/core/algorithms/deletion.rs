//! Vertex removal.
//!
//! Deleting an interior vertex removes its star and re-triangulates the
//! resulting polygon by Delaunay ear clipping: an ear is clipped only when it
//! is convex and its circumcircle contains none of the remaining polygon
//! vertices, which restores the Delaunay property inside the hole. Hull
//! vertices and vertices incident to constrained edges are refused; the
//! incremental engine makes no stronger deletion guarantees.

use crate::core::algorithms::segments::ConstraintError;
use crate::core::triangulation::{Triangulation, TriangulationError};
use crate::core::validation::InvariantViolation;
use crate::core::vertex::{is_solid_vertex, VertexId, GHOST_VERTEX};
use crate::geometry::predicates::{circumcircle_position, orient, InCircle};

impl Triangulation {
    /// Deletes the interior vertex `v` and re-triangulates its star.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::MissingVertex`] if `v` is not a vertex of
    /// the triangulation, and [`ConstraintError::UndeletableVertex`] if `v`
    /// lies on the convex hull or is an endpoint of a constrained edge.
    pub fn delete_point(&mut self, v: VertexId) -> Result<(), TriangulationError> {
        if !is_solid_vertex(v) || !self.is_inserted(v) {
            return Err(ConstraintError::MissingVertex { vertex: v }.into());
        }
        let neighbours: Vec<VertexId> = self
            .get_neighbours(v)
            .map(|n| n.iter().copied().collect())
            .unwrap_or_default();
        if neighbours.contains(&GHOST_VERTEX) {
            return Err(ConstraintError::UndeletableVertex {
                vertex: v,
                reason: "it lies on the convex hull".to_string(),
            }
            .into());
        }
        if neighbours.iter().any(|&n| self.is_constrained(v, n)) {
            return Err(ConstraintError::UndeletableVertex {
                vertex: v,
                reason: "it is an endpoint of a constrained edge".to_string(),
            }
            .into());
        }

        let polygon = self.star_polygon(v)?;
        let n = polygon.len();
        for idx in 0..n {
            self.delete_triangle(polygon[idx], polygon[(idx + 1) % n], v, true, false)?;
        }
        self.triangulate_star_polygon(&polygon)?;

        let p = self.point(v);
        self.retract_representative_point(p);
        self.purge_vertex(v);
        Ok(())
    }

    /// The neighbours of `v` in counter-clockwise order around it.
    fn star_polygon(&self, v: VertexId) -> Result<Vec<VertexId>, TriangulationError> {
        let first = self
            .adjacent_to_vertex(v)
            .and_then(|edges| edges.iter().next().copied())
            .ok_or(ConstraintError::MissingVertex { vertex: v })?;
        let mut polygon = vec![first.u, first.v];
        let mut current = first.v;
        loop {
            let next = self.get_adjacent(v, current);
            if next == first.u {
                break;
            }
            if !is_solid_vertex(next) || polygon.len() > self.num_triangles() {
                return Err(InvariantViolation::AdjacencyInconsistency {
                    message: format!("the star of vertex {v} does not close into a cycle"),
                }
                .into());
            }
            polygon.push(next);
            current = next;
        }
        Ok(polygon)
    }

    /// Fills the star polygon of a deleted vertex with Delaunay triangles.
    fn triangulate_star_polygon(
        &mut self,
        polygon: &[VertexId],
    ) -> Result<(), TriangulationError> {
        let mut poly: Vec<VertexId> = polygon.to_vec();
        while poly.len() > 3 {
            let n = poly.len();
            let mut clipped = false;
            for idx in 0..n {
                let (a, b, c) = (
                    poly[(idx + n - 1) % n],
                    poly[idx],
                    poly[(idx + 1) % n],
                );
                let (pa, pb, pc) = (self.point(a), self.point(b), self.point(c));
                if orient(pa, pb, pc) != 1 {
                    continue;
                }
                let empty = poly.iter().all(|&w| {
                    w == a
                        || w == b
                        || w == c
                        || circumcircle_position(pa, pb, pc, self.point(w)) != InCircle::INSIDE
                });
                if empty {
                    self.add_triangle(a, b, c, false);
                    poly.remove(idx);
                    clipped = true;
                    break;
                }
            }
            if !clipped {
                return Err(InvariantViolation::AdjacencyInconsistency {
                    message: "no clippable ear while re-triangulating a star polygon".to_string(),
                }
                .into());
            }
        }
        self.add_triangle(poly[0], poly[1], poly[2], false);
        Ok(())
    }
}
