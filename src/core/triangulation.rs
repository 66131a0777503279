//! The triangulation container.
//!
//! [`Triangulation`] bundles the point store, the three topology maps, the
//! triangle set, the constrained-edge sets, and the boundary bookkeeping
//! (convex hull, ghost envelope, representative points). All topology edits go
//! through [`Triangulation::add_triangle`] and
//! [`Triangulation::delete_triangle`], which keep the maps mutually
//! consistent; a precondition failure leaves the index untouched.
//!
//! # Ghost triangles
//!
//! Every boundary edge `(u, v)` (traversed counter-clockwise on the hull) is
//! closed off by exactly one ghost triangle `(v, u, ghost)`, so the unbounded
//! face is a fan of triangles around the ghost vertex and the algorithms can
//! treat the outer face uniformly. Ghost triangles may be referenced by any
//! rotation; [`Triangle::standard_form`] gives the storage rotation with the
//! ghost vertex last.

use crate::core::adjacency::{Adjacent, AdjacentToVertex, Graph};
use crate::core::algorithms::locate::LocateError;
use crate::core::algorithms::segments::ConstraintError;
use crate::core::collections::{FastHashMap, FastHashSet};
use crate::core::edge::Edge;
use crate::core::representative::RepresentativeCoordinates;
use crate::core::triangle::Triangle;
use crate::core::validation::InvariantViolation;
use crate::core::vertex::{
    is_ghost_vertex, is_solid_vertex, VertexId, EMPTY_VERTEX, GHOST_VERTEX,
};
use crate::geometry::point::Point;
use crate::geometry::position::{
    point_position_relative_to_oriented_outer_halfplane, point_position_relative_to_triangle,
    HalfplanePosition, TrianglePosition,
};
use crate::geometry::predicates::{circumcircle_position, InCircle};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors surfaced by triangulation construction and incremental edits.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TriangulationError {
    /// All input points are collinear, so no valid initial triangle exists.
    #[error("all {num_points} candidate points are collinear; no valid initial triangle exists")]
    DegenerateInput {
        /// Number of points considered.
        num_points: usize,
    },
    /// The point to insert coincides with an existing vertex.
    #[error("point {index} at ({x}, {y}) coincides with an existing vertex")]
    DuplicatePoint {
        /// Index of the rejected point.
        index: VertexId,
        /// Its x-coordinate.
        x: f64,
        /// Its y-coordinate.
        y: f64,
    },
    /// A constrained-edge operation could not be carried out.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
    /// A topology edit detected a broken invariant. This indicates a library
    /// bug and should not be caught.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    /// Point location failed.
    #[error(transparent)]
    Locate(#[from] LocateError),
}

// =============================================================================
// TRIANGULATION
// =============================================================================

/// An incremental planar triangulation with ghost-triangle boundary handling
/// and constrained-edge bookkeeping.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Triangulation {
    points: Vec<Point>,
    adjacent: Adjacent,
    adjacent_to_vertex: AdjacentToVertex,
    graph: Graph,
    triangles: FastHashSet<Triangle>,
    constrained_edges: FastHashSet<Edge>,
    all_constrained_edges: FastHashSet<Edge>,
    convex_hull: Vec<VertexId>,
    boundary_nodes: Option<Vec<VertexId>>,
    representative_points: Vec<RepresentativeCoordinates>,
    locked_hull_edges: FastHashSet<Edge>,
}

impl Default for Triangulation {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl Triangulation {
    /// Creates an empty triangulation over a copy of `points`.
    ///
    /// No triangles exist yet; use [`crate::core::builder::triangulate`] or
    /// insert points incrementally.
    #[must_use]
    pub fn new(points: &[Point]) -> Self {
        Self {
            points: points.to_vec(),
            adjacent: Adjacent::new(),
            adjacent_to_vertex: AdjacentToVertex::new(),
            graph: Graph::new(),
            triangles: FastHashSet::default(),
            constrained_edges: FastHashSet::default(),
            all_constrained_edges: FastHashSet::default(),
            convex_hull: Vec::new(),
            boundary_nodes: None,
            representative_points: vec![RepresentativeCoordinates::new()],
            locked_hull_edges: FastHashSet::default(),
        }
    }

    // =========================================================================
    // POINT STORE
    // =========================================================================

    /// Number of stored points.
    #[inline]
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The point referenced by the 1-based index `i`, if in range.
    #[must_use]
    pub fn get_point(&self, i: VertexId) -> Option<Point> {
        if is_solid_vertex(i) {
            self.points.get((i - 1) as usize).copied()
        } else {
            None
        }
    }

    /// The point referenced by `i`.
    ///
    /// Internal accessor for hot paths; `i` must be a valid solid index.
    #[inline]
    pub(crate) fn point(&self, i: VertexId) -> Point {
        debug_assert!(is_solid_vertex(i));
        self.points[(i - 1) as usize]
    }

    /// Appends a point, returning its index.
    pub fn push_point(&mut self, p: Point) -> VertexId {
        self.points.push(p);
        self.points.len() as VertexId
    }

    /// Iterates over `(index, point)` pairs of the point store.
    pub fn points(&self) -> impl Iterator<Item = (VertexId, Point)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(i, &p)| (i as VertexId + 1, p))
    }

    /// All valid point indices, inserted or not.
    pub fn point_indices(&self) -> impl Iterator<Item = VertexId> {
        1..=self.points.len() as VertexId
    }

    /// Returns `true` if vertex `i` currently participates in the
    /// triangulation.
    #[inline]
    #[must_use]
    pub fn is_inserted(&self, i: VertexId) -> bool {
        self.graph
            .neighbours(i)
            .is_some_and(|n| !n.is_empty())
    }

    // =========================================================================
    // TRIANGLE SET
    // =========================================================================

    /// Total number of triangles, ghost triangles included.
    #[inline]
    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Number of solid triangles.
    #[must_use]
    pub fn num_solid_triangles(&self) -> usize {
        self.solid_triangles().count()
    }

    /// Number of ghost triangles.
    #[must_use]
    pub fn num_ghost_triangles(&self) -> usize {
        self.ghost_triangles().count()
    }

    /// Iterates over all triangles in storage rotation.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.triangles.iter().copied()
    }

    /// Iterates over the solid triangles.
    pub fn solid_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.triangles().filter(|t| t.is_solid())
    }

    /// Iterates over the ghost triangles.
    pub fn ghost_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.triangles().filter(|t| t.is_ghost())
    }

    /// Returns `true` if `t` (under cyclic-shift equality) is present.
    #[inline]
    #[must_use]
    pub fn contains_triangle(&self, t: Triangle) -> bool {
        self.triangles.contains(&t)
    }

    /// Returns `true` if any ghost triangles are present.
    #[must_use]
    pub fn has_ghost_triangles(&self) -> bool {
        self.adjacent_to_vertex
            .get(GHOST_VERTEX)
            .is_some_and(|edges| !edges.is_empty())
    }

    // =========================================================================
    // TOPOLOGY EDITS
    // =========================================================================

    /// Registers the positively oriented triangle `(u, v, w)`.
    ///
    /// Writes the three adjacent entries, the three inverse entries, and the
    /// three neighbour pairs atomically. With `update_ghost_edges` set, the
    /// ghost envelope is refreshed around the new triangle: a ghost occupying
    /// one of its directed edges is removed first (the triangle fills what
    /// used to be a boundary edge), and a ghost is added for every edge of
    /// the new triangle that has no triangle on its far side.
    pub fn add_triangle(&mut self, u: VertexId, v: VertexId, w: VertexId, update_ghost_edges: bool) {
        let t = Triangle::new(u, v, w);
        if update_ghost_edges {
            for edge in t.edges() {
                let (a, b) = edge.vertices();
                if is_solid_vertex(a)
                    && is_solid_vertex(b)
                    && is_ghost_vertex(self.adjacent.get(a, b))
                {
                    self.delete_triangle_inner(Triangle::new(a, b, GHOST_VERTEX));
                }
            }
        }
        self.add_triangle_inner(t);
        if update_ghost_edges {
            for edge in t.edges() {
                let (a, b) = edge.vertices();
                if is_solid_vertex(a)
                    && is_solid_vertex(b)
                    && self.adjacent.get(b, a) == EMPTY_VERTEX
                {
                    self.add_triangle_inner(Triangle::new(b, a, GHOST_VERTEX));
                }
            }
        }
    }

    fn add_triangle_inner(&mut self, t: Triangle) {
        let t = t.standard_form();
        self.triangles.insert(t);
        let [i, j, k] = t.vertices();
        for (e, w) in [
            (Edge::new(i, j), k),
            (Edge::new(j, k), i),
            (Edge::new(k, i), j),
        ] {
            self.adjacent.insert(e.u, e.v, w);
            self.adjacent_to_vertex.insert(w, e);
            self.graph.add_neighbour(e.u, e.v);
        }
    }

    /// Deletes the triangle `(u, v, w)`.
    ///
    /// With `update_ghost_edges` set, ghost triangles attached to the deleted
    /// triangle's boundary edges are removed as well, unless
    /// `protect_boundary` keeps them alive to avoid a transient boundary
    /// inconsistency.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation::MissingTriangle`] (leaving the index
    /// untouched) if the triangle is not present.
    pub fn delete_triangle(
        &mut self,
        u: VertexId,
        v: VertexId,
        w: VertexId,
        protect_boundary: bool,
        update_ghost_edges: bool,
    ) -> Result<(), InvariantViolation> {
        let t = Triangle::new(u, v, w);
        if !self.triangles.contains(&t) {
            return Err(InvariantViolation::MissingTriangle { u, v, w });
        }
        self.delete_triangle_inner(t);
        if update_ghost_edges && !protect_boundary {
            for edge in t.edges() {
                let (a, b) = edge.vertices();
                if is_solid_vertex(a)
                    && is_solid_vertex(b)
                    && self.adjacent.get(b, a) == GHOST_VERTEX
                {
                    self.delete_triangle_inner(Triangle::new(b, a, GHOST_VERTEX));
                }
            }
        }
        Ok(())
    }

    fn delete_triangle_inner(&mut self, t: Triangle) {
        let t = t.standard_form();
        self.triangles.remove(&t);
        let [i, j, k] = t.vertices();
        for (e, w) in [
            (Edge::new(i, j), k),
            (Edge::new(j, k), i),
            (Edge::new(k, i), j),
        ] {
            self.adjacent.remove(e.u, e.v);
            self.adjacent_to_vertex.remove(w, e);
        }
        for e in t.edges() {
            if !self.adjacent.contains_edge(e.u, e.v) && !self.adjacent.contains_edge(e.v, e.u) {
                self.graph.remove_neighbour(e.u, e.v);
            }
        }
    }

    // =========================================================================
    // ADJACENCY QUERIES
    // =========================================================================

    /// The vertex completing the triangle on the left of the directed edge
    /// `(u, v)`, or [`EMPTY_VERTEX`] if no such triangle exists.
    #[inline]
    #[must_use]
    pub fn get_adjacent(&self, u: VertexId, v: VertexId) -> VertexId {
        self.adjacent.get(u, v)
    }

    /// The set of directed edges opposite vertex `w`.
    #[inline]
    #[must_use]
    pub fn adjacent_to_vertex(&self, w: VertexId) -> Option<&FastHashSet<Edge>> {
        self.adjacent_to_vertex.get(w)
    }

    /// The neighbour set of `v` in the undirected graph.
    #[inline]
    #[must_use]
    pub fn get_neighbours(&self, v: VertexId) -> Option<&FastHashSet<VertexId>> {
        self.graph.neighbours(v)
    }

    /// Iterates over the solid vertices currently in the triangulation.
    pub fn solid_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.graph
            .vertices()
            .filter(move |&v| is_solid_vertex(v) && self.is_inserted(v))
    }

    /// Number of solid vertices currently in the triangulation.
    #[must_use]
    pub fn num_solid_vertices(&self) -> usize {
        self.solid_vertices().count()
    }

    /// The ghost vertex, if any ghost triangles reference it.
    pub fn ghost_vertices(&self) -> impl Iterator<Item = VertexId> {
        self.has_ghost_triangles()
            .then_some(GHOST_VERTEX)
            .into_iter()
    }

    /// The undirected solid edges, one canonical representative each.
    #[must_use]
    pub fn solid_edges(&self) -> Vec<Edge> {
        let mut seen: FastHashSet<Edge> = FastHashSet::default();
        for (e, _) in self.adjacent.entries() {
            if is_solid_vertex(e.u) && is_solid_vertex(e.v) {
                seen.insert(e.canonical());
            }
        }
        let mut edges: Vec<Edge> = seen.into_iter().collect();
        edges.sort_unstable();
        edges
    }

    /// Number of undirected solid edges.
    #[must_use]
    pub fn num_solid_edges(&self) -> usize {
        self.solid_edges().len()
    }

    /// The undirected ghost edges (edges incident to the ghost vertex).
    #[must_use]
    pub fn ghost_edges(&self) -> Vec<Edge> {
        match self.graph.neighbours(GHOST_VERTEX) {
            Some(neighbours) => {
                let mut edges: Vec<Edge> = neighbours
                    .iter()
                    .map(|&v| Edge::new(v, GHOST_VERTEX))
                    .collect();
                edges.sort_unstable();
                edges
            }
            None => Vec::new(),
        }
    }

    // =========================================================================
    // CONSTRAINED EDGES
    // =========================================================================

    /// Returns `true` if the undirected edge `(u, v)` is constrained, either
    /// by the user or as a boundary edge.
    #[inline]
    #[must_use]
    pub fn is_constrained(&self, u: VertexId, v: VertexId) -> bool {
        self.all_constrained_edges
            .contains(&Edge::new(u, v).canonical())
    }

    /// Returns `true` if any constrained edges are recorded.
    #[inline]
    #[must_use]
    pub fn has_constrained_edges(&self) -> bool {
        !self.all_constrained_edges.is_empty()
    }

    /// Iterates over the user-constrained edges.
    pub fn constrained_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.constrained_edges.iter().copied()
    }

    /// Iterates over all constrained edges (user plus boundary).
    pub fn all_constrained_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.all_constrained_edges.iter().copied()
    }

    /// Records the undirected edge as constrained. User constraints go into
    /// both sets, boundary constraints only into the combined set.
    pub(crate) fn insert_constraint(&mut self, e: Edge, user: bool) {
        let e = e.canonical();
        if user {
            self.constrained_edges.insert(e);
        }
        self.all_constrained_edges.insert(e);
    }

    /// Removes the undirected edge from both constrained-edge sets.
    pub(crate) fn remove_constraint(&mut self, e: Edge) {
        let e = e.canonical();
        self.constrained_edges.remove(&e);
        self.all_constrained_edges.remove(&e);
    }

    /// Returns `true` if `(u, v)` is a user constraint.
    #[must_use]
    pub fn is_user_constrained(&self, u: VertexId, v: VertexId) -> bool {
        self.constrained_edges
            .contains(&Edge::new(u, v).canonical())
    }

    // =========================================================================
    // CONVEX HULL
    // =========================================================================

    /// The current convex hull as a counter-clockwise cyclic vertex sequence.
    ///
    /// Valid after [`crate::core::builder::triangulate`] or an explicit
    /// [`Triangulation::reconstruct_convex_hull`].
    #[inline]
    #[must_use]
    pub fn get_convex_hull(&self) -> &[VertexId] {
        &self.convex_hull
    }

    /// Rebuilds the convex hull record from the current ghost envelope.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation::GhostEnvelope`] if no ghost triangles
    /// exist or the envelope does not close into a single cycle.
    pub fn reconstruct_convex_hull(&mut self) -> Result<(), InvariantViolation> {
        let Some(ghost_edges) = self.adjacent_to_vertex.get(GHOST_VERTEX) else {
            return Err(InvariantViolation::GhostEnvelope {
                message: "no ghost triangles to reconstruct the convex hull from".to_string(),
            });
        };
        if ghost_edges.is_empty() {
            return Err(InvariantViolation::GhostEnvelope {
                message: "no ghost triangles to reconstruct the convex hull from".to_string(),
            });
        }
        // Ghost triangle (i, j, ghost) closes the hull edge (j, i), so the
        // hull successor of j is i.
        let mut successor: FastHashMap<VertexId, VertexId> = FastHashMap::default();
        for e in ghost_edges {
            successor.insert(e.v, e.u);
        }
        let start = successor
            .keys()
            .copied()
            .min()
            .ok_or_else(|| InvariantViolation::GhostEnvelope {
                message: "empty hull successor map".to_string(),
            })?;
        let mut hull = vec![start];
        let mut current = successor[&start];
        while current != start {
            if hull.len() > successor.len() {
                return Err(InvariantViolation::GhostEnvelope {
                    message: "ghost envelope does not close into a single cycle".to_string(),
                });
            }
            hull.push(current);
            current = *successor.get(&current).ok_or_else(|| {
                InvariantViolation::GhostEnvelope {
                    message: format!("hull vertex {current} has no successor"),
                }
            })?;
        }
        if hull.len() != successor.len() {
            return Err(InvariantViolation::GhostEnvelope {
                message: "ghost envelope contains more than one cycle".to_string(),
            });
        }
        self.convex_hull = hull;
        Ok(())
    }

    /// Promotes every convex-hull edge to a constrained edge.
    ///
    /// # Errors
    ///
    /// Propagates hull reconstruction failure.
    pub fn lock_convex_hull(&mut self) -> Result<(), InvariantViolation> {
        self.reconstruct_convex_hull()?;
        let hull = self.convex_hull.clone();
        for idx in 0..hull.len() {
            let e = Edge::new(hull[idx], hull[(idx + 1) % hull.len()]).canonical();
            if !self.all_constrained_edges.contains(&e) {
                self.locked_hull_edges.insert(e);
                self.insert_constraint(e, true);
            }
        }
        Ok(())
    }

    /// Reverses [`Triangulation::lock_convex_hull`], dropping exactly the
    /// constraints the lock added.
    pub fn unlock_convex_hull(&mut self) {
        let locked: Vec<Edge> = self.locked_hull_edges.drain().collect();
        for e in locked {
            self.remove_constraint(e);
        }
    }

    // =========================================================================
    // GHOST MAINTENANCE
    // =========================================================================

    /// Deletes every ghost triangle.
    ///
    /// Reconstructs the convex-hull record first, since the ghost envelope is
    /// the only place it can be recovered from.
    pub fn delete_ghost_triangles(&mut self) {
        if self.convex_hull.is_empty() {
            let _ = self.reconstruct_convex_hull();
        }
        let ghosts: Vec<Triangle> = self.ghost_triangles().collect();
        for t in ghosts {
            self.delete_triangle_inner(t);
        }
    }

    /// Rebuilds the ghost envelope from the solid boundary edges.
    pub fn add_ghost_triangles(&mut self) {
        let boundary: Vec<Edge> = self
            .adjacent
            .entries()
            .filter(|(e, w)| {
                is_solid_vertex(e.u)
                    && is_solid_vertex(e.v)
                    && is_solid_vertex(*w)
                    && !self.adjacent.contains_edge(e.v, e.u)
            })
            .map(|(e, _)| e)
            .collect();
        for e in boundary {
            self.add_triangle_inner(Triangle::new(e.v, e.u, GHOST_VERTEX));
        }
    }

    /// Drops empty entries left behind in the inverse and graph maps by
    /// earlier deletions.
    pub fn clear_empty_features(&mut self) {
        self.adjacent_to_vertex.clear_empty();
        self.graph.clear_empty();
    }

    // =========================================================================
    // REPRESENTATIVE POINTS
    // =========================================================================

    /// The representative coordinate of `region`, if one has accumulated.
    #[must_use]
    pub fn representative_point(&self, region: usize) -> Option<Point> {
        self.representative_points
            .get(region)
            .and_then(RepresentativeCoordinates::coordinates)
    }

    /// Folds `p` into the representative accumulator of the main region.
    pub(crate) fn update_representative_point(&mut self, p: Point) {
        if let Some(rep) = self.representative_points.first_mut() {
            rep.add_point(p);
        }
    }

    /// Removes `p` from the representative accumulator of the main region.
    pub(crate) fn retract_representative_point(&mut self, p: Point) {
        if let Some(rep) = self.representative_points.first_mut() {
            rep.remove_point(p);
        }
    }

    /// Recomputes all representative points from the current solid vertices.
    pub fn compute_representative_points(&mut self) {
        for rep in &mut self.representative_points {
            rep.reset();
        }
        let vertices: Vec<VertexId> = self.solid_vertices().collect();
        for v in vertices {
            let p = self.point(v);
            self.update_representative_point(p);
        }
    }

    // =========================================================================
    // BOUNDARY NODES
    // =========================================================================

    /// The boundary-node cycle, when the triangulation was built against one.
    #[must_use]
    pub fn boundary_nodes(&self) -> Option<&[VertexId]> {
        self.boundary_nodes.as_deref()
    }

    pub(crate) fn set_boundary_nodes(&mut self, nodes: Vec<VertexId>) {
        self.boundary_nodes = Some(nodes);
    }

    /// Splices `r` between `u` and `v` in the boundary-node cycle, in either
    /// traversal direction.
    pub(crate) fn split_boundary_edge(&mut self, u: VertexId, v: VertexId, r: VertexId) {
        if let Some(nodes) = &mut self.boundary_nodes {
            let n = nodes.len();
            for idx in 0..n {
                let (a, b) = (nodes[idx], nodes[(idx + 1) % n]);
                if (a, b) == (u, v) || (a, b) == (v, u) {
                    nodes.insert(idx + 1, r);
                    return;
                }
            }
        }
    }

    // =========================================================================
    // GEOMETRIC CLASSIFICATION
    // =========================================================================

    /// Classifies `q` against the (possibly ghost) triangle `t`.
    ///
    /// For a ghost triangle the classification is against the outer halfplane
    /// it covers: strictly outside the hull maps to
    /// [`TrianglePosition::Outside`], on the supporting boundary edge to
    /// [`TrianglePosition::On`].
    #[must_use]
    pub fn point_position_relative_to_triangle(&self, t: Triangle, q: Point) -> TrianglePosition {
        if t.is_ghost() {
            let [i, j, _] = t.standard_form().vertices();
            match point_position_relative_to_oriented_outer_halfplane(
                self.point(i),
                self.point(j),
                q,
            ) {
                HalfplanePosition::On => TrianglePosition::On,
                HalfplanePosition::Inside | HalfplanePosition::Outside => {
                    TrianglePosition::Outside
                }
            }
        } else {
            let [a, b, c] = t.vertices();
            point_position_relative_to_triangle(self.point(a), self.point(b), self.point(c), q)
        }
    }

    /// Classifies `q` against the circumcircle of `t`.
    ///
    /// The circumcircle of a ghost triangle degenerates to the outer
    /// halfplane of its boundary edge, which is exactly the test cavity
    /// excavation needs to expand the hull uniformly.
    #[must_use]
    pub fn position_relative_to_circumcircle(&self, t: Triangle, q: Point) -> InCircle {
        if t.is_ghost() {
            let [i, j, _] = t.standard_form().vertices();
            match point_position_relative_to_oriented_outer_halfplane(
                self.point(i),
                self.point(j),
                q,
            ) {
                HalfplanePosition::Inside => InCircle::INSIDE,
                HalfplanePosition::On => InCircle::BOUNDARY,
                HalfplanePosition::Outside => InCircle::OUTSIDE,
            }
        } else {
            let [a, b, c] = t.vertices();
            circumcircle_position(self.point(a), self.point(b), self.point(c), q)
        }
    }

    /// Returns `true` if the directed edge `(u, v)` lies on the boundary,
    /// i.e. the triangle on its far side is a ghost.
    #[inline]
    #[must_use]
    pub fn is_boundary_edge(&self, u: VertexId, v: VertexId) -> bool {
        is_ghost_vertex(self.adjacent.get(v, u)) || is_ghost_vertex(self.adjacent.get(u, v))
    }

    // =========================================================================
    // CRATE-INTERNAL ACCESSORS
    // =========================================================================

    /// Raw `(directed edge, opposite vertex)` entries, for validation.
    pub(crate) fn adjacent_map_entries(&self) -> impl Iterator<Item = (Edge, VertexId)> + '_ {
        self.adjacent.entries()
    }

    /// Number of directed-edge entries in the adjacent map.
    pub(crate) fn num_adjacent_edge_entries(&self) -> usize {
        self.adjacent.len()
    }

    /// All vertex ids present in the graph.
    pub(crate) fn graph_vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.vertices()
    }

    /// Drops the bookkeeping entries of a vertex that no longer participates
    /// in any triangle.
    pub(crate) fn purge_vertex(&mut self, v: VertexId) {
        self.graph.remove_vertex(v);
        self.adjacent_to_vertex.remove_vertex(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_points() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ]
    }

    fn single_triangle() -> Triangulation {
        let mut tri = Triangulation::new(&triangle_points());
        tri.add_triangle(1, 2, 3, true);
        tri
    }

    #[test]
    fn add_triangle_writes_all_maps() {
        let tri = single_triangle();
        assert_eq!(tri.get_adjacent(1, 2), 3);
        assert_eq!(tri.get_adjacent(2, 3), 1);
        assert_eq!(tri.get_adjacent(3, 1), 2);
        assert!(tri.contains_triangle(Triangle::new(2, 3, 1)));
        assert!(tri.get_neighbours(1).unwrap().contains(&2));
        assert!(tri.get_neighbours(1).unwrap().contains(&GHOST_VERTEX));
        assert!(tri
            .adjacent_to_vertex(3)
            .unwrap()
            .contains(&Edge::new(1, 2)));
    }

    #[test]
    fn ghost_envelope_from_initial_triangle() {
        let tri = single_triangle();
        assert_eq!(tri.num_triangles(), 4);
        assert_eq!(tri.num_solid_triangles(), 1);
        assert_eq!(tri.num_ghost_triangles(), 3);
        assert!(tri.contains_triangle(Triangle::new(2, 1, GHOST_VERTEX)));
        assert!(tri.contains_triangle(Triangle::new(3, 2, GHOST_VERTEX)));
        assert!(tri.contains_triangle(Triangle::new(1, 3, GHOST_VERTEX)));
    }

    #[test]
    fn delete_triangle_is_atomic_on_failure() {
        let mut tri = single_triangle();
        let before = tri.num_triangles();
        let result = tri.delete_triangle(1, 2, 4, false, false);
        assert!(matches!(
            result,
            Err(InvariantViolation::MissingTriangle { .. })
        ));
        assert_eq!(tri.num_triangles(), before);
        assert_eq!(tri.get_adjacent(1, 2), 3);
    }

    #[test]
    fn delete_triangle_reverses_add() {
        let mut tri = single_triangle();
        tri.delete_triangle(1, 2, 3, false, true).unwrap();
        assert_eq!(tri.num_triangles(), 0);
        assert_eq!(tri.get_adjacent(1, 2), EMPTY_VERTEX);
        tri.clear_empty_features();
        assert!(!tri.is_inserted(1));
    }

    #[test]
    fn protect_boundary_keeps_ghosts() {
        let mut tri = single_triangle();
        tri.delete_triangle(1, 2, 3, true, true).unwrap();
        assert_eq!(tri.num_ghost_triangles(), 3);
        assert_eq!(tri.num_solid_triangles(), 0);
    }

    #[test]
    fn convex_hull_reconstruction() {
        let mut tri = single_triangle();
        tri.reconstruct_convex_hull().unwrap();
        assert_eq!(tri.get_convex_hull(), &[1, 2, 3]);
    }

    #[test]
    fn ghost_round_trip() {
        let mut tri = single_triangle();
        tri.delete_ghost_triangles();
        assert_eq!(tri.num_ghost_triangles(), 0);
        assert!(!tri.has_ghost_triangles());
        // Hull was preserved across the deletion.
        assert_eq!(tri.get_convex_hull(), &[1, 2, 3]);
        tri.add_ghost_triangles();
        assert_eq!(tri.num_ghost_triangles(), 3);
        assert!(tri.contains_triangle(Triangle::new(2, 1, GHOST_VERTEX)));
    }

    #[test]
    fn constraint_sets_stay_in_sync() {
        let mut tri = single_triangle();
        tri.insert_constraint(Edge::new(2, 1), true);
        assert!(tri.is_constrained(1, 2));
        assert!(tri.is_user_constrained(2, 1));
        tri.insert_constraint(Edge::new(2, 3), false);
        assert!(tri.is_constrained(3, 2));
        assert!(!tri.is_user_constrained(2, 3));
        tri.remove_constraint(Edge::new(1, 2));
        assert!(!tri.is_constrained(1, 2));
    }

    #[test]
    fn hull_lock_round_trip() {
        let mut tri = single_triangle();
        tri.lock_convex_hull().unwrap();
        assert!(tri.is_constrained(1, 2));
        assert!(tri.is_constrained(2, 3));
        assert!(tri.is_constrained(3, 1));
        tri.unlock_convex_hull();
        assert!(!tri.has_constrained_edges());
    }

    #[test]
    fn representative_point_tracks_mean() {
        let mut tri = single_triangle();
        for v in [1, 2, 3] {
            let p = tri.point(v);
            tri.update_representative_point(p);
        }
        let rep = tri.representative_point(0).unwrap();
        assert!((rep.x - 1.0 / 3.0).abs() < 1e-12);
        assert!((rep.y - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn circumcircle_of_ghost_is_outer_halfplane() {
        let tri = single_triangle();
        let ghost = Triangle::new(2, 1, GHOST_VERTEX);
        // Below the hull edge (1, 2) is inside the ghost's region.
        assert_eq!(
            tri.position_relative_to_circumcircle(ghost, Point::new(0.5, -1.0)),
            InCircle::INSIDE
        );
        assert_eq!(
            tri.position_relative_to_circumcircle(ghost, Point::new(0.5, 1.0)),
            InCircle::OUTSIDE
        );
        assert_eq!(
            tri.position_relative_to_circumcircle(ghost, Point::new(0.5, 0.0)),
            InCircle::BOUNDARY
        );
    }

    #[test]
    fn boundary_edge_detection() {
        let tri = single_triangle();
        assert!(tri.is_boundary_edge(1, 2));
        assert!(tri.is_boundary_edge(2, 1));
    }
}
