//! Incremental Bowyer–Watson point insertion.
//!
//! Inserting a point `r` removes the *cavity* — the star-shaped set of
//! triangles whose circumcircles contain `r` — and re-fans the cavity
//! boundary from `r`. On a Delaunay triangulation the cavity is connected, so
//! the excavation is a simple graph search rooted at the located triangle:
//! cross an edge, test the triangle on the far side, and either keep digging
//! or close the cavity with a new triangle.
//!
//! Two edge classes halt the excavation. Constrained edges act as cavity
//! walls so that required segments survive every insertion, and hull edges
//! whose far side is a ghost vertex stop the dig from the inside. Ghost
//! triangles reached *through* the fan (via an edge containing the ghost
//! vertex) are excavated using the outer-halfplane form of the circumcircle
//! test, which is what grows the convex hull when the new point lies outside
//! it — no separate hull-expansion pass exists.
//!
//! The recursion is tail-shaped along only one branch, so it is run on an
//! explicit work-stack to bound depth by the cavity size.
//!
//! # References
//!
//! - Bowyer, A. "Computing Dirichlet tessellations." The Computer Journal
//!   24.2 (1981): 162-166.
//! - Watson, D.F. "Computing the n-dimensional Delaunay tessellation with
//!   application to Voronoi polytopes." The Computer Journal 24.2 (1981):
//!   167-172.

use crate::core::algorithms::locate::{locate_triangle, LocateOptions};
use crate::core::collections::SmallBuffer;
use crate::core::edge::Edge;
use crate::core::triangle::Triangle;
use crate::core::triangulation::{Triangulation, TriangulationError};
use crate::core::vertex::{is_ghost_vertex, is_solid_vertex, VertexId, EMPTY_VERTEX, GHOST_VERTEX};
use crate::geometry::point::Point;
use crate::geometry::position::TrianglePosition;
use crate::geometry::predicates::{orient, sameside, InCircle, Orientation, triangle_orientation};
use rand::Rng;

/// What happened to a submitted point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertionOutcome {
    /// The point was inserted and is now a vertex of the triangulation.
    Inserted,
    /// The point coincides with an existing vertex and was skipped.
    SkippedDuplicate,
}

/// Inserts the stored point with index `r` into the triangulation.
///
/// The point must already be present in the point store (see
/// [`Triangulation::push_point`]). `hint` seeds the point-location walk,
/// typically with the previously inserted vertex. Duplicates of existing
/// vertices are skipped silently unless `strict` is set, in which case they
/// surface as [`TriangulationError::DuplicatePoint`].
///
/// Handles the full set of insertion positions: strictly inside a triangle,
/// on an interior edge, on a constrained edge (which is split in the
/// constraint sets), on a boundary edge (which re-anchors the ghost fan), and
/// outside the convex hull (which grows the hull).
///
/// # Errors
///
/// Propagates location failures and internal invariant violations; with
/// `strict` set, also duplicate-point rejections.
pub fn add_point_bowyer_watson<R: Rng + ?Sized>(
    tri: &mut Triangulation,
    r: VertexId,
    hint: Option<VertexId>,
    opts: LocateOptions<'_>,
    strict: bool,
    update_representative_point: bool,
    rng: &mut R,
) -> Result<InsertionOutcome, TriangulationError> {
    let Some(q) = tri.get_point(r) else {
        return Err(crate::core::algorithms::segments::ConstraintError::MissingVertex {
            vertex: r,
        }
        .into());
    };

    let located = locate_triangle(tri, q, hint, opts, rng)?;
    let flag = tri.point_position_relative_to_triangle(located, q);

    for vid in located.vertices() {
        if is_solid_vertex(vid) && tri.point(vid) == q {
            if strict {
                return Err(TriangulationError::DuplicatePoint {
                    index: r,
                    x: q.x,
                    y: q.y,
                });
            }
            return Ok(InsertionOutcome::SkippedDuplicate);
        }
    }

    // Identify the supporting edge before the cavity destroys it. The edge is
    // oriented so that the solid side is (u, v, ·) and the ghost side, if
    // any, is (v, u, ghost).
    let on_edge = (flag == TrianglePosition::On)
        .then(|| find_supporting_edge(tri, located, q))
        .flatten();

    let [i, j, k] = located.vertices();
    tri.delete_triangle(i, j, k, true, false)?;
    dig_cavities(tri, r, q, &[(i, j), (j, k), (k, i)])?;

    if let Some(e) = on_edge {
        let (u, v) = e.vertices();
        if tri.is_constrained(u, v) {
            // dig_cavity refuses to cross constrained edges, so the side of
            // (u, v) opposite the located triangle is still intact and must
            // be excavated explicitly.
            for (a, b) in [(v, u), (u, v)] {
                let x = tri.get_adjacent(a, b);
                if is_solid_vertex(x) {
                    tri.delete_triangle(a, b, x, true, false)?;
                    dig_cavities(tri, r, q, &[(b, x), (x, a)])?;
                }
            }
            // Replace the constraint (u, v) by its two halves in both sets.
            let was_user = tri.is_user_constrained(u, v);
            tri.remove_constraint(Edge::new(u, v));
            tri.insert_constraint(Edge::new(u, r), was_user);
            tri.insert_constraint(Edge::new(r, v), was_user);
            tri.split_boundary_edge(u, v, r);
        }
        // A stale ghost under the split edge: (u, v) was a boundary edge, so
        // its single ghost must be replaced by the two ghosts of the halves.
        if tri.get_adjacent(v, u) == GHOST_VERTEX {
            tri.delete_triangle(v, u, GHOST_VERTEX, false, false)?;
            tri.add_triangle(r, u, GHOST_VERTEX, false);
            tri.add_triangle(v, r, GHOST_VERTEX, false);
        }
    }

    if update_representative_point {
        tri.update_representative_point(q);
    }
    Ok(InsertionOutcome::Inserted)
}

/// Excavates the cavity of `r` starting from the given directed edges of the
/// already-deleted seed triangle, re-fanning the cavity boundary from `r`.
///
/// For each directed edge `(a, b)` on the work-stack, the triangle on the far
/// side is `(b, a, ℓ)` with `ℓ = adjacent[(b, a)]`. An already-excavated far
/// side (`ℓ` empty) is skipped. The far triangle joins the cavity when the
/// edge is unconstrained, `ℓ` is a real vertex, and `r` lies strictly inside
/// its circumcircle (the outer halfplane for ghost triangles); otherwise
/// `(a, b)` is a cavity boundary edge and `(r, a, b)` closes it, except when
/// that triangle would be degenerate because `r` lies on the segment.
fn dig_cavities(
    tri: &mut Triangulation,
    r: VertexId,
    q: Point,
    seeds: &[(VertexId, VertexId)],
) -> Result<(), TriangulationError> {
    let mut stack: SmallBuffer<(VertexId, VertexId), 16> = SmallBuffer::from_slice(seeds);
    while let Some((a, b)) = stack.pop() {
        let ell = tri.get_adjacent(b, a);
        if ell == EMPTY_VERTEX {
            continue;
        }
        let far = Triangle::new(b, a, ell);
        let constrained =
            is_solid_vertex(a) && is_solid_vertex(b) && tri.is_constrained(a, b);
        if !constrained
            && !is_ghost_vertex(ell)
            && tri.position_relative_to_circumcircle(far, q) == InCircle::INSIDE
        {
            tri.delete_triangle(b, a, ell, true, false)?;
            stack.push((a, ell));
            stack.push((ell, b));
        } else if is_solid_vertex(a) && is_solid_vertex(b) {
            if triangle_orientation(q, tri.point(a), tri.point(b)) == Orientation::POSITIVE {
                tri.add_triangle(r, a, b, false);
            }
            // A degenerate (r, a, b) means r lies on the segment (a, b); the
            // on-edge repair fills this gap.
        } else {
            // One endpoint is the ghost vertex: close the cavity with a new
            // ghost triangle of the grown hull.
            tri.add_triangle(r, a, b, false);
        }
    }
    Ok(())
}

fn find_supporting_edge(tri: &Triangulation, t: Triangle, q: Point) -> Option<Edge> {
    if t.is_ghost() {
        // q lies on the hull edge closed by this ghost; the solid side of
        // the standard form (i, j, ghost) is the triangle on (j, i).
        let [i, j, _] = t.standard_form().vertices();
        return Some(Edge::new(j, i));
    }
    for e in t.edges() {
        let (a, b) = (tri.point(e.u), tri.point(e.v));
        if orient(a, b, q) == 0 && sameside(a, b, q) == -1 {
            return Some(e);
        }
    }
    None
}

impl Triangulation {
    /// Appends `p` to the point store and inserts it.
    ///
    /// Returns the new vertex index. If `p` duplicates an existing vertex the
    /// point stays in the store but is not inserted.
    ///
    /// # Errors
    ///
    /// Propagates location failures and internal invariant violations.
    pub fn add_point<R: Rng + ?Sized>(
        &mut self,
        p: Point,
        rng: &mut R,
    ) -> Result<VertexId, TriangulationError> {
        let r = self.push_point(p);
        let opts = LocateOptions {
            check_existence: self.has_constrained_edges(),
            ..LocateOptions::default()
        };
        add_point_bowyer_watson(self, r, None, opts, false, true, rng)?;
        Ok(r)
    }
}
