//! Jump-and-march point location.
//!
//! Finds the triangle containing a query point by sampling a handful of
//! vertices, starting from the nearest, and walking across the triangulation
//! toward the query. The walk crosses one edge per step, choosing among
//! candidate edges in random order so that degenerate configurations cannot
//! trap it in a cycle; collinear queries are resolved with the exact
//! `sameside` comparison. When the walk leaves the convex hull it hands over
//! to a scan of the ghost-triangle fan, which returns the ghost triangle whose
//! outer halfplane contains the query.
//!
//! # References
//!
//! - O. Devillers, S. Pion, and M. Teillaud, "Walking in a Triangulation",
//!   International Journal of Foundations of Computer Science, 2001.
//! - E. P. Mücke, I. Saias, and B. Zhu, "Fast randomized point location
//!   without preprocessing in two- and three-dimensional Delaunay
//!   triangulations", Computational Geometry 12 (1999).

use crate::core::edge::Edge;
use crate::core::triangle::Triangle;
use crate::core::triangulation::Triangulation;
use crate::core::vertex::{is_solid_vertex, VertexId, EMPTY_VERTEX, GHOST_VERTEX};
use crate::geometry::point::Point;
use crate::geometry::position::{
    point_position_relative_to_line, point_position_relative_to_oriented_outer_halfplane,
    HalfplanePosition, LinePosition,
};
use crate::geometry::predicates::sameside;
use rand::Rng;
use thiserror::Error;

/// Safety bound on walk steps; exceeding it means the topology is corrupted.
pub const MAX_WALK_STEPS: usize = 10_000;

/// How many times the walk may restart from a fresh sample before giving up.
const RESTART_LIMIT: usize = 8;

/// Errors during point location.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LocateError {
    /// The triangulation has no triangles to walk on.
    #[error("cannot locate a point in a triangulation with no triangles")]
    EmptyTriangulation,
    /// The walk exceeded its step bound, which protects against infinite
    /// loops on corrupted state.
    #[error("point location exceeded {steps} walk steps")]
    WalkFailure {
        /// Number of steps taken before giving up.
        steps: usize,
    },
}

/// Tuning knobs for [`locate_triangle`].
#[derive(Clone, Copy, Debug)]
pub struct LocateOptions<'a> {
    /// Extra candidate start vertices supplied by the caller, considered
    /// alongside the random sample.
    pub try_points: &'a [VertexId],
    /// Maps the current point count to the number of random seed candidates.
    pub num_sample_rule: fn(usize) -> usize,
    /// Guard against adjacency entries removed by recent constrained edits:
    /// on a missing entry the walk restarts from a fresh sample instead of
    /// failing.
    pub check_existence: bool,
}

impl Default for LocateOptions<'static> {
    fn default() -> Self {
        Self {
            try_points: &[],
            num_sample_rule: default_num_samples,
            check_existence: false,
        }
    }
}

/// Default sample-size rule: roughly the cube root of the point count,
/// divided by four and kept within a sensible band.
#[must_use]
pub fn default_num_samples(num_points: usize) -> usize {
    (((num_points as f64).cbrt() / 4.0).ceil() as usize).clamp(1, 32)
}

enum WalkOutcome {
    Found(Triangle),
    MissingAdjacency(Edge),
    StepLimit,
}

/// Locates the triangle containing `q`.
///
/// Returns a solid triangle when `q` lies inside the hull, and a ghost
/// triangle whose outer halfplane contains `q` when it lies outside. The
/// caller classifies the result with
/// [`Triangulation::point_position_relative_to_triangle`].
///
/// Randomness is used for seed sampling and for walk tie-breaks only, never
/// for correctness: identical triangulations and RNG states locate
/// identically.
///
/// # Errors
///
/// Returns [`LocateError::EmptyTriangulation`] when there is nothing to walk
/// on, and [`LocateError::WalkFailure`] when the step bound is exhausted.
pub fn locate_triangle<R: Rng + ?Sized>(
    tri: &Triangulation,
    q: Point,
    hint: Option<VertexId>,
    opts: LocateOptions<'_>,
    rng: &mut R,
) -> Result<Triangle, LocateError> {
    if tri.num_triangles() == 0 {
        return Err(LocateError::EmptyTriangulation);
    }
    let mut restarts = 0;
    loop {
        let seed = select_initial_point(tri, q, hint, opts, rng)
            .ok_or(LocateError::EmptyTriangulation)?;
        match walk_from(tri, seed, q, rng) {
            WalkOutcome::Found(t) => return Ok(t),
            WalkOutcome::MissingAdjacency(e) => {
                if opts.check_existence && restarts < RESTART_LIMIT {
                    restarts += 1;
                    continue;
                }
                // A boundary crossing with no ghost on the far side: the
                // query is outside a triangulation whose ghosts were deleted.
                return Ok(Triangle::new(e.v, e.u, GHOST_VERTEX));
            }
            WalkOutcome::StepLimit => {
                if restarts < RESTART_LIMIT {
                    restarts += 1;
                    continue;
                }
                return Err(LocateError::WalkFailure {
                    steps: MAX_WALK_STEPS,
                });
            }
        }
    }
}

/// Chooses the walk start: the nearest of the caller-supplied candidates, the
/// hint, and a random sample of the vertex set.
pub fn select_initial_point<R: Rng + ?Sized>(
    tri: &Triangulation,
    q: Point,
    hint: Option<VertexId>,
    opts: LocateOptions<'_>,
    rng: &mut R,
) -> Option<VertexId> {
    let mut best: Option<(VertexId, f64)> = None;
    let mut consider = |v: VertexId, best: &mut Option<(VertexId, f64)>| {
        if is_solid_vertex(v) && tri.is_inserted(v) {
            let d = tri.point(v).distance_squared(q);
            if best.map_or(true, |(_, bd)| d < bd) {
                *best = Some((v, d));
            }
        }
    };
    for &v in opts.try_points {
        consider(v, &mut best);
    }
    if let Some(h) = hint {
        consider(h, &mut best);
    }
    let n = tri.num_points();
    if n > 0 {
        let m = (opts.num_sample_rule)(n);
        for _ in 0..m {
            let v = rng.random_range(1..=n as VertexId);
            consider(v, &mut best);
        }
    }
    if best.is_none() {
        best = tri
            .solid_vertices()
            .next()
            .map(|v| (v, tri.point(v).distance_squared(q)));
    }
    best.map(|(v, _)| v)
}

/// Picks an incident triangle of `k` to start the walk from, preferring one
/// whose opposite edge already separates `k` from `q`.
fn initial_triangle(tri: &Triangulation, k: VertexId, q: Point) -> Option<Triangle> {
    let edges = tri.adjacent_to_vertex(k)?;
    let mut solid_fallback = None;
    let mut ghost_fallback = None;
    for e in edges {
        let t = Triangle::new(e.u, e.v, k);
        if t.is_ghost() {
            ghost_fallback.get_or_insert(t);
            continue;
        }
        solid_fallback.get_or_insert(t);
        if point_position_relative_to_line(tri.point(e.u), tri.point(e.v), q)
            == LinePosition::Right
        {
            return Some(t);
        }
    }
    solid_fallback.or(ghost_fallback)
}

fn walk_from<R: Rng + ?Sized>(
    tri: &Triangulation,
    seed: VertexId,
    q: Point,
    rng: &mut R,
) -> WalkOutcome {
    let Some(mut current) = initial_triangle(tri, seed, q) else {
        return WalkOutcome::StepLimit;
    };
    let mut entry: Option<Edge> = None;
    for _ in 0..MAX_WALK_STEPS {
        if current.is_ghost() {
            return resolve_ghost_fan(tri, current, q);
        }
        let edges = current.edges();
        // Tie-breaks only: the visiting order of the three edges is random,
        // never the crossing decision itself.
        let mut order = [0usize, 1, 2];
        for i in (1..3).rev() {
            let j = rng.random_range(0..=i);
            order.swap(i, j);
        }
        let mut crossed = false;
        for &idx in &order {
            let e = edges[idx];
            if entry == Some(e) {
                continue;
            }
            let (a, b) = (tri.point(e.u), tri.point(e.v));
            match point_position_relative_to_line(a, b, q) {
                LinePosition::Right => {
                    let w = tri.get_adjacent(e.v, e.u);
                    if w == EMPTY_VERTEX {
                        return WalkOutcome::MissingAdjacency(e);
                    }
                    current = Triangle::new(e.v, e.u, w);
                    entry = Some(Edge::new(e.v, e.u));
                    crossed = true;
                    break;
                }
                LinePosition::Collinear => {
                    // On the closed segment the current triangle contains q;
                    // beyond it, one of the other edges routes the walk.
                    if sameside(a, b, q) <= 0 {
                        return WalkOutcome::Found(current);
                    }
                }
                LinePosition::Left => {}
            }
        }
        if !crossed {
            return WalkOutcome::Found(current);
        }
    }
    WalkOutcome::StepLimit
}

/// Scans the ghost fan for the triangle whose outer halfplane contains `q`.
///
/// Entered when the walk crossed a hull edge, so `q` is outside (or on) the
/// hull and some ghost wedge must contain it; the scan is bounded by the fan
/// size.
fn resolve_ghost_fan(tri: &Triangulation, start: Triangle, q: Point) -> WalkOutcome {
    let mut t = start.standard_form();
    for _ in 0..=tri.num_triangles() {
        let [i, j, _] = t.vertices();
        match point_position_relative_to_oriented_outer_halfplane(tri.point(i), tri.point(j), q) {
            HalfplanePosition::Inside | HalfplanePosition::On => return WalkOutcome::Found(t),
            HalfplanePosition::Outside => {
                let next = tri.get_adjacent(GHOST_VERTEX, j);
                if next == EMPTY_VERTEX {
                    return WalkOutcome::MissingAdjacency(Edge::new(GHOST_VERTEX, j));
                }
                t = Triangle::new(j, next, GHOST_VERTEX);
            }
        }
    }
    WalkOutcome::StepLimit
}
