//! The top-level triangulation driver.
//!
//! [`triangulate`] runs the full pipeline: choose an insertion order, seed
//! the triangulation with a positively oriented triangle from the first three
//! non-collinear points, insert the remaining points incrementally with
//! Bowyer–Watson, force in any constrained edges and boundary segments,
//! reconstruct the convex hull from the ghost envelope, and apply the
//! requested finishing passes.
//!
//! Every randomised step (order shuffle, location sampling, walk tie-breaks)
//! draws from the RNG passed by the caller, so identical inputs and seeds
//! produce identical triangulations.

use crate::core::algorithms::bowyer_watson::{add_point_bowyer_watson, InsertionOutcome};
use crate::core::algorithms::locate::{default_num_samples, LocateOptions};
use crate::core::algorithms::segments::ConstraintError;
use crate::core::collections::FastHashSet;
use crate::core::triangulation::{Triangulation, TriangulationError};
use crate::core::vertex::VertexId;
use crate::geometry::point::Point;
use crate::geometry::predicates::{triangle_orientation, Orientation};
use rand::seq::SliceRandom;
use rand::Rng;

/// Configuration for [`triangulate`].
///
/// The defaults randomise the insertion order, keep ghost triangles, seed
/// each point location from the previously inserted vertex, and recompute the
/// representative points once construction finishes.
#[derive(Clone, Debug)]
pub struct TriangulationOptions {
    /// Shuffle the insertion order. Ignored when `point_order` is given.
    pub randomise: bool,
    /// Remove the ghost triangles once construction finishes.
    pub delete_ghosts: bool,
    /// Drop empty inverse-map and graph entries once construction finishes.
    pub delete_empty_features: bool,
    /// Seed each point-location walk with the previously inserted vertex.
    pub try_last_inserted_point: bool,
    /// Point indices to leave out of the triangulation.
    pub skip_points: FastHashSet<VertexId>,
    /// Sample-size rule for the point-location jump step.
    pub num_sample_rule: fn(usize) -> usize,
    /// Explicit insertion order; overrides `randomise` and `skip_points`.
    pub point_order: Option<Vec<VertexId>>,
    /// Recompute the representative points from scratch at the end.
    pub recompute_representative_point: bool,
    /// Constrained edges to force into the triangulation.
    pub constrained_edges: Vec<(VertexId, VertexId)>,
    /// Cyclic boundary-node sequence; its edges are constrained as boundary
    /// edges.
    pub boundary_nodes: Option<Vec<VertexId>>,
    /// Reject duplicate points with an error instead of skipping them.
    pub strict: bool,
}

impl Default for TriangulationOptions {
    fn default() -> Self {
        Self {
            randomise: true,
            delete_ghosts: false,
            delete_empty_features: false,
            try_last_inserted_point: true,
            skip_points: FastHashSet::default(),
            num_sample_rule: default_num_samples,
            point_order: None,
            recompute_representative_point: true,
            constrained_edges: Vec::new(),
            boundary_nodes: None,
            strict: false,
        }
    }
}

impl TriangulationOptions {
    /// Sets whether the insertion order is shuffled.
    #[must_use]
    pub fn with_randomise(mut self, randomise: bool) -> Self {
        self.randomise = randomise;
        self
    }

    /// Sets whether ghost triangles are deleted after construction.
    #[must_use]
    pub fn with_delete_ghosts(mut self, delete_ghosts: bool) -> Self {
        self.delete_ghosts = delete_ghosts;
        self
    }

    /// Sets the indices excluded from the triangulation.
    #[must_use]
    pub fn with_skip_points(mut self, skip_points: FastHashSet<VertexId>) -> Self {
        self.skip_points = skip_points;
        self
    }

    /// Fixes the insertion order explicitly.
    #[must_use]
    pub fn with_point_order(mut self, point_order: Vec<VertexId>) -> Self {
        self.point_order = Some(point_order);
        self
    }

    /// Adds constrained edges to force into the triangulation.
    #[must_use]
    pub fn with_constrained_edges(mut self, edges: Vec<(VertexId, VertexId)>) -> Self {
        self.constrained_edges = edges;
        self
    }

    /// Sets the cyclic boundary-node sequence.
    #[must_use]
    pub fn with_boundary_nodes(mut self, nodes: Vec<VertexId>) -> Self {
        self.boundary_nodes = Some(nodes);
        self
    }

    /// Sets strict duplicate handling.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Triangulates `points`.
///
/// # Errors
///
/// Returns [`TriangulationError::DegenerateInput`] when fewer than three
/// points remain after filtering or when all of them are collinear, and
/// propagates insertion, constraint, and location failures.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::core::builder::{triangulate, TriangulationOptions};
/// use delaunay2d::geometry::point::Point;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(0.0, 1.0),
/// ];
/// let mut rng = StdRng::seed_from_u64(0);
/// let tri = triangulate(&points, &TriangulationOptions::default(), &mut rng).unwrap();
/// assert_eq!(tri.num_solid_triangles(), 1);
/// assert_eq!(tri.get_convex_hull(), &[1, 2, 3]);
/// ```
pub fn triangulate<R: Rng + ?Sized>(
    points: &[Point],
    opts: &TriangulationOptions,
    rng: &mut R,
) -> Result<Triangulation, TriangulationError> {
    let mut tri = Triangulation::new(points);
    let mut order = initial_point_order(points.len(), opts, rng);
    if order.len() < 3 {
        return Err(TriangulationError::DegenerateInput {
            num_points: order.len(),
        });
    }
    for &r in &order {
        if tri.get_point(r).is_none() {
            return Err(ConstraintError::MissingVertex { vertex: r }.into());
        }
    }

    // Rotate the order until its first three points span a triangle. If no
    // rotation works, every cyclically consecutive triple is collinear, which
    // means the whole input is.
    let mut rotations = 0;
    let (i, j, k) = loop {
        let (i, j, k) = (order[0], order[1], order[2]);
        match triangle_orientation(tri.point(i), tri.point(j), tri.point(k)) {
            Orientation::POSITIVE => break (i, j, k),
            Orientation::NEGATIVE => break (i, k, j),
            Orientation::DEGENERATE => {
                rotations += 1;
                if rotations == order.len() {
                    return Err(TriangulationError::DegenerateInput {
                        num_points: order.len(),
                    });
                }
                order.rotate_left(1);
            }
        }
    };
    tri.add_triangle(i, j, k, true);
    for v in [i, j, k] {
        let p = tri.point(v);
        tri.update_representative_point(p);
    }

    let mut last_inserted = k;
    for &r in order.iter().skip(3) {
        let hint = opts.try_last_inserted_point.then_some(last_inserted);
        let locate_opts = LocateOptions {
            try_points: &[],
            num_sample_rule: opts.num_sample_rule,
            check_existence: tri.has_constrained_edges(),
        };
        let outcome = add_point_bowyer_watson(
            &mut tri,
            r,
            hint,
            locate_opts,
            opts.strict,
            !opts.recompute_representative_point,
            rng,
        )?;
        if outcome == InsertionOutcome::Inserted {
            last_inserted = r;
        }
    }

    if let Some(nodes) = &opts.boundary_nodes {
        tri.set_boundary_nodes(nodes.clone());
        for idx in 0..nodes.len() {
            let (u, v) = (nodes[idx], nodes[(idx + 1) % nodes.len()]);
            tri.insert_segment(u, v, false)?;
        }
    }
    for &(u, v) in &opts.constrained_edges {
        tri.add_edge(u, v)?;
    }

    tri.reconstruct_convex_hull()?;
    if opts.recompute_representative_point {
        tri.compute_representative_points();
    }
    if opts.delete_ghosts {
        tri.delete_ghost_triangles();
    }
    if opts.delete_empty_features {
        tri.clear_empty_features();
    }
    Ok(tri)
}

/// The insertion order: the explicit override when given, otherwise every
/// point index minus the skip set, shuffled on request.
fn initial_point_order<R: Rng + ?Sized>(
    num_points: usize,
    opts: &TriangulationOptions,
    rng: &mut R,
) -> Vec<VertexId> {
    if let Some(order) = &opts.point_order {
        return order.clone();
    }
    let mut order: Vec<VertexId> = (1..=num_points as VertexId)
        .filter(|i| !opts.skip_points.contains(i))
        .collect();
    if opts.randomise {
        order.shuffle(rng);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::triangle::Triangle;
    use crate::core::vertex::GHOST_VERTEX;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn single_triangle_build() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ];
        let mut rng = StdRng::seed_from_u64(0);
        let tri = triangulate(&points, &TriangulationOptions::default(), &mut rng).unwrap();
        assert_eq!(tri.num_solid_triangles(), 1);
        assert!(tri.contains_triangle(Triangle::new(1, 2, 3)));
        assert_eq!(tri.num_ghost_triangles(), 3);
        assert!(tri.contains_triangle(Triangle::new(2, 1, GHOST_VERTEX)));
        assert!(tri.contains_triangle(Triangle::new(3, 2, GHOST_VERTEX)));
        assert!(tri.contains_triangle(Triangle::new(1, 3, GHOST_VERTEX)));
        assert_eq!(tri.get_convex_hull(), &[1, 2, 3]);
        assert!(tri.is_valid().is_ok());
    }

    #[test]
    fn collinear_input_is_degenerate() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let result = triangulate(&points, &TriangulationOptions::default(), &mut rng);
        assert!(matches!(
            result,
            Err(TriangulationError::DegenerateInput { num_points: 4 })
        ));
    }

    #[test]
    fn too_few_points_is_degenerate() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let mut rng = StdRng::seed_from_u64(2);
        let result = triangulate(&points, &TriangulationOptions::default(), &mut rng);
        assert!(matches!(
            result,
            Err(TriangulationError::DegenerateInput { num_points: 2 })
        ));
    }

    #[test]
    fn collinear_prefix_is_rotated_past() {
        // The first three points are collinear; a later point rescues the
        // build.
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(1.0, 1.0),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let opts = TriangulationOptions::default().with_randomise(false);
        let tri = triangulate(&points, &opts, &mut rng).unwrap();
        assert_eq!(tri.num_solid_vertices(), 4);
        assert!(tri.is_valid().is_ok());
        assert!(tri.validate_delaunay().is_ok());
    }

    #[test]
    fn skip_points_are_left_out(){
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
            Point::new(2.0, 2.0),
        ];
        let mut skip = FastHashSet::default();
        skip.insert(5);
        let opts = TriangulationOptions::default().with_skip_points(skip);
        let mut rng = StdRng::seed_from_u64(4);
        let tri = triangulate(&points, &opts, &mut rng).unwrap();
        assert!(!tri.is_inserted(5));
        assert_eq!(tri.num_solid_vertices(), 4);
        assert_eq!(tri.num_solid_triangles(), 2);
    }

    #[test]
    fn explicit_point_order_is_respected() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        let opts = TriangulationOptions::default().with_point_order(vec![4, 3, 2, 1]);
        let mut rng = StdRng::seed_from_u64(5);
        let tri = triangulate(&points, &opts, &mut rng).unwrap();
        assert_eq!(tri.num_solid_vertices(), 4);
        assert!(tri.is_valid().is_ok());
    }

    #[test]
    fn identical_seeds_build_identical_triangulations() {
        let points: Vec<Point> = (0..40)
            .map(|i| {
                let x = f64::from(i % 8) + 0.13 * f64::from(i);
                let y = f64::from(i / 8) + 0.07 * f64::from(i % 5);
                Point::new(x, y)
            })
            .collect();
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let tri_a = triangulate(&points, &TriangulationOptions::default(), &mut rng_a).unwrap();
        let tri_b = triangulate(&points, &TriangulationOptions::default(), &mut rng_b).unwrap();
        assert_eq!(tri_a.num_triangles(), tri_b.num_triangles());
        for t in tri_a.triangles() {
            assert!(tri_b.contains_triangle(t));
        }
    }

    #[test]
    fn strict_mode_rejects_duplicates() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(2.0, 3.0),
            Point::new(4.0, 0.0),
        ];
        let mut rng = StdRng::seed_from_u64(6);
        let opts = TriangulationOptions::default()
            .with_randomise(false)
            .with_strict(true);
        let result = triangulate(&points, &opts, &mut rng);
        assert!(matches!(
            result,
            Err(TriangulationError::DuplicatePoint { index: 4, .. })
        ));

        let lax = TriangulationOptions::default().with_randomise(false);
        let tri = triangulate(&points, &lax, &mut rng).unwrap();
        assert_eq!(tri.num_solid_vertices(), 3);
    }

    #[test]
    fn constrained_edges_survive_the_build() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, -1.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 1.0),
        ];
        let opts =
            TriangulationOptions::default().with_constrained_edges(vec![(1, 3)]);
        let mut rng = StdRng::seed_from_u64(7);
        let tri = triangulate(&points, &opts, &mut rng).unwrap();
        assert!(tri.is_constrained(1, 3));
        assert!(tri.get_neighbours(1).unwrap().contains(&3));
        assert!(tri.is_valid().is_ok());
    }

    #[test]
    fn boundary_nodes_constrain_the_hull() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
            Point::new(2.0, 2.0),
        ];
        let opts = TriangulationOptions::default().with_boundary_nodes(vec![1, 2, 3, 4]);
        let mut rng = StdRng::seed_from_u64(8);
        let tri = triangulate(&points, &opts, &mut rng).unwrap();
        for (u, v) in [(1, 2), (2, 3), (3, 4), (4, 1)] {
            assert!(tri.is_constrained(u, v));
            assert!(!tri.is_user_constrained(u, v));
        }
        assert_eq!(tri.boundary_nodes(), Some(&[1, 2, 3, 4][..]));
        assert!(tri.is_valid().is_ok());
    }

    #[test]
    fn delete_ghosts_option() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ];
        let opts = TriangulationOptions::default().with_delete_ghosts(true);
        let mut rng = StdRng::seed_from_u64(9);
        let tri = triangulate(&points, &opts, &mut rng).unwrap();
        assert_eq!(tri.num_ghost_triangles(), 0);
        assert_eq!(tri.num_solid_triangles(), 1);
        // The hull was extracted before the ghosts were dropped.
        assert_eq!(tri.get_convex_hull(), &[1, 2, 3]);
    }

    #[test]
    fn representative_point_lands_inside_the_hull() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        let mut rng = StdRng::seed_from_u64(10);
        let tri = triangulate(&points, &TriangulationOptions::default(), &mut rng).unwrap();
        let rep = tri.representative_point(0).unwrap();
        assert!((rep.x - 2.0).abs() < 1e-12);
        assert!((rep.y - 2.0).abs() < 1e-12);
    }
}
