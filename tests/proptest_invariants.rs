//! Property-based tests for the documented invariants: for random point sets
//! the produced triangulation satisfies the structural invariants and the
//! empty-circumcircle property on every unconstrained interior edge.

use delaunay2d::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn finite_coordinate() -> impl Strategy<Value = f64> {
    -100.0..100.0
}

/// Coordinates snapped to a coarse grid, provoking collinear and cocircular
/// configurations as well as exact duplicates.
fn gridded_coordinate() -> impl Strategy<Value = f64> {
    (-8i32..=8).prop_map(|i| f64::from(i) * 0.5)
}

fn check_build(points: &[Point], seed: u64) -> Result<(), TestCaseError> {
    let mut rng = StdRng::seed_from_u64(seed);
    match triangulate(points, &TriangulationOptions::default(), &mut rng) {
        Ok(tri) => {
            prop_assert!(tri.is_valid().is_ok(), "structural: {:?}", tri.is_valid());
            prop_assert!(
                tri.validate_delaunay().is_ok(),
                "delaunay: {:?}",
                tri.validate_delaunay()
            );
            prop_assert_eq!(tri.count_illegal_edges(), 0);
            prop_assert!(tri.num_ghost_triangles() >= 3);
            prop_assert_eq!(tri.get_convex_hull().len(), tri.num_ghost_triangles());
        }
        // All-collinear inputs are legitimately rejected.
        Err(TriangulationError::DegenerateInput { .. }) => {}
        Err(e) => return Err(TestCaseError::fail(format!("unexpected error: {e}"))),
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_invariants_hold_for_random_points(
        raw in prop::collection::vec((finite_coordinate(), finite_coordinate()), 3..48),
        seed in any::<u64>(),
    ) {
        let points: Vec<Point> = raw.into_iter().map(Point::from).collect();
        check_build(&points, seed)?;
    }

    #[test]
    fn prop_invariants_hold_for_degenerate_heavy_points(
        raw in prop::collection::vec((gridded_coordinate(), gridded_coordinate()), 3..32),
        seed in any::<u64>(),
    ) {
        let points: Vec<Point> = raw.into_iter().map(Point::from).collect();
        check_build(&points, seed)?;
    }

    #[test]
    fn prop_incremental_add_point_preserves_invariants(
        raw in prop::collection::vec((finite_coordinate(), finite_coordinate()), 4..24),
        extra in (finite_coordinate(), finite_coordinate()),
        seed in any::<u64>(),
    ) {
        let points: Vec<Point> = raw.into_iter().map(Point::from).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        if let Ok(mut tri) = triangulate(&points, &TriangulationOptions::default(), &mut rng) {
            tri.add_point(Point::from(extra), &mut rng).unwrap();
            prop_assert!(tri.is_valid().is_ok());
            prop_assert!(tri.validate_delaunay().is_ok());
        }
    }
}
