//! Triangulation-level properties: insertion-order independence for points
//! in general position, flip idempotence, and seed determinism.

use delaunay2d::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn triangle_set(tri: &Triangulation) -> Vec<Triangle> {
    let mut triangles: Vec<Triangle> = tri
        .triangles()
        .map(|t| t.standard_form())
        .collect();
    triangles.sort_unstable_by_key(|t| t.vertices());
    triangles
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Random continuous coordinates are in general position with probability
    // one, so any two insertion orders must produce the same triangle set.
    #[test]
    fn prop_insertion_order_does_not_matter(
        raw in prop::collection::vec((-100.0..100.0, -100.0..100.0), 4..32),
        seed_a in any::<u64>(),
        seed_b in any::<u64>(),
    ) {
        let mut points: Vec<Point> = raw.into_iter().map(Point::from).collect();
        // Duplicate coordinates would be attributed to different indices under
        // different insertion orders, so compare on distinct points only.
        let mut seen = std::collections::HashSet::new();
        points.retain(|p| seen.insert((p.x.to_bits(), p.y.to_bits())));
        if points.len() < 4 {
            return Ok(());
        }
        let mut rng_a = StdRng::seed_from_u64(seed_a);
        let mut rng_b = StdRng::seed_from_u64(seed_b);
        let opts = TriangulationOptions::default();
        if let (Ok(tri_a), Ok(tri_b)) = (
            triangulate(&points, &opts, &mut rng_a),
            triangulate(&points, &opts, &mut rng_b),
        ) {
            prop_assert_eq!(triangle_set(&tri_a), triangle_set(&tri_b));
        }
    }

    #[test]
    fn prop_identical_seeds_are_deterministic(
        raw in prop::collection::vec((-100.0..100.0, -100.0..100.0), 3..32),
        seed in any::<u64>(),
    ) {
        let points: Vec<Point> = raw.into_iter().map(Point::from).collect();
        let opts = TriangulationOptions::default();
        let mut rng_a = StdRng::seed_from_u64(seed);
        let mut rng_b = StdRng::seed_from_u64(seed);
        let result_a = triangulate(&points, &opts, &mut rng_a);
        let result_b = triangulate(&points, &opts, &mut rng_b);
        match (result_a, result_b) {
            (Ok(tri_a), Ok(tri_b)) => {
                prop_assert_eq!(triangle_set(&tri_a), triangle_set(&tri_b));
                prop_assert_eq!(tri_a.get_convex_hull(), tri_b.get_convex_hull());
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            (a, b) => {
                return Err(TestCaseError::fail(format!(
                    "same seed diverged: {a:?} vs {b:?}"
                )));
            }
        }
    }

    // Flipping any flippable edge twice restores the original triangulation.
    #[test]
    fn prop_flip_edge_is_an_involution(
        raw in prop::collection::vec((-100.0..100.0, -100.0..100.0), 4..24),
        seed in any::<u64>(),
    ) {
        let points: Vec<Point> = raw.into_iter().map(Point::from).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        let Ok(mut tri) = triangulate(&points, &TriangulationOptions::default(), &mut rng) else {
            return Ok(());
        };
        // Only an interior edge whose quadrilateral is convex (the diagonals
        // properly cross) can be flipped without folding a triangle.
        let Some(edge) = tri.solid_edges().into_iter().find(|e| {
            let w = tri.get_adjacent(e.u, e.v);
            let x = tri.get_adjacent(e.v, e.u);
            is_solid_vertex(w)
                && is_solid_vertex(x)
                && meet(
                    tri.get_point(e.u).unwrap(),
                    tri.get_point(e.v).unwrap(),
                    tri.get_point(w).unwrap(),
                    tri.get_point(x).unwrap(),
                ) == 1
        }) else {
            return Ok(());
        };
        let before = triangle_set(&tri);
        let w = tri.get_adjacent(edge.u, edge.v);
        let x = tri.get_adjacent(edge.v, edge.u);
        tri.flip_edge(edge.u, edge.v).unwrap();
        prop_assert!(tri.is_valid().is_ok());
        // The new diagonal is (x, w); flipping it restores the original.
        tri.flip_edge(x, w).unwrap();
        prop_assert_eq!(triangle_set(&tri), before);
        prop_assert!(tri.is_valid().is_ok());
    }
}

#[test]
fn point_order_override_matches_shuffled_builds() {
    let points = vec![
        Point::new(0.0, 0.0),
        Point::new(7.0, 1.0),
        Point::new(4.0, 6.0),
        Point::new(1.0, 5.0),
        Point::new(3.0, 2.0),
        Point::new(6.0, 4.0),
    ];
    let mut rng = StdRng::seed_from_u64(5);
    let shuffled =
        triangulate(&points, &TriangulationOptions::default(), &mut rng).unwrap();
    let fixed = triangulate(
        &points,
        &TriangulationOptions::default().with_point_order(vec![6, 5, 4, 3, 2, 1]),
        &mut rng,
    )
    .unwrap();
    assert_eq!(triangle_set(&shuffled), triangle_set(&fixed));
}
