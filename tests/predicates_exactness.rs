//! Sign-exactness of the orientation and in-circle predicates.
//!
//! Points with small integer coordinates make the determinants exactly
//! computable in 128-bit integer arithmetic, which serves as an independent
//! oracle. The integer grids are dense in collinear and cocircular
//! configurations, exactly the near-degenerate inputs where a naive
//! floating-point evaluation flips signs.

use delaunay2d::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn exact_orient(p: Point, q: Point, r: Point) -> i8 {
    let (px, py) = (p.x as i128, p.y as i128);
    let (qx, qy) = (q.x as i128, q.y as i128);
    let (rx, ry) = (r.x as i128, r.y as i128);
    let det = (qx - px) * (ry - py) - (qy - py) * (rx - px);
    det.signum() as i8
}

fn exact_incircle(a: Point, b: Point, c: Point, p: Point) -> i8 {
    let lift = |q: Point| {
        let x = q.x as i128 - p.x as i128;
        let y = q.y as i128 - p.y as i128;
        (x, y, x * x + y * y)
    };
    let (ax, ay, al) = lift(a);
    let (bx, by, bl) = lift(b);
    let (cx, cy, cl) = lift(c);
    let det = ax * (by * cl - bl * cy) - ay * (bx * cl - bl * cx) + al * (bx * cy - by * cx);
    det.signum() as i8
}

fn integer_point<R: Rng>(rng: &mut R, range: i64) -> Point {
    Point::new(
        rng.random_range(-range..=range) as f64,
        rng.random_range(-range..=range) as f64,
    )
}

#[test]
fn orient_agrees_with_integer_oracle() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut degenerate = 0usize;
    for _ in 0..100_000 {
        // A tiny grid keeps exact collinearity frequent.
        let p = integer_point(&mut rng, 6);
        let q = integer_point(&mut rng, 6);
        let r = integer_point(&mut rng, 6);
        let expected = exact_orient(p, q, r);
        assert_eq!(orient(p, q, r), expected, "orient({p}, {q}, {r})");
        if expected == 0 {
            degenerate += 1;
        }
    }
    assert!(degenerate > 1_000, "the grid should produce collinear triples");
}

#[test]
fn orient_agrees_with_integer_oracle_on_large_coordinates() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100_000 {
        let p = integer_point(&mut rng, 1 << 20);
        let q = integer_point(&mut rng, 1 << 20);
        let r = integer_point(&mut rng, 1 << 20);
        assert_eq!(orient(p, q, r), exact_orient(p, q, r));
    }
}

#[test]
fn incircle_agrees_with_integer_oracle() {
    let mut rng = StdRng::seed_from_u64(2025);
    let mut on_circle = 0usize;
    let mut tested = 0usize;
    while tested < 100_000 {
        let a = integer_point(&mut rng, 8);
        let b = integer_point(&mut rng, 8);
        let c = integer_point(&mut rng, 8);
        // The in-circle sign convention requires a counter-clockwise triangle.
        if exact_orient(a, b, c) != 1 {
            continue;
        }
        let p = integer_point(&mut rng, 8);
        let expected = exact_incircle(a, b, c, p);
        assert_eq!(incircle(a, b, c, p), expected, "incircle({a}, {b}, {c}; {p})");
        if expected == 0 {
            on_circle += 1;
        }
        tested += 1;
    }
    assert!(on_circle > 100, "the grid should produce cocircular quadruples");
}

#[test]
fn orient_resolves_one_ulp_offsets() {
    // A long, nearly-degenerate sliver: the query point sits one ulp above
    // and below the exact line.
    let p = Point::new(0.0, 0.0);
    let q = Point::new(1e15, 0.5e15);
    for k in 1..=1_000u32 {
        let t = f64::from(k) / 1_000.0;
        let x = t * 1e15;
        let y = 0.5 * x;
        assert_eq!(orient(p, q, Point::new(x, y)), 0);
        assert_eq!(orient(p, q, Point::new(x, f64_next_up(y))), 1);
        assert_eq!(orient(p, q, Point::new(x, f64_next_down(y))), -1);
    }
}

fn f64_next_up(x: f64) -> f64 {
    f64::from_bits(x.to_bits() + 1)
}

fn f64_next_down(x: f64) -> f64 {
    f64::from_bits(x.to_bits() - 1)
}

#[test]
fn certificate_wrappers_match_primitive_signs() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..10_000 {
        let p = integer_point(&mut rng, 10);
        let q = integer_point(&mut rng, 10);
        let r = integer_point(&mut rng, 10);
        let cert = triangle_orientation(p, q, r);
        match orient(p, q, r) {
            1 => assert_eq!(cert, Orientation::POSITIVE),
            -1 => assert_eq!(cert, Orientation::NEGATIVE),
            _ => assert_eq!(cert, Orientation::DEGENERATE),
        }
    }
}
