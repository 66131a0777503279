//! Sign-exact geometric predicates.
//!
//! This module contains the four primitive predicates the triangulator is
//! built on, each returning a sign in `{-1, 0, +1}`:
//!
//! | predicate | +1 | 0 | −1 |
//! |---|---|---|---|
//! | [`orient`] | `r` left of `p→q` | collinear | `r` right of `p→q` |
//! | [`incircle`] | `p` inside circumcircle of CCW `(a,b,c)` | on | outside |
//! | [`sameside`] | `a`, `b` on the same side of `p` | one equals `p` | opposite sides |
//! | [`meet`] | open segments cross properly | touch or miss | collinear overlap |
//!
//! [`orient`] and [`incircle`] delegate to adaptive-precision floating-point
//! expansions, so their sign is exact for all finite `f64` inputs; a naive
//! determinant evaluation is not acceptable here because a flipped sign near
//! degeneracy corrupts the topology permanently. [`sameside`] and [`meet`]
//! are composed from exact coordinate comparisons and [`orient`] signs.
//!
//! # References
//!
//! - Shewchuk, J. R. "Adaptive Precision Floating-Point Arithmetic and Fast
//!   Robust Geometric Predicates." Discrete & Computational Geometry 18, no. 3
//!   (1997): 305-363.

use crate::geometry::point::Point;
use robust::{incircle as robust_incircle, orient2d, Coord};

/// Represents the orientation of a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The triangle has negative (clockwise) orientation
    NEGATIVE,
    /// The triangle is degenerate (collinear vertices)
    DEGENERATE,
    /// The triangle has positive (counter-clockwise) orientation
    POSITIVE,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NEGATIVE => write!(f, "NEGATIVE"),
            Self::DEGENERATE => write!(f, "DEGENERATE"),
            Self::POSITIVE => write!(f, "POSITIVE"),
        }
    }
}

/// Represents the position of a point relative to a circumcircle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InCircle {
    /// The point is outside the circumcircle
    OUTSIDE,
    /// The point is on the boundary of the circumcircle
    BOUNDARY,
    /// The point is inside the circumcircle
    INSIDE,
}

impl std::fmt::Display for InCircle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OUTSIDE => write!(f, "OUTSIDE"),
            Self::BOUNDARY => write!(f, "BOUNDARY"),
            Self::INSIDE => write!(f, "INSIDE"),
        }
    }
}

/// Legality of an interior edge with respect to the opposite vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeLegality {
    /// The opposite vertex lies on or outside the circumcircle.
    Legal,
    /// The opposite vertex lies strictly inside the circumcircle; the edge
    /// must be flipped to restore the Delaunay property.
    Illegal,
}

#[inline]
fn coord(p: Point) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

#[inline]
fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Exact orientation test.
///
/// Returns `+1` if `r` lies strictly to the left of the directed line `p→q`,
/// `0` if the three points are collinear, and `-1` if `r` lies strictly to the
/// right.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::geometry::point::Point;
/// use delaunay2d::geometry::predicates::orient;
///
/// let p = Point::new(0.0, 0.0);
/// let q = Point::new(1.0, 0.0);
/// assert_eq!(orient(p, q, Point::new(0.5, 1.0)), 1);
/// assert_eq!(orient(p, q, Point::new(2.0, 0.0)), 0);
/// assert_eq!(orient(p, q, Point::new(0.5, -1.0)), -1);
/// ```
#[inline]
#[must_use]
pub fn orient(p: Point, q: Point, r: Point) -> i8 {
    sign(orient2d(coord(p), coord(q), coord(r)))
}

/// Exact in-circle test.
///
/// Given a positively oriented triangle `(a, b, c)`, returns `+1` if `p` lies
/// strictly inside the circumcircle, `0` if it lies on the circle, and `-1`
/// if it lies strictly outside. The sign is meaningless if `(a, b, c)` is
/// negatively oriented.
#[inline]
#[must_use]
pub fn incircle(a: Point, b: Point, c: Point, p: Point) -> i8 {
    sign(robust_incircle(coord(a), coord(b), coord(c), coord(p)))
}

/// Side comparison of two points relative to a third on a common line.
///
/// All three points must be collinear. Returns `0` if `a` or `b` equals `p`,
/// `+1` if `a` and `b` lie on the same side of `p` along the line, and `-1`
/// if they lie on opposite sides.
///
/// The comparison uses coordinate signs only, so no rounding is involved.
#[must_use]
pub fn sameside(a: Point, b: Point, p: Point) -> i8 {
    if a == p || b == p {
        return 0;
    }
    let side = |q: Point| -> i8 {
        if q.x != p.x {
            sign(q.x - p.x)
        } else {
            sign(q.y - p.y)
        }
    };
    if side(a) == side(b) {
        1
    } else {
        -1
    }
}

/// Exact segment-intersection test.
///
/// Returns `+1` if the open segments `(p,q)` and `(a,b)` cross in exactly one
/// interior point, `-1` if the segments are collinear and their closed
/// intersection contains more than one point, and `0` otherwise (disjoint,
/// sharing only an endpoint, or one endpoint touching the other segment's
/// interior).
#[must_use]
pub fn meet(p: Point, q: Point, a: Point, b: Point) -> i8 {
    let o1 = orient(p, q, a);
    let o2 = orient(p, q, b);
    let o3 = orient(a, b, p);
    let o4 = orient(a, b, q);

    if o1 * o2 < 0 && o3 * o4 < 0 {
        return 1;
    }

    if o1 == 0 && o2 == 0 {
        // All four points collinear: compare interval overlap on the dominant
        // axis of (p, q).
        let key: fn(Point) -> f64 = if (q.x - p.x).abs() >= (q.y - p.y).abs() {
            |r| r.x
        } else {
            |r| r.y
        };
        let (lo1, hi1) = minmax(key(p), key(q));
        let (lo2, hi2) = minmax(key(a), key(b));
        if lo1.max(lo2) < hi1.min(hi2) {
            return -1;
        }
    }

    0
}

#[inline]
fn minmax(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Classifies the orientation of the triangle `(p, q, r)`.
#[inline]
#[must_use]
pub fn triangle_orientation(p: Point, q: Point, r: Point) -> Orientation {
    match orient(p, q, r) {
        1 => Orientation::POSITIVE,
        -1 => Orientation::NEGATIVE,
        _ => Orientation::DEGENERATE,
    }
}

/// Classifies the position of `p` relative to the circumcircle of the
/// positively oriented triangle `(a, b, c)`.
#[inline]
#[must_use]
pub fn circumcircle_position(a: Point, b: Point, c: Point, p: Point) -> InCircle {
    match incircle(a, b, c, p) {
        1 => InCircle::INSIDE,
        -1 => InCircle::OUTSIDE,
        _ => InCircle::BOUNDARY,
    }
}

/// Legality of the edge `(a, b)` shared by the positively oriented triangle
/// `(a, b, w)` and the opposite vertex `x`.
///
/// The edge is illegal exactly when `x` lies strictly inside the circumcircle
/// of `(a, b, w)`.
#[inline]
#[must_use]
pub fn edge_legality(a: Point, b: Point, w: Point, x: Point) -> EdgeLegality {
    match circumcircle_position(a, b, w, x) {
        InCircle::INSIDE => EdgeLegality::Illegal,
        InCircle::BOUNDARY | InCircle::OUTSIDE => EdgeLegality::Legal,
    }
}
