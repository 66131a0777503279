//! Positional certificates built from the primitive predicates.
//!
//! Every function in this module returns a closed enumeration instead of a
//! boolean or an error, so callers switch over first-class "degenerate" and
//! "on-boundary" cases rather than treating them as exceptional. Functions
//! taking a triangle `(a, b, c)` assume it is positively oriented.

use crate::geometry::point::Point;
use crate::geometry::predicates::{meet, orient};

/// Position of a point relative to a directed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePosition {
    /// Strictly to the left of the directed line.
    Left,
    /// On the line.
    Collinear,
    /// Strictly to the right of the directed line.
    Right,
}

/// Position of a point on the line through a segment, given collinearity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentPosition {
    /// Before the first endpoint.
    Left,
    /// Strictly between the endpoints.
    On,
    /// Beyond the second endpoint.
    Right,
    /// Coincides with an endpoint.
    Degenerate,
}

/// Intersection type of two line segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentsMeet {
    /// The segments do not intersect.
    None,
    /// The open segments cross in exactly one interior point.
    Single,
    /// The segments are collinear and overlap in more than one point.
    Multiple,
    /// The closed segments intersect in exactly one point that is an endpoint
    /// of at least one of them.
    Touching,
}

/// Position of a point relative to a (closed) triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrianglePosition {
    /// Strictly inside.
    Inside,
    /// On an edge or vertex.
    On,
    /// Strictly outside.
    Outside,
}

/// Position of a point relative to the outer halfplane of a directed edge.
///
/// The outer halfplane of `a→b` is the open region strictly to the left of
/// the line, together with the closed segment itself. This is the region
/// covered by the ghost triangle anchored at `(a, b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfplanePosition {
    /// Strictly left of the line.
    Inside,
    /// On the closed segment.
    On,
    /// Right of the line, or collinear but beyond the segment.
    Outside,
}

/// Intersection type of a line segment with a (closed) triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleSegmentIntersection {
    /// The segment is contained in the closed triangle.
    Inside,
    /// The segment intersects the interior with exactly one boundary
    /// transversal.
    Single,
    /// The intersection meets the boundary in more than one point (a pass
    /// through the triangle, a chord through two vertices, or a collinear
    /// overlap with an edge).
    Multiple,
    /// No intersection.
    Outside,
    /// The intersection is exactly one boundary point.
    Touching,
}

/// Classifies `p` against the directed line `a→b`.
#[inline]
#[must_use]
pub fn point_position_relative_to_line(a: Point, b: Point, p: Point) -> LinePosition {
    match orient(a, b, p) {
        1 => LinePosition::Left,
        -1 => LinePosition::Right,
        _ => LinePosition::Collinear,
    }
}

/// Classifies a point `p` collinear with `a` and `b` against the segment
/// `(a, b)`.
///
/// Endpoint coincidence is reported as [`SegmentPosition::Degenerate`];
/// otherwise the result says whether `p` is before `a`, strictly between, or
/// beyond `b`.
#[must_use]
pub fn point_position_on_line_segment(a: Point, b: Point, p: Point) -> SegmentPosition {
    if p == a || p == b {
        return SegmentPosition::Degenerate;
    }
    // Compare along the dominant axis of the segment; ties on a degenerate
    // segment fall out as Left.
    let key: fn(Point) -> f64 = if (b.x - a.x).abs() >= (b.y - a.y).abs() {
        |q| q.x
    } else {
        |q| q.y
    };
    let (ka, kb, kp) = (key(a), key(b), key(p));
    let (lo, hi, before_lo) = if ka <= kb {
        (ka, kb, SegmentPosition::Left)
    } else {
        (kb, ka, SegmentPosition::Right)
    };
    if kp < lo {
        before_lo
    } else if kp > hi {
        match before_lo {
            SegmentPosition::Left => SegmentPosition::Right,
            _ => SegmentPosition::Left,
        }
    } else {
        SegmentPosition::On
    }
}

/// Returns `true` if `p` lies on the closed segment `(a, b)`.
#[inline]
#[must_use]
pub fn point_on_closed_segment(a: Point, b: Point, p: Point) -> bool {
    orient(a, b, p) == 0
        && matches!(
            point_position_on_line_segment(a, b, p),
            SegmentPosition::On | SegmentPosition::Degenerate
        )
}

/// Full classification of the intersection of segments `(p, q)` and `(a, b)`.
#[must_use]
pub fn line_segment_intersection_type(p: Point, q: Point, a: Point, b: Point) -> SegmentsMeet {
    match meet(p, q, a, b) {
        1 => SegmentsMeet::Single,
        -1 => SegmentsMeet::Multiple,
        _ => {
            let touches = point_on_closed_segment(p, q, a)
                || point_on_closed_segment(p, q, b)
                || point_on_closed_segment(a, b, p)
                || point_on_closed_segment(a, b, q);
            if touches {
                SegmentsMeet::Touching
            } else {
                SegmentsMeet::None
            }
        }
    }
}

/// Classifies `p` against the closed triangle `(a, b, c)`, which must be
/// positively oriented.
#[must_use]
pub fn point_position_relative_to_triangle(a: Point, b: Point, c: Point, p: Point) -> TrianglePosition {
    for (x, y) in [(a, b), (b, c), (c, a)] {
        match point_position_relative_to_line(x, y, p) {
            LinePosition::Right => return TrianglePosition::Outside,
            LinePosition::Collinear => {
                // The closed segment is the full intersection of the triangle
                // with this edge's line.
                return match point_position_on_line_segment(x, y, p) {
                    SegmentPosition::On | SegmentPosition::Degenerate => TrianglePosition::On,
                    SegmentPosition::Left | SegmentPosition::Right => TrianglePosition::Outside,
                };
            }
            LinePosition::Left => {}
        }
    }
    TrianglePosition::Inside
}

/// Classifies `p` against the outer halfplane of the directed edge `a→b`.
///
/// Used to decide whether a point falls into the region covered by a ghost
/// triangle: strictly left of the line is [`HalfplanePosition::Inside`],
/// collinear points are inside only when they lie on the closed segment.
#[must_use]
pub fn point_position_relative_to_oriented_outer_halfplane(
    a: Point,
    b: Point,
    p: Point,
) -> HalfplanePosition {
    match point_position_relative_to_line(a, b, p) {
        LinePosition::Left => HalfplanePosition::Inside,
        LinePosition::Right => HalfplanePosition::Outside,
        LinePosition::Collinear => match point_position_on_line_segment(a, b, p) {
            SegmentPosition::On | SegmentPosition::Degenerate => HalfplanePosition::On,
            SegmentPosition::Left | SegmentPosition::Right => HalfplanePosition::Outside,
        },
    }
}

/// Classifies the intersection of the segment `(p, q)` with the closed,
/// positively oriented triangle `(a, b, c)`.
///
/// The case analysis covers the degenerate configurations explicitly: an
/// endpoint coincident with a vertex, an endpoint on an edge, a segment
/// collinear with an edge, and a segment grazing a vertex.
#[must_use]
pub fn triangle_line_segment_intersection(
    a: Point,
    b: Point,
    c: Point,
    p: Point,
    q: Point,
) -> TriangleSegmentIntersection {
    let edges = [(a, b), (b, c), (c, a)];
    let pos_p = point_position_relative_to_triangle(a, b, c, p);
    let pos_q = point_position_relative_to_triangle(a, b, c, q);

    use TrianglePosition::{Inside, On, Outside};
    match (pos_p, pos_q) {
        (Inside, Inside) | (Inside, On) | (On, Inside) => TriangleSegmentIntersection::Inside,
        (Inside, Outside) | (Outside, Inside) => TriangleSegmentIntersection::Single,
        (On, On) => {
            // Both endpoints on the boundary: a run along one edge's line is a
            // boundary overlap, anything else is a chord through the closed
            // triangle.
            for (x, y) in edges {
                if orient(x, y, p) == 0 && orient(x, y, q) == 0 {
                    return TriangleSegmentIntersection::Multiple;
                }
            }
            TriangleSegmentIntersection::Inside
        }
        (On, Outside) | (Outside, On) => {
            let (on_pt, out_pt) = if pos_p == On { (p, q) } else { (q, p) };
            boundary_to_exterior_case(&edges, on_pt, out_pt)
        }
        (Outside, Outside) => {
            for (x, y) in edges {
                if meet(p, q, x, y) == -1 {
                    return TriangleSegmentIntersection::Multiple;
                }
            }
            let crossings = edges.iter().filter(|&&(x, y)| meet(p, q, x, y) == 1).count();
            if crossings >= 1 {
                return TriangleSegmentIntersection::Multiple;
            }
            // A segment through two vertices is collinear with an edge and was
            // caught above, so at most one vertex graze remains.
            let grazes = [a, b, c]
                .into_iter()
                .any(|v| point_on_closed_segment(p, q, v));
            if grazes {
                TriangleSegmentIntersection::Touching
            } else {
                TriangleSegmentIntersection::Outside
            }
        }
    }
}

/// One endpoint on the boundary, the other strictly outside: decide between a
/// pass into the interior, a slide along an edge, and a graze.
fn boundary_to_exterior_case(
    edges: &[(Point, Point); 3],
    on_pt: Point,
    out_pt: Point,
) -> TriangleSegmentIntersection {
    // Collinear slide along an edge dominates.
    for &(x, y) in edges {
        if meet(on_pt, out_pt, x, y) == -1 {
            return TriangleSegmentIntersection::Multiple;
        }
    }
    // On an open edge: the segment enters the interior iff the outside point
    // lies strictly left of that edge's line.
    for &(x, y) in edges {
        if orient(x, y, on_pt) == 0
            && point_position_on_line_segment(x, y, on_pt) == SegmentPosition::On
        {
            return match point_position_relative_to_line(x, y, out_pt) {
                LinePosition::Left => TriangleSegmentIntersection::Single,
                LinePosition::Right | LinePosition::Collinear => {
                    TriangleSegmentIntersection::Touching
                }
            };
        }
    }
    // On a vertex: the segment enters the interior iff it points into the
    // open wedge between the two incident edges.
    for (idx, &(x, y)) in edges.iter().enumerate() {
        if on_pt == x {
            // Incident edges at x: (x, y) and (w, x) where w is the previous
            // edge's origin.
            let (w, _) = edges[(idx + 2) % 3];
            let inside_wedge = point_position_relative_to_line(x, y, out_pt) == LinePosition::Left
                && point_position_relative_to_line(w, x, out_pt) == LinePosition::Left;
            return if inside_wedge {
                TriangleSegmentIntersection::Single
            } else {
                TriangleSegmentIntersection::Touching
            };
        }
    }
    TriangleSegmentIntersection::Touching
}
