//! Vertex indices and the reserved sentinel values.
//!
//! Points are referenced by signed 1-based indices. Two values are reserved:
//! [`EMPTY_VERTEX`] (0) marks "no such edge" in the adjacent map and is never a
//! valid point index, and [`GHOST_VERTEX`] (−1) is the single virtual vertex
//! shared by every ghost triangle on the unbounded face.

/// Index of a vertex in a triangulation.
///
/// Positive values refer to real points (1-based); negative values denote the
/// ghost vertex.
pub type VertexId = i32;

/// The virtual vertex representing the point at infinity.
pub const GHOST_VERTEX: VertexId = -1;

/// Sentinel returned by adjacency lookups when the queried edge does not
/// exist. Distinct from every valid vertex index and from [`GHOST_VERTEX`].
pub const EMPTY_VERTEX: VertexId = 0;

/// Returns `true` if `v` denotes the ghost vertex.
#[inline]
#[must_use]
pub const fn is_ghost_vertex(v: VertexId) -> bool {
    v < 0
}

/// Returns `true` if `v` refers to a real point.
#[inline]
#[must_use]
pub const fn is_solid_vertex(v: VertexId) -> bool {
    v > 0
}

/// Returns `true` if `v` is the empty sentinel.
#[inline]
#[must_use]
pub const fn is_empty_vertex(v: VertexId) -> bool {
    v == EMPTY_VERTEX
}
