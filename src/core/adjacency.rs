//! The three mutually consistent topology maps.
//!
//! - [`Adjacent`]: directed edge → opposite vertex. `(u, v, w)` is a triangle
//!   of the triangulation iff `adjacent[(u,v)] = w`, `adjacent[(v,w)] = u` and
//!   `adjacent[(w,u)] = v`, so every directed edge of every triangle appears
//!   exactly once.
//! - [`AdjacentToVertex`]: vertex `w` → the set of directed edges `(u, v)`
//!   with `adjacent[(u,v)] = w`. Inverts the adjacent map for neighbour
//!   enumeration.
//! - [`Graph`]: undirected vertex adjacency, ghost vertex included.
//!
//! These maps are only ever edited together through the triangulation
//! container's triangle operations, which keep them consistent.

use crate::core::collections::{FastHashMap, FastHashSet};
use crate::core::edge::Edge;
use crate::core::vertex::{VertexId, EMPTY_VERTEX};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Directed edge → opposite vertex map, the primary topological index.
#[derive(Clone, Debug, Default)]
pub struct Adjacent {
    map: FastHashMap<Edge, VertexId>,
}

// Serialized as a sequence of (edge, vertex) pairs: structured map keys do
// not survive self-describing formats like JSON.
impl Serialize for Adjacent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.map.iter().map(|(&e, &w)| (e, w)))
    }
}

impl<'de> Deserialize<'de> for Adjacent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries: Vec<(Edge, VertexId)> = Vec::deserialize(deserializer)?;
        Ok(Self {
            map: entries.into_iter().collect(),
        })
    }
}

impl Adjacent {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the vertex `w` completing the triangle `(u, v, w)`, or
    /// [`EMPTY_VERTEX`] if the directed edge `(u, v)` is not present.
    #[inline]
    #[must_use]
    pub fn get(&self, u: VertexId, v: VertexId) -> VertexId {
        self.map
            .get(&Edge::new(u, v))
            .copied()
            .unwrap_or(EMPTY_VERTEX)
    }

    /// Returns `true` if the directed edge `(u, v)` is present.
    #[inline]
    #[must_use]
    pub fn contains_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.map.contains_key(&Edge::new(u, v))
    }

    /// Registers `adjacent[(u, v)] = w`.
    #[inline]
    pub fn insert(&mut self, u: VertexId, v: VertexId, w: VertexId) {
        self.map.insert(Edge::new(u, v), w);
    }

    /// Removes the directed edge `(u, v)`, returning its opposite vertex or
    /// [`EMPTY_VERTEX`] if absent.
    #[inline]
    pub fn remove(&mut self, u: VertexId, v: VertexId) -> VertexId {
        self.map.remove(&Edge::new(u, v)).unwrap_or(EMPTY_VERTEX)
    }

    /// Iterates over all `(directed edge, opposite vertex)` entries.
    pub fn entries(&self) -> impl Iterator<Item = (Edge, VertexId)> + '_ {
        self.map.iter().map(|(&e, &w)| (e, w))
    }

    /// Number of directed-edge entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no edges are registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Vertex → set of directed edges opposite to it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AdjacentToVertex {
    map: FastHashMap<VertexId, FastHashSet<Edge>>,
}

impl AdjacentToVertex {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `adjacent[(e.u, e.v)] = w`.
    #[inline]
    pub fn insert(&mut self, w: VertexId, e: Edge) {
        self.map.entry(w).or_default().insert(e);
    }

    /// Removes the record `adjacent[(e.u, e.v)] = w`.
    #[inline]
    pub fn remove(&mut self, w: VertexId, e: Edge) {
        if let Some(edges) = self.map.get_mut(&w) {
            edges.remove(&e);
        }
    }

    /// The set of directed edges opposite `w`, if any were ever recorded.
    #[inline]
    #[must_use]
    pub fn get(&self, w: VertexId) -> Option<&FastHashSet<Edge>> {
        self.map.get(&w)
    }

    /// Iterates over all `(vertex, opposite edges)` entries.
    pub fn entries(&self) -> impl Iterator<Item = (VertexId, &FastHashSet<Edge>)> + '_ {
        self.map.iter().map(|(&w, edges)| (w, edges))
    }

    /// Drops entries whose edge set has become empty.
    pub fn clear_empty(&mut self) {
        self.map.retain(|_, edges| !edges.is_empty());
    }

    /// Removes the entry for `w` entirely.
    #[inline]
    pub fn remove_vertex(&mut self, w: VertexId) {
        self.map.remove(&w);
    }
}

/// Undirected vertex adjacency.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Graph {
    map: FastHashMap<VertexId, FastHashSet<VertexId>>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures `v` is present, with no neighbours if new.
    #[inline]
    pub fn add_vertex(&mut self, v: VertexId) {
        self.map.entry(v).or_default();
    }

    /// Records the undirected edge `u — v`.
    #[inline]
    pub fn add_neighbour(&mut self, u: VertexId, v: VertexId) {
        self.map.entry(u).or_default().insert(v);
        self.map.entry(v).or_default().insert(u);
    }

    /// Removes the undirected edge `u — v`.
    #[inline]
    pub fn remove_neighbour(&mut self, u: VertexId, v: VertexId) {
        if let Some(n) = self.map.get_mut(&u) {
            n.remove(&v);
        }
        if let Some(n) = self.map.get_mut(&v) {
            n.remove(&u);
        }
    }

    /// The neighbour set of `v`, if present.
    #[inline]
    #[must_use]
    pub fn neighbours(&self, v: VertexId) -> Option<&FastHashSet<VertexId>> {
        self.map.get(&v)
    }

    /// Returns `true` if `u — v` is an edge of the graph.
    #[inline]
    #[must_use]
    pub fn contains_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.map.get(&u).is_some_and(|n| n.contains(&v))
    }

    /// Returns `true` if `v` is present (possibly with no neighbours).
    #[inline]
    #[must_use]
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.map.contains_key(&v)
    }

    /// Iterates over all vertices of the graph.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.map.keys().copied()
    }

    /// Removes `v` and all edges incident to it.
    pub fn remove_vertex(&mut self, v: VertexId) {
        if let Some(neighbours) = self.map.remove(&v) {
            for n in neighbours {
                if let Some(back) = self.map.get_mut(&n) {
                    back.remove(&v);
                }
            }
        }
    }

    /// Drops vertices whose neighbour set has become empty.
    pub fn clear_empty(&mut self) {
        self.map.retain(|_, n| !n.is_empty());
    }
}
