//! # delaunay2d
//!
//! An incremental two-dimensional Delaunay triangulator with support for
//! constrained edges, built on the Bowyer–Watson insertion algorithm.
//!
//! # Features
//!
//! - Incremental Bowyer–Watson construction with jump-and-march point location
//! - Constrained edges (CDT): required segments that survive triangulation
//! - Ghost triangles: the unbounded face is represented as a fan of triangles
//!   around a virtual vertex, so boundary cases need no special-casing
//! - Sign-exact orientation and in-circle predicates via adaptive-precision
//!   arithmetic ([robust](https://docs.rs/robust))
//! - Deterministic builds: every randomised step takes an explicit
//!   [`rand::Rng`] source
//! - Serialization/Deserialization with [serde](https://serde.rs)
//!
//! # Basic Usage
//!
//! ```rust
//! use delaunay2d::prelude::*;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let points = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 0.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(0.0, 1.0),
//! ];
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let tri = triangulate(&points, &TriangulationOptions::default(), &mut rng).unwrap();
//!
//! assert_eq!(tri.num_solid_triangles(), 2);
//! assert_eq!(tri.get_convex_hull().len(), 4);
//! assert!(tri.is_valid().is_ok());
//! assert!(tri.validate_delaunay().is_ok());
//! ```
//!
//! # Constrained edges
//!
//! ```rust
//! use delaunay2d::prelude::*;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let points = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(4.0, 0.0),
//!     Point::new(2.0, 3.0),
//! ];
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut tri = triangulate(&points, &TriangulationOptions::default(), &mut rng).unwrap();
//!
//! // The edge (1, 2) is already an edge of the triangulation, so this only
//! // records the constraint.
//! tri.add_edge(1, 2).unwrap();
//! assert!(tri.is_constrained(1, 2));
//! ```
//!
//! # Vertex indexing
//!
//! Points are referenced by 1-based [`VertexId`](core::vertex::VertexId)
//! indices. Index 0 is the reserved "no such edge" sentinel and the single
//! negative index −1 is the ghost vertex shared by every unbounded face.
//!
//! # Invariants
//!
//! After every public operation the triangulation satisfies the structural and
//! geometric invariants checked by
//! [`Triangulation::is_valid`](core::triangulation::Triangulation::is_valid)
//! (triangle/adjacency consistency, neighbour consistency, positive
//! orientation, ghost envelope, constrained-edge containment) and
//! [`Triangulation::validate_delaunay`](core::triangulation::Triangulation::validate_delaunay)
//! (the empty-circumcircle property for unconstrained interior edges).

/// Topological data structures and triangulation algorithms.
pub mod core {
    /// Algorithms for construction, point location, and local edits.
    pub mod algorithms {
        /// Bowyer–Watson cavity insertion of a single point.
        pub mod bowyer_watson;
        /// Vertex removal with Delaunay re-triangulation of the star.
        pub mod deletion;
        /// Edge flipping, legalisation, and edge/triangle splitting.
        pub mod flips;
        /// Jump-and-march point location.
        pub mod locate;
        /// Constrained segment insertion.
        pub mod segments;
        pub use bowyer_watson::*;
        pub use locate::*;
        pub use segments::*;
    }
    pub mod adjacency;
    pub mod builder;
    /// Collection aliases tuned for index-keyed topology maps.
    pub mod collections;
    pub mod edge;
    pub mod representative;
    pub mod triangle;
    pub mod triangulation;
    pub mod validation;
    pub mod vertex;
    pub use adjacency::*;
    pub use builder::*;
    pub use edge::*;
    pub use triangle::*;
    pub use triangulation::*;
    pub use validation::*;
    pub use vertex::*;
}

/// Geometric value types and sign-exact predicates.
pub mod geometry {
    pub mod point;
    pub mod position;
    pub mod predicates;
    pub use point::*;
    pub use position::*;
    pub use predicates::*;
}

/// Re-exports of the most commonly used types and functions.
pub mod prelude {
    pub use crate::core::{
        adjacency::{Adjacent, AdjacentToVertex, Graph},
        algorithms::{
            bowyer_watson::{add_point_bowyer_watson, InsertionOutcome},
            locate::{locate_triangle, LocateError, LocateOptions},
            segments::ConstraintError,
        },
        builder::{triangulate, TriangulationOptions},
        collections::{FastHashMap, FastHashSet, SmallBuffer},
        edge::Edge,
        triangle::Triangle,
        triangulation::{Triangulation, TriangulationError},
        validation::InvariantViolation,
        vertex::{
            is_empty_vertex, is_ghost_vertex, is_solid_vertex, VertexId, EMPTY_VERTEX,
            GHOST_VERTEX,
        },
    };
    pub use crate::geometry::{point::Point, position::*, predicates::*};
}
