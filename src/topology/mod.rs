//! Top-level module for mesh topology abstractions.
//!
//! This module provides the core types for indexed simplicial-mesh
//! topologies:
//! - Strong vertex/cell handles with generation counters
//! - The handle arena with its inverse incidence index
//! - Canonical derived sub-elements (edges, facets)
//! - The derived relation engine (adjacency and boundary queries)
//!
//! Most users will interact with [`SimplicialTopology`] for building a mesh
//! and querying its derived relations.

pub mod arena;
pub mod bounds;
pub mod cache;
pub mod element;
pub mod handle;
pub mod relations;

pub use arena::SimplicialTopology;
pub use cache::InvalidateCache;
pub use element::{Edge, Facet};
pub use handle::{CellId, VertexId};
