//! # simplex-topo
//!
//! simplex-topo is an indexed simplicial-mesh topology engine for meshing
//! pipelines. It provides a handle-based arena storing vertices (with opaque
//! payloads) and cells (`dim + 1`-tuples of vertex handles), an inverse
//! incidence index maintained consistently with the arena, and a derived
//! relation engine computing edges, facets, adjacency, and boundary
//! membership on demand with canonical-identity deduplication.
//!
//! On top of the topology sits the segment layer: per-cell region ids, a
//! facet classifier deriving which segments touch each facet, a union-find
//! merger collapsing regions under a caller-supplied equivalence predicate
//! into a dense canonical numbering, and a simplifier rebuilding the reduced
//! interface mesh with spatial vertex deduplication.
//!
//! ## Scope
//! Coordinates are opaque payload: this crate performs no geometric
//! computation, generates no mesh elements, and does no I/O. Mesh
//! generators, geometric predicates, and file writers are external
//! collaborators that build on these queries.
//!
//! ## Determinism
//! All query results with set semantics are returned in canonical ascending
//! order, so repeated runs over the same construction sequence produce
//! identical output.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! simplex-topo = "0.3"
//! # Optional: parallel classification gather
//! # features = ["rayon"]
//! ```

// Re-export our major subsystems:
pub mod debug_invariants;
pub mod mesh_error;
pub mod segment;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh_error::MeshTopoError;
    pub use crate::segment::assignment::{SegmentAssignment, SegmentId};
    pub use crate::segment::classify::{SegmentDef, SegmentSide, Segmentation, classify};
    pub use crate::segment::merge::{MergeMap, merge_segments, try_merge_segments};
    pub use crate::segment::simplify::{SimplifiedMesh, simplify, try_simplify};
    pub use crate::topology::arena::SimplicialTopology;
    pub use crate::topology::cache::InvalidateCache;
    pub use crate::topology::element::{Edge, Facet};
    pub use crate::topology::handle::{CellId, VertexId};
}
