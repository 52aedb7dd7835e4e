//! `MeshTopoError`: unified error type for the simplex-topo public APIs.
//!
//! This error type is used throughout the crate to provide robust,
//! non-panicking error handling for all public APIs.

use thiserror::Error;

use crate::segment::assignment::SegmentId;
use crate::topology::handle::{CellId, VertexId};

/// Unified error type for simplex-topo operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshTopoError {
    /// A topology was requested with a simplex dimension this crate cannot model.
    #[error("unsupported simplex dimension {0}")]
    UnsupportedDimension(usize),
    /// A cell vertex tuple had the wrong arity for the topology's dimension.
    #[error("cell vertex tuple has {found} entries, expected {expected}")]
    DimensionMismatch { expected: usize, found: usize },
    /// A vertex handle is stale (generation mismatch) or was never issued here.
    #[error("invalid vertex handle {0}")]
    InvalidVertexHandle(VertexId),
    /// A cell handle is stale (generation mismatch) or was never issued here.
    #[error("invalid cell handle {0}")]
    InvalidCellHandle(CellId),
    /// Cell creation supplied the same vertex handle more than once.
    #[error("degenerate cell: vertex {0} repeated in vertex tuple")]
    DegenerateCell(VertexId),
    /// Vertex removal attempted while cells still reference the vertex.
    #[error("vertex {vertex} still referenced by {cells} cell(s)")]
    VertexInUse { vertex: VertexId, cells: usize },
    /// Classification ran before every cell received a segment id.
    #[error("cell {0} has no segment assignment")]
    MissingSegmentAssignment(CellId),
    /// A facet is incident to more than two cells, or the incidence index
    /// disagrees with the cell arrays. The topology is corrupt; callers must
    /// not continue querying it.
    #[error("inconsistent incidence: {0}")]
    InconsistentIncidence(String),
    /// A merge map was queried with a segment id outside its observed universe.
    #[error("segment id {0} not observed by this merge map")]
    UnknownSegment(SegmentId),
    /// A caller-supplied predicate (segment equivalence or vertex dedup key)
    /// reported a failure of its own.
    #[error("caller predicate failed: {0}")]
    Predicate(String),
}
