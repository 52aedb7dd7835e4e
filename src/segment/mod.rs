//! Segment classification, merging, and mesh simplification.
//!
//! A *segment* is a caller-assigned region id attached to each cell. This
//! module derives, per facet, the set of segments touching it
//! ([`classify`]), collapses segments under a caller-supplied equivalence
//! predicate ([`merge`]), and rebuilds a reduced topology keeping only the
//! facets that remain true interfaces ([`simplify`]).
//!
//! Each pass consumes its input read-only and produces either a read-only
//! query result or a brand-new topology instance.
//!
//! [`classify`]: classify::classify
//! [`merge`]: merge::merge_segments
//! [`simplify`]: simplify::simplify

pub mod assignment;
pub mod classify;
pub mod merge;
pub mod simplify;

pub use assignment::{SegmentAssignment, SegmentId};
pub use classify::{SegmentDef, SegmentSide, Segmentation, classify};
pub use merge::{MergeMap, merge_segments, try_merge_segments};
pub use simplify::{SimplifiedMesh, simplify, try_simplify};
