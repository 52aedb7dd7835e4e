//! Common bound aliases used across topology code.
//!
//! These traits have blanket impls, so any type satisfying the underlying
//! bounds will automatically implement them. They are zero-cost and only
//! reduce duplication in `where` clauses.

/// Bound required of vertex payloads reached from the classification gather.
///
/// With the `rayon` feature the gather runs across threads, so payloads must
/// be `Sync`; without it the alias places no requirement at all.
#[cfg(feature = "rayon")]
pub trait PayloadLike: Sync {}
#[cfg(feature = "rayon")]
impl<T: Sync> PayloadLike for T {}

#[cfg(not(feature = "rayon"))]
pub trait PayloadLike {}
#[cfg(not(feature = "rayon"))]
impl<T> PayloadLike for T {}
