//! Invalidation hook for derived-topology caches.
//!
//! The arena caches its boundary scan (see
//! [`relations`](crate::topology::relations)) and must drop it whenever the
//! mesh mutates; structures layered on top that memoize their own derived
//! data implement the same hook so mutation paths can invalidate uniformly.

/// Drops every memoized derived result so the next query recomputes from the
/// current mesh state. Called on each arena mutation.
pub trait InvalidateCache {
    fn invalidate_cache(&mut self);
}
