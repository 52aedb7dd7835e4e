//! `VertexId` / `CellId`: strong, zero-cost handles for mesh entities.
//!
//! Every vertex and cell owned by a [`SimplicialTopology`] is referred to by
//! an opaque handle pairing a slot index with a generation counter. The
//! generation is bumped whenever a slot dies, so a handle held across a
//! removal fails with `InvalidVertexHandle`/`InvalidCellHandle` instead of
//! silently resolving to unrelated data.
//!
//! Handles are plain `(index, generation)` pairs resolved by explicit lookup
//! in the owning topology; they never carry a back-reference to the owner.
//!
//! [`SimplicialTopology`]: crate::topology::arena::SimplicialTopology

use std::fmt;

/// Handle to a vertex owned by a topology instance.
///
/// # Memory layout
/// `repr(C)` with two `u32` fields, so the handle is exactly 8 bytes and can
/// be stored densely in connectivity arrays.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(C)]
pub struct VertexId {
    index: u32,
    generation: u32,
}

/// Handle to a cell (maximal-dimension simplex) owned by a topology instance.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(C)]
pub struct CellId {
    index: u32,
    generation: u32,
}

impl VertexId {
    #[inline]
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the owning arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Generation the slot had when this handle was issued.
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl CellId {
    #[inline]
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the owning arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Generation the slot had when this handle was issued.
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VertexId")
            .field(&self.index)
            .field(&self.generation)
            .finish()
    }
}

/// Prints as `v<index>`; the generation only appears in `Debug` output.
impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.index)
    }
}

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CellId")
            .field(&self.index)
            .field(&self.generation)
            .finish()
    }
}

/// Prints as `c<index>`; the generation only appears in `Debug` output.
impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.index)
    }
}
