//! Per-cell segment id storage.
//!
//! Segment ids are small integer region tags attached to exactly one cell
//! each by an external collaborator (a mesh generator or a material table)
//! after the construction phase. This is the precondition input to
//! [`classify`](crate::segment::classify::classify).

use std::collections::HashMap;
use std::fmt;

use crate::mesh_error::MeshTopoError;
use crate::topology::arena::SimplicialTopology;
use crate::topology::handle::CellId;

/// A caller-assigned region id attached to a cell.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct SegmentId(u32);

impl SegmentId {
    /// Wraps a raw region id.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw region id.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SegmentId").field(&self.0).finish()
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cell → segment id mapping.
#[derive(Clone, Debug, Default)]
pub struct SegmentAssignment {
    map: HashMap<CellId, SegmentId>,
}

impl SegmentAssignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `segment` to `cell`, returning the previous value, if any.
    pub fn assign(&mut self, cell: CellId, segment: SegmentId) -> Option<SegmentId> {
        self.map.insert(cell, segment)
    }

    /// The segment id of `cell`, if assigned.
    pub fn get(&self, cell: CellId) -> Option<SegmentId> {
        self.map.get(&cell).copied()
    }

    /// Number of assigned cells.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True when no cell has been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All cells assigned to `segment`, in deterministic ascending order.
    pub fn cells_with_segment(&self, segment: SegmentId) -> Vec<CellId> {
        let mut cells: Vec<CellId> = self
            .map
            .iter()
            .filter_map(|(&cell, &s)| (s == segment).then_some(cell))
            .collect();
        cells.sort_unstable();
        cells
    }

    /// All distinct segment ids in use, sorted ascending.
    pub fn segment_values(&self) -> Vec<SegmentId> {
        let mut values: Vec<SegmentId> = self.map.values().copied().collect();
        values.sort_unstable();
        values.dedup();
        values
    }

    /// Iterate over all `(cell, segment)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, SegmentId)> + '_ {
        self.map.iter().map(|(&cell, &s)| (cell, s))
    }

    /// Verifies that every live cell of `topo` has a segment id.
    ///
    /// Fails with `MissingSegmentAssignment` naming the first unassigned cell
    /// in ascending order.
    pub fn ensure_complete<V>(&self, topo: &SimplicialTopology<V>) -> Result<(), MeshTopoError> {
        for cell in topo.cell_ids() {
            if !self.map.contains_key(&cell) {
                return Err(MeshTopoError::MissingSegmentAssignment(cell));
            }
        }
        Ok(())
    }
}

impl FromIterator<(CellId, SegmentId)> for SegmentAssignment {
    fn from_iter<I: IntoIterator<Item = (CellId, SegmentId)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}
