//! Facet segment classification.
//!
//! For every cell with segment id `s`, each of its facets receives an entry
//! `(s, side)` where `side` is the local facet index inside that cell. A
//! facet accumulates one entry per incident cell: one entry marks a mesh
//! boundary, two an interior interface. The side tag is opaque pass-through
//! for downstream orientation handling; this layer never interprets it.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::mesh_error::MeshTopoError;
use crate::segment::assignment::{SegmentAssignment, SegmentId};
use crate::topology::arena::SimplicialTopology;
use crate::topology::bounds::PayloadLike;
use crate::topology::element::Facet;
use crate::topology::handle::CellId;

/// One classification entry: a segment touching a facet from one side.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SegmentSide {
    /// The segment id of the contributing cell.
    pub segment: SegmentId,
    /// Local facet index inside the contributing cell (opaque pass-through).
    pub side: u8,
}

/// The segment-definition of one facet: one entry per incident cell.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SegmentDef {
    entries: Vec<SegmentSide>,
}

impl SegmentDef {
    fn new(entry: SegmentSide) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    /// Entries in cell-visitation order (one or two).
    #[inline]
    pub fn entries(&self) -> &[SegmentSide] {
        &self.entries
    }

    /// True when exactly one cell touches the facet.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.entries.len() == 1
    }

    /// True when two cells touch the facet.
    #[inline]
    pub fn is_interior(&self) -> bool {
        self.entries.len() == 2
    }

    /// The two segment ids of an interior facet, in entry order.
    pub fn segment_pair(&self) -> Option<(SegmentId, SegmentId)> {
        match self.entries.as_slice() {
            [a, b] => Some((a.segment, b.segment)),
            _ => None,
        }
    }

    pub(crate) fn remapped<F>(&self, mut canonical: F) -> Result<Self, MeshTopoError>
    where
        F: FnMut(SegmentId) -> Result<SegmentId, MeshTopoError>,
    {
        let entries = self
            .entries
            .iter()
            .map(|e| {
                Ok(SegmentSide {
                    segment: canonical(e.segment)?,
                    side: e.side,
                })
            })
            .collect::<Result<Vec<_>, MeshTopoError>>()?;
        Ok(Self { entries })
    }
}

/// Read-only classification result: facet → segment-definition.
#[derive(Clone, Debug, Default)]
pub struct Segmentation {
    facets: HashMap<Facet, SegmentDef>,
}

impl Segmentation {
    /// The segment-definition of `facet`, if the facet exists in the mesh.
    pub fn get(&self, facet: &Facet) -> Option<&SegmentDef> {
        self.facets.get(facet)
    }

    /// Number of classified facets.
    pub fn len(&self) -> usize {
        self.facets.len()
    }

    /// True when no facet was classified.
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// All `(facet, definition)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Facet, &SegmentDef)> + '_ {
        self.facets.iter()
    }

    /// All `(facet, definition)` pairs in canonical ascending facet order.
    pub fn iter_sorted(&self) -> Vec<(&Facet, &SegmentDef)> {
        let mut pairs: Vec<_> = self.facets.iter().collect();
        pairs.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        pairs
    }

    /// Interior interface facets in canonical ascending order.
    pub fn interior_facets(&self) -> Vec<(&Facet, &SegmentDef)> {
        let mut pairs: Vec<_> = self
            .facets
            .iter()
            .filter(|(_, def)| def.is_interior())
            .collect();
        pairs.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        pairs
    }

    /// Boundary facets in canonical ascending order.
    pub fn boundary_facets(&self) -> Vec<(&Facet, &SegmentDef)> {
        let mut pairs: Vec<_> = self
            .facets
            .iter()
            .filter(|(_, def)| def.is_boundary())
            .collect();
        pairs.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        pairs
    }

    /// All distinct segment ids observed in any entry, sorted ascending.
    pub fn observed_segments(&self) -> Vec<SegmentId> {
        let mut ids: Vec<SegmentId> = self
            .facets
            .values()
            .flat_map(|def| def.entries().iter().map(|e| e.segment))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Classifies every facet of `topo` by the segments of its incident cells.
///
/// Precondition: every live cell has a segment id (`MissingSegmentAssignment`
/// otherwise, before any classification state is built). A facet receiving a
/// third entry breaks the simplicial-complex invariant and is fatal.
pub fn classify<V: PayloadLike>(
    topo: &SimplicialTopology<V>,
    assignment: &SegmentAssignment,
) -> Result<Segmentation, MeshTopoError> {
    assignment.ensure_complete(topo)?;

    let gathered = gather(topo, assignment)?;

    let mut facets: HashMap<Facet, SegmentDef> = HashMap::new();
    for batch in gathered {
        for (facet, entry) in batch {
            match facets.entry(facet) {
                Entry::Vacant(slot) => {
                    slot.insert(SegmentDef::new(entry));
                }
                Entry::Occupied(mut slot) => {
                    if slot.get().entries.len() >= 2 {
                        return Err(MeshTopoError::InconsistentIncidence(format!(
                            "facet {} received a third segment entry",
                            slot.key()
                        )));
                    }
                    slot.get_mut().entries.push(entry);
                }
            }
        }
    }

    log::debug!(
        "classified {} facets over {} cells ({} interior)",
        facets.len(),
        topo.cell_count(),
        facets.values().filter(|d| d.is_interior()).count()
    );
    Ok(Segmentation { facets })
}

fn gather_cell<V>(
    topo: &SimplicialTopology<V>,
    assignment: &SegmentAssignment,
    cell: CellId,
) -> Result<Vec<(Facet, SegmentSide)>, MeshTopoError> {
    let segment = assignment
        .get(cell)
        .ok_or(MeshTopoError::MissingSegmentAssignment(cell))?;
    Ok(topo
        .cell_facets(cell)?
        .into_iter()
        .enumerate()
        .map(|(side, facet)| {
            (
                facet,
                SegmentSide {
                    segment,
                    // Local facet indices run 0..=dim; dim is capped at
                    // u8::MAX by `SimplicialTopology::new`.
                    side: side as u8,
                },
            )
        })
        .collect())
}

#[cfg(not(feature = "rayon"))]
fn gather<V>(
    topo: &SimplicialTopology<V>,
    assignment: &SegmentAssignment,
) -> Result<Vec<Vec<(Facet, SegmentSide)>>, MeshTopoError> {
    topo.cell_ids()
        .map(|cell| gather_cell(topo, assignment, cell))
        .collect()
}

/// Parallel gather; the accumulator merge in [`classify`] stays serial, and
/// batch order matches ascending cell order so results are deterministic.
#[cfg(feature = "rayon")]
fn gather<V: Sync>(
    topo: &SimplicialTopology<V>,
    assignment: &SegmentAssignment,
) -> Result<Vec<Vec<(Facet, SegmentSide)>>, MeshTopoError> {
    use rayon::prelude::*;
    let cells: Vec<CellId> = topo.cell_ids().collect();
    cells
        .par_iter()
        .map(|&cell| gather_cell(topo, assignment, cell))
        .collect()
}
