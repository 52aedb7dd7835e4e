//! Segment merging: collapsing equivalent regions into a dense canonical
//! numbering.
//!
//! Given a classification and a caller-supplied pairwise equivalence
//! predicate, this pass unions segments that co-occur on an interior facet
//! and are reported equivalent, then renumbers the surviving equivalence
//! classes densely as `0..k`. The predicate is evaluated only on pairs of
//! distinct ids that actually share an interior facet; equivalence spreads
//! transitively across chains of such facets.
//!
//! The union-find uses path compression; ties are broken by keeping the
//! numerically smaller representative, so each class is represented by its
//! minimum member and compaction order is ascending representative.

use std::collections::{BTreeMap, HashMap};

use crate::mesh_error::MeshTopoError;
use crate::segment::assignment::SegmentId;
use crate::segment::classify::Segmentation;

/// Idempotent mapping from original segment ids onto dense canonical ids.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MergeMap {
    map: BTreeMap<SegmentId, SegmentId>,
    classes: usize,
}

impl MergeMap {
    /// The dense canonical id of `segment`.
    ///
    /// Total over the observed universe; any other id is `UnknownSegment`.
    pub fn canonical(&self, segment: SegmentId) -> Result<SegmentId, MeshTopoError> {
        self.map
            .get(&segment)
            .copied()
            .ok_or(MeshTopoError::UnknownSegment(segment))
    }

    /// Number of surviving equivalence classes; the map's image is exactly
    /// `0..class_count()`.
    pub fn class_count(&self) -> usize {
        self.classes
    }

    /// All `(original, canonical)` pairs, ascending by original id.
    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, SegmentId)> + '_ {
        self.map.iter().map(|(&old, &new)| (old, new))
    }

    /// True when every observed id maps to itself.
    pub fn is_identity(&self) -> bool {
        self.map.iter().all(|(old, new)| old == new)
    }
}

struct UnionFind {
    parent: HashMap<SegmentId, SegmentId>,
}

impl UnionFind {
    fn new(ids: impl IntoIterator<Item = SegmentId>) -> Self {
        Self {
            parent: ids.into_iter().map(|id| (id, id)).collect(),
        }
    }

    /// Representative with iterative path compression. Ids outside the
    /// universe map to themselves (callers guard against that case).
    fn find(&mut self, id: SegmentId) -> SegmentId {
        let mut root = id;
        while let Some(&p) = self.parent.get(&root) {
            if p == root {
                break;
            }
            root = p;
        }
        let mut cur = id;
        while let Some(&p) = self.parent.get(&cur) {
            if p == root {
                break;
            }
            self.parent.insert(cur, root);
            cur = p;
        }
        root
    }

    /// Unions two classes, keeping the numerically smaller representative.
    fn union(&mut self, a: SegmentId, b: SegmentId) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        let (keep, fold) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent.insert(fold, keep);
    }
}

/// Merges segments under an infallible equivalence predicate.
pub fn merge_segments<F>(
    segmentation: &Segmentation,
    mut equivalent: F,
) -> Result<MergeMap, MeshTopoError>
where
    F: FnMut(SegmentId, SegmentId) -> bool,
{
    try_merge_segments(segmentation, |a, b| Ok(equivalent(a, b)))
}

/// Merges segments under a fallible equivalence predicate.
///
/// A predicate error aborts the whole pass; no partial merge state escapes.
/// Interior facets are visited in canonical ascending order; because the
/// union-find carries merges transitively, one pass reaches the same fixed
/// point as repeated rewriting.
pub fn try_merge_segments<F>(
    segmentation: &Segmentation,
    mut equivalent: F,
) -> Result<MergeMap, MeshTopoError>
where
    F: FnMut(SegmentId, SegmentId) -> Result<bool, MeshTopoError>,
{
    let universe = segmentation.observed_segments();
    let mut uf = UnionFind::new(universe.iter().copied());

    let mut merges = 0usize;
    for (_, def) in segmentation.interior_facets() {
        let Some((a, b)) = def.segment_pair() else {
            continue;
        };
        if a == b || uf.find(a) == uf.find(b) {
            continue;
        }
        if equivalent(a, b)? {
            uf.union(a, b);
            merges += 1;
        }
    }

    // Compact: representatives in ascending order of first production, which
    // with min-representative tie-breaking is simply ascending id order.
    let mut dense: BTreeMap<SegmentId, SegmentId> = BTreeMap::new();
    let mut next = 0u32;
    let mut map = BTreeMap::new();
    for &id in &universe {
        let rep = uf.find(id);
        let canonical = *dense.entry(rep).or_insert_with(|| {
            let d = SegmentId::new(next);
            next += 1;
            d
        });
        map.insert(id, canonical);
    }

    log::debug!(
        "segment merge: {} ids, {} merges, {} classes",
        universe.len(),
        merges,
        next
    );
    Ok(MergeMap {
        map,
        classes: next as usize,
    })
}
