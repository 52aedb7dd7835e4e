//! Mesh simplification: rebuilding the reduced interface topology.
//!
//! After merging, an interior facet whose two segments collapsed to the same
//! canonical id is no longer an interface and is dropped. Every surviving
//! facet (boundary facets, and interior facets between distinct canonical
//! segments) becomes a cell of a new `(dim - 1)`-dimensional topology.
//! Vertices are deduplicated by *spatial identity* — a caller-supplied key
//! over the vertex payload — so the same point reached through different
//! source handles collapses to one output vertex. The source topology is
//! never mutated.

use std::collections::HashMap;
use std::hash::Hash;

use crate::mesh_error::MeshTopoError;
use crate::segment::classify::{SegmentDef, Segmentation};
use crate::segment::merge::MergeMap;
use crate::topology::arena::SimplicialTopology;
use crate::topology::handle::{CellId, VertexId};

/// A reduced topology whose cells are the surviving interface facets,
/// each carrying its remapped segment-definition.
#[derive(Clone, Debug)]
pub struct SimplifiedMesh<V> {
    /// New, independent `(dim - 1)`-topology; one cell per kept facet.
    pub topology: SimplicialTopology<V>,
    /// Remapped segment-definition of each kept cell (sides passed through).
    pub cell_segments: HashMap<CellId, SegmentDef>,
}

/// Simplifies with an infallible vertex dedup key.
pub fn simplify<V, K, F>(
    topo: &SimplicialTopology<V>,
    segmentation: &Segmentation,
    merge_map: &MergeMap,
    mut key_of: F,
) -> Result<SimplifiedMesh<V>, MeshTopoError>
where
    V: Clone,
    K: Hash + Eq,
    F: FnMut(&V) -> K,
{
    try_simplify(topo, segmentation, merge_map, |payload| Ok(key_of(payload)))
}

/// Simplifies with a fallible vertex dedup key.
///
/// A key error aborts the whole pass; the partially built output is
/// discarded and the source topology is untouched either way.
pub fn try_simplify<V, K, F>(
    topo: &SimplicialTopology<V>,
    segmentation: &Segmentation,
    merge_map: &MergeMap,
    mut key_of: F,
) -> Result<SimplifiedMesh<V>, MeshTopoError>
where
    V: Clone,
    K: Hash + Eq,
    F: FnMut(&V) -> Result<K, MeshTopoError>,
{
    if topo.dim() < 2 {
        return Err(MeshTopoError::UnsupportedDimension(topo.dim()));
    }
    let mut out = SimplicialTopology::new(topo.dim() - 1)?;
    let mut dedup: HashMap<K, VertexId> = HashMap::new();
    let mut cell_segments = HashMap::new();
    let mut dropped = 0usize;

    for (facet, def) in segmentation.iter_sorted() {
        let keep = match def.segment_pair() {
            // Interior: still an interface only if the canonical ids differ.
            Some((a, b)) => merge_map.canonical(a)? != merge_map.canonical(b)?,
            // Boundary: always kept.
            None => true,
        };
        if !keep {
            dropped += 1;
            continue;
        }

        let mut verts = Vec::with_capacity(facet.arity());
        for &v in facet.vertices() {
            let payload = topo.vertex_payload(v)?;
            let key = key_of(payload)?;
            let out_v = match dedup.get(&key) {
                Some(&existing) => existing,
                None => {
                    let fresh = out.add_vertex(payload.clone());
                    dedup.insert(key, fresh);
                    fresh
                }
            };
            verts.push(out_v);
        }
        let cell = out.add_cell(&verts)?;
        cell_segments.insert(cell, def.remapped(|s| merge_map.canonical(s))?);
    }

    log::debug!(
        "simplified: kept {} facets, dropped {}, {} deduplicated vertices",
        out.cell_count(),
        dropped,
        out.vertex_count()
    );
    Ok(SimplifiedMesh {
        topology: out,
        cell_segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::assignment::{SegmentAssignment, SegmentId};
    use crate::segment::classify::classify;
    use crate::segment::merge::merge_segments;

    fn sid(raw: u32) -> SegmentId {
        SegmentId::new(raw)
    }

    #[test]
    fn interior_facet_between_merged_segments_is_dropped() {
        // Two triangles, segments 1|2, equivalent -> only the 4 hull edges
        // survive, all tagged 0.
        let mut topo = SimplicialTopology::new(2).unwrap();
        let a = topo.add_vertex((0, 0));
        let b = topo.add_vertex((0, 1));
        let c = topo.add_vertex((1, 0));
        let d = topo.add_vertex((1, 1));
        let t0 = topo.add_cell(&[a, b, c]).unwrap();
        let t1 = topo.add_cell(&[b, c, d]).unwrap();
        let mut assignment = SegmentAssignment::new();
        assignment.assign(t0, sid(1));
        assignment.assign(t1, sid(2));
        let seg = classify(&topo, &assignment).unwrap();
        let map = merge_segments(&seg, |_, _| true).unwrap();

        let simplified = simplify(&topo, &seg, &map, |p| *p).unwrap();
        assert_eq!(simplified.topology.dim(), 1);
        assert_eq!(simplified.topology.cell_count(), 4);
        assert_eq!(simplified.topology.vertex_count(), 4);
        for def in simplified.cell_segments.values() {
            for entry in def.entries() {
                assert_eq!(entry.segment, sid(0));
            }
        }
        // Source untouched.
        assert_eq!(topo.cell_count(), 2);
        assert_eq!(seg.len(), 5);
    }

    #[test]
    fn interface_between_distinct_classes_is_kept_with_both_entries() {
        let mut topo = SimplicialTopology::new(2).unwrap();
        let a = topo.add_vertex((0, 0));
        let b = topo.add_vertex((0, 1));
        let c = topo.add_vertex((1, 0));
        let d = topo.add_vertex((1, 1));
        let t0 = topo.add_cell(&[a, b, c]).unwrap();
        let t1 = topo.add_cell(&[b, c, d]).unwrap();
        let mut assignment = SegmentAssignment::new();
        assignment.assign(t0, sid(4));
        assignment.assign(t1, sid(9));
        let seg = classify(&topo, &assignment).unwrap();
        let map = merge_segments(&seg, |_, _| false).unwrap();

        let simplified = simplify(&topo, &seg, &map, |p| *p).unwrap();
        // 4 boundary edges + 1 interface edge
        assert_eq!(simplified.topology.cell_count(), 5);
        let interface: Vec<_> = simplified
            .cell_segments
            .values()
            .filter(|def| def.is_interior())
            .collect();
        assert_eq!(interface.len(), 1);
        assert_eq!(
            interface[0].segment_pair(),
            Some((sid(0), sid(1)))
        );
    }

    #[test]
    fn spatially_equal_payloads_collapse_to_one_vertex() {
        // Two triangles that do NOT share handles but share coordinates on
        // the seam; dedup-by-payload must fuse the seam vertices.
        let mut topo = SimplicialTopology::new(2).unwrap();
        let a = topo.add_vertex((0, 0));
        let b1 = topo.add_vertex((0, 1));
        let c1 = topo.add_vertex((1, 0));
        let b2 = topo.add_vertex((0, 1));
        let c2 = topo.add_vertex((1, 0));
        let d = topo.add_vertex((1, 1));
        let t0 = topo.add_cell(&[a, b1, c1]).unwrap();
        let t1 = topo.add_cell(&[b2, c2, d]).unwrap();
        let mut assignment = SegmentAssignment::new();
        assignment.assign(t0, sid(1));
        assignment.assign(t1, sid(2));
        let seg = classify(&topo, &assignment).unwrap();
        let map = merge_segments(&seg, |_, _| false).unwrap();

        let simplified = simplify(&topo, &seg, &map, |p| *p).unwrap();
        // 6 source vertices, but only 4 distinct coordinates.
        assert_eq!(simplified.topology.vertex_count(), 4);
    }

    #[test]
    fn key_error_propagates() {
        let mut topo = SimplicialTopology::new(2).unwrap();
        let a = topo.add_vertex(0);
        let b = topo.add_vertex(1);
        let c = topo.add_vertex(2);
        let t0 = topo.add_cell(&[a, b, c]).unwrap();
        let mut assignment = SegmentAssignment::new();
        assignment.assign(t0, sid(1));
        let seg = classify(&topo, &assignment).unwrap();
        let map = merge_segments(&seg, |_, _| false).unwrap();

        let err = try_simplify(&topo, &seg, &map, |_: &i32| {
            Err::<i32, _>(MeshTopoError::Predicate("bad key".into()))
        })
        .unwrap_err();
        assert_eq!(err, MeshTopoError::Predicate("bad key".into()));
    }

    #[test]
    fn one_dimensional_source_is_rejected() {
        let topo = SimplicialTopology::<i32>::new(1).unwrap();
        let seg = Segmentation::default();
        let map = merge_segments(&seg, |_, _| false).unwrap();
        assert_eq!(
            simplify(&topo, &seg, &map, |p| *p).unwrap_err(),
            MeshTopoError::UnsupportedDimension(1)
        );
    }
}
