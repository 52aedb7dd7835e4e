//! End-to-end classification → merge → simplification scenarios.

use std::collections::HashMap;

use simplex_topo::prelude::*;

fn sid(raw: u32) -> SegmentId {
    SegmentId::new(raw)
}

/// Two tetrahedra sharing one triangular facet, segments 1 and 2.
#[test]
fn two_tets_merge_drops_shared_facet() {
    let mut topo = SimplicialTopology::new(3).unwrap();
    let a = topo.add_vertex([0, 0, 0]);
    let b = topo.add_vertex([1, 0, 0]);
    let c = topo.add_vertex([0, 1, 0]);
    let d = topo.add_vertex([0, 0, 1]);
    let e = topo.add_vertex([1, 1, 1]);
    let t0 = topo.add_cell(&[a, b, c, d]).unwrap();
    let t1 = topo.add_cell(&[b, c, d, e]).unwrap();

    let mut assignment = SegmentAssignment::new();
    assignment.assign(t0, sid(1));
    assignment.assign(t1, sid(2));
    let segmentation = classify(&topo, &assignment).unwrap();

    // The shared facet carries both segments.
    let shared = Facet::from_vertices([b, c, d]);
    let def = segmentation.get(&shared).unwrap();
    assert!(def.is_interior());
    assert_eq!(def.segment_pair(), Some((sid(1), sid(2))));

    // equivalent(1, 2) = true -> {1: 0, 2: 0}
    let map = merge_segments(&segmentation, |_, _| true).unwrap();
    assert_eq!(map.class_count(), 1);
    assert_eq!(map.canonical(sid(1)).unwrap(), sid(0));
    assert_eq!(map.canonical(sid(2)).unwrap(), sid(0));

    // The shared facet disappears; the outward-facing facets remain, all
    // tagged segment 0.
    let simplified = simplify(&topo, &segmentation, &map, |p| *p).unwrap();
    assert_eq!(simplified.topology.dim(), 2);
    assert_eq!(simplified.topology.cell_count(), 6);
    assert_eq!(simplified.topology.vertex_count(), 5);
    for def in simplified.cell_segments.values() {
        assert!(def.is_boundary());
        assert_eq!(def.entries()[0].segment, sid(0));
    }
}

/// Triangle strip: two triangles per column, one segment per column, in the
/// given column order.
fn strip(segments: &[u32]) -> (
    SimplicialTopology<(i32, i32)>,
    SegmentAssignment,
    Segmentation,
) {
    let n = segments.len();
    let mut topo = SimplicialTopology::new(2).unwrap();
    let bottom: Vec<_> = (0..=n).map(|i| topo.add_vertex((i as i32, 0))).collect();
    let top: Vec<_> = (0..=n).map(|i| topo.add_vertex((i as i32, 1))).collect();
    let mut assignment = SegmentAssignment::new();
    for (i, &s) in segments.iter().enumerate() {
        let t0 = topo.add_cell(&[bottom[i], bottom[i + 1], top[i]]).unwrap();
        let t1 = topo
            .add_cell(&[bottom[i + 1], top[i + 1], top[i]])
            .unwrap();
        assignment.assign(t0, SegmentId::new(s));
        assignment.assign(t1, SegmentId::new(s));
    }
    let segmentation = classify(&topo, &assignment).unwrap();
    (topo, assignment, segmentation)
}

fn material(id: SegmentId) -> &'static str {
    match id.get() {
        1 | 2 | 6 | 7 | 11 => "SIO2",
        3 | 4 | 5 | 8 | 9 | 10 => "AL",
        _ => "UNKNOWN",
    }
}

/// Eleven segments over two materials; regions of the same material that
/// touch collapse into one canonical segment each.
#[test]
fn eleven_segments_collapse_to_two_materials() {
    // Column order places each material's regions in one contiguous block,
    // so same-material regions are chained by shared interfaces.
    let order = [1u32, 2, 6, 7, 11, 3, 4, 5, 8, 9, 10];
    let (topo, _, segmentation) = strip(&order);

    let map = merge_segments(&segmentation, |a, b| material(a) == material(b)).unwrap();
    assert_eq!(map.class_count(), 2);
    for &raw in &order {
        let canonical = map.canonical(sid(raw)).unwrap();
        let expected = if material(sid(raw)) == "SIO2" { 0 } else { 1 };
        assert_eq!(canonical, sid(expected), "segment {raw}");
    }

    let simplified = simplify(&topo, &segmentation, &map, |p| *p).unwrap();
    // Perimeter: 11 bottom + 11 top + 2 sides; plus the single SIO2|AL
    // interface that survives.
    assert_eq!(simplified.topology.cell_count(), 25);
    let interfaces: Vec<&SegmentDef> = simplified
        .cell_segments
        .values()
        .filter(|def| def.is_interior())
        .collect();
    assert_eq!(interfaces.len(), 1);
    assert_eq!(interfaces[0].segment_pair(), Some((sid(0), sid(1))));
}

/// Re-running the merger on an already-merged mesh yields the identity map.
#[test]
fn merge_is_idempotent() {
    let order = [1u32, 2, 6, 7, 11, 3, 4, 5, 8, 9, 10];
    let (topo, assignment, segmentation) = strip(&order);
    let map = merge_segments(&segmentation, |a, b| material(a) == material(b)).unwrap();

    // Remap the assignment through the merge map and classify again.
    let mut remapped = SegmentAssignment::new();
    for (cell, s) in assignment.iter() {
        remapped.assign(cell, map.canonical(s).unwrap());
    }
    let segmentation2 = classify(&topo, &remapped).unwrap();

    // Material identity lifted onto canonical ids.
    let canonical_material = |id: SegmentId| if id.get() == 0 { "SIO2" } else { "AL" };
    let map2 = merge_segments(&segmentation2, |a, b| {
        canonical_material(a) == canonical_material(b)
    })
    .unwrap();
    assert!(map2.is_identity());
    assert_eq!(map2.class_count(), 2);
}

/// Every output facet of the simplifier existed in the source and satisfies
/// the keep predicate; every dropped facet had two equal canonical entries.
#[test]
fn simplification_round_trip() {
    let order = [1u32, 2, 6, 7, 11, 3, 4, 5, 8, 9, 10];
    let (topo, _, segmentation) = strip(&order);
    let map = merge_segments(&segmentation, |a, b| material(a) == material(b)).unwrap();
    let simplified = simplify(&topo, &segmentation, &map, |p| *p).unwrap();

    // Source facets keyed by payload tuples.
    let mut source_facets: HashMap<Vec<(i32, i32)>, &SegmentDef> = HashMap::new();
    for (facet, def) in segmentation.iter() {
        let mut key: Vec<(i32, i32)> = facet
            .vertices()
            .iter()
            .map(|&v| *topo.vertex_payload(v).unwrap())
            .collect();
        key.sort_unstable();
        source_facets.insert(key, def);
    }

    let mut kept = 0usize;
    for cell in simplified.topology.cell_ids() {
        let mut key: Vec<(i32, i32)> = simplified
            .topology
            .cell_vertices(cell)
            .unwrap()
            .iter()
            .map(|&v| *simplified.topology.vertex_payload(v).unwrap())
            .collect();
        key.sort_unstable();
        let def = source_facets
            .get(&key)
            .expect("output facet must exist in source");
        match def.segment_pair() {
            Some((a, b)) => assert_ne!(
                map.canonical(a).unwrap(),
                map.canonical(b).unwrap(),
                "kept interior facet must remain an interface"
            ),
            None => {}
        }
        kept += 1;
    }

    let dropped = segmentation.len() - kept;
    let expected_dropped = segmentation
        .iter()
        .filter(|(_, def)| match def.segment_pair() {
            Some((a, b)) => map.canonical(a).unwrap() == map.canonical(b).unwrap(),
            None => false,
        })
        .count();
    assert_eq!(dropped, expected_dropped);
}
