use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

use simplex_topo::prelude::*;

/// `n x n` grid of squares split into triangles, segments striped by column.
fn build_grid(n: usize) -> (SimplicialTopology<(i32, i32)>, SegmentAssignment) {
    let mut topo = SimplicialTopology::new(2).unwrap();
    let verts: Vec<Vec<VertexId>> = (0..=n)
        .map(|r| {
            (0..=n)
                .map(|c| topo.add_vertex((c as i32, r as i32)))
                .collect()
        })
        .collect();
    let mut assignment = SegmentAssignment::new();
    for r in 0..n {
        for c in 0..n {
            let t0 = topo
                .add_cell(&[verts[r][c], verts[r][c + 1], verts[r + 1][c]])
                .unwrap();
            let t1 = topo
                .add_cell(&[verts[r][c + 1], verts[r + 1][c + 1], verts[r + 1][c]])
                .unwrap();
            assignment.assign(t0, SegmentId::new((c / 4) as u32));
            assignment.assign(t1, SegmentId::new((c / 4) as u32));
        }
    }
    (topo, assignment)
}

fn bench_boundary_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("boundary_scan");
    for &n in &[32usize, 64usize] {
        let (topo, _) = build_grid(n);
        group.bench_function(format!("grid_{n}"), |b| {
            // Clone per iteration so the OnceCell cache never carries over.
            b.iter_batched(
                || topo.clone(),
                |fresh| {
                    let boundary = fresh.boundary_facets().unwrap();
                    black_box(boundary.len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_classify_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_merge");
    for &n in &[32usize, 64usize] {
        let (topo, assignment) = build_grid(n);
        group.bench_function(format!("grid_{n}"), |b| {
            b.iter(|| {
                let segmentation = classify(&topo, &assignment).unwrap();
                let map =
                    merge_segments(&segmentation, |a, b| a.get() / 2 == b.get() / 2).unwrap();
                black_box(map.class_count());
            });
        });
    }
    group.finish();
}

fn bench_facet_cells(c: &mut Criterion) {
    let (topo, _) = build_grid(64);
    let facets: Vec<Facet> = topo
        .cell_ids()
        .take(256)
        .flat_map(|cell| topo.cell_facets(cell).unwrap())
        .collect();
    c.bench_function("facet_cells_256x3", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for facet in &facets {
                total += topo.facet_cells(facet).unwrap().len();
            }
            black_box(total);
        });
    });
}

criterion_group!(
    benches,
    bench_boundary_scan,
    bench_classify_merge,
    bench_facet_cells
);
criterion_main!(benches);
