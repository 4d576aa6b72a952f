use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use hairmesh::math::{Aabb, Vec3};
use hairmesh::mesh::{CpuMesh, VertexLayout};
use hairmesh::{MemoryLayout, StrandGroup, StrandMeshBuilder};

const STRAND_COUNTS: [usize; 3] = [256, 4096, 32768];
const PARTICLE_COUNT: usize = 32;

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn bench_build_lines(c: &mut Criterion) {
    let builder = StrandMeshBuilder::default();
    let bounds = Aabb::default();
    let mut group = c.benchmark_group("build_lines");
    for strands in STRAND_COUNTS {
        group.bench_with_input(BenchmarkId::from_parameter(strands), &strands, |b, &n| {
            let mut mesh = CpuMesh::new(VertexLayout::strand_id_uv());
            b.iter(|| {
                builder.build_lines(
                    &mut mesh,
                    MemoryLayout::Interleaved,
                    black_box(n),
                    PARTICLE_COUNT,
                    &bounds,
                )
            });
        });
    }
    group.finish();
}

fn bench_build_strips(c: &mut Criterion) {
    let builder = StrandMeshBuilder::default();
    let bounds = Aabb::default();
    let mut group = c.benchmark_group("build_strips");
    for strands in STRAND_COUNTS {
        group.bench_with_input(BenchmarkId::from_parameter(strands), &strands, |b, &n| {
            let mut mesh = CpuMesh::new(VertexLayout::strand_id_uv());
            b.iter(|| {
                builder.build_strips(
                    &mut mesh,
                    MemoryLayout::Sequential,
                    black_box(n),
                    PARTICLE_COUNT,
                    &bounds,
                )
            });
        });
    }
    group.finish();
}

fn bench_build_roots(c: &mut Criterion) {
    let builder = StrandMeshBuilder::default();
    let positions: Vec<Vec3> = (0..32768).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
    let directions = vec![Vec3::y(); positions.len()];
    c.bench_function("build_roots_32k", |b| {
        let mut mesh = CpuMesh::new(VertexLayout::strand_roots());
        b.iter(|| builder.build_roots(&mut mesh, positions.len(), &positions, &directions));
    });
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

fn bench_group_build_meshes(c: &mut Criterion) {
    let strands: Vec<Vec<Vec3>> = (0..4096)
        .map(|s| {
            (0..PARTICLE_COUNT)
                .map(|p| Vec3::new(s as f32, p as f32, 0.0))
                .collect()
        })
        .collect();
    let group = StrandGroup::from_strands(MemoryLayout::Interleaved, &strands).unwrap();
    let builder = StrandMeshBuilder::default();
    c.bench_function("group_build_meshes_4k", |b| {
        b.iter(|| group.build_meshes(black_box(&builder)));
    });
}

criterion_group!(
    benches,
    bench_build_lines,
    bench_build_strips,
    bench_build_roots,
    bench_group_build_meshes,
);
criterion_main!(benches);
