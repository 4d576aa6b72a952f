use criterion::{Criterion, black_box, criterion_group, criterion_main};

use hairmesh_core::math::{Aabb, Vec3};
use hairmesh_core::mesh::{
    CpuMesh, IndexFormat, MeshBounds, MeshBufferSink, MeshBuffers, PrimitiveTopology,
    VertexLayout,
};

// ---------------------------------------------------------------------------
// Batch upload
// ---------------------------------------------------------------------------

fn point_batch(count: u32) -> MeshBuffers {
    let positions: Vec<[f32; 3]> = (0..count)
        .map(|i| [i as f32, (i % 7) as f32, -(i as f32)])
        .collect();
    let bytes: Vec<u8> = bytemuck::cast_slice(&positions).to_vec();
    MeshBuffers {
        layout: VertexLayout::strand_roots(),
        vertex_count: count,
        vertex_streams: vec![bytes.clone(), bytes],
        indices: (0..count).collect(),
        index_format: IndexFormat::Uint32,
        topology: PrimitiveTopology::PointList,
        bounds: MeshBounds::Recalculate,
    }
}

fn bench_validate_batch(c: &mut Criterion) {
    let batch = point_batch(100_000);
    c.bench_function("mesh_buffers_validate_100k", |b| {
        b.iter(|| black_box(&batch).validate());
    });
}

fn bench_write_recalculate_bounds(c: &mut Criterion) {
    let batch = point_batch(100_000);
    c.bench_function("cpu_mesh_write_recalculate_100k", |b| {
        b.iter(|| {
            let mut mesh = CpuMesh::new(VertexLayout::strand_roots());
            mesh.write_buffers(black_box(batch.clone()))
        });
    });
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

fn bench_aabb_from_points(c: &mut Criterion) {
    let points: Vec<Vec3> = (0..100_000)
        .map(|i| Vec3::new(i as f32, (i % 13) as f32, (i % 5) as f32))
        .collect();
    c.bench_function("aabb_from_points_100k", |b| {
        b.iter(|| Aabb::from_points(black_box(&points)));
    });
}

criterion_group!(
    benches,
    bench_validate_batch,
    bench_write_recalculate_bounds,
    bench_aabb_from_points,
);
criterion_main!(benches);
