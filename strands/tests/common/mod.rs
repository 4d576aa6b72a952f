//! Shared helpers for strand mesh integration tests.

#![allow(dead_code)]

use hairmesh::MemoryLayout;
use hairmesh::math::{Aabb, Vec3};
use hairmesh::mesh::{MeshBufferSink, MeshBuffers, MeshError};
use hairmesh::uv::unpack_uv;

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Both memory layouts, for layout-invariance checks.
pub const LAYOUTS: [MemoryLayout; 2] = [MemoryLayout::Sequential, MemoryLayout::Interleaved];

/// Unit cube around the origin.
pub fn unit_bounds() -> Aabb {
    Aabb::from_center_size(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0))
}

/// Sink that records every batch it receives without storing it in a mesh.
#[derive(Default)]
pub struct RecordingSink {
    pub batches: Vec<MeshBuffers>,
}

impl RecordingSink {
    /// The single batch written so far.
    pub fn only(&self) -> &MeshBuffers {
        assert_eq!(self.batches.len(), 1, "expected exactly one batch write");
        &self.batches[0]
    }
}

impl MeshBufferSink for RecordingSink {
    fn write_buffers(&mut self, buffers: MeshBuffers) -> Result<(), MeshError> {
        buffers.validate()?;
        self.batches.push(buffers);
        Ok(())
    }
}

/// Sink that refuses every batch.
pub struct RejectingSink;

impl MeshBufferSink for RejectingSink {
    fn write_buffers(&mut self, _buffers: MeshBuffers) -> Result<(), MeshError> {
        Err(MeshError::InvalidLayout("read-only sink".to_string()))
    }
}

/// Decode stream 0 of an ID/UV batch.
pub fn vertex_ids(batch: &MeshBuffers) -> Vec<f32> {
    decode(&batch.vertex_streams[0])
}

/// Decode stream 1 of an ID/UV batch into `(u, v)` pairs.
pub fn vertex_uvs(batch: &MeshBuffers) -> Vec<(u16, u16)> {
    decode::<u32>(&batch.vertex_streams[1])
        .into_iter()
        .map(unpack_uv)
        .collect()
}

fn decode<T: bytemuck::Pod>(bytes: &[u8]) -> Vec<T> {
    bytes
        .chunks_exact(std::mem::size_of::<T>())
        .map(bytemuck::pod_read_unaligned)
        .collect()
}

/// Deterministic strand set: strand `s` climbs along +Y from `(s, 0, 0)`.
pub fn ladder_strands(strand_count: usize, particle_count: usize) -> Vec<Vec<Vec3>> {
    (0..strand_count)
        .map(|s| {
            (0..particle_count)
                .map(|p| Vec3::new(s as f32, p as f32 * 0.5, 0.0))
                .collect()
        })
        .collect()
}
