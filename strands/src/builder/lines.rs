//! Line-list skeleton: one vertex per particle, one segment per particle pair.

use hairmesh_core::math::Aabb;
use hairmesh_core::mesh::{MeshBounds, MeshBufferSink, MeshBuffers, VertexLayout};
use hairmesh_core::profiling::{profile_function, profile_scope};

use crate::error::Result;
use crate::layout::MemoryLayout;
use crate::uv::{UV_U_CENTER, pack_uv, strand_v};

use super::{MeshKind, StrandMeshBuilder, strand_counts};

impl StrandMeshBuilder {
    /// Build a line-list mesh with `strand_count * particle_count` vertices.
    ///
    /// - Stream 0: vertex ID, a float counter running strand-major across the
    ///   whole mesh.
    /// - Stream 1: packed UV, U fixed at the centre, V from 0 at the root to
    ///   65535 at the tip.
    /// - Indices: `(base + i, base + i + 1)` for each of the
    ///   `particle_count - 1` segments of every strand.
    ///
    /// `memory_layout` only decides the order particle slots are walked;
    /// output vertices are always strand-major, so the result is identical
    /// for every layout. `bounds` is stored as given.
    pub fn build_lines<S>(
        &self,
        sink: &mut S,
        memory_layout: MemoryLayout,
        strand_count: usize,
        particle_count: usize,
        bounds: &Aabb,
    ) -> Result<()>
    where
        S: MeshBufferSink + ?Sized,
    {
        profile_function!();

        let counts = strand_counts(MeshKind::Lines, strand_count, particle_count, 1, 2)?;
        let segments = particle_count - 1;

        let mut vertex_id = vec![0.0f32; counts.vertex_count as usize];
        let mut vertex_uv = vec![0u32; counts.vertex_count as usize];
        let mut indices = vec![0u32; counts.index_count as usize];

        {
            profile_scope!("line_vertices");
            self.fill_strands(&mut vertex_id, particle_count, |strand, out| {
                let range = memory_layout.strand_range(strand, strand_count, particle_count);
                let base = strand * particle_count;
                for (local, (slot, _)) in out.iter_mut().zip(range.indices()).enumerate() {
                    *slot = (base + local) as f32;
                }
            });
            self.fill_strands(&mut vertex_uv, particle_count, |strand, out| {
                let range = memory_layout.strand_range(strand, strand_count, particle_count);
                for (local, (slot, _)) in out.iter_mut().zip(range.indices()).enumerate() {
                    *slot = pack_uv(UV_U_CENTER, strand_v(local, particle_count));
                }
            });
        }

        {
            profile_scope!("line_indices");
            self.fill_strands(&mut indices, segments * 2, |strand, out| {
                let base = (strand * particle_count) as u32;
                for (segment, pair) in out.chunks_exact_mut(2).enumerate() {
                    let segment_base = base + segment as u32;
                    pair[0] = segment_base;
                    pair[1] = segment_base + 1;
                }
            });
        }

        let buffers = MeshBuffers {
            layout: VertexLayout::strand_id_uv(),
            vertex_count: counts.vertex_count,
            vertex_streams: vec![
                bytemuck::cast_slice::<f32, u8>(&vertex_id).to_vec(),
                bytemuck::cast_slice::<u32, u8>(&vertex_uv).to_vec(),
            ],
            indices,
            index_format: self.config.index_policy.format_for(counts.vertex_count),
            topology: MeshKind::Lines.topology(),
            bounds: MeshBounds::Explicit(*bounds),
        };
        self.commit(MeshKind::Lines, sink, buffers)
    }
}
