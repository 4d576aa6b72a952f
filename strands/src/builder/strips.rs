//! Triangulated ribbons: two rail vertices per particle, one quad per segment.

use hairmesh_core::math::Aabb;
use hairmesh_core::mesh::{MeshBounds, MeshBufferSink, MeshBuffers, VertexLayout};
use hairmesh_core::profiling::{profile_function, profile_scope};

use crate::error::Result;
use crate::layout::MemoryLayout;
use crate::uv::{UV_U_LEFT, UV_U_RIGHT, pack_uv, strand_v};

use super::{MeshKind, StrandMeshBuilder, strand_counts};

/// Triangle list of one segment quad, relative to the segment's left root vertex.
///
/// ```text
/// b+2 --- b+3
///  |    /  |
///  |  /    |
///  b  --- b+1
/// ```
const QUAD: [u32; 6] = [0, 1, 3, 0, 3, 2];

impl StrandMeshBuilder {
    /// Build a triangle-list ribbon mesh with `2 * strand_count * particle_count`
    /// vertices.
    ///
    /// Each particle contributes a left rail vertex (U = 0) followed by a right
    /// rail vertex (U = 65535). Both carry the particle's vertex ID and V.
    /// Every segment becomes two triangles sharing its diagonal.
    ///
    /// Output is independent of `memory_layout`; `bounds` is stored as given.
    pub fn build_strips<S>(
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

        let counts = strand_counts(MeshKind::Strips, strand_count, particle_count, 2, 6)?;
        let segments = particle_count - 1;

        let mut vertex_id = vec![0.0f32; counts.vertex_count as usize];
        let mut vertex_uv = vec![0u32; counts.vertex_count as usize];
        let mut indices = vec![0u32; counts.index_count as usize];

        {
            profile_scope!("strip_vertices");
            self.fill_strands(&mut vertex_id, particle_count * 2, |strand, out| {
                let range = memory_layout.strand_range(strand, strand_count, particle_count);
                let base = strand * particle_count;
                for (local, (rails, _)) in out.chunks_exact_mut(2).zip(range.indices()).enumerate()
                {
                    let id = (base + local) as f32;
                    rails[0] = id;
                    rails[1] = id;
                }
            });
            self.fill_strands(&mut vertex_uv, particle_count * 2, |strand, out| {
                let range = memory_layout.strand_range(strand, strand_count, particle_count);
                for (local, (rails, _)) in out.chunks_exact_mut(2).zip(range.indices()).enumerate()
                {
                    let v = strand_v(local, particle_count);
                    rails[0] = pack_uv(UV_U_LEFT, v);
                    rails[1] = pack_uv(UV_U_RIGHT, v);
                }
            });
        }

        {
            profile_scope!("strip_indices");
            self.fill_strands(&mut indices, segments * 6, |strand, out| {
                let base = (strand * particle_count) as u32;
                for (segment, quad) in out.chunks_exact_mut(6).enumerate() {
                    let left_root = 2 * (base + segment as u32);
                    for (slot, corner) in quad.iter_mut().zip(QUAD) {
                        *slot = left_root + corner;
                    }
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
            topology: MeshKind::Strips.topology(),
            bounds: MeshBounds::Explicit(*bounds),
        };
        self.commit(MeshKind::Strips, sink, buffers)
    }
}

#[cfg(test)]
mod tests {
    use hairmesh_core::math::Vec3;
    use hairmesh_core::mesh::{CpuMesh, IndexFormat, PrimitiveTopology};

    use super::*;
    use crate::config::{BuildConfig, IndexPolicy};
    use crate::error::StrandMeshError;
    use crate::uv::unpack_uv;

    fn build(layout: MemoryLayout, strands: usize, particles: usize) -> CpuMesh {
        let bounds = Aabb::from_center_size(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        let mut mesh = CpuMesh::new(VertexLayout::strand_id_uv());
        StrandMeshBuilder::default()
            .build_strips(&mut mesh, layout, strands, particles, &bounds)
            .unwrap();
        mesh
    }

    #[test]
    fn test_one_strand_four_particles() {
        let mesh = build(MemoryLayout::Sequential, 1, 4);

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.index_count(), 18);
        assert_eq!(mesh.topology(), Some(PrimitiveTopology::TriangleList));
        assert_eq!(
            mesh.indices(),
            vec![0, 1, 3, 0, 3, 2, 2, 3, 5, 2, 5, 4, 4, 5, 7, 4, 7, 6]
        );
        assert_eq!(
            mesh.vertex_stream::<f32>(0).unwrap(),
            vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0]
        );

        let uvs: Vec<(u16, u16)> = mesh
            .vertex_stream::<u32>(1)
            .unwrap()
            .into_iter()
            .map(unpack_uv)
            .collect();
        assert_eq!(
            uvs,
            vec![
                (0, 0),
                (65535, 0),
                (0, 21845),
                (65535, 21845),
                (0, 43690),
                (65535, 43690),
                (0, 65535),
                (65535, 65535),
            ]
        );
    }

    #[test]
    fn test_second_strand_offsets() {
        let mesh = build(MemoryLayout::Interleaved, 2, 2);
        assert_eq!(mesh.indices(), vec![0, 1, 3, 0, 3, 2, 4, 5, 7, 4, 7, 6]);
        assert_eq!(
            mesh.vertex_stream::<f32>(0).unwrap(),
            vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0]
        );
    }

    #[test]
    fn test_interleaved_matches_sequential() {
        let a = build(MemoryLayout::Sequential, 6, 5);
        let b = build(MemoryLayout::Interleaved, 6, 5);
        assert_eq!(a.vertex_buffer_data(0), b.vertex_buffer_data(0));
        assert_eq!(a.vertex_buffer_data(1), b.vertex_buffer_data(1));
        assert_eq!(a.index_data(), b.index_data());
    }

    #[test]
    fn test_compact_indices() {
        let builder =
            StrandMeshBuilder::new(BuildConfig::default().with_index_policy(IndexPolicy::Compact));
        let mut mesh = CpuMesh::new(VertexLayout::strand_id_uv());
        builder
            .build_strips(&mut mesh, MemoryLayout::Sequential, 3, 3, &Aabb::default())
            .unwrap();
        assert_eq!(mesh.index_format(), Some(IndexFormat::Uint16));
        assert_eq!(mesh.index_data().map(<[u8]>::len), Some(36 * 2));
        assert_eq!(&mesh.indices()[..6], &[0, 1, 3, 0, 3, 2]);
    }

    #[test]
    fn test_empty_group() {
        let mesh = build(MemoryLayout::Sequential, 0, 4);
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.index_count(), 0);
    }

    #[test]
    fn test_zero_particles_rejected() {
        let mut mesh = CpuMesh::new(VertexLayout::strand_id_uv());
        let err = StrandMeshBuilder::default()
            .build_strips(&mut mesh, MemoryLayout::Interleaved, 0, 0, &Aabb::default())
            .unwrap_err();
        assert_eq!(
            err,
            StrandMeshError::ZeroParticleCount {
                kind: MeshKind::Strips
            }
        );
    }
}
