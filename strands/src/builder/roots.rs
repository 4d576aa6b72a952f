//! Root point cloud: one vertex per strand.

use hairmesh_core::math::Vec3;
use hairmesh_core::mesh::{MeshBounds, MeshBufferSink, MeshBuffers, VertexLayout};
use hairmesh_core::profiling::profile_function;

use crate::error::{Result, StrandMeshError};

use super::{MeshKind, StrandMeshBuilder};

impl StrandMeshBuilder {
    /// Build a point mesh with one vertex per strand root.
    ///
    /// Stream 0 holds `root_position`, stream 1 holds `root_direction`, both
    /// copied 1:1. Indices are `0..strand_count` and the bounds are
    /// recalculated from the positions by the sink. Zero strands produce an
    /// empty mesh.
    pub fn build_roots<S>(
        &self,
        sink: &mut S,
        strand_count: usize,
        root_position: &[Vec3],
        root_direction: &[Vec3],
    ) -> Result<()>
    where
        S: MeshBufferSink + ?Sized,
    {
        profile_function!();

        check_root_array("root_position", strand_count, root_position.len())?;
        check_root_array("root_direction", strand_count, root_direction.len())?;

        let vertex_count =
            u32::try_from(strand_count).map_err(|_| StrandMeshError::CountOverflow {
                kind: MeshKind::Roots,
                strand_count,
                particle_count: 1,
            })?;
        let indices: Vec<u32> = (0..vertex_count).collect();

        let buffers = MeshBuffers {
            layout: VertexLayout::strand_roots(),
            vertex_count,
            vertex_streams: vec![
                bytemuck::cast_slice::<Vec3, u8>(root_position).to_vec(),
                bytemuck::cast_slice::<Vec3, u8>(root_direction).to_vec(),
            ],
            index_format: self.config.index_policy.format_for(vertex_count),
            indices,
            topology: MeshKind::Roots.topology(),
            bounds: MeshBounds::Recalculate,
        };
        self.commit(MeshKind::Roots, sink, buffers)
    }
}

fn check_root_array(name: &'static str, strand_count: usize, actual: usize) -> Result<()> {
    if actual != strand_count {
        return Err(StrandMeshError::RootArrayLength {
            name,
            expected: strand_count,
            actual,
        });
    }
    Ok(())
}
