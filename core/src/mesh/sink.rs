//! Batch uploads of finished vertex and index streams.
//!
//! Builders fill scratch arrays, pack them into one [`MeshBuffers`] value and
//! hand it to a [`MeshBufferSink`] in a single call. Sinks never expose their
//! current contents to the writer, and every write replaces the previous
//! contents entirely.

use std::sync::Arc;

use crate::math::Aabb;

use super::data::{CpuMesh, IndexFormat, PrimitiveTopology, SubMesh};
use super::error::MeshError;
use super::layout::VertexLayout;

/// How the sink should obtain the bounding volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshBounds {
    /// Use the caller-supplied box as-is.
    Explicit(Aabb),
    /// Derive the box from the position attribute.
    Recalculate,
}

/// A complete mesh upload: vertex streams, indices, one submesh and bounds.
#[derive(Debug, Clone)]
pub struct MeshBuffers {
    /// Layout describing every vertex stream.
    pub layout: Arc<VertexLayout>,
    /// Number of vertices in every stream.
    pub vertex_count: u32,
    /// One byte stream per layout buffer, in buffer order.
    pub vertex_streams: Vec<Vec<u8>>,
    /// Index stream. Narrowed on write when `index_format` is 16-bit.
    pub indices: Vec<u32>,
    /// Index format the sink stores.
    pub index_format: IndexFormat,
    /// Topology of the single submesh covering all indices.
    pub topology: PrimitiveTopology,
    /// Bounding volume policy.
    pub bounds: MeshBounds,
}

impl MeshBuffers {
    /// Check that the batch is internally consistent.
    pub fn validate(&self) -> Result<(), MeshError> {
        self.layout.validate()?;

        if self.vertex_streams.len() != self.layout.buffer_count() {
            return Err(MeshError::StreamCountMismatch {
                expected: self.layout.buffer_count(),
                actual: self.vertex_streams.len(),
            });
        }

        for (stream, data) in self.vertex_streams.iter().enumerate() {
            let expected = self.vertex_count as usize * self.layout.buffer_stride(stream) as usize;
            if data.len() != expected {
                return Err(MeshError::StreamLengthMismatch {
                    stream,
                    expected,
                    actual: data.len(),
                });
            }
        }

        if self.vertex_count as u64 > self.index_format.max_vertex_count() {
            return Err(MeshError::IndexFormatTooSmall {
                format: self.index_format,
                vertex_count: self.vertex_count,
            });
        }

        if self.indices.len() % self.topology.vertices_per_primitive() as usize != 0 {
            return Err(MeshError::IncompletePrimitive {
                topology: self.topology,
                count: self.indices.len(),
            });
        }

        if let Some((position, &value)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index >= self.vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                position,
                value,
                vertex_count: self.vertex_count,
            });
        }

        Ok(())
    }

    /// Encode the index stream in the batch's index format.
    pub fn index_bytes(&self) -> Vec<u8> {
        match self.index_format {
            IndexFormat::Uint32 => bytemuck::cast_slice(&self.indices).to_vec(),
            IndexFormat::Uint16 => {
                let narrow: Vec<u16> = self.indices.iter().map(|&i| i as u16).collect();
                bytemuck::cast_slice(&narrow).to_vec()
            }
        }
    }
}

/// Destination for mesh uploads.
///
/// Implementations must validate the batch before committing anything, so a
/// rejected batch leaves the previous contents intact.
pub trait MeshBufferSink {
    /// Replace the sink's contents with `buffers`.
    fn write_buffers(&mut self, buffers: MeshBuffers) -> Result<(), MeshError>;
}

impl MeshBufferSink for CpuMesh {
    fn write_buffers(&mut self, buffers: MeshBuffers) -> Result<(), MeshError> {
        buffers.validate()?;

        let index_data = buffers.index_bytes();
        let index_count = buffers.indices.len() as u32;

        let mut staged = CpuMesh {
            layout: buffers.layout,
            vertex_buffers: buffers.vertex_streams,
            vertex_count: buffers.vertex_count,
            index_data: Some(index_data),
            index_format: Some(buffers.index_format),
            index_count,
            submeshes: vec![SubMesh::new(0, index_count, buffers.topology)],
            bounds: Aabb::default(),
            label: self.label.take(),
        };
        match buffers.bounds {
            MeshBounds::Explicit(aabb) => staged.bounds = aabb,
            MeshBounds::Recalculate => {
                if let Err(err) = staged.recalculate_bounds() {
                    self.label = staged.label;
                    return Err(err);
                }
            }
        }

        *self = staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    fn roots_batch(positions: &[[f32; 3]], indices: Vec<u32>) -> MeshBuffers {
        let bytes: Vec<u8> = bytemuck::cast_slice(positions).to_vec();
        MeshBuffers {
            layout: VertexLayout::strand_roots(),
            vertex_count: positions.len() as u32,
            vertex_streams: vec![bytes.clone(), bytes],
            indices,
            index_format: IndexFormat::Uint32,
            topology: PrimitiveTopology::PointList,
            bounds: MeshBounds::Recalculate,
        }
    }

    #[test]
    fn test_write_recalculates_bounds() {
        let mut mesh = CpuMesh::new(VertexLayout::strand_roots()).with_label("roots");
        let batch = roots_batch(&[[0.0, 1.0, 2.0], [-1.0, 3.0, 0.0]], vec![0, 1]);
        mesh.write_buffers(batch).unwrap();

        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.index_count(), 2);
        assert_eq!(mesh.indices(), vec![0, 1]);
        assert_eq!(mesh.topology(), Some(PrimitiveTopology::PointList));
        assert_eq!(mesh.label(), Some("roots"));
        assert_eq!(mesh.bounds().min, Vec3::new(-1.0, 1.0, 0.0));
        assert_eq!(mesh.bounds().max, Vec3::new(0.0, 3.0, 2.0));
    }

    #[test]
    fn test_rejected_batch_leaves_mesh_untouched() {
        let mut mesh = CpuMesh::new(VertexLayout::strand_roots()).with_label("roots");
        mesh.write_buffers(roots_batch(&[[1.0, 1.0, 1.0]], vec![0]))
            .unwrap();

        let err = mesh
            .write_buffers(roots_batch(&[[0.0; 3], [1.0; 3]], vec![0, 2]))
            .unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                position: 1,
                value: 2,
                vertex_count: 2
            }
        );
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.label(), Some("roots"));
    }

    #[test]
    fn test_stream_length_mismatch() {
        let mut batch = roots_batch(&[[0.0; 3], [1.0; 3]], vec![0, 1]);
        batch.vertex_streams[1].truncate(12);
        assert_eq!(
            batch.validate(),
            Err(MeshError::StreamLengthMismatch {
                stream: 1,
                expected: 24,
                actual: 12
            })
        );
    }

    #[test]
    fn test_stream_count_mismatch() {
        let mut batch = roots_batch(&[[0.0; 3]], vec![0]);
        batch.vertex_streams.pop();
        assert!(matches!(
            batch.validate(),
            Err(MeshError::StreamCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_incomplete_primitive() {
        let mut batch = roots_batch(&[[0.0; 3], [1.0; 3]], vec![0, 1, 1]);
        batch.topology = PrimitiveTopology::LineList;
        assert!(matches!(
            batch.validate(),
            Err(MeshError::IncompletePrimitive { count: 3, .. })
        ));
    }

    #[test]
    fn test_uint16_indices_narrowed() {
        let mut batch = roots_batch(&[[0.0; 3], [1.0; 3]], vec![1, 0]);
        batch.index_format = IndexFormat::Uint16;
        assert_eq!(batch.index_bytes().len(), 4);

        let mut mesh = CpuMesh::new(VertexLayout::strand_roots());
        mesh.write_buffers(batch).unwrap();
        assert_eq!(mesh.index_format(), Some(IndexFormat::Uint16));
        assert_eq!(mesh.indices(), vec![1, 0]);
    }

    #[test]
    fn test_explicit_bounds_kept() {
        let aabb = Aabb::from_center_size(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        let mut batch = roots_batch(&[[5.0; 3]], vec![0]);
        batch.bounds = MeshBounds::Explicit(aabb);

        let mut mesh = CpuMesh::new(VertexLayout::strand_roots());
        mesh.write_buffers(batch).unwrap();
        assert_eq!(mesh.bounds(), aabb);
    }
}
