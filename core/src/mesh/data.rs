//! CPU-side mesh data structures.
//!
//! This module provides:
//! - [`PrimitiveTopology`] - How vertices are assembled into primitives
//! - [`IndexFormat`] - Index data format (u16 or u32)
//! - [`SubMesh`] - A range of the index buffer drawn with one topology
//! - [`CpuMesh`] - CPU-side mesh holding raw vertex and index data

use std::sync::Arc;

use crate::math::{Aabb, Vec3};

use super::error::MeshError;
use super::layout::{VertexAttributeFormat, VertexAttributeSemantic, VertexLayout};

/// Primitive topology describing how vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    /// Each vertex is a separate point.
    PointList,
    /// Every two vertices form a line.
    LineList,
    /// Every three vertices form a triangle.
    #[default]
    TriangleList,
}

impl PrimitiveTopology {
    /// Get the number of indices per primitive.
    pub fn vertices_per_primitive(&self) -> u32 {
        match self {
            Self::PointList => 1,
            Self::LineList => 2,
            Self::TriangleList => 3,
        }
    }
}

/// Index format for indexed drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// 16-bit unsigned integers (max 65536 vertices).
    Uint16,
    /// 32-bit unsigned integers (max ~4 billion vertices).
    #[default]
    Uint32,
}

impl IndexFormat {
    /// Get the size in bytes of each index.
    pub fn size(&self) -> usize {
        match self {
            Self::Uint16 => 2,
            Self::Uint32 => 4,
        }
    }

    /// Largest vertex count every index of this format can address.
    pub fn max_vertex_count(&self) -> u64 {
        match self {
            Self::Uint16 => u16::MAX as u64 + 1,
            Self::Uint32 => u32::MAX as u64 + 1,
        }
    }
}

/// A contiguous range of the index buffer drawn with a single topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubMesh {
    /// First index of the range.
    pub index_start: u32,
    /// Number of indices in the range.
    pub index_count: u32,
    /// How the indices are assembled into primitives.
    pub topology: PrimitiveTopology,
}

impl SubMesh {
    /// Create a submesh covering `index_count` indices from `index_start`.
    pub fn new(index_start: u32, index_count: u32, topology: PrimitiveTopology) -> Self {
        Self {
            index_start,
            index_count,
            topology,
        }
    }
}

/// A CPU-side mesh holding raw vertex and index data.
///
/// This is the GPU-agnostic representation of a mesh. Its contents are
/// replaced wholesale through [`MeshBufferSink`](super::MeshBufferSink);
/// there is no per-vertex mutation API.
///
/// # Multi-Buffer Support
///
/// Each buffer slot of the [`VertexLayout`] stores its raw byte data in its
/// own vertex stream.
#[derive(Clone)]
pub struct CpuMesh {
    pub(super) layout: Arc<VertexLayout>,
    pub(super) vertex_buffers: Vec<Vec<u8>>,
    pub(super) vertex_count: u32,
    pub(super) index_data: Option<Vec<u8>>,
    pub(super) index_format: Option<IndexFormat>,
    pub(super) index_count: u32,
    pub(super) submeshes: Vec<SubMesh>,
    pub(super) bounds: Aabb,
    pub(super) label: Option<String>,
}

impl CpuMesh {
    /// Create a new empty CpuMesh with the given layout.
    ///
    /// Vertex buffers are initialized as empty vectors matching
    /// the layout's buffer count.
    pub fn new(layout: Arc<VertexLayout>) -> Self {
        let buffer_count = layout.buffer_count();
        Self {
            layout,
            vertex_buffers: vec![Vec::new(); buffer_count],
            vertex_count: 0,
            index_data: None,
            index_format: None,
            index_count: 0,
            submeshes: Vec::new(),
            bounds: Aabb::default(),
            label: None,
        }
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Clone this mesh as an independent instance.
    ///
    /// The copy's label gets an `(Instance)` suffix.
    pub fn instantiate(&self) -> Self {
        let mut instance = self.clone();
        instance.label = Some(format!("{}(Instance)", self.label.as_deref().unwrap_or("")));
        instance
    }

    /// Fill `slot` with an instance of this mesh if it is empty.
    ///
    /// Returns `true` when a new instance was created.
    pub fn instantiate_if_none(&self, slot: &mut Option<CpuMesh>) -> bool {
        if slot.is_some() {
            return false;
        }
        *slot = Some(self.instantiate());
        true
    }

    /// Get the vertex layout.
    pub fn layout(&self) -> &Arc<VertexLayout> {
        &self.layout
    }

    /// Get the topology of the first submesh.
    pub fn topology(&self) -> Option<PrimitiveTopology> {
        self.submeshes.first().map(|s| s.topology)
    }

    /// Get the submesh descriptors.
    pub fn submeshes(&self) -> &[SubMesh] {
        &self.submeshes
    }

    /// Get raw vertex data for a specific buffer slot.
    pub fn vertex_buffer_data(&self, index: usize) -> Option<&[u8]> {
        self.vertex_buffers.get(index).map(|v| v.as_slice())
    }

    /// Decode a vertex stream into typed elements.
    ///
    /// Returns `None` if the slot does not exist or its length is not a
    /// multiple of `size_of::<T>()`.
    pub fn vertex_stream<T: bytemuck::Pod>(&self, index: usize) -> Option<Vec<T>> {
        let data = self.vertex_buffers.get(index)?;
        let size = std::mem::size_of::<T>();
        if size == 0 || data.len() % size != 0 {
            return None;
        }
        Some(
            data.chunks_exact(size)
                .map(bytemuck::pod_read_unaligned)
                .collect(),
        )
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Get the raw index data.
    pub fn index_data(&self) -> Option<&[u8]> {
        self.index_data.as_deref()
    }

    /// Decode the index buffer, widening 16-bit indices.
    pub fn indices(&self) -> Vec<u32> {
        let Some(data) = self.index_data.as_deref() else {
            return Vec::new();
        };
        match self.index_format {
            Some(IndexFormat::Uint16) => data
                .chunks_exact(2)
                .map(|c| u16::from_ne_bytes([c[0], c[1]]) as u32)
                .collect(),
            Some(IndexFormat::Uint32) => data
                .chunks_exact(4)
                .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Get the index format.
    pub fn index_format(&self) -> Option<IndexFormat> {
        self.index_format
    }

    /// Get the number of indices.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Check if this mesh uses indexed drawing.
    pub fn is_indexed(&self) -> bool {
        self.index_data.is_some()
    }

    /// Get the bounding box.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Override the bounding box.
    pub fn set_bounds(&mut self, bounds: Aabb) {
        self.bounds = bounds;
    }

    /// Recompute the bounding box from the float3 position attribute.
    ///
    /// A mesh without vertices gets the zero-size box at the origin.
    pub fn recalculate_bounds(&mut self) -> Result<(), MeshError> {
        let attr = self
            .layout
            .get_attribute(VertexAttributeSemantic::Position)
            .filter(|a| a.format == VertexAttributeFormat::Float3)
            .ok_or(MeshError::MissingPositions)?;
        let stride = self.layout.buffer_stride(attr.buffer_index as usize) as usize;
        let offset = attr.offset as usize;
        let data = self
            .vertex_buffers
            .get(attr.buffer_index as usize)
            .ok_or(MeshError::MissingPositions)?;

        let positions: Vec<Vec3> = (0..self.vertex_count as usize)
            .filter_map(|v| {
                let start = v * stride + offset;
                data.get(start..start + 12)
                    .map(|bytes| Vec3::from(bytemuck::pod_read_unaligned::<[f32; 3]>(bytes)))
            })
            .collect();
        self.bounds = Aabb::from_points(&positions);
        Ok(())
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Get the number of vertex buffers.
    pub fn buffer_count(&self) -> usize {
        self.vertex_buffers.len()
    }
}

impl std::fmt::Debug for CpuMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuMesh")
            .field("label", &self.label)
            .field("topology", &self.topology())
            .field("vertex_count", &self.vertex_count)
            .field("buffer_count", &self.vertex_buffers.len())
            .field("index_count", &self.index_count)
            .field("bounds", &self.bounds)
            .field("layout", &self.layout.label)
            .finish()
    }
}
