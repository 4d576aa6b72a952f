//! Vertex layout definitions for meshes.
//!
//! Vertex layouts describe the structure of vertex data across multiple buffers
//! (streams). Strand meshes keep each attribute in its own stream so every
//! attribute array can be written in one bulk copy:
//!
//! - **Roots**: position in stream 0, root direction in stream 1.
//! - **Lines / strips**: vertex ID in stream 0, packed UV in stream 1.
//!
//! Layouts are shared via `Arc` since there are only a few combinations
//! across many meshes.
//!
//! # Example
//!
//! ```
//! use hairmesh_core::mesh::{
//!     VertexAttribute, VertexAttributeFormat, VertexAttributeSemantic, VertexBufferLayout,
//!     VertexLayout,
//! };
//!
//! let layout = VertexLayout::new()
//!     .with_buffer(VertexBufferLayout::new(4))
//!     .with_buffer(VertexBufferLayout::new(4))
//!     .with_attribute(VertexAttribute::new(
//!         VertexAttributeSemantic::TexCoord0,
//!         VertexAttributeFormat::Float,
//!         0,
//!         0,
//!     ))
//!     .with_attribute(VertexAttribute::new(
//!         VertexAttributeSemantic::TexCoord1,
//!         VertexAttributeFormat::Unorm16x2,
//!         0,
//!         1,
//!     ));
//! assert!(layout.validate().is_ok());
//! ```

use std::sync::Arc;

use super::error::MeshError;

/// Semantic meaning of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeSemantic {
    /// Vertex position (float3).
    Position,
    /// Vertex normal (float3). Root meshes store the strand root direction here.
    Normal,
    /// Texture coordinates set 0. Strand meshes store the vertex ID here.
    TexCoord0,
    /// Texture coordinates set 1. Strand meshes store the packed UV here.
    TexCoord1,
}

/// Format of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeFormat {
    /// Single 32-bit float.
    Float,
    /// Three 32-bit floats.
    Float3,
    /// Two 16-bit unsigned integers (normalized to 0.0-1.0).
    Unorm16x2,
}

impl VertexAttributeFormat {
    /// Get the size in bytes of this format.
    pub fn size(&self) -> usize {
        match self {
            Self::Float | Self::Unorm16x2 => 4,
            Self::Float3 => 12,
        }
    }

    /// Number of components the shader sees.
    pub fn dimension(&self) -> u32 {
        match self {
            Self::Float => 1,
            Self::Unorm16x2 => 2,
            Self::Float3 => 3,
        }
    }
}

/// Describes a single per-vertex buffer binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexBufferLayout {
    /// Stride in bytes between consecutive vertices.
    pub stride: u32,
}

impl VertexBufferLayout {
    /// Create a buffer layout with the given stride.
    pub fn new(stride: u32) -> Self {
        Self { stride }
    }
}

/// A single vertex attribute description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    /// Semantic meaning of this attribute.
    pub semantic: VertexAttributeSemantic,
    /// Data format of this attribute.
    pub format: VertexAttributeFormat,
    /// Byte offset within the vertex buffer.
    pub offset: u32,
    /// Index of the vertex buffer this attribute reads from.
    pub buffer_index: u32,
}

impl VertexAttribute {
    /// Create a new vertex attribute.
    pub fn new(
        semantic: VertexAttributeSemantic,
        format: VertexAttributeFormat,
        offset: u32,
        buffer_index: u32,
    ) -> Self {
        Self {
            semantic,
            format,
            offset,
            buffer_index,
        }
    }

    /// Create a position attribute (float3) at buffer 0.
    pub fn position(offset: u32) -> Self {
        Self::new(
            VertexAttributeSemantic::Position,
            VertexAttributeFormat::Float3,
            offset,
            0,
        )
    }

    /// Create a normal attribute (float3) at buffer 0.
    pub fn normal(offset: u32) -> Self {
        Self::new(
            VertexAttributeSemantic::Normal,
            VertexAttributeFormat::Float3,
            offset,
            0,
        )
    }

    /// Set the buffer index for this attribute.
    pub fn at_buffer(mut self, buffer_index: u32) -> Self {
        self.buffer_index = buffer_index;
        self
    }
}

/// Describes the layout of vertex data across one or more buffers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    /// Descriptions of each vertex buffer binding.
    pub buffers: Vec<VertexBufferLayout>,
    /// The vertex attributes, each referencing a buffer by index.
    pub attributes: Vec<VertexAttribute>,
    /// Optional label for debugging.
    pub label: Option<String>,
}

impl VertexLayout {
    /// Create a new empty vertex layout.
    pub fn new() -> Self {
        Self {
            buffers: Vec::new(),
            attributes: Vec::new(),
            label: None,
        }
    }

    /// Add a vertex buffer binding.
    pub fn with_buffer(mut self, buffer: VertexBufferLayout) -> Self {
        self.buffers.push(buffer);
        self
    }

    /// Add a vertex attribute.
    pub fn with_attribute(mut self, attribute: VertexAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the number of vertex buffers.
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Get the stride for a specific buffer.
    pub fn buffer_stride(&self, buffer_index: usize) -> u32 {
        self.buffers
            .get(buffer_index)
            .map(|b| b.stride)
            .unwrap_or(0)
    }

    /// Check if this layout has a specific semantic.
    pub fn has_semantic(&self, semantic: VertexAttributeSemantic) -> bool {
        self.attributes.iter().any(|attr| attr.semantic == semantic)
    }

    /// Get an attribute by semantic.
    pub fn get_attribute(&self, semantic: VertexAttributeSemantic) -> Option<&VertexAttribute> {
        self.attributes
            .iter()
            .find(|attr| attr.semantic == semantic)
    }

    /// Validate the layout.
    ///
    /// Every attribute must reference a defined buffer and fit inside that
    /// buffer's stride.
    pub fn validate(&self) -> Result<(), MeshError> {
        for attr in &self.attributes {
            let Some(buffer) = self.buffers.get(attr.buffer_index as usize) else {
                return Err(MeshError::InvalidLayout(format!(
                    "attribute {:?} references buffer {} but only {} buffers defined",
                    attr.semantic,
                    attr.buffer_index,
                    self.buffers.len()
                )));
            };
            let end = attr.offset as usize + attr.format.size();
            if end > buffer.stride as usize {
                return Err(MeshError::InvalidLayout(format!(
                    "attribute {:?} ends at byte {end} past stride {} of buffer {}",
                    attr.semantic, buffer.stride, attr.buffer_index
                )));
            }
        }
        Ok(())
    }
}

impl Default for VertexLayout {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Strand Layouts
// ============================================================================

impl VertexLayout {
    /// Root point cloud layout.
    ///
    /// - Buffer 0 (12 bytes): root position
    /// - Buffer 1 (12 bytes): root direction, bound as the normal
    pub fn strand_roots() -> Arc<Self> {
        Arc::new(
            Self::new()
                .with_buffer(VertexBufferLayout::new(12))
                .with_buffer(VertexBufferLayout::new(12))
                .with_attribute(VertexAttribute::position(0).at_buffer(0))
                .with_attribute(VertexAttribute::normal(0).at_buffer(1))
                .with_label("strand_roots"),
        )
    }

    /// Line and strip layout.
    ///
    /// - Buffer 0 (4 bytes): vertex ID as float, bound as texcoord 0
    /// - Buffer 1 (4 bytes): packed unorm16x2 UV, bound as texcoord 1
    pub fn strand_id_uv() -> Arc<Self> {
        Arc::new(
            Self::new()
                .with_buffer(VertexBufferLayout::new(4))
                .with_buffer(VertexBufferLayout::new(4))
                .with_attribute(VertexAttribute::new(
                    VertexAttributeSemantic::TexCoord0,
                    VertexAttributeFormat::Float,
                    0,
                    0,
                ))
                .with_attribute(VertexAttribute::new(
                    VertexAttributeSemantic::TexCoord1,
                    VertexAttributeFormat::Unorm16x2,
                    0,
                    1,
                ))
                .with_label("strand_id_uv"),
        )
    }
}
