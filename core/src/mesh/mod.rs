//! CPU-side mesh types and the batch upload interface.
//!
//! This module provides GPU-agnostic mesh data structures:
//!
//! - [`VertexLayout`] - Describes vertex attributes across multiple buffers
//! - [`CpuMesh`] - CPU-side mesh data (vertex bytes, index bytes, layout, bounds)
//! - [`MeshBuffers`] - One complete upload of vertex and index streams
//! - [`MeshBufferSink`] - Anything that accepts a [`MeshBuffers`] batch

mod data;
mod error;
mod layout;
mod sink;

pub use data::{CpuMesh, IndexFormat, PrimitiveTopology, SubMesh};
pub use error::MeshError;
pub use layout::{
    VertexAttribute, VertexAttributeFormat, VertexAttributeSemantic, VertexBufferLayout,
    VertexLayout,
};
pub use sink::{MeshBounds, MeshBufferSink, MeshBuffers};
