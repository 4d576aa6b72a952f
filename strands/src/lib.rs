//! # hairmesh
//!
//! Point, line and ribbon mesh buffers for groups of hair strands.
//!
//! A strand group is `strand_count` strands of `particle_count` particles
//! each, stored in one flat array in either [`MemoryLayout`]. From it three
//! meshes are built:
//!
//! - **Roots**: a point list with one vertex per strand (position, direction)
//! - **Lines**: a line list with one vertex per particle
//! - **Strips**: a triangle list with two rail vertices per particle
//!
//! Line and strip vertices carry no positions. They hold a float vertex ID
//! and a packed unorm16x2 UV, and a vertex shader fetches the simulated
//! particle positions by ID.
//!
//! ```
//! use hairmesh::math::Aabb;
//! use hairmesh::mesh::{CpuMesh, VertexLayout};
//! use hairmesh::{MemoryLayout, build_mesh_strips};
//!
//! let mut mesh = CpuMesh::new(VertexLayout::strand_id_uv());
//! build_mesh_strips(&mut mesh, MemoryLayout::Interleaved, 16, 8, &Aabb::default())?;
//! assert_eq!(mesh.vertex_count(), 16 * 8 * 2);
//! assert_eq!(mesh.index_count(), 16 * 7 * 6);
//! # Ok::<(), hairmesh::StrandMeshError>(())
//! ```
//!
//! ## Features
//!
//! - `parallel`: fill per-strand slices on the rayon pool
//! - `profiling`: Tracy zones around every build

pub mod builder;
pub mod config;
pub mod error;
pub mod group;
pub mod layout;
pub mod uv;

pub use hairmesh_core::{math, mesh};

pub use builder::{
    MeshKind, StrandMeshBuilder, build_mesh_lines, build_mesh_roots, build_mesh_strips,
};
pub use config::{BuildConfig, IndexPolicy};
pub use error::{Result, StrandMeshError};
pub use group::{
    StrandGroup, StrandGroupMeshes, create_mesh_lines, create_mesh_lines_if_none,
    create_mesh_roots, create_mesh_roots_if_none, create_mesh_strips, create_mesh_strips_if_none,
};
pub use layout::{MemoryLayout, StrandRange};
