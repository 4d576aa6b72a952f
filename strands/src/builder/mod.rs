//! Strand mesh builders.
//!
//! Each build call validates its inputs, fills exactly-sized scratch arrays
//! strand by strand, and hands the result to a [`MeshBufferSink`] as one
//! [`MeshBuffers`] batch. Output vertices are always strand-major: all
//! vertices of strand 0, then strand 1, ... whatever the source
//! [`MemoryLayout`](crate::MemoryLayout).
//!
//! Per-strand counters are computed from the strand index
//! (`strand * particle_count + local`), so every strand owns a disjoint
//! slice of each output array. With the `parallel` feature those slices are
//! filled on the rayon pool once the strand count reaches
//! [`BuildConfig::parallel_min_strands`].

mod lines;
mod roots;
mod strips;

use std::fmt;

use hairmesh_core::math::{Aabb, Vec3};
use hairmesh_core::mesh::{MeshBufferSink, MeshBuffers, PrimitiveTopology};

use crate::config::BuildConfig;
use crate::error::{Result, StrandMeshError};
use crate::layout::MemoryLayout;

/// The three mesh topologies built for a strand group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// One point per strand root.
    Roots,
    /// One line list per strand.
    Lines,
    /// One triangulated ribbon per strand.
    Strips,
}

impl MeshKind {
    /// Primitive topology of this mesh kind.
    pub fn topology(&self) -> PrimitiveTopology {
        match self {
            Self::Roots => PrimitiveTopology::PointList,
            Self::Lines => PrimitiveTopology::LineList,
            Self::Strips => PrimitiveTopology::TriangleList,
        }
    }

    /// Default label given to freshly created meshes.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Roots => "Roots",
            Self::Lines => "X-Lines",
            Self::Strips => "X-Strips",
        }
    }
}

impl fmt::Display for MeshKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Roots => write!(f, "roots"),
            Self::Lines => write!(f, "lines"),
            Self::Strips => write!(f, "strips"),
        }
    }
}

/// Builds root, line and strip meshes with a shared [`BuildConfig`].
#[derive(Debug, Clone, Default)]
pub struct StrandMeshBuilder {
    config: BuildConfig,
}

impl StrandMeshBuilder {
    /// Create a builder with the given configuration.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Fill `out` in `per_strand`-sized chunks, one chunk per strand.
    ///
    /// `fill` receives the strand index and that strand's chunk.
    fn fill_strands<T, F>(&self, out: &mut [T], per_strand: usize, fill: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync,
    {
        if per_strand == 0 {
            return;
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            if out.len() / per_strand >= self.config.parallel_min_strands {
                out.par_chunks_exact_mut(per_strand)
                    .enumerate()
                    .for_each(|(strand, chunk)| fill(strand, chunk));
                return;
            }
        }

        out.chunks_exact_mut(per_strand)
            .enumerate()
            .for_each(|(strand, chunk)| fill(strand, chunk));
    }

    /// Hand a finished batch to the sink and log the outcome.
    fn commit<S>(&self, kind: MeshKind, sink: &mut S, buffers: MeshBuffers) -> Result<()>
    where
        S: MeshBufferSink + ?Sized,
    {
        let vertex_count = buffers.vertex_count;
        let index_count = buffers.indices.len();
        let index_format = buffers.index_format;

        sink.write_buffers(buffers).map_err(|err| {
            log::warn!("Sink rejected {kind} mesh: {err}");
            StrandMeshError::from(err)
        })?;

        log::debug!(
            "Built {kind} mesh: {vertex_count} vertices, {index_count} {index_format:?} indices"
        );
        Ok(())
    }
}

/// Vertex and index counts of a line or strip build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StrandCounts {
    vertex_count: u32,
    index_count: u32,
}

/// Validate the particle count and compute overflow-checked output sizes.
fn strand_counts(
    kind: MeshKind,
    strand_count: usize,
    particle_count: usize,
    vertices_per_particle: u32,
    indices_per_segment: u32,
) -> Result<StrandCounts> {
    if particle_count == 0 {
        return Err(StrandMeshError::ZeroParticleCount { kind });
    }
    let overflow = || StrandMeshError::CountOverflow {
        kind,
        strand_count,
        particle_count,
    };

    let strands = u32::try_from(strand_count).map_err(|_| overflow())?;
    let particles = u32::try_from(particle_count).map_err(|_| overflow())?;

    let vertex_count = strands
        .checked_mul(particles)
        .and_then(|n| n.checked_mul(vertices_per_particle))
        .ok_or_else(overflow)?;
    let index_count = strands
        .checked_mul(particles - 1)
        .and_then(|n| n.checked_mul(indices_per_segment))
        .ok_or_else(overflow)?;

    Ok(StrandCounts {
        vertex_count,
        index_count,
    })
}

/// Check that both particle meshes of a group can be built.
pub(crate) fn check_particle_meshes(strand_count: usize, particle_count: usize) -> Result<()> {
    strand_counts(MeshKind::Lines, strand_count, particle_count, 1, 2)?;
    strand_counts(MeshKind::Strips, strand_count, particle_count, 2, 6)?;
    Ok(())
}

// ============================================================================
// Default-config convenience functions
// ============================================================================

/// Build a root point cloud with the default configuration.
///
/// See [`StrandMeshBuilder::build_roots`].
pub fn build_mesh_roots<S>(
    sink: &mut S,
    strand_count: usize,
    root_position: &[Vec3],
    root_direction: &[Vec3],
) -> Result<()>
where
    S: MeshBufferSink + ?Sized,
{
    StrandMeshBuilder::default().build_roots(sink, strand_count, root_position, root_direction)
}

/// Build a line-list mesh with the default configuration.
///
/// See [`StrandMeshBuilder::build_lines`].
pub fn build_mesh_lines<S>(
    sink: &mut S,
    memory_layout: MemoryLayout,
    strand_count: usize,
    particle_count: usize,
    bounds: &Aabb,
) -> Result<()>
where
    S: MeshBufferSink + ?Sized,
{
    StrandMeshBuilder::default().build_lines(
        sink,
        memory_layout,
        strand_count,
        particle_count,
        bounds,
    )
}

/// Build a ribbon strip mesh with the default configuration.
///
/// See [`StrandMeshBuilder::build_strips`].
pub fn build_mesh_strips<S>(
    sink: &mut S,
    memory_layout: MemoryLayout,
    strand_count: usize,
    particle_count: usize,
    bounds: &Aabb,
) -> Result<()>
where
    S: MeshBufferSink + ?Sized,
{
    StrandMeshBuilder::default().build_strips(
        sink,
        memory_layout,
        strand_count,
        particle_count,
        bounds,
    )
}
