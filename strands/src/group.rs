//! Owned strand groups and fresh-mesh helpers.
//!
//! The builders in [`crate::builder`] write into any [`MeshBufferSink`]. This
//! module covers the common case of building into new [`CpuMesh`] values:
//! labelled single-mesh constructors, lazy `*_if_none` variants for cached
//! slots, and [`StrandGroup`], which owns the per-strand input arrays and
//! builds all three meshes at once.

use hairmesh_core::math::{Aabb, Vec3};
use hairmesh_core::mesh::{CpuMesh, MeshBufferSink, VertexLayout};
use hairmesh_core::profiling::profile_function;

use crate::builder::{MeshKind, StrandMeshBuilder, check_particle_meshes};
use crate::error::{Result, StrandMeshError};
use crate::layout::MemoryLayout;

/// Direction given to roots of strands too short to define one.
const FALLBACK_ROOT_DIRECTION: Vec3 = Vec3::new(0.0, 1.0, 0.0);

impl StrandMeshBuilder {
    /// Build the root point cloud into a new mesh labelled `"Roots"`.
    pub fn create_roots(
        &self,
        strand_count: usize,
        root_position: &[Vec3],
        root_direction: &[Vec3],
    ) -> Result<CpuMesh> {
        let mut mesh = labelled(MeshKind::Roots);
        self.build_roots(&mut mesh, strand_count, root_position, root_direction)?;
        Ok(mesh)
    }

    /// Build the line mesh into a new mesh labelled `"X-Lines"`.
    pub fn create_lines(
        &self,
        memory_layout: MemoryLayout,
        strand_count: usize,
        particle_count: usize,
        bounds: &Aabb,
    ) -> Result<CpuMesh> {
        let mut mesh = labelled(MeshKind::Lines);
        self.build_lines(&mut mesh, memory_layout, strand_count, particle_count, bounds)?;
        Ok(mesh)
    }

    /// Build the strip mesh into a new mesh labelled `"X-Strips"`.
    pub fn create_strips(
        &self,
        memory_layout: MemoryLayout,
        strand_count: usize,
        particle_count: usize,
        bounds: &Aabb,
    ) -> Result<CpuMesh> {
        let mut mesh = labelled(MeshKind::Strips);
        self.build_strips(&mut mesh, memory_layout, strand_count, particle_count, bounds)?;
        Ok(mesh)
    }

    /// Fill `slot` with a new root mesh unless it already holds one.
    ///
    /// Returns `true` if a mesh was built.
    pub fn create_roots_if_none(
        &self,
        slot: &mut Option<CpuMesh>,
        strand_count: usize,
        root_position: &[Vec3],
        root_direction: &[Vec3],
    ) -> Result<bool> {
        fill_slot(slot, || {
            self.create_roots(strand_count, root_position, root_direction)
        })
    }

    /// Fill `slot` with a new line mesh unless it already holds one.
    pub fn create_lines_if_none(
        &self,
        slot: &mut Option<CpuMesh>,
        memory_layout: MemoryLayout,
        strand_count: usize,
        particle_count: usize,
        bounds: &Aabb,
    ) -> Result<bool> {
        fill_slot(slot, || {
            self.create_lines(memory_layout, strand_count, particle_count, bounds)
        })
    }

    /// Fill `slot` with a new strip mesh unless it already holds one.
    pub fn create_strips_if_none(
        &self,
        slot: &mut Option<CpuMesh>,
        memory_layout: MemoryLayout,
        strand_count: usize,
        particle_count: usize,
        bounds: &Aabb,
    ) -> Result<bool> {
        fill_slot(slot, || {
            self.create_strips(memory_layout, strand_count, particle_count, bounds)
        })
    }
}

fn labelled(kind: MeshKind) -> CpuMesh {
    let layout = match kind {
        MeshKind::Roots => VertexLayout::strand_roots(),
        MeshKind::Lines | MeshKind::Strips => VertexLayout::strand_id_uv(),
    };
    CpuMesh::new(layout).with_label(kind.label())
}

fn fill_slot(
    slot: &mut Option<CpuMesh>,
    create: impl FnOnce() -> Result<CpuMesh>,
) -> Result<bool> {
    if slot.is_some() {
        return Ok(false);
    }
    *slot = Some(create()?);
    Ok(true)
}

// ============================================================================
// Default-config convenience functions
// ============================================================================

/// Build a root point cloud into a new mesh with the default configuration.
pub fn create_mesh_roots(
    strand_count: usize,
    root_position: &[Vec3],
    root_direction: &[Vec3],
) -> Result<CpuMesh> {
    StrandMeshBuilder::default().create_roots(strand_count, root_position, root_direction)
}

/// Build a line mesh into a new mesh with the default configuration.
pub fn create_mesh_lines(
    memory_layout: MemoryLayout,
    strand_count: usize,
    particle_count: usize,
    bounds: &Aabb,
) -> Result<CpuMesh> {
    StrandMeshBuilder::default().create_lines(memory_layout, strand_count, particle_count, bounds)
}

/// Build a strip mesh into a new mesh with the default configuration.
pub fn create_mesh_strips(
    memory_layout: MemoryLayout,
    strand_count: usize,
    particle_count: usize,
    bounds: &Aabb,
) -> Result<CpuMesh> {
    StrandMeshBuilder::default().create_strips(memory_layout, strand_count, particle_count, bounds)
}

/// [`StrandMeshBuilder::create_roots_if_none`] with the default configuration.
pub fn create_mesh_roots_if_none(
    slot: &mut Option<CpuMesh>,
    strand_count: usize,
    root_position: &[Vec3],
    root_direction: &[Vec3],
) -> Result<bool> {
    StrandMeshBuilder::default().create_roots_if_none(
        slot,
        strand_count,
        root_position,
        root_direction,
    )
}

/// [`StrandMeshBuilder::create_lines_if_none`] with the default configuration.
pub fn create_mesh_lines_if_none(
    slot: &mut Option<CpuMesh>,
    memory_layout: MemoryLayout,
    strand_count: usize,
    particle_count: usize,
    bounds: &Aabb,
) -> Result<bool> {
    StrandMeshBuilder::default().create_lines_if_none(
        slot,
        memory_layout,
        strand_count,
        particle_count,
        bounds,
    )
}

/// [`StrandMeshBuilder::create_strips_if_none`] with the default configuration.
pub fn create_mesh_strips_if_none(
    slot: &mut Option<CpuMesh>,
    memory_layout: MemoryLayout,
    strand_count: usize,
    particle_count: usize,
    bounds: &Aabb,
) -> Result<bool> {
    StrandMeshBuilder::default().create_strips_if_none(
        slot,
        memory_layout,
        strand_count,
        particle_count,
        bounds,
    )
}

// ============================================================================
// Strand groups
// ============================================================================

/// A group of strands sharing one particle count and memory layout.
///
/// `particle_position` holds `strand_count * particle_count` entries ordered
/// by `memory_layout`. Root arrays hold one entry per strand.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StrandGroup {
    /// Number of strands.
    pub strand_count: usize,
    /// Particles per strand, root included.
    pub particle_count: usize,
    /// Order of `particle_position`.
    pub memory_layout: MemoryLayout,
    /// First particle of each strand.
    pub root_position: Vec<Vec3>,
    /// Unit direction of each strand at its root.
    pub root_direction: Vec<Vec3>,
    /// Every particle of every strand.
    pub particle_position: Vec<Vec3>,
}

/// The three meshes of a strand group.
#[derive(Debug, Clone)]
pub struct StrandGroupMeshes {
    /// Point list, one vertex per strand.
    pub roots: CpuMesh,
    /// Line list, one vertex per particle.
    pub lines: CpuMesh,
    /// Triangle list, two vertices per particle.
    pub strips: CpuMesh,
}

impl StrandGroup {
    /// Assemble a group from per-strand particle lists.
    ///
    /// Every strand must have as many particles as the first. Roots are the
    /// first particle of each strand; root directions point along the first
    /// segment, or +Y when the strand is too short or degenerate.
    pub fn from_strands(memory_layout: MemoryLayout, strands: &[Vec<Vec3>]) -> Result<Self> {
        let strand_count = strands.len();
        let particle_count = strands.first().map_or(0, Vec::len);

        let mut sequential = Vec::with_capacity(strand_count * particle_count);
        let mut root_position = Vec::with_capacity(strand_count);
        let mut root_direction = Vec::with_capacity(strand_count);

        for (strand, particles) in strands.iter().enumerate() {
            if particles.len() != particle_count {
                return Err(StrandMeshError::NonUniformStrand {
                    strand,
                    expected: particle_count,
                    actual: particles.len(),
                });
            }
            let root = particles.first().copied().unwrap_or_else(Vec3::zeros);
            let direction = particles
                .get(1)
                .and_then(|next| (next - root).try_normalize(f32::EPSILON))
                .unwrap_or(FALLBACK_ROOT_DIRECTION);

            root_position.push(root);
            root_direction.push(direction);
            sequential.extend_from_slice(particles);
        }

        let particle_position = MemoryLayout::Sequential.convert(
            memory_layout,
            &sequential,
            strand_count,
            particle_count,
        )?;

        Ok(Self {
            strand_count,
            particle_count,
            memory_layout,
            root_position,
            root_direction,
            particle_position,
        })
    }

    /// Check that every array matches the strand and particle counts.
    ///
    /// A group with strands needs at least one particle per strand. A group
    /// with no strands is empty and always valid.
    pub fn validate(&self) -> Result<()> {
        if self.strand_count > 0 && self.particle_count == 0 {
            return Err(StrandMeshError::ZeroParticleCount {
                kind: MeshKind::Lines,
            });
        }
        if self.root_position.len() != self.strand_count {
            return Err(StrandMeshError::RootArrayLength {
                name: "root_position",
                expected: self.strand_count,
                actual: self.root_position.len(),
            });
        }
        if self.root_direction.len() != self.strand_count {
            return Err(StrandMeshError::RootArrayLength {
                name: "root_direction",
                expected: self.strand_count,
                actual: self.root_direction.len(),
            });
        }
        let expected = self.strand_count.saturating_mul(self.particle_count);
        if self.particle_position.len() != expected {
            return Err(StrandMeshError::ParticleArrayLength {
                expected,
                actual: self.particle_position.len(),
            });
        }
        Ok(())
    }

    /// Positions of strand `strand_index`, root first.
    ///
    /// Yields nothing for an out-of-range strand.
    pub fn strand_particles(&self, strand_index: usize) -> impl Iterator<Item = Vec3> + '_ {
        let range = (strand_index < self.strand_count).then(|| {
            self.memory_layout
                .strand_range(strand_index, self.strand_count, self.particle_count)
        });
        range
            .into_iter()
            .flat_map(|range| range.indices())
            .filter_map(|i| self.particle_position.get(i).copied())
    }

    /// Particle count handed to the line and strip builders.
    ///
    /// An empty group has no particles to count, so it builds as zero
    /// strands of one particle.
    fn mesh_particle_count(&self) -> usize {
        if self.strand_count == 0 {
            self.particle_count.max(1)
        } else {
            self.particle_count
        }
    }

    /// Bounding box of every particle.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.particle_position)
    }

    /// Copy of this group with particles reordered into `target`.
    pub fn to_layout(&self, target: MemoryLayout) -> Result<Self> {
        let particle_position = self.memory_layout.convert(
            target,
            &self.particle_position,
            self.strand_count,
            self.particle_count,
        )?;
        Ok(Self {
            memory_layout: target,
            particle_position,
            ..self.clone()
        })
    }

    /// Build the root, line and strip meshes of this group.
    ///
    /// Lines and strips use [`bounds`](Self::bounds). An empty group builds
    /// three empty meshes.
    pub fn build_meshes(&self, builder: &StrandMeshBuilder) -> Result<StrandGroupMeshes> {
        profile_function!();

        self.validate()?;
        let bounds = self.bounds();
        let particle_count = self.mesh_particle_count();

        let meshes = StrandGroupMeshes {
            roots: builder.create_roots(
                self.strand_count,
                &self.root_position,
                &self.root_direction,
            )?,
            lines: builder.create_lines(
                self.memory_layout,
                self.strand_count,
                particle_count,
                &bounds,
            )?,
            strips: builder.create_strips(
                self.memory_layout,
                self.strand_count,
                particle_count,
                &bounds,
            )?,
        };
        log::debug!(
            "Built strand group meshes: {} strands x {} particles ({:?})",
            self.strand_count,
            self.particle_count,
            self.memory_layout
        );
        Ok(meshes)
    }

    /// Rebuild the three meshes into existing sinks.
    ///
    /// Counts are checked for all three meshes before any sink is written,
    /// so a rejected group leaves every sink as it was.
    pub fn write_meshes<R, L, S>(
        &self,
        builder: &StrandMeshBuilder,
        roots: &mut R,
        lines: &mut L,
        strips: &mut S,
    ) -> Result<()>
    where
        R: MeshBufferSink + ?Sized,
        L: MeshBufferSink + ?Sized,
        S: MeshBufferSink + ?Sized,
    {
        self.validate()?;
        let particle_count = self.mesh_particle_count();
        check_particle_meshes(self.strand_count, particle_count)?;
        let bounds = self.bounds();

        builder.build_roots(roots, self.strand_count, &self.root_position, &self.root_direction)?;
        builder.build_lines(
            lines,
            self.memory_layout,
            self.strand_count,
            particle_count,
            &bounds,
        )?;
        builder.build_strips(
            strips,
            self.memory_layout,
            self.strand_count,
            particle_count,
            &bounds,
        )
    }
}
