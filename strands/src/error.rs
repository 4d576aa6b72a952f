//! Strand mesh error types.

use hairmesh_core::mesh::MeshError;

use crate::builder::MeshKind;

/// Errors that can occur while building strand meshes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrandMeshError {
    /// Line and strip meshes need at least one particle per strand.
    #[error("{kind} mesh requires at least one particle per strand")]
    ZeroParticleCount {
        /// Mesh being built.
        kind: MeshKind,
    },
    /// A per-strand root array does not hold one entry per strand.
    #[error("{name} holds {actual} entries but there are {expected} strands")]
    RootArrayLength {
        /// Name of the offending array.
        name: &'static str,
        /// Strand count.
        expected: usize,
        /// Entries supplied.
        actual: usize,
    },
    /// A flat particle array does not hold `strand_count * particle_count` entries.
    #[error("particle array holds {actual} entries, expected {expected}")]
    ParticleArrayLength {
        /// `strand_count * particle_count`.
        expected: usize,
        /// Entries supplied.
        actual: usize,
    },
    /// A strand's particle count differs from the group's.
    #[error("strand {strand} has {actual} particles, expected {expected}")]
    NonUniformStrand {
        /// Strand index.
        strand: usize,
        /// Particle count of the first strand.
        expected: usize,
        /// Particle count of this strand.
        actual: usize,
    },
    /// A strand index past the end of the group.
    #[error("strand {strand} is out of range for {strand_count} strands")]
    StrandIndexOutOfRange {
        /// Requested strand.
        strand: usize,
        /// Strands in the group.
        strand_count: usize,
    },
    /// Vertex or index counts do not fit the 32-bit GPU range.
    #[error("{strand_count} strands x {particle_count} particles overflow the {kind} mesh counts")]
    CountOverflow {
        /// Mesh being built.
        kind: MeshKind,
        /// Requested strand count.
        strand_count: usize,
        /// Requested particle count.
        particle_count: usize,
    },
    /// The sink rejected the finished batch.
    #[error(transparent)]
    Sink(#[from] MeshError),
}

/// Result alias for strand mesh operations.
pub type Result<T> = std::result::Result<T, StrandMeshError>;
