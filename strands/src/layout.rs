//! Strand memory layouts.
//!
//! Particle data for a group of strands lives in one flat array of
//! `strand_count * particle_count` entries. A [`MemoryLayout`] decides where
//! particle `p` of strand `s` sits in that array, and [`StrandRange`] walks
//! one strand's slots in strand-local order (particle 0 first).
//!
//! ```
//! use hairmesh::MemoryLayout;
//!
//! // 3 strands of 4 particles, stored particle-major.
//! let range = MemoryLayout::Interleaved.strand_range(1, 3, 4);
//! assert_eq!(range.indices().collect::<Vec<_>>(), vec![1, 4, 7, 10]);
//! ```

use crate::error::{Result, StrandMeshError};

/// Storage order of particle data for multiple strands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MemoryLayout {
    /// All particles of strand 0, then all particles of strand 1, ...
    #[default]
    Sequential,
    /// Particle 0 of every strand, then particle 1 of every strand, ...
    Interleaved,
}

/// Flat-array walk over one strand's particles: `begin`, `begin + stride`, ...
/// up to but excluding `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrandRange {
    /// Flat index of particle 0.
    pub begin: usize,
    /// Distance between consecutive particles.
    pub stride: usize,
    /// One stride past the last particle.
    pub end: usize,
}

impl StrandRange {
    /// Flat indices of the strand's particles in strand-local order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + use<> {
        (self.begin..self.end).step_by(self.stride.max(1))
    }

    /// Number of particles visited.
    pub fn len(&self) -> usize {
        if self.stride == 0 {
            return 0;
        }
        (self.end - self.begin).div_ceil(self.stride)
    }

    /// Check if the walk visits no particles.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MemoryLayout {
    /// Walk parameters for strand `strand_index`.
    ///
    /// Requires `strand_index < strand_count`. `particle_count` must be at
    /// least 1; a zero count yields an empty walk.
    pub fn strand_range(
        self,
        strand_index: usize,
        strand_count: usize,
        particle_count: usize,
    ) -> StrandRange {
        debug_assert!(strand_index < strand_count);
        match self {
            Self::Sequential => {
                let begin = strand_index * particle_count;
                StrandRange {
                    begin,
                    stride: 1,
                    end: begin + particle_count,
                }
            }
            Self::Interleaved => StrandRange {
                begin: strand_index,
                stride: strand_count,
                end: strand_index + strand_count * particle_count,
            },
        }
    }

    /// Flat index of particle `particle_index` of strand `strand_index`.
    pub fn particle_index(
        self,
        strand_index: usize,
        particle_index: usize,
        strand_count: usize,
        particle_count: usize,
    ) -> usize {
        match self {
            Self::Sequential => strand_index * particle_count + particle_index,
            Self::Interleaved => particle_index * strand_count + strand_index,
        }
    }

    /// Copy one strand's particles out of a flat array, in strand-local order.
    pub fn gather<T: Copy>(
        self,
        data: &[T],
        strand_index: usize,
        strand_count: usize,
        particle_count: usize,
    ) -> Result<Vec<T>> {
        if strand_index >= strand_count {
            return Err(StrandMeshError::StrandIndexOutOfRange {
                strand: strand_index,
                strand_count,
            });
        }
        check_len(data.len(), strand_count, particle_count)?;
        Ok(self
            .strand_range(strand_index, strand_count, particle_count)
            .indices()
            .map(|i| data[i])
            .collect())
    }

    /// Reorder a flat particle array from this layout into `target`.
    pub fn convert<T: Copy>(
        self,
        target: MemoryLayout,
        data: &[T],
        strand_count: usize,
        particle_count: usize,
    ) -> Result<Vec<T>> {
        check_len(data.len(), strand_count, particle_count)?;
        if self == target {
            return Ok(data.to_vec());
        }

        let mut out = Vec::with_capacity(data.len());
        match target {
            Self::Sequential => {
                for strand in 0..strand_count {
                    out.extend(
                        self.strand_range(strand, strand_count, particle_count)
                            .indices()
                            .map(|i| data[i]),
                    );
                }
            }
            Self::Interleaved => {
                for particle in 0..particle_count {
                    out.extend((0..strand_count).map(|strand| {
                        data[self.particle_index(strand, particle, strand_count, particle_count)]
                    }));
                }
            }
        }
        log::trace!(
            "Converted {} particles from {:?} to {:?}",
            out.len(),
            self,
            target
        );
        Ok(out)
    }
}

fn check_len(actual: usize, strand_count: usize, particle_count: usize) -> Result<()> {
    let expected = strand_count.saturating_mul(particle_count);
    if actual != expected {
        return Err(StrandMeshError::ParticleArrayLength { expected, actual });
    }
    Ok(())
}
