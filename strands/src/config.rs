//! Build configuration.

use hairmesh_core::mesh::IndexFormat;

/// How builders choose the index format of their output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexPolicy {
    /// Always emit 32-bit indices.
    #[default]
    Uint32,
    /// Emit 16-bit indices when every vertex is addressable, 32-bit otherwise.
    Compact,
}

impl IndexPolicy {
    /// Index format used for a mesh with `vertex_count` vertices.
    pub fn format_for(self, vertex_count: u32) -> IndexFormat {
        match self {
            Self::Uint32 => IndexFormat::Uint32,
            Self::Compact if vertex_count as u64 <= IndexFormat::Uint16.max_vertex_count() => {
                IndexFormat::Uint16
            }
            Self::Compact => IndexFormat::Uint32,
        }
    }
}

/// Settings shared by every build call of a [`StrandMeshBuilder`](crate::StrandMeshBuilder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Index format selection.
    pub index_policy: IndexPolicy,
    /// Strand count from which per-strand fills run on the rayon pool.
    ///
    /// Only consulted with the `parallel` feature.
    pub parallel_min_strands: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            index_policy: IndexPolicy::Uint32,
            parallel_min_strands: 1024,
        }
    }
}

impl BuildConfig {
    /// Set the index policy.
    pub fn with_index_policy(mut self, index_policy: IndexPolicy) -> Self {
        self.index_policy = index_policy;
        self
    }

    /// Set the parallel fill threshold.
    pub fn with_parallel_min_strands(mut self, strands: usize) -> Self {
        self.parallel_min_strands = strands;
        self
    }
}
