//! Error types for mesh buffer uploads.

use super::data::{IndexFormat, PrimitiveTopology};

/// Contract violations reported when a [`MeshBuffers`](super::MeshBuffers)
/// batch is validated or written into a sink.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    /// The vertex layout is malformed.
    #[error("invalid vertex layout: {0}")]
    InvalidLayout(String),
    /// The number of vertex streams does not match the layout's buffer count.
    #[error("layout declares {expected} vertex streams but {actual} were supplied")]
    StreamCountMismatch {
        /// Buffers declared by the layout.
        expected: usize,
        /// Streams supplied in the batch.
        actual: usize,
    },
    /// A vertex stream's byte length does not match `vertex_count * stride`.
    #[error("vertex stream {stream} holds {actual} bytes, expected {expected}")]
    StreamLengthMismatch {
        /// Stream (buffer) index.
        stream: usize,
        /// Expected byte length.
        expected: usize,
        /// Supplied byte length.
        actual: usize,
    },
    /// The index count is not a whole number of primitives.
    #[error("{count} indices do not form whole {topology:?} primitives")]
    IncompletePrimitive {
        /// Topology declared for the submesh.
        topology: PrimitiveTopology,
        /// Number of indices supplied.
        count: usize,
    },
    /// An index references a vertex outside `[0, vertex_count)`.
    #[error("index {value} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Position of the offending index in the stream.
        position: usize,
        /// The index value.
        value: u32,
        /// Number of vertices in the batch.
        vertex_count: u32,
    },
    /// The chosen index format cannot address every vertex.
    #[error("{format:?} indices cannot address {vertex_count} vertices")]
    IndexFormatTooSmall {
        /// Requested index format.
        format: IndexFormat,
        /// Number of vertices in the batch.
        vertex_count: u32,
    },
    /// Bounds recalculation needs a float3 position attribute.
    #[error("cannot recalculate bounds: layout has no float3 position attribute")]
    MissingPositions,
}
