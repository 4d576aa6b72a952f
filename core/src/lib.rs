//! # hairmesh core
//!
//! GPU-agnostic mesh buffers, vertex layouts and bounding volumes shared by
//! the strand mesh builders.

pub mod math;
pub mod mesh;
pub mod profiling;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
