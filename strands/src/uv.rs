//! Packed strand texture coordinates.
//!
//! Line and strip vertices carry their UV as one 32-bit attribute holding two
//! 16-bit unsigned-normalized channels, bound as `unorm16x2`:
//!
//! ```text
//!  31            16 15             0
//! +----------------+----------------+
//! |       V        |       U        |
//! +----------------+----------------+
//! ```
//!
//! U runs across the strand (0 on the left rail, 65535 on the right rail,
//! 32768 for lines), V runs from root (0) to tip (65535).

/// U coordinate of a strip's left rail.
pub const UV_U_LEFT: u16 = 0;

/// U coordinate of a strip's right rail.
pub const UV_U_RIGHT: u16 = u16::MAX;

/// U coordinate of line vertices: `unorm16(0.5)`.
pub const UV_U_CENTER: u16 = 32768;

/// Convert a float in `[0, 1]` to a 16-bit unsigned-normalized value.
///
/// Rounds to nearest; out-of-range input is clamped.
pub fn unorm16(value: f32) -> u16 {
    (value.clamp(0.0, 1.0) as f64 * u16::MAX as f64).round() as u16
}

/// Convert a 16-bit unsigned-normalized value back to `[0, 1]`.
pub fn unorm16_to_f32(value: u16) -> f32 {
    value as f32 / u16::MAX as f32
}

/// Pack two unorm16 channels as `(v << 16) | u`.
#[inline]
pub fn pack_uv(u: u16, v: u16) -> u32 {
    ((v as u32) << 16) | u as u32
}

/// Split a packed UV into `(u, v)`.
#[inline]
pub fn unpack_uv(packed: u32) -> (u16, u16) {
    (packed as u16, (packed >> 16) as u16)
}

/// V coordinate of particle `local_index` on a strand of `particle_count` particles.
///
/// `round(65535 * local_index / (particle_count - 1))`. A single-particle
/// strand has no length, so its lone particle sits at V = 0.
#[inline]
pub fn strand_v(local_index: usize, particle_count: usize) -> u16 {
    let segments = particle_count.saturating_sub(1);
    if segments == 0 {
        return 0;
    }
    (local_index as f64 * u16::MAX as f64 / segments as f64).round() as u16
}
