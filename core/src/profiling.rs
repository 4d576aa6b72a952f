//! Tracy instrumentation for mesh builds.
//!
//! Enabled with the `profiling` feature on `hairmesh-core` (or `hairmesh`,
//! which forwards it). Without the feature every macro expands to nothing.
//!
//! ```ignore
//! use hairmesh_core::profiling::{profile_function, profile_scope};
//!
//! fn build() {
//!     profile_function!();
//!     {
//!         profile_scope!("indices");
//!     }
//! }
//! ```
//!
//! Zones are only recorded while a [`Client`] is running; builds started
//! before the client simply go unrecorded.

#[cfg(feature = "profiling")]
pub use tracy_client::{self, Client, Span, span_location};

/// Open a named zone that closes at the end of the enclosing scope.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_scope {
    ($name:expr) => {
        let _profile_span = $crate::profiling::Client::running()
            .map(|client| client.span($crate::profiling::span_location!($name), 0));
    };
}

#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_scope {
    ($name:expr) => {};
}

/// Open a zone named after the enclosing function.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_function {
    () => {
        let _profile_span = $crate::profiling::Client::running()
            .map(|client| client.span($crate::profiling::span_location!(), 0));
    };
}

#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_function {
    () => {};
}

pub use profile_function;
pub use profile_scope;
