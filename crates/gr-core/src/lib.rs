//! gr-core: stable foundation for the christoffel workspace.
//!
//! Contains:
//! - error (shared error types)
//! - index (spacetime dimension + checked coordinate indices)
//! - timing (opt-in wall-clock timers)

pub mod error;
pub mod index;
pub mod timing;

// Re-exports: nice ergonomics for downstream crates
pub use error::{GrError, GrResult};
pub use index::*;
