//! gr-metric: coordinate bases, metric tensors and the metric registry.
//!
//! Contains:
//! - basis (ordered, validated coordinate tuples)
//! - constants (G, M, c, r_s as free symbols)
//! - metric (symmetric 4×4 symbolic metric)
//! - registry (Newtonian, weak-field and Schwarzschild spacetimes)

pub mod basis;
pub mod constants;
pub mod error;
pub mod metric;
pub mod registry;

// Re-exports
pub use basis::CoordinateBasis;
pub use constants::PhysicalConstants;
pub use error::{MetricError, MetricResult};
pub use metric::Metric;
pub use registry::{
    MetricKind, Spacetime, newton_metric, schwarzschild_metric, weak_field_limit_metric,
};
