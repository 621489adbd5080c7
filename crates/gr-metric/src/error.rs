//! Error types for metric construction and lookup.

use gr_core::GrError;
use gr_symbolic::SymbolicError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricError {
    #[error("Metric must be {expected}x{expected}, got {rows} rows with {cols} columns")]
    Shape {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Coordinate basis must have {expected} coordinates, got {len}")]
    BasisLength { expected: usize, len: usize },

    #[error("Duplicate coordinate: {name}")]
    DuplicateCoordinate { name: String },

    #[error("Metric is not symmetric: g[{i}][{j}] != g[{j}][{i}]")]
    Asymmetric { i: usize, j: usize },

    #[error("Unknown metric: {name} (expected one of: newton, weak-field, schwarzschild)")]
    UnknownMetric { name: String },

    #[error(transparent)]
    Core(#[from] GrError),

    #[error(transparent)]
    Symbolic(#[from] SymbolicError),
}

pub type MetricResult<T> = Result<T, MetricError>;
