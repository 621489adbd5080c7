//! Error types for symbolic operations.

use thiserror::Error;

/// Errors raised by the algebra engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolicError {
    #[error("Division by zero")]
    DivisionByZero,

    /// No nonzero pivot exists in `column` during elimination.
    #[error("Matrix is singular (no pivot in column {column})")]
    SingularMatrix { column: usize },

    #[error("Exponent out of supported range: {what}")]
    ExponentRange { what: String },
}

pub type SymbolicResult<T> = Result<T, SymbolicError>;
