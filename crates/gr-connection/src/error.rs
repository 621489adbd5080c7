//! Error types for connection coefficients.

use gr_core::GrError;
use gr_symbolic::SymbolicError;
use thiserror::Error;

/// Errors from evaluating Christoffel symbols.
///
/// Algebra failures such as a singular metric are passed through as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error(transparent)]
    Core(#[from] GrError),

    #[error(transparent)]
    Symbolic(#[from] SymbolicError),
}

pub type ConnectionResult<T> = Result<T, ConnectionError>;
