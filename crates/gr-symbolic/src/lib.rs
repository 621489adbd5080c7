//! gr-symbolic: exact symbolic algebra for the christoffel workspace.
//!
//! Contains:
//! - expr (expression tree, constructors, operator overloads)
//! - diff (partial derivatives)
//! - simplify (canonical form and exact zero testing)
//! - matrix (4×4 symbolic inverse)
//!
//! Every symbol is a positive real quantity; `sqrt(x^2) = x` and
//! `(a^k)^e = a^(k e)` hold unconditionally.

mod canonical;
mod diff;
mod display;
pub mod error;
pub mod expr;
pub mod matrix;
mod poly;
pub mod simplify;

// Re-exports
pub use error::{SymbolicError, SymbolicResult};
pub use expr::{Expr, Func, Symbol};
pub use matrix::{SymMatrix4, inverse};
pub use simplify::{equivalent, is_zero, simplify};
