//! Simplification and exact equivalence testing.

use crate::canonical::Canonical;
use crate::error::SymbolicResult;
use crate::expr::Expr;

/// Rewrite `expr` into canonical factored form.
///
/// Numerator and denominator are free of common polynomial factors,
/// radicals are reduced, and `cos(a)^2` is expressed through `sin(a)`.
/// Two expressions that are equal as functions of positive symbols may
/// still print differently; use [`equivalent`] to compare them.
///
/// # Errors
/// Returns [`crate::SymbolicError::DivisionByZero`] when the expression
/// divides by something that is identically zero.
pub fn simplify(expr: &Expr) -> SymbolicResult<Expr> {
    Ok(Canonical::from_expr(expr)?.to_expr())
}

/// True iff `expr` vanishes identically.
pub fn is_zero(expr: &Expr) -> SymbolicResult<bool> {
    Ok(Canonical::from_expr(expr)?.is_zero())
}

/// True iff `a - b` vanishes identically.
pub fn equivalent(a: &Expr, b: &Expr) -> SymbolicResult<bool> {
    let lhs = Canonical::from_expr(a)?;
    let rhs = Canonical::from_expr(b)?;
    Ok(lhs.sub(&rhs)?.is_zero())
}

impl Expr {
    pub fn simplify(&self) -> SymbolicResult<Expr> {
        simplify(self)
    }
}
