//! Christoffel symbols of the second kind.
//!
//! ```text
//! Γ^i_kl = 1/2 Σ_m g^im (∂_l g_mk + ∂_k g_ml - ∂_m g_kl)
//! ```

use crate::error::ConnectionResult;
use gr_core::{DIM, GrResult, check_triple};
use gr_metric::{CoordinateBasis, Metric};
use gr_symbolic::{Expr, SymMatrix4, simplify};

/// `∂ g_ij / ∂ x^k`, not simplified.
///
/// # Errors
/// `IndexOob` if any index is outside `0..4`.
pub fn partial_metric_component(
    metric: &Metric,
    coords: &CoordinateBasis,
    i: usize,
    j: usize,
    k: usize,
) -> GrResult<Expr> {
    let g = metric.component(i, j)?;
    let x = coords.coordinate(k)?;
    Ok(g.diff(x))
}

/// `Γ^i_kl` for one index triple, fully simplified.
///
/// The metric is inverted on every call; use [`crate::Connection`] to
/// evaluate many triples of the same metric.
///
/// # Errors
/// - `Core(IndexOob)` if any index is outside `0..4`
/// - `Symbolic(SingularMatrix)` if the metric has no inverse
pub fn compute_christoffel(
    metric: &Metric,
    coords: &CoordinateBasis,
    i: usize,
    k: usize,
    l: usize,
) -> ConnectionResult<Expr> {
    let (i, k, l) = check_triple(i, k, l)?;
    let inverse = metric.inverse()?;
    contract(&inverse, i, k, l, |a, b, c| {
        partial_metric_component(metric, coords, a, b, c)
    })
}

/// Contract the inverse metric with the derivative bracket and simplify.
///
/// `partial(a, b, c)` must return `∂ g_ab / ∂ x^c`. Indices are already
/// checked.
pub(crate) fn contract<F>(
    inverse: &SymMatrix4,
    i: usize,
    k: usize,
    l: usize,
    partial: F,
) -> ConnectionResult<Expr>
where
    F: Fn(usize, usize, usize) -> GrResult<Expr>,
{
    // Both orders of the lower pair build the same tree.
    let (k, l) = if k <= l { (k, l) } else { (l, k) };

    let mut terms = Vec::with_capacity(DIM);
    for m in 0..DIM {
        let g_im = &inverse[(i, m)];
        if g_im.is_zero() {
            continue;
        }
        let bracket = partial(m, k, l)? + partial(m, l, k)? - partial(k, l, m)?;
        terms.push(g_im * bracket);
    }
    let total = Expr::rational(1, 2) * Expr::sum(terms);
    Ok(simplify(&total)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConnectionError;
    use gr_core::GrError;
    use gr_metric::{PhysicalConstants, schwarzschild_metric};
    use gr_symbolic::{SymbolicError, equivalent};

    #[test]
    fn partial_of_angular_component() {
        let st = schwarzschild_metric(&PhysicalConstants::new());
        let d = partial_metric_component(&st.metric, &st.basis, 3, 3, 2).unwrap();
        let r = Expr::symbol("r");
        let theta = Expr::symbol("theta");
        let expected = Expr::int(2) * r.powi(2) * theta.clone().sin() * theta.cos();
        assert!(equivalent(&d, &expected).unwrap());
        let none = partial_metric_component(&st.metric, &st.basis, 0, 0, 0).unwrap();
        assert!(none.is_zero());
    }

    #[test]
    fn partial_rejects_bad_derivative_index() {
        let st = schwarzschild_metric(&PhysicalConstants::new());
        let err = partial_metric_component(&st.metric, &st.basis, 0, 0, 4).unwrap_err();
        assert!(matches!(err, GrError::IndexOob { index: 4, .. }));
    }

    #[test]
    fn flat_metric_has_no_connection() {
        let g = Metric::diagonal([Expr::int(-1), Expr::one(), Expr::one(), Expr::one()]);
        let basis = CoordinateBasis::cartesian();
        for (i, k, l) in gr_core::index_triples() {
            assert!(compute_christoffel(&g, &basis, i, k, l).unwrap().is_zero());
        }
    }

    #[test]
    fn singular_metric_error_is_passed_through() {
        let g = Metric::diagonal([Expr::zero(), Expr::one(), Expr::one(), Expr::one()]);
        let err = compute_christoffel(&g, &CoordinateBasis::cartesian(), 0, 0, 0).unwrap_err();
        assert_eq!(
            err,
            ConnectionError::Symbolic(SymbolicError::SingularMatrix { column: 0 })
        );
    }
}
