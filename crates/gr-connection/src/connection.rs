//! Cached connection of a single metric.

use crate::christoffel::contract;
use crate::error::ConnectionResult;
use gr_core::timing::Timer;
use gr_core::{DIM, GrResult, check_index, check_triple};
use gr_metric::{CoordinateBasis, Metric, Spacetime};
use gr_symbolic::{Expr, SymMatrix4};
use std::array;
use tracing::debug;

type Partials = [[[Expr; DIM]; DIM]; DIM];

/// Inverse metric and first derivatives of one metric, computed once.
///
/// [`Connection::coefficient`] yields exactly the expression
/// [`crate::compute_christoffel`] would for the same inputs.
#[derive(Clone, Debug)]
pub struct Connection {
    basis: CoordinateBasis,
    inverse: SymMatrix4,
    /// `partials[i][j][k] = ∂ g_ij / ∂ x^k`
    partials: Partials,
}

impl Connection {
    pub fn new(metric: &Metric, basis: &CoordinateBasis) -> ConnectionResult<Self> {
        let timer = Timer::start("connection_setup");
        let inverse = metric.inverse()?;
        let components = metric.components();
        let coords = basis.symbols();
        let partials: Partials = array::from_fn(|i| {
            array::from_fn(|j| array::from_fn(|k| components[(i, j)].diff(&coords[k])))
        });
        timer.stop_and_print();
        debug!(basis = %basis, "connection prepared");
        Ok(Self {
            basis: basis.clone(),
            inverse,
            partials,
        })
    }

    pub fn from_spacetime(spacetime: &Spacetime) -> ConnectionResult<Self> {
        Self::new(&spacetime.metric, &spacetime.basis)
    }

    pub fn basis(&self) -> &CoordinateBasis {
        &self.basis
    }

    /// The cached inverse metric `g^ij`.
    pub fn inverse(&self) -> &SymMatrix4 {
        &self.inverse
    }

    /// `∂ g_ij / ∂ x^k` from the cache.
    pub fn partial(&self, i: usize, j: usize, k: usize) -> GrResult<&Expr> {
        let i = check_index("metric row", i)?;
        let j = check_index("metric column", j)?;
        let k = check_index("coordinate index", k)?;
        Ok(&self.partials[i][j][k])
    }

    /// `Γ^i_kl`, fully simplified.
    pub fn coefficient(&self, i: usize, k: usize, l: usize) -> ConnectionResult<Expr> {
        let (i, k, l) = check_triple(i, k, l)?;
        contract(&self.inverse, i, k, l, |a, b, c| {
            Ok(self.partials[a][b][c].clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_christoffel;
    use crate::error::ConnectionError;
    use gr_core::GrError;
    use gr_metric::{PhysicalConstants, schwarzschild_metric};

    #[test]
    fn cached_coefficient_matches_direct_computation() {
        let st = schwarzschild_metric(&PhysicalConstants::new());
        let conn = Connection::from_spacetime(&st).unwrap();
        for (i, k, l) in [(0, 0, 1), (1, 0, 0), (2, 3, 3), (3, 2, 3), (1, 2, 3)] {
            let direct = compute_christoffel(&st.metric, &st.basis, i, k, l).unwrap();
            assert_eq!(conn.coefficient(i, k, l).unwrap(), direct);
        }
    }

    #[test]
    fn cached_partials_are_indexed_by_coordinate() {
        let st = schwarzschild_metric(&PhysicalConstants::new());
        let conn = Connection::from_spacetime(&st).unwrap();
        assert!(conn.partial(2, 2, 0).unwrap().is_zero());
        assert!(!conn.partial(2, 2, 1).unwrap().is_zero());
        assert!(conn.partial(4, 0, 0).is_err());
    }

    #[test]
    fn out_of_range_triple_fails_fast() {
        let st = schwarzschild_metric(&PhysicalConstants::new());
        let conn = Connection::from_spacetime(&st).unwrap();
        let err = conn.coefficient(0, 5, 0).unwrap_err();
        assert_eq!(
            err,
            ConnectionError::Core(GrError::IndexOob {
                what: "first lower index",
                index: 5,
                len: 4
            })
        );
    }
}
