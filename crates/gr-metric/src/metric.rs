//! Symmetric symbolic metric tensors.

use crate::error::{MetricError, MetricResult};
use gr_core::{DIM, GrResult, check_index};
use gr_symbolic::{Expr, SymMatrix4, SymbolicResult, equivalent, inverse};

/// A 4×4 symmetric metric `g_ij`.
///
/// The lower triangle is always a copy of the upper triangle, so `g_kl`
/// and `g_lk` are the same expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    components: SymMatrix4,
}

impl Metric {
    /// Build a metric from row-major components.
    ///
    /// # Errors
    /// - [`MetricError::Shape`] unless the input is exactly 4×4
    /// - [`MetricError::Asymmetric`] if some `g_ij - g_ji` is not
    ///   identically zero
    pub fn from_rows(rows: Vec<Vec<Expr>>) -> MetricResult<Self> {
        if rows.len() != DIM {
            return Err(MetricError::Shape {
                expected: DIM,
                rows: rows.len(),
                cols: rows.first().map_or(0, Vec::len),
            });
        }
        if let Some(bad) = rows.iter().find(|row| row.len() != DIM) {
            return Err(MetricError::Shape {
                expected: DIM,
                rows: DIM,
                cols: bad.len(),
            });
        }
        for i in 0..DIM {
            for j in (i + 1)..DIM {
                if !equivalent(&rows[i][j], &rows[j][i])? {
                    return Err(MetricError::Asymmetric { i, j });
                }
            }
        }
        let components = SymMatrix4::from_fn(|i, j| {
            let (a, b) = if i <= j { (i, j) } else { (j, i) };
            rows[a][b].clone()
        });
        Ok(Self { components })
    }

    /// Diagonal metric `diag(d0, d1, d2, d3)`.
    pub fn diagonal(entries: [Expr; DIM]) -> Self {
        let components = SymMatrix4::from_fn(|i, j| {
            if i == j {
                entries[i].clone()
            } else {
                Expr::zero()
            }
        });
        Self { components }
    }

    /// `g_ij`
    pub fn component(&self, i: usize, j: usize) -> GrResult<&Expr> {
        let i = check_index("metric row", i)?;
        let j = check_index("metric column", j)?;
        Ok(&self.components[(i, j)])
    }

    pub fn components(&self) -> &SymMatrix4 {
        &self.components
    }

    pub fn is_diagonal(&self) -> bool {
        (0..DIM).all(|i| (0..DIM).all(|j| i == j || self.components[(i, j)].is_zero()))
    }

    /// The inverse metric `g^ij`, simplified entry by entry.
    ///
    /// Fails with `SingularMatrix` when the metric has no symbolic inverse.
    pub fn inverse(&self) -> SymbolicResult<SymMatrix4> {
        inverse(&self.components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gr_core::GrError;
    use gr_symbolic::SymbolicError;

    fn minkowski() -> Metric {
        Metric::diagonal([Expr::int(-1), Expr::one(), Expr::one(), Expr::one()])
    }

    #[test]
    fn rows_are_mirrored_from_upper_triangle() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        // (x + y) and (y + x) differ structurally but are equal
        let mut rows = vec![vec![Expr::zero(); 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = Expr::one();
        }
        rows[0][1] = x.clone() + y.clone();
        rows[1][0] = y + x;
        let g = Metric::from_rows(rows).unwrap();
        assert_eq!(g.component(0, 1).unwrap(), g.component(1, 0).unwrap());
        assert!(!g.is_diagonal());
    }

    #[test]
    fn shape_is_validated() {
        let rows = vec![vec![Expr::one(); 4]; 3];
        assert_eq!(
            Metric::from_rows(rows).unwrap_err(),
            MetricError::Shape {
                expected: 4,
                rows: 3,
                cols: 4
            }
        );
        let mut rows = vec![vec![Expr::one(); 4]; 4];
        rows[2].pop();
        assert!(matches!(
            Metric::from_rows(rows).unwrap_err(),
            MetricError::Shape { cols: 3, .. }
        ));
    }

    #[test]
    fn asymmetry_is_rejected() {
        let mut rows = vec![vec![Expr::zero(); 4]; 4];
        rows[1][3] = Expr::symbol("x");
        assert_eq!(
            Metric::from_rows(rows).unwrap_err(),
            MetricError::Asymmetric { i: 1, j: 3 }
        );
    }

    #[test]
    fn component_index_is_checked() {
        let err = minkowski().component(0, 7).unwrap_err();
        assert!(matches!(err, GrError::IndexOob { index: 7, .. }));
    }

    #[test]
    fn singular_metric_has_no_inverse() {
        let g = Metric::diagonal([Expr::int(-1), Expr::one(), Expr::zero(), Expr::one()]);
        assert_eq!(
            g.inverse().unwrap_err(),
            SymbolicError::SingularMatrix { column: 2 }
        );
        assert_eq!(minkowski().inverse().unwrap(), *minkowski().components());
    }
}
