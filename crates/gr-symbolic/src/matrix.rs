//! Exact inversion of symbolic 4×4 matrices.

use crate::canonical::Canonical;
use crate::error::{SymbolicError, SymbolicResult};
use crate::expr::Expr;
use nalgebra::Matrix4;

/// A 4×4 matrix of symbolic entries.
pub type SymMatrix4 = Matrix4<Expr>;

/// Invert `m` by Gauss–Jordan elimination over exact canonical forms.
///
/// Pivots are chosen as the first entry that is not identically zero, so
/// the result is deterministic. Every entry of the result is simplified.
///
/// # Errors
/// [`SymbolicError::SingularMatrix`] if some column has no nonzero pivot.
pub fn inverse(m: &SymMatrix4) -> SymbolicResult<SymMatrix4> {
    const N: usize = 4;

    let mut a = Vec::with_capacity(N);
    for i in 0..N {
        let mut row = Vec::with_capacity(N);
        for j in 0..N {
            row.push(Canonical::from_expr(&m[(i, j)])?);
        }
        a.push(row);
    }
    let mut inv: Vec<Vec<Canonical>> = (0..N)
        .map(|i| {
            (0..N)
                .map(|j| if i == j { Canonical::one() } else { Canonical::zero() })
                .collect()
        })
        .collect();

    for col in 0..N {
        let pivot = (col..N)
            .find(|&r| !a[r][col].is_zero())
            .ok_or(SymbolicError::SingularMatrix { column: col })?;
        a.swap(col, pivot);
        inv.swap(col, pivot);

        let scale = a[col][col].recip()?;
        for j in 0..N {
            a[col][j] = a[col][j].mul(&scale)?;
            inv[col][j] = inv[col][j].mul(&scale)?;
        }

        for r in 0..N {
            if r == col || a[r][col].is_zero() {
                continue;
            }
            let factor = a[r][col].clone();
            for j in 0..N {
                a[r][j] = a[r][j].sub(&factor.mul(&a[col][j])?)?;
                inv[r][j] = inv[r][j].sub(&factor.mul(&inv[col][j])?)?;
            }
        }
    }

    Ok(SymMatrix4::from_fn(|i, j| inv[i][j].to_expr()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplify::equivalent;

    fn diag(entries: [Expr; 4]) -> SymMatrix4 {
        SymMatrix4::from_fn(|i, j| if i == j { entries[i].clone() } else { Expr::zero() })
    }

    #[test]
    fn diagonal_inverse_is_reciprocal() {
        let r = Expr::symbol("r");
        let f = Expr::one() - Expr::symbol("r_s") / r.clone();
        let m = diag([f.clone(), -f.clone().recip(), -r.clone().powi(2), Expr::int(-1)]);
        let inv = inverse(&m).unwrap();
        assert!(equivalent(&inv[(0, 0)], &f.clone().recip()).unwrap());
        assert!(equivalent(&inv[(1, 1)], &-f).unwrap());
        assert!(equivalent(&inv[(2, 2)], &-r.powi(-2)).unwrap());
        assert_eq!(inv[(0, 1)], Expr::zero());
        assert_eq!(inv[(3, 3)], Expr::int(-1));
    }

    #[test]
    fn dense_inverse_times_matrix_is_identity() {
        let a = Expr::symbol("a");
        let b = Expr::symbol("b");
        let m = SymMatrix4::from_fn(|i, j| match (i, j) {
            (0, 0) => a.clone(),
            (0, 1) | (1, 0) => b.clone(),
            (1, 1) => Expr::one(),
            (2, 2) => Expr::int(2),
            (2, 3) | (3, 2) => Expr::one(),
            (3, 3) => Expr::one(),
            _ => Expr::zero(),
        });
        let inv = inverse(&m).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let entry = Expr::sum((0..4).map(|k| inv[(i, k)].clone() * m[(k, j)].clone()));
                let expected = if i == j { Expr::one() } else { Expr::zero() };
                assert!(equivalent(&entry, &expected).unwrap(), "entry ({i}, {j})");
            }
        }
    }

    #[test]
    fn zero_row_is_singular() {
        let mut m = diag([Expr::one(), Expr::one(), Expr::one(), Expr::one()]);
        m[(2, 2)] = Expr::symbol("x") - Expr::symbol("x");
        assert_eq!(
            inverse(&m).unwrap_err(),
            SymbolicError::SingularMatrix { column: 2 }
        );
    }

    #[test]
    fn vanishing_radical_entry_is_singular() {
        // sqrt(8) = 2 sqrt(2)
        let entry = Expr::int(8).sqrt() - Expr::int(2) * Expr::int(2).sqrt();
        let m = diag([Expr::int(-1), Expr::one(), Expr::one(), entry]);
        assert_eq!(
            inverse(&m).unwrap_err(),
            SymbolicError::SingularMatrix { column: 3 }
        );
    }
}
