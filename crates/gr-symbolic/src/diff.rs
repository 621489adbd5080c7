//! Partial differentiation.

use crate::expr::{Expr, Func, Symbol};
use num::{BigRational, One};

impl Expr {
    /// Partial derivative with respect to `var`.
    ///
    /// The result is not simplified; terms that vanish structurally are
    /// dropped by the constructors.
    pub fn diff(&self, var: &Symbol) -> Expr {
        if !self.depends_on(var) {
            return Expr::zero();
        }
        match self {
            Expr::Num(_) => Expr::zero(),
            Expr::Sym(s) => {
                if s == var {
                    Expr::one()
                } else {
                    Expr::zero()
                }
            }
            Expr::Add(terms) => Expr::sum(terms.iter().map(|t| t.diff(var))),
            Expr::Mul(factors) => {
                // product rule
                let mut terms = Vec::with_capacity(factors.len());
                for (i, factor) in factors.iter().enumerate() {
                    let d = factor.diff(var);
                    if d.is_zero() {
                        continue;
                    }
                    terms.push(Expr::product(factors.iter().enumerate().map(|(j, f)| {
                        if i == j { d.clone() } else { f.clone() }
                    })));
                }
                Expr::sum(terms)
            }
            Expr::Pow(base, e) => {
                let db = base.diff(var);
                Expr::product([
                    Expr::Num(e.clone()),
                    (**base).clone().pow(e.clone() - BigRational::one()),
                    db,
                ])
            }
            Expr::Func(Func::Sin, arg) => Expr::product([(**arg).clone().cos(), arg.diff(var)]),
            Expr::Func(Func::Cos, arg) => {
                Expr::product([Expr::int(-1), (**arg).clone().sin(), arg.diff(var)])
            }
        }
    }
}
