//! Physical constants as free symbols.

use gr_symbolic::{Expr, Symbol};

/// Free symbols for the gravitational constant, the central mass, the
/// speed of light and the Schwarzschild radius.
///
/// None of them is bound to a number, so every metric built from them
/// stays exact and parametric.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhysicalConstants {
    pub g: Symbol,
    pub m: Symbol,
    pub c: Symbol,
    pub r_s: Symbol,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            g: Symbol::new("G"),
            m: Symbol::new("M"),
            c: Symbol::new("c"),
            r_s: Symbol::new("r_s"),
        }
    }
}

impl PhysicalConstants {
    pub fn new() -> Self {
        Self::default()
    }

    /// `2 G M / c²`
    pub fn schwarzschild_radius(&self) -> Expr {
        Expr::int(2) * self.g.expr() * self.m.expr() / self.c.expr().powi(2)
    }

    /// Replace every `r_s` in `expr` by `2 G M / c²`.
    pub fn expand_schwarzschild_radius(&self, expr: &Expr) -> Expr {
        expr.subs(&self.r_s, &self.schwarzschild_radius())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gr_symbolic::equivalent;

    #[test]
    fn expansion_removes_r_s() {
        let k = PhysicalConstants::new();
        let r = Expr::symbol("r");
        let f = Expr::one() - k.r_s.expr() / r.clone();
        let expanded = k.expand_schwarzschild_radius(&f);
        assert!(!expanded.depends_on(&k.r_s));
        let expected = Expr::one()
            - Expr::int(2) * k.g.expr() * k.m.expr() / (k.c.expr().powi(2) * r);
        assert!(equivalent(&expanded, &expected).unwrap());
    }
}
