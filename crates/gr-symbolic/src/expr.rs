//! Symbolic expression tree.
//!
//! Constructors only do light normalisation (flattening, constant folding,
//! identity removal). Full simplification lives in [`crate::simplify`].

use num::{BigInt, BigRational, One, ToPrimitive, Zero};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

/// A free symbol, identified by its name.
///
/// Every symbol is treated as a positive real quantity.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// The symbol as an expression.
    pub fn expr(&self) -> Expr {
        Expr::Sym(self.clone())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Elementary functions known to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Func {
    Sin,
    Cos,
}

impl Func {
    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
        }
    }

    /// Apply the function to an argument.
    pub fn apply(self, arg: Expr) -> Expr {
        match self {
            Func::Sin => arg.sin(),
            Func::Cos => arg.cos(),
        }
    }
}

/// Exact symbolic expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Expr {
    /// Exact rational number.
    Num(BigRational),
    Sym(Symbol),
    Add(Vec<Expr>),
    Mul(Vec<Expr>),
    /// Power with a rational exponent.
    Pow(Box<Expr>, BigRational),
    Func(Func, Box<Expr>),
}

impl Expr {
    pub fn zero() -> Self {
        Expr::Num(BigRational::zero())
    }

    pub fn one() -> Self {
        Expr::Num(BigRational::one())
    }

    pub fn int(n: i64) -> Self {
        Expr::Num(BigRational::from_integer(BigInt::from(n)))
    }

    /// Exact fraction `numer/denom`.
    ///
    /// # Panics
    /// Panics if `denom` is zero.
    pub fn rational(numer: i64, denom: i64) -> Self {
        Expr::Num(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    pub fn symbol(name: &str) -> Self {
        Expr::Sym(Symbol::new(name))
    }

    /// Structural test for the exact number zero.
    ///
    /// Only meaningful on simplified expressions; use
    /// [`crate::simplify::is_zero`] otherwise.
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Num(q) if q.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Num(q) if q.is_one())
    }

    pub fn as_number(&self) -> Option<&BigRational> {
        match self {
            Expr::Num(q) => Some(q),
            _ => None,
        }
    }

    /// Sum of terms, flattened with numeric terms folded.
    pub fn sum<I: IntoIterator<Item = Expr>>(terms: I) -> Expr {
        fn push(out: &mut Vec<Expr>, constant: &mut BigRational, term: Expr) {
            match term {
                Expr::Num(q) => *constant += q,
                Expr::Add(inner) => {
                    for t in inner {
                        push(out, constant, t);
                    }
                }
                other => out.push(other),
            }
        }

        let mut constant = BigRational::zero();
        let mut out = Vec::new();
        for term in terms {
            push(&mut out, &mut constant, term);
        }
        if !constant.is_zero() {
            out.insert(0, Expr::Num(constant));
        }
        match out.len() {
            0 => Expr::zero(),
            1 => out.remove(0),
            _ => Expr::Add(out),
        }
    }

    /// Product of factors, flattened with numeric factors folded.
    pub fn product<I: IntoIterator<Item = Expr>>(factors: I) -> Expr {
        fn push(out: &mut Vec<Expr>, coeff: &mut BigRational, factor: Expr) {
            match factor {
                Expr::Num(q) => *coeff *= q,
                Expr::Mul(inner) => {
                    for f in inner {
                        push(out, coeff, f);
                    }
                }
                other => out.push(other),
            }
        }

        let mut coeff = BigRational::one();
        let mut out = Vec::new();
        for factor in factors {
            push(&mut out, &mut coeff, factor);
        }
        if coeff.is_zero() {
            return Expr::zero();
        }
        if !coeff.is_one() {
            out.insert(0, Expr::Num(coeff));
        }
        match out.len() {
            0 => Expr::one(),
            1 => out.remove(0),
            _ => Expr::Mul(out),
        }
    }

    /// Raise to a rational power.
    pub fn pow(self, exponent: BigRational) -> Expr {
        if exponent.is_zero() {
            return Expr::one();
        }
        if exponent.is_one() {
            return self;
        }
        match self {
            Expr::Num(q) if exponent.is_integer() && !q.is_zero() => {
                match exponent.to_integer().to_i32() {
                    Some(n) if n.unsigned_abs() <= 64 => Expr::Num(rational_powi(&q, n)),
                    _ => Expr::Pow(Box::new(Expr::Num(q)), exponent),
                }
            }
            Expr::Pow(base, inner) if exponent.is_integer() => base.pow(inner * exponent),
            Expr::Mul(factors) if exponent.is_integer() => {
                Expr::product(factors.into_iter().map(|f| f.pow(exponent.clone())))
            }
            base => Expr::Pow(Box::new(base), exponent),
        }
    }

    pub fn powi(self, n: i64) -> Expr {
        self.pow(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn sqrt(self) -> Expr {
        self.pow(BigRational::new(BigInt::one(), BigInt::from(2)))
    }

    pub fn recip(self) -> Expr {
        self.powi(-1)
    }

    pub fn sin(self) -> Expr {
        if self.is_zero() {
            return Expr::zero();
        }
        Expr::Func(Func::Sin, Box::new(self))
    }

    pub fn cos(self) -> Expr {
        if self.is_zero() {
            return Expr::one();
        }
        Expr::Func(Func::Cos, Box::new(self))
    }

    /// `sin(a)/cos(a)`
    pub fn tan(self) -> Expr {
        Expr::product([self.clone().sin(), self.cos().recip()])
    }

    /// `cos(a)/sin(a)`
    pub fn cot(self) -> Expr {
        Expr::product([self.clone().cos(), self.sin().recip()])
    }

    /// Replace every occurrence of `var` with `replacement`.
    pub fn subs(&self, var: &Symbol, replacement: &Expr) -> Expr {
        match self {
            Expr::Num(_) => self.clone(),
            Expr::Sym(s) if s == var => replacement.clone(),
            Expr::Sym(_) => self.clone(),
            Expr::Add(terms) => Expr::sum(terms.iter().map(|t| t.subs(var, replacement))),
            Expr::Mul(factors) => Expr::product(factors.iter().map(|f| f.subs(var, replacement))),
            Expr::Pow(base, e) => base.subs(var, replacement).pow(e.clone()),
            Expr::Func(func, arg) => func.apply(arg.subs(var, replacement)),
        }
    }

    /// Symbols occurring anywhere in the expression.
    pub fn free_symbols(&self) -> BTreeSet<Symbol> {
        fn walk(e: &Expr, out: &mut BTreeSet<Symbol>) {
            match e {
                Expr::Num(_) => {}
                Expr::Sym(s) => {
                    out.insert(s.clone());
                }
                Expr::Add(items) | Expr::Mul(items) => items.iter().for_each(|i| walk(i, out)),
                Expr::Pow(base, _) => walk(base, out),
                Expr::Func(_, arg) => walk(arg, out),
            }
        }

        let mut out = BTreeSet::new();
        walk(self, &mut out);
        out
    }

    pub fn depends_on(&self, var: &Symbol) -> bool {
        match self {
            Expr::Num(_) => false,
            Expr::Sym(s) => s == var,
            Expr::Add(items) | Expr::Mul(items) => items.iter().any(|i| i.depends_on(var)),
            Expr::Pow(base, _) => base.depends_on(var),
            Expr::Func(_, arg) => arg.depends_on(var),
        }
    }
}

/// `q^n` for a nonzero rational `q`.
pub(crate) fn rational_powi(q: &BigRational, n: i32) -> BigRational {
    let magnitude = num::pow(q.clone(), n.unsigned_abs() as usize);
    if n.is_negative() {
        magnitude.recip()
    } else {
        magnitude
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::int(n)
    }
}

impl From<Symbol> for Expr {
    fn from(s: Symbol) -> Self {
        Expr::Sym(s)
    }
}

impl From<&Symbol> for Expr {
    fn from(s: &Symbol) -> Self {
        Expr::Sym(s.clone())
    }
}

impl Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        Expr::sum([self, rhs])
    }
}

impl Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        Expr::sum([self, -rhs])
    }
}

impl Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        Expr::product([self, rhs])
    }
}

impl Div for Expr {
    type Output = Expr;
    fn div(self, rhs: Expr) -> Expr {
        Expr::product([self, rhs.recip()])
    }
}

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::product([Expr::int(-1), self])
    }
}

impl Neg for &Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        -self.clone()
    }
}

macro_rules! forward_ref_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<&Expr> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                $imp::$method(self.clone(), rhs.clone())
            }
        }

        impl $imp<Expr> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $imp::$method(self.clone(), rhs)
            }
        }

        impl $imp<&Expr> for Expr {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                $imp::$method(self, rhs.clone())
            }
        }
    };
}

forward_ref_binop!(Add, add);
forward_ref_binop!(Sub, sub);
forward_ref_binop!(Mul, mul);
forward_ref_binop!(Div, div);
