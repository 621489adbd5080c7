//! Canonical rational form.
//!
//! A nonzero value is `coeff * Π fᵢ^eᵢ` where each factor `fᵢ` is either a
//! single atom or a primitive polynomial without monomial content, and
//! every `eᵢ` is a nonzero integer. Each radicand carries at most one
//! radical atom, with an exponent in `1..index` coprime to the index; the
//! rest is folded into powers of the radicand. Constant radicands are
//! primes, `-1`, or a cofactor with no small prime divisor. `sin` and `cos` arguments have a positive leading
//! coefficient.
//!
//! Addition goes through a common denominator and an expanded numerator,
//! so a sum is the exact zero iff it vanishes identically.

use crate::error::{SymbolicError, SymbolicResult};
use crate::expr::{Expr, Func, rational_powi};
use crate::poly::{Atom, Poly};
use num::{BigInt, BigRational, Integer, One, Signed, ToPrimitive, Zero};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Canonical {
    coeff: BigRational,
    factors: BTreeMap<Poly, i64>,
}

impl Canonical {
    pub(crate) fn zero() -> Self {
        Self::constant(BigRational::zero())
    }

    pub(crate) fn one() -> Self {
        Self::constant(BigRational::one())
    }

    pub(crate) fn constant(coeff: BigRational) -> Self {
        Self {
            coeff,
            factors: BTreeMap::new(),
        }
    }

    pub(crate) fn from_atom(atom: Atom) -> Self {
        let mut out = Self::one();
        out.push(Poly::atom(atom), 1);
        out
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.coeff.is_zero()
    }

    /// Factor a polynomial into content, atom powers and a primitive part.
    pub(crate) fn from_poly(poly: &Poly) -> SymbolicResult<Self> {
        let poly = poly.reduced();
        if poly.is_zero() {
            return Ok(Self::zero());
        }
        let content = poly.monomial_content();
        let (coeff, primitive) = poly.div_monomial(&content).primitive();
        let mut out = Self::constant(coeff);
        for (atom, e) in content.atoms() {
            out.push(Poly::atom(atom.clone()), i64::from(e));
        }
        if primitive.as_constant().is_none() {
            out.push(primitive, 1);
        }
        out.split_roots()?;
        Ok(out)
    }

    fn push(&mut self, factor: Poly, exp: i64) {
        if exp == 0 {
            return;
        }
        let slot = self.factors.entry(factor).or_insert(0);
        *slot += exp;
        if *slot == 0 {
            self.factors.retain(|_, e| *e != 0);
        }
    }

    /// Merge the radical factors of each radicand into one factor
    /// `root(P, d)^r` with `0 < r < d` and `gcd(r, d) = 1`; whole powers
    /// are folded into `P`.
    fn split_roots(&mut self) -> SymbolicResult<()> {
        loop {
            let mut groups: BTreeMap<&Poly, Vec<(&Poly, i64, u32)>> = BTreeMap::new();
            for (poly, &e) in &self.factors {
                if let Some(Atom::Root { radicand, index }) = poly.as_atom() {
                    groups.entry(radicand).or_default().push((poly, e, *index));
                }
            }
            let pending = groups.into_iter().find(|(_, roots)| {
                roots.len() > 1
                    || roots.iter().any(|&(_, e, index)| {
                        let index = i64::from(index);
                        e < 0 || e >= index || e.gcd(&index) != 1
                    })
            });
            let Some((radicand, roots)) = pending else {
                return Ok(());
            };
            let radicand = radicand.clone();
            let mut total = BigRational::zero();
            let keys: Vec<Poly> = roots
                .into_iter()
                .map(|(poly, e, index)| {
                    total += BigRational::new(BigInt::from(e), BigInt::from(index));
                    poly.clone()
                })
                .collect();
            for key in &keys {
                self.factors.remove(key);
            }

            let whole = total.floor();
            let rest = &total - &whole;
            if !rest.is_zero() {
                let index = to_u32(rest.denom())?;
                let root = Poly::atom(Atom::Root {
                    radicand: radicand.clone(),
                    index,
                });
                self.push(root, to_i64(rest.numer())?);
            }

            let whole = to_i64(&whole.to_integer())?;
            if whole == 0 {
                continue;
            }
            let small = i32::try_from(whole).map_err(|_| SymbolicError::ExponentRange {
                what: whole.to_string(),
            })?;
            let base = Canonical::from_poly(&radicand)?;
            self.coeff *= rational_powi(&base.coeff, small);
            for (f, k) in base.factors {
                self.push(f, k * whole);
            }
        }
    }

    /// Cancel numerator factors against denominator factors by exact division.
    fn cancel(&mut self) -> SymbolicResult<()> {
        loop {
            let mut hit = None;
            'search: for (top, _) in self.factors.iter().filter(|(_, e)| **e > 0) {
                for (bottom, _) in self.factors.iter().filter(|(_, e)| **e < 0) {
                    if let Some(q) = top.exact_div(bottom) {
                        hit = Some((top.clone(), bottom.clone(), q, 1));
                        break 'search;
                    }
                    if let Some(q) = bottom.exact_div(top) {
                        hit = Some((top.clone(), bottom.clone(), q, -1));
                        break 'search;
                    }
                }
            }
            let Some((top, bottom, quotient, exp)) = hit else {
                return Ok(());
            };
            self.push(top, -1);
            self.push(bottom, 1);
            let quotient = Canonical::from_poly(&quotient)?;
            self.coeff *= rational_powi(&quotient.coeff, exp);
            for (f, k) in quotient.factors {
                self.push(f, k * i64::from(exp));
            }
        }
    }

    fn normalize(&mut self) -> SymbolicResult<()> {
        self.split_roots()?;
        self.cancel()?;
        self.split_roots()
    }

    pub(crate) fn neg(&self) -> Self {
        Self {
            coeff: -&self.coeff,
            factors: self.factors.clone(),
        }
    }

    pub(crate) fn mul(&self, other: &Canonical) -> SymbolicResult<Self> {
        if self.is_zero() || other.is_zero() {
            return Ok(Self::zero());
        }
        let mut out = self.clone();
        out.coeff *= &other.coeff;
        for (f, e) in &other.factors {
            out.push(f.clone(), *e);
        }
        out.normalize()?;
        Ok(out)
    }

    pub(crate) fn recip(&self) -> SymbolicResult<Self> {
        if self.is_zero() {
            return Err(SymbolicError::DivisionByZero);
        }
        let mut out = Self {
            coeff: self.coeff.recip(),
            factors: self.factors.iter().map(|(f, e)| (f.clone(), -e)).collect(),
        };
        out.normalize()?;
        Ok(out)
    }

    pub(crate) fn powi(&self, n: i64) -> SymbolicResult<Self> {
        if n == 0 {
            return Ok(Self::one());
        }
        if self.is_zero() {
            return if n > 0 {
                Ok(Self::zero())
            } else {
                Err(SymbolicError::DivisionByZero)
            };
        }
        let small = i32::try_from(n).map_err(|_| SymbolicError::ExponentRange {
            what: n.to_string(),
        })?;
        let mut out = Self {
            coeff: rational_powi(&self.coeff, small),
            factors: self.factors.iter().map(|(f, e)| (f.clone(), e * n)).collect(),
        };
        out.normalize()?;
        Ok(out)
    }

    /// Rational power; symbols are positive so `(a^k)^e = a^(k e)`.
    pub(crate) fn pow(&self, e: &BigRational) -> SymbolicResult<Self> {
        if e.is_integer() {
            return self.powi(to_i64(&e.to_integer())?);
        }
        if self.is_zero() {
            return if e.is_positive() {
                Ok(Self::zero())
            } else {
                Err(SymbolicError::DivisionByZero)
            };
        }
        let mut out = constant_pow(&self.coeff, e)?;
        for (f, k) in &self.factors {
            let total = e * BigRational::from_integer(BigInt::from(*k));
            out = out.mul(&factor_pow(f, &total)?)?;
        }
        Ok(out)
    }

    pub(crate) fn add(&self, other: &Canonical) -> SymbolicResult<Self> {
        if self.is_zero() {
            return Ok(other.clone());
        }
        if other.is_zero() {
            return Ok(self.clone());
        }
        if self.factors == other.factors {
            let coeff = &self.coeff + &other.coeff;
            if coeff.is_zero() {
                return Ok(Self::zero());
            }
            return Ok(Self {
                coeff,
                factors: self.factors.clone(),
            });
        }

        let mut denominator: BTreeMap<Poly, i64> = BTreeMap::new();
        for (f, e) in self.factors.iter().chain(other.factors.iter()) {
            if *e < 0 {
                let slot = denominator.entry(f.clone()).or_insert(0);
                *slot = (*slot).max(-e);
            }
        }
        let numerator = self
            .numerator_over(&denominator)
            .add(&other.numerator_over(&denominator));
        if numerator.is_zero() {
            return Ok(Self::zero());
        }
        let mut den = Self::one();
        for (f, e) in denominator {
            den.push(f, -e);
        }
        Canonical::from_poly(&numerator)?.mul(&den)
    }

    pub(crate) fn sub(&self, other: &Canonical) -> SymbolicResult<Self> {
        self.add(&other.neg())
    }

    /// Expanded numerator of `self` over the common `denominator`.
    fn numerator_over(&self, denominator: &BTreeMap<Poly, i64>) -> Poly {
        let mut out = Poly::constant(self.coeff.clone());
        for (f, &e) in &self.factors {
            if e > 0 {
                out = out.mul(&f.pow(e.unsigned_abs()));
            }
        }
        for (f, &d) in denominator {
            let own = self.factors.get(f).copied().filter(|e| *e < 0).map_or(0, |e| -e);
            let missing = d - own;
            if missing > 0 {
                out = out.mul(&f.pow(missing.unsigned_abs()));
            }
        }
        out
    }

    pub(crate) fn from_expr(expr: &Expr) -> SymbolicResult<Self> {
        match expr {
            Expr::Num(q) => Ok(Self::constant(q.clone())),
            Expr::Sym(s) => Ok(Self::from_atom(Atom::Sym(s.clone()))),
            Expr::Add(terms) => {
                let mut acc = Self::zero();
                for term in terms {
                    acc = acc.add(&Self::from_expr(term)?)?;
                }
                Ok(acc)
            }
            Expr::Mul(factors) => {
                let mut acc = Self::one();
                for factor in factors {
                    let value = Self::from_expr(factor)?;
                    if value.is_zero() {
                        return Ok(Self::zero());
                    }
                    acc = acc.mul(&value)?;
                }
                Ok(acc)
            }
            Expr::Pow(base, e) => Self::from_expr(base)?.pow(e),
            Expr::Func(func, arg) => {
                let arg = Self::from_expr(arg)?;
                if arg.is_zero() {
                    return Ok(match func {
                        Func::Sin => Self::zero(),
                        Func::Cos => Self::one(),
                    });
                }
                // sin is odd, cos is even
                let negated = arg.coeff.is_negative();
                let arg = if negated { arg.neg() } else { arg };
                let arg = arg.to_expr();
                Ok(match func {
                    Func::Sin if negated => Self::from_atom(Atom::Sin(arg)).neg(),
                    Func::Sin => Self::from_atom(Atom::Sin(arg)),
                    Func::Cos => Self::from_atom(Atom::Cos(arg)),
                })
            }
        }
    }

    pub(crate) fn to_expr(&self) -> Expr {
        if self.is_zero() {
            return Expr::zero();
        }
        // factor order is descending by symbol name
        let factors = self
            .factors
            .iter()
            .rev()
            .map(|(poly, &e)| poly.to_expr().powi(e));
        Expr::product(std::iter::once(Expr::Num(self.coeff.clone())).chain(factors))
    }
}

fn to_i64(n: &BigInt) -> SymbolicResult<i64> {
    n.to_i64().ok_or_else(|| SymbolicError::ExponentRange {
        what: n.to_string(),
    })
}

fn to_u32(n: &BigInt) -> SymbolicResult<u32> {
    n.to_u32().ok_or_else(|| SymbolicError::ExponentRange {
        what: n.to_string(),
    })
}

/// `f^total` for one factor and a rational exponent.
fn factor_pow(f: &Poly, total: &BigRational) -> SymbolicResult<Canonical> {
    let numer = to_i64(total.numer())?;
    let denom = to_u32(total.denom())?;
    let base = if denom == 1 {
        Canonical::from_poly(f)?
    } else {
        Canonical::from_atom(Atom::Root {
            radicand: f.clone(),
            index: denom,
        })
    };
    base.powi(numer)
}

/// `q^e` for a nonzero rational.
///
/// `|q|` is split into prime powers so every constant radical is a power
/// of `root(p, n)` for a prime `p`; perfect powers come out exactly.
fn constant_pow(q: &BigRational, e: &BigRational) -> SymbolicResult<Canonical> {
    if q.is_one() {
        return Ok(Canonical::one());
    }
    let numer = to_i64(e.numer())?;
    let denom = to_u32(e.denom())?;

    let mut out = Canonical::one();
    if q.is_negative() {
        let sign = if denom % 2 == 1 {
            Canonical::constant(-BigRational::one())
        } else {
            Canonical::from_atom(Atom::Root {
                radicand: Poly::constant(-BigRational::one()),
                index: denom,
            })
        };
        out = out.mul(&sign.powi(numer)?)?;
    }

    let magnitude = q.abs();
    let numer_primes = prime_powers(magnitude.numer()).into_iter();
    let denom_primes = prime_powers(magnitude.denom())
        .into_iter()
        .map(|(p, k)| (p, -k));
    for (p, k) in numer_primes.chain(denom_primes) {
        let total = e * BigRational::from_integer(BigInt::from(k));
        let base = Poly::constant(BigRational::from_integer(p));
        out = out.mul(&factor_pow(&base, &total)?)?;
    }
    Ok(out)
}

/// Trial division bound for [`prime_powers`].
const TRIAL_LIMIT: u32 = 1 << 20;

/// Prime factorisation of `n > 0` by trial division.
///
/// A cofactor with no prime divisor below [`TRIAL_LIMIT`] is returned as
/// a single entry.
fn prime_powers(n: &BigInt) -> Vec<(BigInt, i64)> {
    let mut rest = n.clone();
    let mut out = Vec::new();
    let mut p = BigInt::from(2u32);
    let limit = BigInt::from(TRIAL_LIMIT);
    while &p * &p <= rest && p <= limit {
        let mut k = 0i64;
        while (&rest % &p).is_zero() {
            rest /= &p;
            k += 1;
        }
        if k > 0 {
            out.push((p.clone(), k));
        }
        let step = if p == BigInt::from(2u32) { 1u32 } else { 2u32 };
        p += step;
    }
    if rest > BigInt::one() {
        out.push((rest, 1));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Symbol;

    fn canon(e: &Expr) -> Canonical {
        Canonical::from_expr(e).unwrap()
    }

    #[test]
    fn common_factor_cancels() {
        let r = Expr::symbol("r");
        let rs = Expr::symbol("r_s");
        // (r^2 - r r_s) / (r - r_s) = r
        let e = (r.clone().powi(2) - r.clone() * rs.clone()) / (r.clone() - rs);
        assert_eq!(canon(&e), canon(&r));
    }

    #[test]
    fn radical_exponents_are_folded_into_radicand() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let s = x.clone().powi(2) + y.powi(2);
        let rho = s.clone().sqrt();
        // rho^3 = s * rho
        assert_eq!(canon(&rho.clone().powi(3)), canon(&(s.clone() * rho.clone())));
        // 1/rho = rho / s
        assert_eq!(canon(&rho.clone().recip()), canon(&(rho / s)));
    }

    #[test]
    fn perfect_square_constants_are_exact() {
        let e = Expr::int(9).sqrt() * Expr::rational(4, 25).sqrt();
        assert_eq!(canon(&e).to_expr(), Expr::rational(6, 5));
        let irrational = Expr::int(2).sqrt();
        assert_eq!(canon(&irrational.clone().powi(2)).to_expr(), Expr::int(2));
    }

    #[test]
    fn pythagorean_identity_is_zero() {
        let theta = Expr::symbol("theta");
        let e = theta.clone().sin().powi(2) + theta.cos().powi(2) - Expr::one();
        assert!(canon(&e).is_zero());
    }

    #[test]
    fn reciprocal_of_zero_is_rejected() {
        let e = Expr::Pow(Box::new(Expr::zero()), BigRational::from_integer((-1).into()));
        assert_eq!(
            Canonical::from_expr(&e).unwrap_err(),
            SymbolicError::DivisionByZero
        );
    }

    #[test]
    fn to_expr_round_trip_is_stable() {
        let r = Symbol::new("r");
        let rs = Symbol::new("r_s");
        let f = Expr::one() - rs.expr() / r.expr();
        let once = canon(&f.clone().recip()).to_expr();
        let twice = canon(&once).to_expr();
        assert_eq!(once, twice);
    }

    #[test]
    fn roots_of_one_radicand_merge() {
        let x = Expr::symbol("x");
        let quarter = BigRational::new(1.into(), 4.into());
        let e = x.clone().sqrt() * x.clone().pow(quarter.clone());
        assert_eq!(canon(&e), canon(&x.clone().pow(quarter * BigRational::from_integer(3.into()))));
        // 8^(1/6) = sqrt(2)
        let six = BigRational::new(1.into(), 6.into());
        assert_eq!(canon(&Expr::int(8).pow(six)), canon(&Expr::int(2).sqrt()));
    }

    #[test]
    fn negative_constant_radicals_keep_their_sign() {
        let third = BigRational::new(1.into(), 3.into());
        assert_eq!(canon(&Expr::int(-8).pow(third)).to_expr(), Expr::int(-2));
        let i = Expr::int(-1).sqrt();
        assert_eq!(canon(&(i.clone() * i)).to_expr(), Expr::int(-1));
    }

    #[test]
    fn oversized_root_power_is_an_error() {
        let x = Poly::atom(Atom::Sym(Symbol::new("x")));
        let mut value = Canonical::one();
        let huge = 2 * (i64::from(i32::MAX) + 1);
        value.push(Poly::atom(Atom::Root { radicand: x, index: 2 }), huge);
        assert!(matches!(
            value.split_roots(),
            Err(SymbolicError::ExponentRange { .. })
        ));
    }

    #[test]
    fn large_integer_power_is_an_error() {
        let e = Expr::Pow(
            Box::new(Expr::symbol("x")),
            BigRational::from_integer(BigInt::from(i64::MAX)),
        );
        assert!(matches!(
            Canonical::from_expr(&e),
            Err(SymbolicError::ExponentRange { .. })
        ));
    }
}
