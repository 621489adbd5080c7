//! Sparse multivariate polynomials over algebraic kernels.
//!
//! Variables ("atoms") are free symbols, `sin`/`cos` applications and
//! radicals `root(P, n)`. Two algebraic relations are applied whenever
//! polynomials are multiplied, which keeps every polynomial in a reduced
//! form where zero-testing is exact:
//!
//! - `root(P, n)^n = P`
//! - `cos(a)^2 = 1 - sin(a)^2`
//!
//! Radicals of one radicand inside a monomial are first merged into a
//! single `root(P, d)^k` with `gcd(k, d) = 1`.

use crate::expr::{Expr, Func, Symbol};
use num::{BigInt, BigRational, Integer, One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Polynomial variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum Atom {
    Sym(Symbol),
    Sin(Expr),
    Cos(Expr),
    /// Principal `index`-th root of `radicand`.
    Root { radicand: Poly, index: u32 },
}

impl Atom {
    /// `(degree, rhs)` such that `self^degree = rhs`, if any.
    fn relation(&self) -> Option<(u32, Poly)> {
        match self {
            Atom::Root { radicand, index } => Some((*index, radicand.clone())),
            Atom::Cos(arg) => {
                let mut rhs = Poly::constant(BigRational::one());
                rhs.add_term(
                    Monomial::atom_pow(Atom::Sin(arg.clone()), 2),
                    -BigRational::one(),
                );
                Some((2, rhs))
            }
            Atom::Sym(_) | Atom::Sin(_) => None,
        }
    }

    pub(crate) fn to_expr(&self) -> Expr {
        match self {
            Atom::Sym(s) => Expr::Sym(s.clone()),
            Atom::Sin(arg) => Expr::Func(Func::Sin, Box::new(arg.clone())),
            Atom::Cos(arg) => Expr::Func(Func::Cos, Box::new(arg.clone())),
            Atom::Root { radicand, index } => Expr::Pow(
                Box::new(radicand.to_expr()),
                BigRational::new(BigInt::one(), BigInt::from(*index)),
            ),
        }
    }
}

/// Power product of atoms. Zero exponents are never stored.
///
/// Ordered lexicographically with the smallest atom most significant, which
/// is a monomial order: total, compatible with multiplication, well-founded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct Monomial(BTreeMap<Atom, u32>);

impl Monomial {
    pub(crate) fn one() -> Self {
        Self::default()
    }

    pub(crate) fn atom_pow(atom: Atom, exp: u32) -> Self {
        let mut m = BTreeMap::new();
        if exp > 0 {
            m.insert(atom, exp);
        }
        Self(m)
    }

    pub(crate) fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn atoms(&self) -> impl Iterator<Item = (&Atom, u32)> {
        self.0.iter().map(|(a, e)| (a, *e))
    }

    fn mul(&self, other: &Monomial) -> Monomial {
        let mut out = self.0.clone();
        for (atom, e) in &other.0 {
            *out.entry(atom.clone()).or_insert(0) += e;
        }
        Monomial(out)
    }

    /// True if `self` divides `other`.
    fn divides(&self, other: &Monomial) -> bool {
        self.0
            .iter()
            .all(|(atom, e)| other.0.get(atom).is_some_and(|oe| oe >= e))
    }

    /// `self / other`; caller guarantees `other.divides(self)`.
    fn div(&self, other: &Monomial) -> Monomial {
        let mut out = self.0.clone();
        for (atom, e) in &other.0 {
            if let Some(slot) = out.get_mut(atom) {
                *slot -= e;
                if *slot == 0 {
                    out.remove(atom);
                }
            }
        }
        Monomial(out)
    }

    fn gcd(&self, other: &Monomial) -> Monomial {
        Monomial(
            self.0
                .iter()
                .filter_map(|(atom, e)| other.0.get(atom).map(|oe| (atom.clone(), *e.min(oe))))
                .collect(),
        )
    }

    /// Merge the radicals of each radicand, or `None` if already merged.
    fn merged_roots(&self) -> Option<Monomial> {
        let mut totals: BTreeMap<&Poly, (BigRational, u32)> = BTreeMap::new();
        for (atom, e) in &self.0 {
            if let Atom::Root { radicand, index } = atom {
                let slot = totals
                    .entry(radicand)
                    .or_insert_with(|| (BigRational::zero(), *index));
                slot.0 += BigRational::new(BigInt::from(*e), BigInt::from(*index));
            }
        }

        let mut out: BTreeMap<Atom, u32> = self
            .0
            .iter()
            .filter(|(atom, _)| !matches!(atom, Atom::Root { .. }))
            .map(|(atom, e)| (atom.clone(), *e))
            .collect();
        for (radicand, (total, first_index)) in totals {
            let (index, exp) = if total.is_integer() {
                (first_index, total.to_integer() * BigInt::from(first_index))
            } else {
                (total.denom().to_u32()?, total.numer().clone())
            };
            let atom = Atom::Root {
                radicand: radicand.clone(),
                index,
            };
            out.insert(atom, exp.to_u32()?);
        }
        let out = Monomial(out);
        (out != *self).then_some(out)
    }

    fn lowered(&self, atom: &Atom, by: u32) -> Monomial {
        let mut out = self.0.clone();
        if let Some(slot) = out.get_mut(atom) {
            *slot -= by;
            if *slot == 0 {
                out.remove(atom);
            }
        }
        Monomial(out)
    }
}

impl Ord for Monomial {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut a = self.0.iter().peekable();
        let mut b = other.0.iter().peekable();
        loop {
            match (a.peek(), b.peek()) {
                (None, None) => return Ordering::Equal,
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (Some((ka, ea)), Some((kb, eb))) => match ka.cmp(kb) {
                    // the smaller atom is absent from the other side
                    Ordering::Less => return Ordering::Greater,
                    Ordering::Greater => return Ordering::Less,
                    Ordering::Equal => match ea.cmp(eb) {
                        Ordering::Equal => {
                            a.next();
                            b.next();
                        }
                        ord => return ord,
                    },
                },
            }
        }
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Polynomial with exact rational coefficients. Zero coefficients are never
/// stored; the last entry is the leading term.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Poly {
    terms: BTreeMap<Monomial, BigRational>,
}

impl Poly {
    pub(crate) fn zero() -> Self {
        Self::default()
    }

    pub(crate) fn constant(q: BigRational) -> Self {
        let mut p = Self::zero();
        p.add_term(Monomial::one(), q);
        p
    }

    pub(crate) fn atom(atom: Atom) -> Self {
        let mut p = Self::zero();
        p.add_term(Monomial::atom_pow(atom, 1), BigRational::one());
        p
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value of a constant polynomial.
    pub(crate) fn as_constant(&self) -> Option<BigRational> {
        match self.terms.len() {
            0 => Some(BigRational::zero()),
            1 => self
                .terms
                .iter()
                .find(|(m, _)| m.is_one())
                .map(|(_, c)| c.clone()),
            _ => None,
        }
    }

    /// The atom, if this polynomial is exactly one atom.
    pub(crate) fn as_atom(&self) -> Option<&Atom> {
        if self.terms.len() != 1 {
            return None;
        }
        let (mono, coeff) = self.terms.iter().next()?;
        if !coeff.is_one() || mono.0.len() != 1 {
            return None;
        }
        mono.0
            .iter()
            .next()
            .and_then(|(atom, e)| (*e == 1).then_some(atom))
    }

    pub(crate) fn leading(&self) -> Option<(&Monomial, &BigRational)> {
        self.terms.last_key_value()
    }

    pub(crate) fn add_term(&mut self, mono: Monomial, coeff: BigRational) {
        if coeff.is_zero() {
            return;
        }
        match self.terms.get_mut(&mono) {
            Some(slot) => {
                *slot += coeff;
                if slot.is_zero() {
                    self.terms.remove(&mono);
                }
            }
            None => {
                self.terms.insert(mono, coeff);
            }
        }
    }

    /// Add a term after rewriting it with the atom relations.
    fn add_reduced(&mut self, mono: Monomial, coeff: BigRational) {
        if let Some(merged) = mono.merged_roots() {
            return self.add_reduced(merged, coeff);
        }
        let rewrite = mono.atoms().find_map(|(atom, e)| {
            atom.relation()
                .filter(|(degree, _)| e >= *degree)
                .map(|(degree, rhs)| (atom.clone(), degree, rhs))
        });
        match rewrite {
            None => self.add_term(mono, coeff),
            Some((atom, degree, rhs)) => {
                let rest = mono.lowered(&atom, degree);
                for (m, c) in rhs.terms {
                    self.add_reduced(rest.mul(&m), &coeff * c);
                }
            }
        }
    }

    pub(crate) fn add(&self, other: &Poly) -> Poly {
        let mut out = self.clone();
        for (m, c) in &other.terms {
            out.add_term(m.clone(), c.clone());
        }
        out
    }

    pub(crate) fn sub(&self, other: &Poly) -> Poly {
        let mut out = self.clone();
        for (m, c) in &other.terms {
            out.add_term(m.clone(), -c);
        }
        out
    }

    pub(crate) fn scale(&self, q: &BigRational) -> Poly {
        let mut out = Poly::zero();
        for (m, c) in &self.terms {
            out.add_term(m.clone(), c * q);
        }
        out
    }

    /// Rewrite every term with the atom relations.
    pub(crate) fn reduced(&self) -> Poly {
        let mut out = Poly::zero();
        for (m, c) in &self.terms {
            out.add_reduced(m.clone(), c.clone());
        }
        out
    }

    /// Product, reduced by the atom relations.
    pub(crate) fn mul(&self, other: &Poly) -> Poly {
        let mut out = Poly::zero();
        for (ma, ca) in &self.terms {
            for (mb, cb) in &other.terms {
                out.add_reduced(ma.mul(mb), ca * cb);
            }
        }
        out
    }

    /// Product in the free polynomial ring (no relations applied).
    fn mul_plain(&self, other: &Poly) -> Poly {
        let mut out = Poly::zero();
        for (ma, ca) in &self.terms {
            for (mb, cb) in &other.terms {
                out.add_term(ma.mul(mb), ca * cb);
            }
        }
        out
    }

    pub(crate) fn pow(&self, n: u64) -> Poly {
        let mut out = Poly::constant(BigRational::one());
        for _ in 0..n {
            out = out.mul(self);
        }
        out
    }

    /// Largest monomial dividing every term.
    pub(crate) fn monomial_content(&self) -> Monomial {
        let mut iter = self.terms.keys();
        let Some(first) = iter.next() else {
            return Monomial::one();
        };
        iter.fold(first.clone(), |acc, m| acc.gcd(m))
    }

    pub(crate) fn div_monomial(&self, m: &Monomial) -> Poly {
        let mut out = Poly::zero();
        for (mono, c) in &self.terms {
            out.add_term(mono.div(m), c.clone());
        }
        out
    }

    /// Split into `content * primitive` where the primitive part has integer
    /// coefficients with gcd 1 and a positive leading coefficient.
    pub(crate) fn primitive(&self) -> (BigRational, Poly) {
        let Some((_, lead)) = self.leading() else {
            return (BigRational::zero(), Poly::zero());
        };
        let mut denom_lcm = BigInt::one();
        let mut numer_gcd = BigInt::zero();
        for c in self.terms.values() {
            denom_lcm = denom_lcm.lcm(c.denom());
            numer_gcd = numer_gcd.gcd(c.numer());
        }
        let mut content = BigRational::new(numer_gcd, denom_lcm);
        if lead.is_negative() {
            content = -content;
        }
        let primitive = self.scale(&content.recip());
        (content, primitive)
    }

    /// Exact quotient `self / divisor` in the free polynomial ring.
    ///
    /// Returns `None` when the division leaves a remainder.
    pub(crate) fn exact_div(&self, divisor: &Poly) -> Option<Poly> {
        let (lead_mono, lead_coeff) = divisor.leading()?;
        let mut remainder = self.clone();
        let mut quotient = Poly::zero();
        loop {
            let Some((mono, coeff)) = remainder.leading().map(|(m, c)| (m.clone(), c.clone()))
            else {
                return Some(quotient);
            };
            if !lead_mono.divides(&mono) {
                return None;
            }
            let q_mono = mono.div(lead_mono);
            let q_coeff = &coeff / lead_coeff;
            let mut step = Poly::zero();
            step.add_term(q_mono.clone(), q_coeff.clone());
            remainder = remainder.sub(&step.mul_plain(divisor));
            quotient.add_term(q_mono, q_coeff);
        }
    }

    /// Leading term first.
    pub(crate) fn to_expr(&self) -> Expr {
        Expr::sum(self.terms.iter().rev().map(|(mono, coeff)| {
            Expr::product(
                std::iter::once(Expr::Num(coeff.clone()))
                    .chain(mono.atoms().map(|(atom, e)| atom.to_expr().powi(i64::from(e)))),
            )
        }))
    }
}
