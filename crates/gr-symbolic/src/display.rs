//! Infix rendering of expressions.

use crate::expr::Expr;
use num::{BigInt, BigRational, One, Signed};
use std::fmt;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(q) => write!(f, "{q}"),
            Expr::Sym(s) => write!(f, "{s}"),
            Expr::Add(terms) => write_sum(f, terms),
            Expr::Mul(factors) => write_product(f, factors),
            Expr::Pow(base, e) => write_power(f, base, e),
            Expr::Func(func, arg) => write!(f, "{}({})", func.name(), arg),
        }
    }
}

/// Binding strength used to decide where parentheses go.
fn precedence(e: &Expr) -> u8 {
    match e {
        Expr::Add(_) => 1,
        Expr::Mul(_) => 2,
        Expr::Num(q) if q.is_negative() || !q.is_integer() => 2,
        Expr::Pow(_, exp) if exp.is_negative() => 2,
        Expr::Pow(..) => 3,
        _ => 4,
    }
}

fn wrap(e: &Expr, min: u8) -> String {
    if precedence(e) < min {
        format!("({e})")
    } else {
        e.to_string()
    }
}

/// Split a leading minus sign off a term.
fn split_sign(term: &Expr) -> (bool, Expr) {
    match term {
        Expr::Num(q) if q.is_negative() => (true, Expr::Num(-q)),
        Expr::Mul(factors) => match factors.first() {
            Some(Expr::Num(q)) if q.is_negative() => {
                let rest = factors[1..].iter().cloned();
                (true, Expr::product(std::iter::once(Expr::Num(-q)).chain(rest)))
            }
            _ => (false, term.clone()),
        },
        _ => (false, term.clone()),
    }
}

fn write_sum(f: &mut fmt::Formatter<'_>, terms: &[Expr]) -> fmt::Result {
    for (idx, term) in terms.iter().enumerate() {
        let (negative, magnitude) = split_sign(term);
        match (idx, negative) {
            (0, true) => write!(f, "-{}", wrap(&magnitude, 2))?,
            (0, false) => write!(f, "{magnitude}")?,
            (_, true) => write!(f, " - {}", wrap(&magnitude, 2))?,
            (_, false) => write!(f, " + {magnitude}")?,
        }
    }
    Ok(())
}

fn write_product(f: &mut fmt::Formatter<'_>, factors: &[Expr]) -> fmt::Result {
    let mut coeff = BigRational::one();
    let mut numer = Vec::new();
    let mut denom = Vec::new();
    for factor in factors {
        match factor {
            Expr::Num(q) => coeff *= q,
            Expr::Pow(base, e) if e.is_negative() => denom.push((**base).clone().pow(-e)),
            other => numer.push(other.clone()),
        }
    }
    if coeff.is_negative() {
        f.write_str("-")?;
        coeff = -coeff;
    }

    let mut top: Vec<String> = Vec::new();
    if !coeff.numer().is_one() || numer.is_empty() {
        top.push(coeff.numer().to_string());
    }
    top.extend(numer.iter().map(|e| wrap(e, 2)));

    let mut bottom: Vec<String> = Vec::new();
    if !coeff.denom().is_one() {
        bottom.push(coeff.denom().to_string());
    }
    bottom.extend(denom.iter().map(|e| wrap(e, 2)));

    f.write_str(&top.join("*"))?;
    match bottom.len() {
        0 => Ok(()),
        1 => write!(f, "/{}", bottom[0]),
        _ => write!(f, "/({})", bottom.join("*")),
    }
}

fn write_power(f: &mut fmt::Formatter<'_>, base: &Expr, e: &BigRational) -> fmt::Result {
    if e.is_negative() {
        let positive = base.clone().pow(-e);
        return write!(f, "1/{}", wrap(&positive, 3));
    }
    if *e == BigRational::new(BigInt::one(), BigInt::from(2)) {
        return write!(f, "sqrt({base})");
    }
    if e.is_integer() {
        write!(f, "{}^{}", wrap(base, 4), e)
    } else {
        write!(f, "{}^({})", wrap(base, 4), e)
    }
}
