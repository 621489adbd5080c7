//! Predefined spacetimes.

use crate::basis::CoordinateBasis;
use crate::constants::PhysicalConstants;
use crate::error::MetricError;
use crate::metric::Metric;
use gr_symbolic::Expr;
use std::fmt;
use std::str::FromStr;

/// A metric paired with the coordinate basis it is written in.
#[derive(Clone, Debug, PartialEq)]
pub struct Spacetime {
    pub kind: MetricKind,
    pub metric: Metric,
    pub basis: CoordinateBasis,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Newton,
    WeakField,
    Schwarzschild,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [
        MetricKind::Newton,
        MetricKind::WeakField,
        MetricKind::Schwarzschild,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MetricKind::Newton => "newton",
            MetricKind::WeakField => "weak-field",
            MetricKind::Schwarzschild => "schwarzschild",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MetricKind::Newton => "Newtonian limit, flat spatial part",
            MetricKind::WeakField => "weak-field limit with spatial curvature",
            MetricKind::Schwarzschild => "exact vacuum solution around a spherical mass",
        }
    }

    pub fn build(self, constants: &PhysicalConstants) -> Spacetime {
        match self {
            MetricKind::Newton => newton_metric(constants),
            MetricKind::WeakField => weak_field_limit_metric(constants),
            MetricKind::Schwarzschild => schwarzschild_metric(constants),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricKind {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        MetricKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| MetricError::UnknownMetric {
                name: s.to_string(),
            })
    }
}

/// `2 G M / (c² √(x² + y² + z²))` over a Cartesian basis.
fn potential_term(constants: &PhysicalConstants, basis: &CoordinateBasis) -> Expr {
    let [_, x, y, z] = basis.symbols();
    let rho = (x.expr().powi(2) + y.expr().powi(2) + z.expr().powi(2)).sqrt();
    Expr::int(2) * constants.g.expr() * constants.m.expr() / (constants.c.expr().powi(2) * rho)
}

/// `-(1 - 2GM/(c² ρ)) c²`
fn newtonian_time_component(constants: &PhysicalConstants, basis: &CoordinateBasis) -> Expr {
    -(Expr::one() - potential_term(constants, basis)) * constants.c.expr().powi(2)
}

/// Newtonian limit: perturbed `g_00`, flat spatial part, Cartesian basis.
pub fn newton_metric(constants: &PhysicalConstants) -> Spacetime {
    let basis = CoordinateBasis::cartesian();
    let metric = Metric::diagonal([
        newtonian_time_component(constants, &basis),
        Expr::one(),
        Expr::one(),
        Expr::one(),
    ]);
    Spacetime {
        kind: MetricKind::Newton,
        metric,
        basis,
    }
}

/// Weak-field limit: Newtonian `g_00` and spatial entries
/// `1 + 2GM/(c² ρ)`, Cartesian basis.
pub fn weak_field_limit_metric(constants: &PhysicalConstants) -> Spacetime {
    let basis = CoordinateBasis::cartesian();
    let spatial = Expr::one() + potential_term(constants, &basis);
    let metric = Metric::diagonal([
        newtonian_time_component(constants, &basis),
        spatial.clone(),
        spatial.clone(),
        spatial,
    ]);
    Spacetime {
        kind: MetricKind::WeakField,
        metric,
        basis,
    }
}

/// Schwarzschild metric in `[t, r, theta, phi]`, written with `r_s`.
pub fn schwarzschild_metric(constants: &PhysicalConstants) -> Spacetime {
    let basis = CoordinateBasis::spherical();
    let [_, r, theta, _] = basis.symbols();
    let r = r.expr();
    let f = Expr::one() - constants.r_s.expr() / r.clone();
    let metric = Metric::diagonal([
        -f.clone() * constants.c.expr().powi(2),
        f.recip(),
        r.clone().powi(2),
        r.powi(2) * theta.expr().sin().powi(2),
    ]);
    Spacetime {
        kind: MetricKind::Schwarzschild,
        metric,
        basis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gr_symbolic::{Symbol, equivalent};

    #[test]
    fn kinds_round_trip_through_names() {
        for kind in MetricKind::ALL {
            assert_eq!(kind.name().parse::<MetricKind>().unwrap(), kind);
        }
        assert_eq!("Weak_Field".parse::<MetricKind>().unwrap(), MetricKind::WeakField);
        assert_eq!(
            "kerr".parse::<MetricKind>().unwrap_err(),
            MetricError::UnknownMetric {
                name: "kerr".to_string()
            }
        );
    }

    #[test]
    fn every_registered_metric_is_diagonal_and_invertible() {
        let k = PhysicalConstants::new();
        for kind in MetricKind::ALL {
            let st = kind.build(&k);
            assert_eq!(st.kind, kind);
            assert!(st.metric.is_diagonal());
            assert!(st.metric.inverse().is_ok(), "{kind} must be invertible");
        }
    }

    #[test]
    fn schwarzschild_entries() {
        let k = PhysicalConstants::new();
        let st = schwarzschild_metric(&k);
        let r = Expr::symbol("r");
        let rs = k.r_s.expr();
        let expected_rr = r.clone() / (r.clone() - rs);
        assert!(equivalent(st.metric.component(1, 1).unwrap(), &expected_rr).unwrap());
        let theta = Symbol::new("theta");
        assert!(st.metric.component(3, 3).unwrap().depends_on(&theta));
        assert!(!st.metric.component(2, 2).unwrap().depends_on(&theta));
    }

    #[test]
    fn weak_field_spatial_entries_share_the_potential() {
        let k = PhysicalConstants::new();
        let st = weak_field_limit_metric(&k);
        let newton = newton_metric(&k);
        assert_eq!(st.metric.component(0, 0), newton.metric.component(0, 0));
        assert_eq!(st.metric.component(1, 1), st.metric.component(3, 3));
        assert!(st.metric.component(2, 2).unwrap().depends_on(&k.g));
        assert!(newton.metric.component(2, 2).unwrap().is_one());
    }
}
