//! Ordered coordinate bases.

use crate::error::{MetricError, MetricResult};
use gr_core::{DIM, GrResult, check_index};
use gr_symbolic::Symbol;
use std::fmt;

/// Ordered, immutable tuple of four distinct coordinate symbols.
///
/// Position `k` is the coordinate `x^k` used for index `k` everywhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoordinateBasis {
    coords: [Symbol; DIM],
}

impl CoordinateBasis {
    /// Validate and build a basis.
    ///
    /// # Errors
    /// [`MetricError::BasisLength`] unless exactly four symbols are given,
    /// [`MetricError::DuplicateCoordinate`] if a name repeats.
    pub fn new<I>(coords: I) -> MetricResult<Self>
    where
        I: IntoIterator<Item = Symbol>,
    {
        let coords: Vec<Symbol> = coords.into_iter().collect();
        let len = coords.len();
        let coords: [Symbol; DIM] = coords
            .try_into()
            .map_err(|_| MetricError::BasisLength { expected: DIM, len })?;
        for (k, sym) in coords.iter().enumerate() {
            if coords[..k].contains(sym) {
                return Err(MetricError::DuplicateCoordinate {
                    name: sym.name().to_string(),
                });
            }
        }
        Ok(Self { coords })
    }

    /// Shorthand for [`CoordinateBasis::new`] over names.
    pub fn from_names(names: &[&str]) -> MetricResult<Self> {
        Self::new(names.iter().map(|n| Symbol::new(n)))
    }

    /// `[t, x, y, z]`
    pub fn cartesian() -> Self {
        Self::fixed(["t", "x", "y", "z"])
    }

    /// `[t, r, theta, phi]`
    pub fn spherical() -> Self {
        Self::fixed(["t", "r", "theta", "phi"])
    }

    fn fixed(names: [&str; DIM]) -> Self {
        Self {
            coords: names.map(Symbol::new),
        }
    }

    pub fn coordinate(&self, k: usize) -> GrResult<&Symbol> {
        Ok(&self.coords[check_index("coordinate index", k)?])
    }

    pub fn symbols(&self) -> &[Symbol; DIM] {
        &self.coords
    }

    pub fn name(&self, k: usize) -> GrResult<&str> {
        self.coordinate(k).map(Symbol::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.coords.iter()
    }
}

impl fmt::Display for CoordinateBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.coords.iter().map(Symbol::name).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gr_core::GrError;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_bases_are_ordered() {
        assert_eq!(CoordinateBasis::cartesian().to_string(), "[t, x, y, z]");
        let sph = CoordinateBasis::spherical();
        assert_eq!(sph.name(2).unwrap(), "theta");
        assert_eq!(sph, CoordinateBasis::from_names(&["t", "r", "theta", "phi"]).unwrap());
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = CoordinateBasis::from_names(&["t", "x", "y"]).unwrap_err();
        assert_eq!(err, MetricError::BasisLength { expected: 4, len: 3 });
    }

    #[test]
    fn duplicate_is_rejected() {
        let err = CoordinateBasis::from_names(&["t", "x", "x", "z"]).unwrap_err();
        assert_eq!(
            err,
            MetricError::DuplicateCoordinate {
                name: "x".to_string()
            }
        );
    }

    #[test]
    fn coordinate_lookup_is_checked() {
        let err = CoordinateBasis::cartesian().coordinate(4).unwrap_err();
        assert!(matches!(err, GrError::IndexOob { index: 4, .. }));
    }

    proptest! {
        #[test]
        fn accepts_exactly_four_distinct_names(
            picks in prop::collection::vec(0usize..6, 0..7)
        ) {
            const NAMES: [&str; 6] = ["t", "x", "y", "z", "r", "u"];
            let names: Vec<&str> = picks.iter().map(|&p| NAMES[p]).collect();
            let distinct = names.iter().collect::<HashSet<_>>().len() == names.len();
            match CoordinateBasis::from_names(&names) {
                Ok(basis) => {
                    prop_assert!(names.len() == DIM && distinct);
                    let built: Vec<&str> = basis.iter().map(Symbol::name).collect();
                    prop_assert_eq!(built, names);
                }
                Err(MetricError::BasisLength { len, .. }) => {
                    prop_assert_ne!(names.len(), DIM);
                    prop_assert_eq!(len, names.len());
                }
                Err(MetricError::DuplicateCoordinate { name }) => {
                    prop_assert_eq!(names.len(), DIM);
                    prop_assert!(!distinct);
                    prop_assert!(names.iter().filter(|n| **n == name).count() > 1);
                }
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
        }
    }
}
