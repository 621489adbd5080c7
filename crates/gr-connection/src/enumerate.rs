//! Enumeration of nonzero Christoffel symbols.

use crate::connection::Connection;
use crate::error::ConnectionResult;
use gr_core::index_triples;
use gr_core::timing::Timer;
use gr_metric::{CoordinateBasis, Metric};
use gr_symbolic::{Expr, Symbol};
use rayon::prelude::*;
use std::fmt;
use tracing::{debug, info};

/// Enumeration settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnumerationConfig {
    /// Evaluate triples on the rayon pool. Output order is unchanged.
    pub parallel: bool,
    /// Visit only `k <= l`, i.e. the independent symbols.
    pub lower_symmetric_only: bool,
}

/// One nonzero coefficient `Γ^upper_{lower.0 lower.1}`.
#[derive(Clone, Debug, PartialEq)]
pub struct ChristoffelEntry {
    pub upper: usize,
    pub lower: (usize, usize),
    /// Coordinates for `upper`, `lower.0`, `lower.1`.
    pub coordinates: [Symbol; 3],
    pub value: Expr,
}

impl ChristoffelEntry {
    pub fn indices(&self) -> (usize, usize, usize) {
        (self.upper, self.lower.0, self.lower.1)
    }
}

impl fmt::Display for ChristoffelEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [i, k, l] = &self.coordinates;
        write!(f, "Γ^{{{i}}}_{{{k} {l}}} = {}", self.value)
    }
}

impl Connection {
    fn entry(&self, (i, k, l): (usize, usize, usize), value: Expr) -> ChristoffelEntry {
        let coords = self.basis().symbols();
        ChristoffelEntry {
            upper: i,
            lower: (k, l),
            coordinates: [coords[i].clone(), coords[k].clone(), coords[l].clone()],
            value,
        }
    }

    /// Lazily walk all 64 triples in canonical order, yielding the
    /// nonzero ones. Each call starts a fresh walk.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = ConnectionResult<ChristoffelEntry>> + '_ {
        index_triples().filter_map(move |(i, k, l)| match self.coefficient(i, k, l) {
            Ok(value) if value.is_zero() => None,
            Ok(value) => Some(Ok(self.entry((i, k, l), value))),
            Err(e) => Some(Err(e)),
        })
    }

    /// Collect the nonzero symbols in canonical `(i, k, l)` order.
    ///
    /// Fails on the first triple that fails.
    pub fn christoffel_symbols(
        &self,
        config: &EnumerationConfig,
    ) -> ConnectionResult<Vec<ChristoffelEntry>> {
        let timer = Timer::start("christoffel_enumeration");
        let triples: Vec<(usize, usize, usize)> = index_triples()
            .filter(|&(_, k, l)| !config.lower_symmetric_only || k <= l)
            .collect();

        let values: Vec<ConnectionResult<Expr>> = if config.parallel {
            triples
                .par_iter()
                .map(|&(i, k, l)| self.coefficient(i, k, l))
                .collect()
        } else {
            triples
                .iter()
                .map(|&(i, k, l)| self.coefficient(i, k, l))
                .collect()
        };

        let mut entries = Vec::new();
        for (&triple, value) in triples.iter().zip(values) {
            let value = value?;
            if value.is_zero() {
                continue;
            }
            let entry = self.entry(triple, value);
            debug!(%entry, "nonzero coefficient");
            entries.push(entry);
        }
        timer.stop_and_print();
        info!(
            basis = %self.basis(),
            evaluated = triples.len(),
            nonzero = entries.len(),
            parallel = config.parallel,
            "christoffel enumeration complete"
        );
        Ok(entries)
    }
}

/// Build a [`Connection`] for `metric` and enumerate its nonzero symbols.
pub fn enumerate_christoffel(
    metric: &Metric,
    coords: &CoordinateBasis,
    config: &EnumerationConfig,
) -> ConnectionResult<Vec<ChristoffelEntry>> {
    Connection::new(metric, coords)?.christoffel_symbols(config)
}
