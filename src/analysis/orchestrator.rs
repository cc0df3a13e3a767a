//! Per-cycle extrema pipeline
//!
//! Feeds labeled cycles through extraction and resolution, then reduces the
//! union up to rotation. The canonical set is always an explicit value: a
//! fresh one per parameter point, or a caller-owned pool folded cycle by
//! cycle.

use std::collections::BTreeSet;

use crate::error::{OrderError, OrderResult};
use crate::extrema::{resolve_cycle_with, CanonicalSet, ExtremaSequence, Markers};

/// Canonical orders of one parameter point, with counts for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointAnalysis {
    /// Labeled cycles examined
    pub cycles: usize,
    /// Distinct resolved sequences before rotation reduction
    pub resolved: usize,
    /// One representative per rotation class
    pub orders: CanonicalSet,
}

/// Counts from folding one batch of cycles into a shared pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolUpdate {
    /// Labeled cycles examined
    pub cycles: usize,
    /// Resolved sequences offered to the pool
    pub resolved: usize,
    /// Sequences that became new representatives
    pub added: usize,
}

/// Extrema pipeline bound to one variable list and marker set
#[derive(Debug, Clone)]
pub struct Analyzer {
    variables: Vec<String>,
    markers: Markers,
}

impl Analyzer {
    /// Create an analyzer; an empty variable list is a configuration error.
    pub fn new(variables: Vec<String>, markers: Markers) -> OrderResult<Self> {
        if variables.is_empty() {
            return Err(OrderError::Configuration(
                "no variable names supplied".to_string(),
            ));
        }
        Ok(Self { variables, markers })
    }

    /// Variable names in label position order
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Marker characters used to read labels
    #[must_use]
    pub const fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Extract and resolve one labeled cycle.
    pub fn resolve_cycle<S: AsRef<str>>(&self, cycle: &[S]) -> OrderResult<Vec<ExtremaSequence>> {
        resolve_cycle_with(&self.variables, cycle, &self.markers)
    }

    /// Union of the resolved sequences of every cycle.
    ///
    /// Stops at the first malformed cycle.
    pub fn ordered_extrema<I, C, S>(&self, cycles: I) -> OrderResult<BTreeSet<ExtremaSequence>>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut all = BTreeSet::new();
        for cycle in cycles {
            all.extend(self.resolve_cycle(cycle.as_ref())?);
        }
        Ok(all)
    }

    /// Canonical orders of one parameter point, reduced from an empty set.
    pub fn analyze_point<I, C, S>(&self, cycles: I) -> OrderResult<PointAnalysis>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut count = 0;
        let mut all = BTreeSet::new();
        for cycle in cycles {
            count += 1;
            all.extend(self.resolve_cycle(cycle.as_ref())?);
        }
        let resolved = all.len();
        Ok(PointAnalysis {
            cycles: count,
            resolved,
            orders: all.into_iter().collect(),
        })
    }

    /// Fold each cycle's resolved sequences into `pool` as it is produced.
    pub fn absorb<I, C, S>(&self, pool: &mut CanonicalSet, cycles: I) -> OrderResult<PoolUpdate>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut update = PoolUpdate::default();
        for cycle in cycles {
            update.cycles += 1;
            for order in self.resolve_cycle(cycle.as_ref())? {
                update.resolved += 1;
                if pool.insert(order) {
                    update.added += 1;
                }
            }
        }
        Ok(update)
    }
}
