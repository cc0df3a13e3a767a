//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use chrono::Utc;

use crate::extrema::{parse_sequence, ExtremaSequence, ExtremumEvent};
use crate::log::jsonl::PointOutcome;

/// Owned variable names from string literals.
#[must_use]
pub fn names(variables: &[&str]) -> Vec<String> {
    variables.iter().map(ToString::to_string).collect()
}

/// Parse `"x max"`-style tokens, panicking on malformed input.
#[must_use]
pub fn seq(tokens: &[&str]) -> ExtremaSequence {
    parse_sequence(tokens).unwrap()
}

/// Sort orders so results can be compared as sets.
#[must_use]
pub fn sorted(mut orders: Vec<ExtremaSequence>) -> Vec<ExtremaSequence> {
    orders.sort();
    orders
}

/// True if every variable's events alternate max/min around the cycle.
#[must_use]
pub fn alternates(variables: &[String], order: &[ExtremumEvent]) -> bool {
    variables.iter().all(|name| {
        let kinds: Vec<_> = order
            .iter()
            .filter(|e| &e.variable == name)
            .map(|e| e.kind)
            .collect();
        kinds.len() < 2
            || (0..kinds.len()).all(|i| kinds[i] != kinds[(i + 1) % kinds.len()])
    })
}

/// Create a minimal `PointOutcome` for testing with sensible defaults.
///
/// Sets `duration_ms = 5` and leaves `error` as `None`.
#[must_use]
pub fn make_test_outcome(index: u64, cycles: usize, orders: usize) -> PointOutcome {
    PointOutcome {
        index,
        timestamp: Utc::now(),
        cycles,
        resolved: orders,
        orders,
        duration_ms: 5,
        error: None,
    }
}
