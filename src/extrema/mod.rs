//! Extrema orders
//!
//! Turns labeled cycles into extremum sequences, resolves ambiguous runs,
//! and reduces the results up to cyclic rotation.

pub mod canonical;
pub mod event;
pub mod extract;
pub mod resolve;

pub use canonical::{accumulate, is_rotation, CanonicalSet};
pub use event::{parse_sequence, sequence_tokens, ExtremaSequence, ExtremumEvent, Kind};
pub use extract::{extract, Markers};
pub use resolve::{ambiguous_runs, resolve, Resolutions};

use crate::error::OrderResult;

/// Extract and resolve one labeled cycle using the default markers.
///
/// A cycle without marked edges resolves to nothing.
pub fn resolve_cycle<S: AsRef<str>>(
    variables: &[String],
    cycle: &[S],
) -> OrderResult<Vec<ExtremaSequence>> {
    resolve_cycle_with(variables, cycle, &Markers::default())
}

/// Extract and resolve one labeled cycle with explicit markers.
pub fn resolve_cycle_with<S: AsRef<str>>(
    variables: &[String],
    cycle: &[S],
    markers: &Markers,
) -> OrderResult<Vec<ExtremaSequence>> {
    let sequence = extract(variables, cycle, markers)?;
    if sequence.is_empty() {
        return Ok(Vec::new());
    }
    Ok(resolve(variables, &sequence))
}
