//! Extremum extraction from labeled cycles
//!
//! Each edge label is a token with one character per variable. A max
//! marker at position `i` means variable `i` attains a maximum along that
//! edge, a min marker means a minimum. Edges without either are skipped.

use serde::{Deserialize, Serialize};

use crate::error::{OrderError, OrderResult};
use crate::extrema::event::{ExtremaSequence, ExtremumEvent, Kind};

/// Marker characters recognised in edge labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    /// Marks a maximum (default `M`)
    #[serde(default = "default_max_marker")]
    pub max: char,
    /// Marks a minimum (default `m`)
    #[serde(default = "default_min_marker")]
    pub min: char,
    /// Never expected in well-formed labels (default `*`)
    #[serde(default = "default_reserved_marker")]
    pub reserved: char,
}

const fn default_max_marker() -> char {
    'M'
}

const fn default_min_marker() -> char {
    'm'
}

const fn default_reserved_marker() -> char {
    '*'
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            max: default_max_marker(),
            min: default_min_marker(),
            reserved: default_reserved_marker(),
        }
    }
}

impl Markers {
    /// Classify a label: `None` for non-extremal edges, otherwise the marker
    /// kind and its character position.
    ///
    /// The max marker takes precedence when a label carries both.
    pub fn classify(&self, label: &str) -> OrderResult<Option<(Kind, usize)>> {
        if label.contains(self.reserved) {
            return Err(OrderError::ReservedMarker {
                marker: self.reserved,
                label: label.to_string(),
            });
        }
        let position = |marker: char| label.chars().position(|c| c == marker);
        Ok(position(self.max)
            .map(|p| (Kind::Max, p))
            .or_else(|| position(self.min).map(|p| (Kind::Min, p))))
    }
}

/// Turn a labeled cycle into its cyclic sequence of extremum events.
///
/// Output order is the cycle order of the originating edges. A cycle with no
/// marked edges yields an empty sequence.
pub fn extract<S: AsRef<str>>(
    variables: &[String],
    cycle: &[S],
    markers: &Markers,
) -> OrderResult<ExtremaSequence> {
    let mut sequence = Vec::new();
    for label in cycle {
        let label = label.as_ref();
        let Some((kind, position)) = markers.classify(label)? else {
            continue;
        };
        let variable =
            variables
                .get(position)
                .ok_or_else(|| OrderError::UnknownVariablePosition {
                    position,
                    label: label.to_string(),
                    variables: variables.len(),
                })?;
        sequence.push(ExtremumEvent::new(variable, kind));
    }
    Ok(sequence)
}
