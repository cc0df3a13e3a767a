//! Extrema orders - Orders of extrema from labeled transition graphs
//!
//! Reads the cycles of a labeled transition graph, one graph per parameter
//! point, and reports the distinct orders in which variables reach their
//! maxima and minima, identified up to cyclic rotation.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod analysis;
pub mod cli;
pub mod doctor;
pub mod error;
pub mod extrema;
pub mod graph;
pub mod log;
pub mod results;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use analysis::{AnalysisConfig, Analyzer, RunMode, RunOptions, RunSummary, Runner};
pub use doctor::{diagnose, DiagnosticReport};
pub use error::{OrderError, OrderResult};
pub use extrema::{
    accumulate, ambiguous_runs, extract, is_rotation, resolve, resolve_cycle, CanonicalSet,
    ExtremaSequence, ExtremumEvent, Kind, Markers,
};
pub use graph::{NetworkDocument, TransitionGraph};
pub use log::{JsonlLogger, PointOutcome};
pub use results::{AnalysisResults, ResultsWriter};
