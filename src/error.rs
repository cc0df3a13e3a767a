//! Error taxonomy for extrema analysis
//!
//! Every failure here is a contract violation in the input data. Nothing is
//! retried; callers abort the current cycle or run and surface the error.

use thiserror::Error;

/// Errors raised while turning labeled cycles into extrema orders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// An edge label carries the reserved marker.
    #[error("format error: reserved marker '{marker}' in edge label '{label}'")]
    ReservedMarker {
        /// The reserved marker character
        marker: char,
        /// The offending label
        label: String,
    },

    /// A marker sits at a position that names no variable.
    #[error(
        "format error: marker at position {position} in edge label '{label}' \
         but only {variables} variable(s) are defined"
    )]
    UnknownVariablePosition {
        /// Character position of the marker within the label
        position: usize,
        /// The offending label
        label: String,
        /// Number of known variables
        variables: usize,
    },

    /// An extremum token is not of the form `<variable> <max|min>`.
    #[error("format error: invalid extremum token '{0}'")]
    InvalidToken(String),

    /// Required input (variables, graph, settings) is missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl OrderError {
    /// Returns true for malformed graph labeling or event tokens
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        !matches!(self, Self::Configuration(_))
    }
}

/// Result alias for extrema operations
pub type OrderResult<T> = Result<T, OrderError>;
