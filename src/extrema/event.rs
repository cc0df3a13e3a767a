//! Extremum events
//!
//! An event is a variable reaching a maximum or a minimum. Events are
//! rendered and persisted as `"<variable> <kind>"` tokens, e.g. `"x max"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OrderError, OrderResult};

/// Whether a variable reaches a maximum or a minimum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Local maximum
    Max,
    /// Local minimum
    Min,
}

impl Kind {
    /// Token used for this kind in rendered events
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Max => "max",
            Self::Min => "min",
        }
    }

    /// The kind that must follow this one for the same variable
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Max => Self::Min,
            Self::Min => Self::Max,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single extremum along a cycle
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ExtremumEvent {
    /// Name of the variable attaining the extremum
    pub variable: String,
    /// Maximum or minimum
    pub kind: Kind,
}

impl ExtremumEvent {
    /// Create a new event
    #[must_use]
    pub fn new(variable: &str, kind: Kind) -> Self {
        Self {
            variable: variable.to_string(),
            kind,
        }
    }

    /// Shorthand for a maximum of `variable`
    #[must_use]
    pub fn max(variable: &str) -> Self {
        Self::new(variable, Kind::Max)
    }

    /// Shorthand for a minimum of `variable`
    #[must_use]
    pub fn min(variable: &str) -> Self {
        Self::new(variable, Kind::Min)
    }
}

impl fmt::Display for ExtremumEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.variable, self.kind)
    }
}

impl FromStr for ExtremumEvent {
    type Err = OrderError;

    fn from_str(token: &str) -> OrderResult<Self> {
        let (variable, kind) = token
            .trim()
            .rsplit_once(' ')
            .ok_or_else(|| OrderError::InvalidToken(token.to_string()))?;
        let variable = variable.trim();
        if variable.is_empty() {
            return Err(OrderError::InvalidToken(token.to_string()));
        }
        let kind = match kind {
            "max" => Kind::Max,
            "min" => Kind::Min,
            _ => return Err(OrderError::InvalidToken(token.to_string())),
        };
        Ok(Self::new(variable, kind))
    }
}

impl From<ExtremumEvent> for String {
    fn from(event: ExtremumEvent) -> Self {
        event.to_string()
    }
}

impl TryFrom<String> for ExtremumEvent {
    type Error = OrderError;

    fn try_from(token: String) -> OrderResult<Self> {
        token.parse()
    }
}

/// Cyclic sequence of extremum events in cycle order
pub type ExtremaSequence = Vec<ExtremumEvent>;

/// Parse a list of `"<variable> <kind>"` tokens into a sequence.
pub fn parse_sequence<S: AsRef<str>>(tokens: &[S]) -> OrderResult<ExtremaSequence> {
    tokens.iter().map(|t| t.as_ref().parse()).collect()
}

/// Render a sequence as its event tokens.
#[must_use]
pub fn sequence_tokens(sequence: &[ExtremumEvent]) -> Vec<String> {
    sequence.iter().map(ToString::to_string).collect()
}
