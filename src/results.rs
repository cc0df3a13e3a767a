//! Results persistence
//!
//! Writes canonical orders as pretty JSON: an object keyed by parameter
//! index for per-point runs, `{"pooled": [...]}` for pooled runs. Each
//! order is a list of event tokens.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::extrema::CanonicalSet;
use crate::log::write_json_atomic;

/// Canonical orders gathered by a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResults {
    /// Independent canonical set per parameter index
    PerPoint(BTreeMap<u64, CanonicalSet>),
    /// One canonical set across every parameter point
    Pooled {
        /// The shared set
        pooled: CanonicalSet,
    },
}

impl AnalysisResults {
    /// Total number of canonical orders held
    #[must_use]
    pub fn order_count(&self) -> usize {
        match self {
            Self::PerPoint(points) => points.values().map(CanonicalSet::len).sum(),
            Self::Pooled { pooled } => pooled.len(),
        }
    }
}

/// Writes results documents
pub struct ResultsWriter {
    path: PathBuf,
}

impl ResultsWriter {
    /// Create a writer targeting `path`
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Write `results`, creating the parent directory if needed. The file
    /// is replaced atomically.
    pub fn write(&self, results: &AnalysisResults) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
        write_json_atomic(&self.path, results)
    }

    /// Path of the results file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
