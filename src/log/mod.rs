//! Logging and observability
//!
//! This module provides logging functionality for the analysis driver,
//! including JSONL history of analysed parameter points and a polled
//! progress file.

pub mod jsonl;
pub mod progress;

pub use jsonl::{JsonlLogger, PointOutcome};
pub use progress::{ProgressWriter, RunProgress, RunStatus};

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Serialize `value` as pretty JSON into `path` through a sibling
/// `.json.tmp` file, so readers never see a half-written document.
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    let staging = path.with_extension("json.tmp");
    std::fs::write(&staging, json)
        .with_context(|| format!("Failed to write temp file: {}", staging.display()))?;
    std::fs::rename(&staging, path).with_context(|| {
        format!("Failed to rename {} -> {}", staging.display(), path.display())
    })
}
