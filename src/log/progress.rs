//! Progress file writer for external observability
//!
//! Manages `.extrema/progress.json`, a single JSON file reflecting the
//! current state of a running analysis. External tools can poll it instead
//! of parsing JSONL or terminal output.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current status of an analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Run is currently executing
    Running,
    /// Every requested parameter point was analysed
    Completed,
    /// A parameter point failed and the run was aborted
    Failed,
    /// Run was interrupted between parameter points
    Stopped,
}

/// Snapshot of the current run state, written to `.extrema/progress.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunProgress {
    /// When the run started (ISO 8601)
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// Parameter points finished so far
    pub points_analyzed: usize,
    /// Parameter points requested
    pub total_points: usize,
    /// Parameter point currently (or last) being analysed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_point: Option<u64>,
    /// Current status of the run
    pub status: RunStatus,
    /// Labeled cycles examined so far
    #[serde(default)]
    pub cycles_examined: usize,
    /// Canonical orders found so far
    #[serde(default)]
    pub orders_found: usize,
    /// Error of the failing point, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl RunProgress {
    /// Create a new `RunProgress` for the start of a run.
    #[must_use]
    pub fn new(total_points: usize) -> Self {
        Self {
            started_at: chrono::Utc::now(),
            points_analyzed: 0,
            total_points,
            current_point: None,
            status: RunStatus::Running,
            cycles_examined: 0,
            orders_found: 0,
            last_error: None,
        }
    }
}

/// Manages reading and writing `.extrema/progress.json`
pub struct ProgressWriter {
    path: PathBuf,
}

impl ProgressWriter {
    /// Create a new `ProgressWriter` targeting `<log_dir>/progress.json`.
    pub fn new(log_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
        Ok(Self {
            path: log_dir.join("progress.json"),
        })
    }

    /// Replace the progress file with `progress`.
    pub fn write(&self, progress: &RunProgress) -> Result<()> {
        super::write_json_atomic(&self.path, progress)
    }

    /// Last written snapshot, `None` before the first write.
    pub fn read(&self) -> Result<Option<RunProgress>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content)
                .map(Some)
                .with_context(|| format!("Failed to parse {}", self.path.display())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        }
    }

    /// Path of the progress file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
