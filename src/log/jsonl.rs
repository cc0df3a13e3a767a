//! Point outcome history
//!
//! Every analysed parameter point, successful or not, leaves one line in
//! `.extrema/log.jsonl`. The driver only appends; tools read it back whole.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// Represents the outcome of analysing a single parameter point
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PointOutcome {
    /// External parameter index
    pub index: u64,
    /// ISO 8601 timestamp of when the point finished
    pub timestamp: DateTime<Utc>,
    /// Number of distinct labeled cycles found
    pub cycles: usize,
    /// Number of resolved sequences produced
    pub resolved: usize,
    /// Number of canonical orders (per point) or new pool members (pooled)
    pub orders: usize,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
    /// Error message if the point was aborted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Append-only history of point outcomes, one JSON object per line of
/// `<log_dir>/log.jsonl`
pub struct JsonlLogger {
    log_path: PathBuf,
}

impl JsonlLogger {
    /// Open the history in `log_dir`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(log_dir: P) -> Result<Self> {
        let log_dir = log_dir.as_ref();
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
        Ok(Self {
            log_path: log_dir.join("log.jsonl"),
        })
    }

    /// Append one outcome as a single line.
    pub fn append(&self, outcome: &PointOutcome) -> Result<()> {
        let line = serde_json::to_string(outcome).context("Failed to serialize point outcome")?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open log file: {}", self.log_path.display()))?;
        writeln!(file, "{line}").context("Failed to write to log file")
    }

    /// Every logged outcome, oldest first. Blank lines are skipped; a line
    /// that does not parse fails the whole read with its line number.
    pub fn read_all(&self) -> Result<Vec<PointOutcome>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.log_path)
            .with_context(|| format!("Failed to read log file: {}", self.log_path.display()))?;

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(number, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("Failed to parse log line {}", number + 1))
            })
            .collect()
    }

    /// Location of `log.jsonl`
    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}
