//! Analysis configuration parser
//!
//! Parses `analysis.toml` into marker characters and run settings. Every
//! section is optional; a missing file means defaults throughout.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::extrema::Markers;

/// How results are accumulated across parameter points
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    /// Independent canonical set per parameter point
    #[default]
    PerPoint,
    /// One canonical set grown cycle by cycle across all points
    Pooled,
}

/// Run settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunConfig {
    /// Accumulation mode (default: per-point)
    #[serde(default)]
    pub mode: RunMode,
    /// Parameter indices to analyse; empty means every point in the document
    #[serde(default)]
    pub parameters: Vec<u64>,
    /// Minimum seconds between progress reports (default: 2)
    #[serde(default = "default_progress_interval_secs")]
    pub progress_interval_secs: u64,
}

const fn default_progress_interval_secs() -> u64 {
    2
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::default(),
            parameters: Vec::new(),
            progress_interval_secs: default_progress_interval_secs(),
        }
    }
}

/// Top-level configuration parsed from analysis.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Edge label marker characters
    #[serde(default)]
    pub markers: Markers,
    /// Run settings
    #[serde(default)]
    pub run: RunConfig,
}

impl AnalysisConfig {
    /// Parse an analysis.toml file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_path)
    }

    /// Parse analysis.toml content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse analysis.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        let Markers { max, min, reserved } = self.markers;
        if max == min || max == reserved || min == reserved {
            bail!("Markers must be distinct: max '{max}', min '{min}', reserved '{reserved}'");
        }

        if self.run.progress_interval_secs == 0 {
            bail!("progress_interval_secs must be at least 1");
        }

        let mut seen = HashSet::new();
        for index in &self.run.parameters {
            if !seen.insert(index) {
                bail!("Duplicate parameter index: {index}");
            }
        }

        Ok(())
    }
}
