//! Analysis orchestration
//!
//! This module handles analysis configuration, the per-cycle extrema
//! pipeline, and the driver that walks parameter points.

pub mod config;
pub mod orchestrator;
pub mod runner;

pub use config::{AnalysisConfig, RunConfig, RunMode};
pub use orchestrator::{Analyzer, PointAnalysis, PoolUpdate};
pub use runner::{RunOptions, RunSummary, Runner};
