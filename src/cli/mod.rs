//! CLI output formatting
//!
//! Provides human-readable terminal display for analysis runs and
//! diagnostics.

pub mod display;

pub use display::render_diagnostic_report;
pub use display::render_run_summary;
pub use display::RunDisplay;
