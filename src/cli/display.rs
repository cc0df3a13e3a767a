//! Rich CLI display for analysis runs
//!
//! Renders run progress, per-point outcomes and diagnostics as
//! human-readable terminal output. All output goes to stderr so stdout
//! remains clean for piping results.

use colored::Colorize;

use crate::analysis::config::RunMode;
use crate::analysis::runner::RunSummary;
use crate::doctor::{DiagnosticReport, Severity};
use crate::extrema::ExtremumEvent;
use crate::log::{PointOutcome, RunStatus};

/// Display handler for an analysis run
pub struct RunDisplay {
    total_points: usize,
}

impl RunDisplay {
    /// Create a new display handler for a run over `total_points` points
    #[must_use]
    pub const fn new(total_points: usize) -> Self {
        Self { total_points }
    }

    /// Print the run header
    pub fn print_header(&self, source: &str, variables: &[String], mode: RunMode) {
        eprintln!(
            "\n{} {}",
            "===".bold().cyan(),
            format!("Extrema orders: {source}").bold().cyan()
        );
        eprintln!("{}", "─".repeat(50).dimmed());
        eprintln!("  {} {}", "Variables:".dimmed(), variables.join(", "));
        eprintln!("  {} {}", "Parameters:".dimmed(), self.total_points);
        eprintln!("  {} {}", "Mode:".dimmed(), mode_name(mode));
    }

    /// Render the outcome of one parameter point
    pub fn render_point(&self, outcome: &PointOutcome) {
        if let Some(error) = &outcome.error {
            eprintln!(
                "  {} parameter {} {}",
                "✗".red().bold(),
                outcome.index,
                error.red()
            );
            return;
        }
        eprintln!(
            "  {} parameter {} {}",
            "▶".blue(),
            outcome.index.to_string().bold(),
            format!(
                "{} cycle(s), {} resolved, {} order(s) in {}",
                outcome.cycles,
                outcome.resolved,
                outcome.orders,
                format_duration_ms(outcome.duration_ms)
            )
            .dimmed()
        );
    }

    /// Render the periodic progress line
    pub fn render_progress(&self, analyzed: usize) {
        eprintln!("{}", format_progress_line(analyzed, self.total_points).yellow());
    }
}

/// Render the post-run summary
pub fn render_run_summary(summary: &RunSummary) {
    eprintln!("{}", "─".repeat(50).dimmed());
    let status = match summary.status {
        RunStatus::Completed => "completed".green().bold(),
        RunStatus::Stopped => "stopped".yellow().bold(),
        RunStatus::Failed => "failed".red().bold(),
        RunStatus::Running => "running".normal(),
    };
    eprintln!(
        "  {} {} ({}/{} parameters)",
        "Status:".dimmed(),
        status,
        summary.points_analyzed,
        summary.total_points
    );
    eprintln!(
        "  {} {}",
        "Cycles:".dimmed(),
        summary.cycles_examined
    );
    eprintln!(
        "  {} {}",
        "Orders:".dimmed(),
        summary.results.order_count()
    );
    eprintln!(
        "  {} {}",
        "Duration:".dimmed(),
        format_duration_ms(u64::try_from(summary.elapsed.as_millis()).unwrap_or(u64::MAX))
    );
}

/// Render a diagnostic report from `extrema doctor`
pub fn render_diagnostic_report(report: &DiagnosticReport) {
    if report.is_clean() {
        eprintln!("{} No issues found", "✓".green().bold());
        return;
    }

    for finding in &report.findings {
        let tag = match finding.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue().bold(),
        };
        eprintln!("{tag}[{}]: {}", finding.code, finding.message);
        if let Some(suggestion) = &finding.suggestion {
            eprintln!("  {} {}", "→".dimmed(), suggestion.dimmed());
        }
    }

    eprintln!(
        "\n{} error(s), {} warning(s), {} info",
        report.error_count(),
        report.warning_count(),
        report.info_count()
    );
}

/// Format an order as `x max → y min → ...`
#[must_use]
pub fn format_order(order: &[ExtremumEvent]) -> String {
    order
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Format the periodic progress message
#[must_use]
pub fn format_progress_line(analyzed: usize, total: usize) -> String {
    format!("{analyzed} / {total} parameters analyzed")
}

/// Format milliseconds for display: `850ms`, `3.2s`, `2m 05s`
#[must_use]
pub fn format_duration_ms(ms: u64) -> String {
    match ms {
        0..=999 => format!("{ms}ms"),
        1_000..=59_999 => format!("{}.{}s", ms / 1000, (ms % 1000) / 100),
        _ => format!("{}m {:02}s", ms / 60_000, (ms % 60_000) / 1000),
    }
}

const fn mode_name(mode: RunMode) -> &'static str {
    match mode {
        RunMode::PerPoint => "per-point",
        RunMode::Pooled => "pooled",
    }
}
