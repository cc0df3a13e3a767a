//! Extrema orders - Orders of extrema from labeled transition graphs
//!
//! CLI entry point for the analysis runner and doctor.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use extrema_orders::analysis::{AnalysisConfig, Analyzer, RunMode, RunOptions, Runner};
use extrema_orders::cli::{render_diagnostic_report, render_run_summary, RunDisplay};
use extrema_orders::doctor::diagnose;
use extrema_orders::graph::NetworkDocument;
use extrema_orders::log::RunStatus;
use extrema_orders::results::{AnalysisResults, ResultsWriter};

/// Orders of extrema from labeled transition graphs
///
/// Enumerates the cycles of each parameter point's transition graph and
/// reports the distinct orders of variable maxima and minima, up to
/// cyclic rotation.
#[derive(Parser, Debug)]
#[command(name = "extrema", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyse the parameter points of a graph document
    Run {
        /// Path to the JSON graph document
        #[arg(long)]
        graph: PathBuf,

        /// Path to analysis.toml (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write results here instead of printing them to stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Directory for log files (.extrema by default)
        #[arg(long, default_value = ".extrema")]
        log_dir: PathBuf,

        /// Parameter indices to analyse, overriding [run].parameters
        #[arg(long, value_delimiter = ',')]
        params: Vec<u64>,

        /// Pool orders across all parameter points
        #[arg(long)]
        pooled: bool,
    },
    /// Check a graph document and configuration for problems
    Doctor {
        /// Path to the JSON graph document
        #[arg(long)]
        graph: PathBuf,

        /// Path to analysis.toml (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(mut config: AnalysisConfig, params: Vec<u64>, pooled: bool) -> AnalysisConfig {
    if !params.is_empty() {
        config.run.parameters = params;
    }
    if pooled {
        config.run.mode = RunMode::Pooled;
    }
    config
}

/// Short display name for a graph path.
fn source_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Write results to `output`, or pretty-print them to stdout.
fn emit_results(results: &AnalysisResults, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            ResultsWriter::new(path)
                .write(results)
                .with_context(|| format!("Failed to write results to '{}'", path.display()))?;
            eprintln!("Results written to {}", path.display());
        }
        None => {
            let json =
                serde_json::to_string_pretty(results).context("Failed to serialize results")?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Raise `stop` on Ctrl-C so the runner halts between parameter points.
fn install_interrupt_handler(stop: Arc<AtomicBool>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Interrupt received, stopping after the current parameter point...");
            stop.store(true, Ordering::SeqCst);
        }
    });
}

async fn run(
    graph: &Path,
    config: AnalysisConfig,
    output: Option<&Path>,
    log_dir: &Path,
) -> Result<()> {
    let document = NetworkDocument::from_path(graph)
        .with_context(|| format!("Failed to load graph from '{}'", graph.display()))?;
    let points: Vec<_> = document
        .select(&config.run.parameters)?
        .into_iter()
        .cloned()
        .collect();

    let analyzer = Analyzer::new(document.variables.clone(), config.markers)?;
    let options = RunOptions::from_config(&config);

    RunDisplay::new(points.len()).print_header(
        &source_name(graph),
        analyzer.variables(),
        options.mode,
    );

    let runner = Runner::new(analyzer, points, options, log_dir)?;
    let stop = Arc::new(AtomicBool::new(false));
    install_interrupt_handler(Arc::clone(&stop));

    let summary = tokio::task::spawn_blocking(move || runner.run(&stop))
        .await
        .context("Analysis task panicked")??;

    render_run_summary(&summary);
    if summary.status == RunStatus::Stopped {
        eprintln!("Run stopped early; results cover the analysed points only.");
    }
    emit_results(&summary.results, output)
}

fn doctor(graph: &Path, config: &AnalysisConfig) -> Result<bool> {
    let document = NetworkDocument::from_path(graph)
        .with_context(|| format!("Failed to load graph from '{}'", graph.display()))?;
    let report = diagnose(config, &document);
    render_diagnostic_report(&report);
    Ok(report.error_count() == 0)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            graph,
            config,
            output,
            log_dir,
            params,
            pooled,
        } => {
            let loaded = AnalysisConfig::load(config.as_deref()).context("Failed to load config")?;
            let config = apply_overrides(loaded, params, pooled);
            run(&graph, config, output.as_deref(), &log_dir).await
        }
        Command::Doctor { graph, config } => {
            let config = AnalysisConfig::load(config.as_deref()).context("Failed to load config")?;
            if doctor(&graph, &config)? {
                Ok(())
            } else {
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_apply_overrides_keeps_config_without_flags() {
        let config = AnalysisConfig::parse("[run]\nparameters = [1, 2]").unwrap();
        let config = apply_overrides(config, vec![], false);
        assert_eq!(config.run.parameters, vec![1, 2]);
        assert_eq!(config.run.mode, RunMode::PerPoint);
    }

    #[test]
    fn test_apply_overrides_flags_win() {
        let config = AnalysisConfig::parse("[run]\nparameters = [1, 2]").unwrap();
        let config = apply_overrides(config, vec![7], true);
        assert_eq!(config.run.parameters, vec![7]);
        assert_eq!(config.run.mode, RunMode::Pooled);
    }

    #[test]
    fn test_source_name() {
        assert_eq!(source_name(Path::new("data/net.json")), "net.json");
        assert_eq!(source_name(Path::new("/")), "/");
    }

    #[test]
    fn test_cli_parses_run_flags() {
        let cli = Cli::parse_from([
            "extrema", "run", "--graph", "g.json", "--params", "5,9", "--pooled",
        ]);
        match cli.command {
            Command::Run {
                graph,
                params,
                pooled,
                log_dir,
                output,
                ..
            } => {
                assert_eq!(graph, PathBuf::from("g.json"));
                assert_eq!(params, vec![5, 9]);
                assert!(pooled);
                assert_eq!(log_dir, PathBuf::from(".extrema"));
                assert!(output.is_none());
            }
            Command::Doctor { .. } => panic!("expected run"),
        }
    }

    #[test]
    fn test_emit_results_writes_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("results.json");
        let results = AnalysisResults::PerPoint(std::collections::BTreeMap::new());

        emit_results(&results, Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "{}");
    }

    #[test]
    fn test_doctor_reports_errors() {
        let tmp = TempDir::new().unwrap();
        let graph = tmp.path().join("graph.json");
        std::fs::write(
            &graph,
            r#"{"variables": ["x", "x"], "parameters": []}"#,
        )
        .unwrap();

        let clean = doctor(&graph, &AnalysisConfig::default()).unwrap();
        assert!(!clean);
    }
}
