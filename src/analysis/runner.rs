//! Analysis run driver
//!
//! Walks the requested parameter points in order: builds each transition
//! graph, enumerates its labeled cycles, runs the extrema pipeline, logs
//! the outcome, and reports progress at a throttled interval. A stop flag
//! is checked between points; a failing point aborts the run.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;

use crate::analysis::config::{AnalysisConfig, RunMode};
use crate::analysis::orchestrator::Analyzer;
use crate::cli::display::RunDisplay;
use crate::extrema::CanonicalSet;
use crate::graph::{ParameterGraph, TransitionGraph};
use crate::log::{JsonlLogger, PointOutcome, ProgressWriter, RunProgress, RunStatus};
use crate::results::AnalysisResults;

/// Settings that shape a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Accumulation mode
    pub mode: RunMode,
    /// Minimum time between progress reports
    pub progress_interval: Duration,
}

impl RunOptions {
    /// Options from a parsed configuration
    #[must_use]
    pub const fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            mode: config.run.mode,
            progress_interval: Duration::from_secs(config.run.progress_interval_secs),
        }
    }
}

/// Final state of a run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Canonical orders gathered
    pub results: AnalysisResults,
    /// Completed, or stopped before every point was analysed
    pub status: RunStatus,
    /// Parameter points analysed
    pub points_analyzed: usize,
    /// Parameter points requested
    pub total_points: usize,
    /// Labeled cycles examined across all points
    pub cycles_examined: usize,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Mutable accumulation state of a run
enum Accumulator {
    PerPoint(BTreeMap<u64, CanonicalSet>),
    Pooled(CanonicalSet),
}

impl Accumulator {
    fn into_results(self) -> AnalysisResults {
        match self {
            Self::PerPoint(points) => AnalysisResults::PerPoint(points),
            Self::Pooled(pooled) => AnalysisResults::Pooled { pooled },
        }
    }

    fn order_count(&self) -> usize {
        match self {
            Self::PerPoint(points) => points.values().map(CanonicalSet::len).sum(),
            Self::Pooled(pool) => pool.len(),
        }
    }
}

/// Drives an analysis over a list of parameter points
pub struct Runner {
    analyzer: Analyzer,
    points: Vec<ParameterGraph>,
    options: RunOptions,
    logger: JsonlLogger,
    progress: ProgressWriter,
    display: RunDisplay,
}

impl Runner {
    /// Create a runner logging into `log_dir`
    pub fn new(
        analyzer: Analyzer,
        points: Vec<ParameterGraph>,
        options: RunOptions,
        log_dir: &Path,
    ) -> Result<Self> {
        let logger = JsonlLogger::new(log_dir).context("Failed to initialize JSONL logger")?;
        let progress = ProgressWriter::new(log_dir).context("Failed to initialize progress file")?;
        let display = RunDisplay::new(points.len());
        Ok(Self {
            analyzer,
            points,
            options,
            logger,
            progress,
            display,
        })
    }

    /// Run every point, or until `stop` is raised between points.
    ///
    /// A malformed graph aborts the run: the failing point is logged, the
    /// progress file is marked failed, and the error is returned.
    pub fn run(self, stop: &AtomicBool) -> Result<RunSummary> {
        let started = Instant::now();
        let mut state = RunProgress::new(self.points.len());
        let mut accumulator = match self.options.mode {
            RunMode::PerPoint => Accumulator::PerPoint(BTreeMap::new()),
            RunMode::Pooled => Accumulator::Pooled(CanonicalSet::new()),
        };
        let mut last_report = Instant::now();

        self.progress.write(&state)?;

        for parameter in &self.points {
            if stop.load(Ordering::SeqCst) {
                state.status = RunStatus::Stopped;
                break;
            }
            state.current_point = Some(parameter.index);

            let outcome = match self.analyze(parameter, &mut accumulator) {
                Ok(outcome) => outcome,
                Err(err) => {
                    let message = format!("{err:#}");
                    self.logger.append(&PointOutcome {
                        index: parameter.index,
                        timestamp: Utc::now(),
                        cycles: 0,
                        resolved: 0,
                        orders: 0,
                        duration_ms: 0,
                        error: Some(message.clone()),
                    })?;
                    state.status = RunStatus::Failed;
                    state.last_error = Some(message);
                    self.progress.write(&state)?;
                    return Err(err.context(format!(
                        "Failed to analyse parameter {}",
                        parameter.index
                    )));
                }
            };

            self.logger
                .append(&outcome)
                .context("Failed to write to JSONL log")?;
            self.display.render_point(&outcome);

            state.points_analyzed += 1;
            state.cycles_examined += outcome.cycles;
            state.orders_found = accumulator.order_count();

            if last_report.elapsed() >= self.options.progress_interval {
                self.display.render_progress(state.points_analyzed);
                self.progress.write(&state)?;
                last_report = Instant::now();
            }
        }

        if state.status == RunStatus::Running {
            state.status = RunStatus::Completed;
        }
        self.progress.write(&state)?;

        Ok(RunSummary {
            results: accumulator.into_results(),
            status: state.status,
            points_analyzed: state.points_analyzed,
            total_points: state.total_points,
            cycles_examined: state.cycles_examined,
            elapsed: started.elapsed(),
        })
    }

    /// Analyse one parameter point into the accumulator.
    fn analyze(
        &self,
        parameter: &ParameterGraph,
        accumulator: &mut Accumulator,
    ) -> Result<PointOutcome> {
        let started = Instant::now();
        let graph = TransitionGraph::from_parameter(parameter);
        let cycles = graph.labeled_cycles();

        let (cycle_count, resolved, orders) = match accumulator {
            Accumulator::PerPoint(points) => {
                let analysis = self.analyzer.analyze_point(&cycles)?;
                let orders = analysis.orders.len();
                points.insert(parameter.index, analysis.orders);
                (analysis.cycles, analysis.resolved, orders)
            }
            Accumulator::Pooled(pool) => {
                let update = self.analyzer.absorb(pool, &cycles)?;
                (update.cycles, update.resolved, update.added)
            }
        };

        Ok(PointOutcome {
            index: parameter.index,
            timestamp: Utc::now(),
            cycles: cycle_count,
            resolved,
            orders,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extrema::Markers;
    use crate::graph::EdgeSpec;
    use crate::testutil::names;
    use tempfile::TempDir;

    fn point(index: u64, labels: &[&str]) -> ParameterGraph {
        let n = labels.len() as u64;
        ParameterGraph {
            index,
            nodes: None,
            edges: labels
                .iter()
                .enumerate()
                .map(|(i, label)| EdgeSpec {
                    from: i as u64,
                    to: (i as u64 + 1) % n,
                    label: (*label).to_string(),
                })
                .collect(),
        }
    }

    fn options(mode: RunMode) -> RunOptions {
        RunOptions {
            mode,
            progress_interval: Duration::from_secs(3600),
        }
    }

    fn analyzer() -> Analyzer {
        Analyzer::new(names(&["x", "y"]), Markers::default()).unwrap()
    }

    #[test]
    fn test_per_point_run_completes() {
        let tmp = TempDir::new().unwrap();
        let points = vec![
            point(5, &["M-", "-m", "m-", "-M"]),
            point(9, &["M-", "m-"]),
        ];
        let runner = Runner::new(analyzer(), points, options(RunMode::PerPoint), tmp.path())
            .unwrap();

        let summary = runner.run(&AtomicBool::new(false)).unwrap();

        assert_eq!(summary.status, RunStatus::Completed);
        assert_eq!(summary.points_analyzed, 2);
        assert_eq!(summary.cycles_examined, 2);
        match &summary.results {
            AnalysisResults::PerPoint(points) => {
                assert_eq!(points.len(), 2);
                assert_eq!(points[&5].len(), 1);
                assert_eq!(points[&9].len(), 1);
            }
            AnalysisResults::Pooled { .. } => panic!("expected per-point results"),
        }

        let logged = JsonlLogger::new(tmp.path()).unwrap().read_all().unwrap();
        assert_eq!(logged.len(), 2);
        assert_eq!(logged[0].index, 5);

        let progress = ProgressWriter::new(tmp.path()).unwrap().read().unwrap().unwrap();
        assert_eq!(progress.status, RunStatus::Completed);
        assert_eq!(progress.points_analyzed, 2);
        assert_eq!(progress.orders_found, 2);
    }

    #[test]
    fn test_pooled_run_merges_rotations_across_points() {
        let tmp = TempDir::new().unwrap();
        let points = vec![
            point(1, &["M-", "-m", "m-", "-M"]),
            point(2, &["m-", "-M", "M-", "-m"]),
        ];
        let runner =
            Runner::new(analyzer(), points, options(RunMode::Pooled), tmp.path()).unwrap();

        let summary = runner.run(&AtomicBool::new(false)).unwrap();
        assert_eq!(summary.results.order_count(), 1);

        let logged = JsonlLogger::new(tmp.path()).unwrap().read_all().unwrap();
        assert_eq!(logged[0].orders, 1);
        assert_eq!(logged[1].orders, 0);
    }

    #[test]
    fn test_stop_flag_halts_before_first_point() {
        let tmp = TempDir::new().unwrap();
        let runner = Runner::new(
            analyzer(),
            vec![point(1, &["M-", "m-"])],
            options(RunMode::PerPoint),
            tmp.path(),
        )
        .unwrap();

        let summary = runner.run(&AtomicBool::new(true)).unwrap();
        assert_eq!(summary.status, RunStatus::Stopped);
        assert_eq!(summary.points_analyzed, 0);
        assert_eq!(summary.results.order_count(), 0);
    }

    #[test]
    fn test_malformed_point_aborts_run() {
        let tmp = TempDir::new().unwrap();
        let points = vec![
            point(1, &["M-", "m-"]),
            point(2, &["M-", "*-"]),
            point(3, &["M-", "m-"]),
        ];
        let runner = Runner::new(analyzer(), points, options(RunMode::PerPoint), tmp.path())
            .unwrap();

        let err = runner.run(&AtomicBool::new(false)).unwrap_err();
        assert!(format!("{err:#}").contains("reserved marker"));
        assert!(err.to_string().contains("parameter 2"));

        let logged = JsonlLogger::new(tmp.path()).unwrap().read_all().unwrap();
        assert_eq!(logged.len(), 2);
        assert!(logged[1].error.is_some());

        let progress = ProgressWriter::new(tmp.path()).unwrap().read().unwrap().unwrap();
        assert_eq!(progress.status, RunStatus::Failed);
        assert_eq!(progress.points_analyzed, 1);
    }
}
