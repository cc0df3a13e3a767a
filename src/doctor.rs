//! Extrema doctor: diagnostics for graph documents
//!
//! Inspects a graph document and `analysis.toml` for problems that would
//! abort a run or silently skew its results. Returns a structured report
//! with categories: errors (must fix), warnings (should fix), info.

use std::collections::HashSet;

use crate::analysis::config::AnalysisConfig;
use crate::graph::{NetworkDocument, TransitionGraph};

/// Severity level for a diagnostic finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    /// Must fix, a run would abort
    Error,
    /// Should fix, results may be skewed
    Warning,
    /// Informational
    Info,
}

/// A single diagnostic finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Severity of the finding
    pub severity: Severity,
    /// Short code for the finding (e.g., "D001")
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Suggested fix (optional)
    pub suggestion: Option<String>,
}

/// Diagnostic report from `extrema doctor`
#[derive(Debug, Clone)]
pub struct DiagnosticReport {
    /// All findings, in order of severity (errors first)
    pub findings: Vec<Finding>,
}

impl DiagnosticReport {
    /// Returns true if the report has no findings at all
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Returns the number of errors
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(&Severity::Error)
    }

    /// Returns the number of warnings
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(&Severity::Warning)
    }

    /// Returns the number of info items
    #[must_use]
    pub fn info_count(&self) -> usize {
        self.count(&Severity::Info)
    }

    fn count(&self, severity: &Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| &f.severity == severity)
            .count()
    }
}

/// Run all diagnostic checks and return a report.
#[must_use]
pub fn diagnose(config: &AnalysisConfig, document: &NetworkDocument) -> DiagnosticReport {
    let mut findings = Vec::new();

    check_variable_names(document, &mut findings);
    check_labels(config, document, &mut findings);
    check_requested_parameters(config, document, &mut findings);
    check_cycles_present(document, &mut findings);

    findings.sort_by_key(|f| match f.severity {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    });

    DiagnosticReport { findings }
}

/// D001 duplicate names, D002 names that are prefixes of other names
fn check_variable_names(document: &NetworkDocument, findings: &mut Vec<Finding>) {
    let mut seen = HashSet::new();
    for name in &document.variables {
        if !seen.insert(name.as_str()) {
            findings.push(Finding {
                severity: Severity::Error,
                code: "D001".to_string(),
                message: format!("Variable '{name}' is listed more than once"),
                suggestion: Some("Give every variable a unique name".to_string()),
            });
        }
    }

    for short in &document.variables {
        for long in &document.variables {
            if long != short && long.starts_with(short.as_str()) {
                findings.push(Finding {
                    severity: Severity::Warning,
                    code: "D002".to_string(),
                    message: format!(
                        "Variable '{short}' is a prefix of '{long}'; events of '{long}' \
                         are also attributed to '{short}' when resolving runs"
                    ),
                    suggestion: Some(format!(
                        "Rename '{short}' so no variable name starts with another"
                    )),
                });
            }
        }
    }
}

/// D003 reserved markers, D004 markers past the last variable,
/// D005 label width mismatch, D006 labels with both markers
fn check_labels(config: &AnalysisConfig, document: &NetworkDocument, findings: &mut Vec<Finding>) {
    let markers = &config.markers;
    let width = document.variables.len();

    for parameter in &document.parameters {
        let labels = || parameter.edges.iter().map(|e| e.label.as_str());

        let reserved = labels().filter(|l| l.contains(markers.reserved)).count();
        if reserved > 0 {
            findings.push(Finding {
                severity: Severity::Error,
                code: "D003".to_string(),
                message: format!(
                    "Parameter {} has {reserved} edge label(s) containing the reserved marker '{}'",
                    parameter.index, markers.reserved
                ),
                suggestion: Some("Regenerate the graph labels; the run would abort".to_string()),
            });
        }

        let out_of_range = labels()
            .filter(|l| {
                matches!(markers.classify(l), Ok(Some((_, position))) if position >= width)
            })
            .count();
        if out_of_range > 0 {
            findings.push(Finding {
                severity: Severity::Error,
                code: "D004".to_string(),
                message: format!(
                    "Parameter {} has {out_of_range} label(s) marking a position beyond the {width} variable(s)",
                    parameter.index
                ),
                suggestion: Some("Check the variable list matches the label layout".to_string()),
            });
        }

        let mismatched = labels().filter(|l| l.chars().count() != width).count();
        if mismatched > 0 {
            findings.push(Finding {
                severity: Severity::Warning,
                code: "D005".to_string(),
                message: format!(
                    "Parameter {} has {mismatched} label(s) whose width differs from {width}",
                    parameter.index
                ),
                suggestion: None,
            });
        }

        let doubled = labels()
            .filter(|l| l.contains(markers.max) && l.contains(markers.min))
            .count();
        if doubled > 0 {
            findings.push(Finding {
                severity: Severity::Warning,
                code: "D006".to_string(),
                message: format!(
                    "Parameter {} has {doubled} label(s) with both a max and a min marker; \
                     only the max is used",
                    parameter.index
                ),
                suggestion: None,
            });
        }
    }
}

/// D007: parameters requested in analysis.toml but absent from the document
fn check_requested_parameters(
    config: &AnalysisConfig,
    document: &NetworkDocument,
    findings: &mut Vec<Finding>,
) {
    for &index in &config.run.parameters {
        if document.get_parameter(index).is_none() {
            findings.push(Finding {
                severity: Severity::Error,
                code: "D007".to_string(),
                message: format!("Parameter {index} is requested but not in the graph document"),
                suggestion: Some("Remove it from [run].parameters in analysis.toml".to_string()),
            });
        }
    }
}

/// D008: parameter graphs without any cycle contribute no orders
fn check_cycles_present(document: &NetworkDocument, findings: &mut Vec<Finding>) {
    for parameter in &document.parameters {
        if !TransitionGraph::from_parameter(parameter).has_cycles() {
            findings.push(Finding {
                severity: Severity::Info,
                code: "D008".to_string(),
                message: format!("Parameter {} has no cycles", parameter.index),
                suggestion: None,
            });
        }
    }
}
