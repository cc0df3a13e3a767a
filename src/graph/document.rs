//! Transition graph documents
//!
//! Parses the JSON document describing a network's variables and, per
//! parameter point, the labeled edges of its state-transition graph.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::{OrderError, OrderResult};

/// One labeled edge of a transition graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EdgeSpec {
    /// Source node id
    pub from: u64,
    /// Target node id
    pub to: u64,
    /// Per-variable event label, e.g. `"M--"`
    pub label: String,
}

/// Transition graph of one parameter point
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParameterGraph {
    /// External parameter index
    pub index: u64,
    /// Node ids to keep; defaults to every edge endpoint. When present the
    /// graph is restricted to the sub-graph these nodes induce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<u64>>,
    /// Labeled edges
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

/// Top-level network document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkDocument {
    /// Variable names in label position order
    #[serde(default)]
    pub variables: Vec<String>,
    /// One graph per parameter point
    #[serde(default)]
    pub parameters: Vec<ParameterGraph>,
}

impl NetworkDocument {
    /// Read and parse a network document from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read graph file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse network document content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let document: Self =
            serde_json::from_str(content).context("Failed to parse graph document")?;
        document.validate()?;
        Ok(document)
    }

    /// Find the graph of a parameter point
    #[must_use]
    pub fn get_parameter(&self, index: u64) -> Option<&ParameterGraph> {
        self.parameters.iter().find(|p| p.index == index)
    }

    /// Pick the requested parameter points, or all of them when `requested`
    /// is empty, in the requested order.
    pub fn select(&self, requested: &[u64]) -> OrderResult<Vec<&ParameterGraph>> {
        if requested.is_empty() {
            return Ok(self.parameters.iter().collect());
        }
        requested
            .iter()
            .map(|&index| {
                self.get_parameter(index).ok_or_else(|| {
                    OrderError::Configuration(format!(
                        "parameter {index} is not present in the graph document"
                    ))
                })
            })
            .collect()
    }

    fn validate(&self) -> OrderResult<()> {
        if self.variables.is_empty() {
            return Err(OrderError::Configuration(
                "graph document lists no variables".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for parameter in &self.parameters {
            if !seen.insert(parameter.index) {
                return Err(OrderError::Configuration(format!(
                    "duplicate parameter index {}",
                    parameter.index
                )));
            }
        }

        Ok(())
    }
}
