//! Labeled state-transition graph
//!
//! Wraps a petgraph `DiGraph` whose node weights are external node ids and
//! whose edge weights are event labels.

use std::collections::{BTreeSet, HashMap, HashSet};

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::graph::cycles::simple_cycles;
use crate::graph::document::ParameterGraph;

/// Sequence of edge labels along one closed cycle
pub type LabeledCycle = Vec<String>;

/// Directed graph with one label per edge
#[derive(Debug, Clone, Default)]
pub struct TransitionGraph {
    graph: DiGraph<u64, String>,
    index_of: HashMap<u64, NodeIndex>,
}

impl TransitionGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph of a parameter point, restricted to its `nodes` when
    /// they are given.
    #[must_use]
    pub fn from_parameter(parameter: &ParameterGraph) -> Self {
        let mut graph = Self::new();
        for edge in &parameter.edges {
            graph.add_edge(edge.from, edge.to, &edge.label);
        }
        match &parameter.nodes {
            Some(nodes) => {
                let mut restricted = graph.restrict(nodes);
                for &id in nodes {
                    restricted.add_node(id);
                }
                restricted
            }
            None => graph,
        }
    }

    /// Add a node if it is not present yet
    pub fn add_node(&mut self, id: u64) -> NodeIndex {
        *self
            .index_of
            .entry(id)
            .or_insert_with(|| self.graph.add_node(id))
    }

    /// Add an edge, replacing the label of an existing edge between the
    /// same nodes.
    pub fn add_edge(&mut self, from: u64, to: u64, label: &str) {
        let a = self.add_node(from);
        let b = self.add_node(to);
        self.graph.update_edge(a, b, label.to_string());
    }

    /// Sub-graph induced by `nodes`: those nodes and the edges between them.
    #[must_use]
    pub fn restrict(&self, nodes: &[u64]) -> Self {
        let keep: HashSet<u64> = nodes.iter().copied().collect();
        let mut restricted = Self::new();
        for edge in self.graph.edge_indices() {
            let Some((a, b)) = self.graph.edge_endpoints(edge) else {
                continue;
            };
            let (from, to) = (self.graph[a], self.graph[b]);
            if keep.contains(&from) && keep.contains(&to) {
                restricted.add_edge(from, to, &self.graph[edge]);
            }
        }
        restricted
    }

    /// Number of nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Label of the edge `from -> to`, if present
    #[must_use]
    pub fn label(&self, from: u64, to: u64) -> Option<&str> {
        let a = self.index_of.get(&from)?;
        let b = self.index_of.get(&to)?;
        self.graph
            .find_edge(*a, *b)
            .map(|edge| self.graph[edge].as_str())
    }

    /// Iterate `(from, to, label)` for every edge
    pub fn edges(&self) -> impl Iterator<Item = (u64, u64, &str)> + '_ {
        self.graph.edge_indices().filter_map(move |edge| {
            let (a, b) = self.graph.edge_endpoints(edge)?;
            Some((self.graph[a], self.graph[b], self.graph[edge].as_str()))
        })
    }

    /// Returns true if the graph contains at least one cycle
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Every simple cycle as node ids, start node not repeated
    #[must_use]
    pub fn simple_cycles(&self) -> Vec<Vec<u64>> {
        simple_cycles(&self.graph)
            .into_iter()
            .map(|cycle| cycle.into_iter().map(|ix| self.graph[ix]).collect())
            .collect()
    }

    /// Distinct label sequences of every simple cycle.
    ///
    /// Each cycle is closed by returning to its start node; the labels are
    /// read along consecutive node pairs of the closed cycle.
    #[must_use]
    pub fn labeled_cycles(&self) -> BTreeSet<LabeledCycle> {
        simple_cycles(&self.graph)
            .into_iter()
            .filter_map(|mut cycle| {
                let start = *cycle.first()?;
                cycle.push(start);
                cycle
                    .windows(2)
                    .map(|pair| {
                        self.graph
                            .find_edge(pair[0], pair[1])
                            .map(|edge| self.graph[edge].clone())
                    })
                    .collect::<Option<LabeledCycle>>()
            })
            .collect()
    }
}
