//! Simple cycle enumeration
//!
//! Johnson's algorithm: strongly connected components are searched one at
//! a time from their lowest node, that node is then removed and the
//! remaining components are searched again. Blocking keeps each search
//! from re-exploring dead ends, so the cost per cycle found stays linear.

use std::collections::{HashMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

/// Enumerate every simple cycle of `graph`.
///
/// Each cycle lists its nodes in traversal order without repeating the
/// start node at the end. Self-loops are reported as one-node cycles.
#[must_use]
pub fn simple_cycles<N, E>(graph: &DiGraph<N, E>) -> Vec<Vec<NodeIndex>> {
    let mut cycles = Vec::new();
    let everything: HashSet<NodeIndex> = graph.node_indices().collect();
    let mut pending = cyclic_components(graph, &everything);

    while let Some(component) = pending.pop() {
        let Some(&start) = component.iter().min() else {
            continue;
        };
        let mut members: HashSet<NodeIndex> = component.into_iter().collect();
        search_from(graph, start, &members, &mut cycles);

        members.remove(&start);
        pending.extend(cyclic_components(graph, &members));
    }

    cycles
}

/// Strongly connected components of the sub-graph induced by `members`
/// that can hold a cycle: more than one node, or one node with a self-loop.
fn cyclic_components<N, E>(
    graph: &DiGraph<N, E>,
    members: &HashSet<NodeIndex>,
) -> Vec<Vec<NodeIndex>> {
    let induced = graph.filter_map(
        |ix, _| members.contains(&ix).then_some(ix),
        |_, _| Some(()),
    );

    tarjan_scc(&induced)
        .into_iter()
        .map(|component| component.into_iter().map(|ix| induced[ix]).collect::<Vec<_>>())
        .filter(|component| {
            component.len() > 1 || component.first().is_some_and(|&n| graph.contains_edge(n, n))
        })
        .collect()
}

/// Find every cycle through `start` that stays inside `members`.
fn search_from<N, E>(
    graph: &DiGraph<N, E>,
    start: NodeIndex,
    members: &HashSet<NodeIndex>,
    cycles: &mut Vec<Vec<NodeIndex>>,
) {
    let successors = |node: NodeIndex| -> Vec<NodeIndex> {
        let mut next: Vec<NodeIndex> = graph
            .neighbors(node)
            .filter(|n| members.contains(n))
            .collect();
        next.sort_unstable();
        next.dedup();
        next
    };

    let mut path = vec![start];
    let mut blocked: HashSet<NodeIndex> = HashSet::from([start]);
    let mut blocked_by: HashMap<NodeIndex, HashSet<NodeIndex>> = HashMap::new();
    // whether the subtree under each path node closed a cycle
    let mut closed = vec![false];
    let mut stack = vec![(start, successors(start))];

    while let Some((node, pending)) = stack.last_mut() {
        if let Some(next) = pending.pop() {
            if next == start {
                cycles.push(path.clone());
                if let Some(flag) = closed.last_mut() {
                    *flag = true;
                }
            } else if blocked.insert(next) {
                path.push(next);
                closed.push(false);
                stack.push((next, successors(next)));
            }
            continue;
        }

        let node = *node;
        stack.pop();
        path.pop();
        let found = closed.pop().unwrap_or(false);
        if found {
            unblock(node, &mut blocked, &mut blocked_by);
        } else {
            for successor in successors(node) {
                blocked_by.entry(successor).or_default().insert(node);
            }
        }
        if let Some(flag) = closed.last_mut() {
            *flag |= found;
        }
    }
}

fn unblock(
    node: NodeIndex,
    blocked: &mut HashSet<NodeIndex>,
    blocked_by: &mut HashMap<NodeIndex, HashSet<NodeIndex>>,
) {
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if blocked.remove(&current) {
            if let Some(waiting) = blocked_by.remove(&current) {
                stack.extend(waiting);
            }
        }
    }
}
