//! Ambiguous run resolution
//!
//! A cycle may pass through several maxima (or minima) of one variable
//! without the opposite extremum in between. Each such run is ambiguous:
//! any single member could be the real extremum. Resolution keeps exactly
//! one member per run and yields every combination, so each result
//! alternates max/min per variable.
//!
//! Events are attributed to a variable when the event's variable name
//! starts with that variable's name. Names that are prefixes of one another
//! (`x` and `x1`) therefore share events; `extrema doctor` reports them.

use std::collections::HashSet;

use crate::extrema::event::{ExtremaSequence, ExtremumEvent, Kind};

/// Find every ambiguous run in `sequence`, as indices into it.
///
/// Runs are maximal blocks of same-kind events within each variable's own
/// subsequence. When a variable's first and last blocks share a kind they
/// wrap around the cycle and are merged. A variable with a single block
/// wraps onto itself, so that block is a run even when it holds one event.
/// Its event is then kept in every resolution, including when a shorter
/// prefix-sharing name claims the same event in a run of its own.
#[must_use]
pub fn ambiguous_runs(variables: &[String], sequence: &[ExtremumEvent]) -> Vec<Vec<usize>> {
    let mut runs = Vec::new();

    for name in variables {
        let mut blocks: Vec<(Kind, Vec<usize>)> = Vec::new();
        let owned = sequence
            .iter()
            .enumerate()
            .filter(|(_, event)| event.variable.starts_with(name.as_str()));
        for (index, event) in owned {
            match blocks.last_mut() {
                Some((kind, members)) if *kind == event.kind => members.push(index),
                _ => blocks.push((event.kind, vec![index])),
            }
        }

        if let [(_, sole)] = blocks.as_slice() {
            runs.push(sole.clone());
            continue;
        }

        let wraps = blocks.first().map(|b| b.0) == blocks.last().map(|b| b.0);
        if wraps {
            if let Some((_, tail)) = blocks.pop() {
                blocks[0].1.extend(tail);
            }
        }

        runs.extend(
            blocks
                .into_iter()
                .map(|(_, members)| members)
                .filter(|members| members.len() > 1),
        );
    }

    runs
}

/// Lazy cross product over the ways to keep one event per ambiguous run.
///
/// Holds one combination at a time. Yields the input unchanged exactly once
/// when there are no runs. Can be rewound with [`Resolutions::restart`].
#[derive(Debug, Clone)]
pub struct Resolutions<'a> {
    sequence: &'a [ExtremumEvent],
    runs: Vec<Vec<usize>>,
    ambiguous: HashSet<usize>,
    cursor: Vec<usize>,
    exhausted: bool,
}

impl<'a> Resolutions<'a> {
    /// Create a generator over `runs`, each a non-empty list of indices
    /// into `sequence`.
    #[must_use]
    pub fn new(sequence: &'a [ExtremumEvent], runs: Vec<Vec<usize>>) -> Self {
        let ambiguous = runs.iter().flatten().copied().collect();
        let cursor = vec![0; runs.len()];
        let exhausted = runs.iter().any(Vec::is_empty);
        Self {
            sequence,
            runs,
            ambiguous,
            cursor,
            exhausted,
        }
    }

    /// Number of combinations the generator walks through (saturating)
    #[must_use]
    pub fn combinations(&self) -> usize {
        self.runs
            .iter()
            .fold(1_usize, |acc, run| acc.saturating_mul(run.len()))
    }

    /// Rewind to the first combination
    pub fn restart(&mut self) {
        self.cursor.iter_mut().for_each(|slot| *slot = 0);
        self.exhausted = self.runs.iter().any(Vec::is_empty);
    }

    /// Step the odometer, rightmost run fastest.
    fn advance(&mut self) {
        for (slot, run) in self.cursor.iter_mut().zip(&self.runs).rev() {
            *slot += 1;
            if *slot < run.len() {
                return;
            }
            *slot = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for Resolutions<'_> {
    type Item = ExtremaSequence;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let chosen: HashSet<usize> = self
            .runs
            .iter()
            .zip(&self.cursor)
            .map(|(run, &slot)| run[slot])
            .collect();
        let candidate = self
            .sequence
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.ambiguous.contains(index) || chosen.contains(index))
            .map(|(_, event)| event.clone())
            .collect();

        self.advance();
        Some(candidate)
    }
}

/// Resolve every ambiguous run in `sequence`.
///
/// Returns the distinct resolved sequences in generation order; the input
/// itself when it has no ambiguous runs. Never empty.
#[must_use]
pub fn resolve(variables: &[String], sequence: &[ExtremumEvent]) -> Vec<ExtremaSequence> {
    let runs = ambiguous_runs(variables, sequence);
    if runs.is_empty() {
        return vec![sequence.to_vec()];
    }

    let mut seen = HashSet::new();
    Resolutions::new(sequence, runs)
        .filter(|candidate| seen.insert(candidate.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{alternates, names, seq, sorted};

    fn xyz() -> Vec<String> {
        names(&["x", "y", "z"])
    }

    #[test]
    fn test_unambiguous_sequence_returned_unchanged() {
        let input = seq(&["x max", "y max", "x min", "y min"]);
        assert_eq!(resolve(&xyz(), &input), vec![input]);
    }

    #[test]
    fn test_scenario_repeated_max_split_by_other_variables() {
        let input = seq(&[
            "x max", "y max", "z min", "y max", "x min", "y min", "z max",
        ]);
        let result = resolve(&xyz(), &input);
        assert_eq!(
            sorted(result),
            sorted(vec![
                seq(&["x max", "z min", "y max", "x min", "y min", "z max"]),
                seq(&["x max", "y max", "z min", "x min", "y min", "z max"]),
            ])
        );
    }

    #[test]
    fn test_adjacent_duplicates_collapse() {
        let input = seq(&[
            "x max", "y max", "z min", "y max", "x min", "x min", "y min", "z max",
        ]);
        let result = resolve(&xyz(), &input);
        assert_eq!(
            sorted(result),
            sorted(vec![
                seq(&["x max", "z min", "y max", "x min", "y min", "z max"]),
                seq(&["x max", "y max", "z min", "x min", "y min", "z max"]),
            ])
        );
    }

    #[test]
    fn test_two_runs_give_four_orders() {
        let input = seq(&[
            "x max", "y max", "z min", "y max", "x min", "x min", "y min", "x min", "z max",
        ]);
        let result = resolve(&xyz(), &input);
        assert_eq!(
            sorted(result),
            sorted(vec![
                seq(&["x max", "z min", "y max", "x min", "y min", "z max"]),
                seq(&["x max", "z min", "y max", "y min", "x min", "z max"]),
                seq(&["x max", "y max", "z min", "x min", "y min", "z max"]),
                seq(&["x max", "y max", "z min", "y min", "x min", "z max"]),
            ])
        );
    }

    #[test]
    fn test_wraparound_run_is_merged() {
        // x min ... x max ... x min: the two mins meet across the boundary
        let input = seq(&["x min", "y max", "x max", "y min", "x min"]);
        let runs = ambiguous_runs(&names(&["x", "y"]), &input);
        assert_eq!(runs, vec![vec![0, 4]]);

        let result = resolve(&names(&["x", "y"]), &input);
        assert_eq!(
            sorted(result),
            sorted(vec![
                seq(&["x min", "y max", "x max", "y min"]),
                seq(&["y max", "x max", "y min", "x min"]),
            ])
        );
    }

    #[test]
    fn test_sole_block_is_its_own_run() {
        let input = seq(&["x max", "y min"]);
        assert_eq!(ambiguous_runs(&names(&["x", "y"]), &input), vec![vec![0], vec![1]]);
        assert_eq!(resolve(&names(&["x", "y"]), &input), vec![input]);
    }

    #[test]
    fn test_one_sided_variable_keeps_one_event() {
        let input = seq(&["x max", "y min", "x max", "y max"]);
        let result = resolve(&names(&["x", "y"]), &input);
        for order in &result {
            assert_eq!(order.iter().filter(|e| e.variable == "x").count(), 1);
        }
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_prefix_names_share_events() {
        // "x" also claims the x1 events
        let input = seq(&["x max", "x1 max", "x1 min"]);
        let runs = ambiguous_runs(&names(&["x", "x1"]), &input);
        assert_eq!(runs, vec![vec![0, 1]]);
    }

    #[test]
    fn test_prefix_name_sole_block_keeps_its_event() {
        // x claims both maxima; x1 and y each have one block wrapping onto itself
        let vars = names(&["x", "x1", "y"]);
        let input = seq(&["x max", "x1 max", "y max"]);
        assert_eq!(
            ambiguous_runs(&vars, &input),
            vec![vec![0, 1], vec![1], vec![2]]
        );
        assert_eq!(
            sorted(resolve(&vars, &input)),
            sorted(vec![
                seq(&["x max", "x1 max", "y max"]),
                seq(&["x1 max", "y max"]),
            ])
        );
    }

    #[test]
    fn test_result_count_bounded_by_run_product() {
        let input = seq(&[
            "x max", "x max", "x max", "y min", "x min", "y max", "y max",
        ]);
        let vars = names(&["x", "y"]);
        let runs = ambiguous_runs(&vars, &input);
        let bound: usize = runs.iter().map(Vec::len).product();
        let result = resolve(&vars, &input);
        assert_eq!(bound, 6);
        assert!(result.len() <= bound);
        // every choice keeps an identical-looking event, so all six coincide
        assert_eq!(result, vec![seq(&["x max", "y min", "x min", "y max"])]);
    }

    #[test]
    fn test_results_alternate_and_shrink() {
        let vars = xyz();
        let input = seq(&[
            "x max", "y max", "z min", "y max", "x min", "x min", "y min", "x min", "z max",
            "z max",
        ]);
        for order in resolve(&vars, &input) {
            assert!(order.len() <= input.len());
            assert!(alternates(&vars, &order), "not alternating: {order:?}");
            for event in &order {
                let available = input.iter().filter(|e| *e == event).count();
                let used = order.iter().filter(|e| *e == event).count();
                assert!(used <= available);
            }
        }
    }

    #[test]
    fn test_resolutions_are_lazy_and_restartable() {
        let input = seq(&["x max", "x max", "y min", "y min", "x min"]);
        let vars = names(&["x", "y"]);
        let mut generator = Resolutions::new(&input, ambiguous_runs(&vars, &input));
        assert_eq!(generator.combinations(), 4);

        let first = generator.next().unwrap();
        assert_eq!(first, seq(&["x max", "y min", "x min"]));
        assert_eq!(generator.by_ref().count(), 3);
        assert!(generator.next().is_none());

        generator.restart();
        assert_eq!(generator.next(), Some(first));
    }

    #[test]
    fn test_resolutions_without_runs_yield_input_once() {
        let input = seq(&["x max", "x min"]);
        let mut generator = Resolutions::new(&input, Vec::new());
        assert_eq!(generator.combinations(), 1);
        assert_eq!(generator.next(), Some(input.clone()));
        assert!(generator.next().is_none());
    }
}
