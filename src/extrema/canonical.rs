//! Rotation-equivalence reduction
//!
//! Two orders are the same cyclic order when one is a rotation of the
//! other. [`CanonicalSet`] keeps one representative per rotation class.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::extrema::event::{ExtremaSequence, ExtremumEvent};

/// Returns true when `candidate` equals some cyclic shift of `cycle`.
#[must_use]
pub fn is_rotation(candidate: &[ExtremumEvent], cycle: &[ExtremumEvent]) -> bool {
    if candidate.len() != cycle.len() {
        return false;
    }
    if cycle.is_empty() {
        return true;
    }
    (0..cycle.len()).any(|shift| {
        cycle[shift..]
            .iter()
            .chain(&cycle[..shift])
            .eq(candidate.iter())
    })
}

/// Accumulated extrema orders, at most one per rotation class.
///
/// A candidate is only compared against members of the same length and the
/// same set of distinct events. Repeat counts are not part of that
/// pre-filter; the rotation test itself is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CanonicalSet {
    orders: BTreeSet<ExtremaSequence>,
}

impl CanonicalSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `order` unless a rotation of it is already present.
    ///
    /// Returns true if it was inserted as a new representative.
    pub fn insert(&mut self, order: ExtremaSequence) -> bool {
        let represented = {
            let values: HashSet<&ExtremumEvent> = order.iter().collect();
            self.orders
                .iter()
                .filter(|member| {
                    member.len() == order.len()
                        && member.iter().collect::<HashSet<_>>() == values
                })
                .any(|member| is_rotation(&order, member))
        };
        if represented {
            return false;
        }
        self.orders.insert(order)
    }

    /// Number of representatives
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns true if no order has been accumulated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Returns true if `order` itself is a stored representative
    #[must_use]
    pub fn contains(&self, order: &[ExtremumEvent]) -> bool {
        self.orders.iter().any(|member| member.as_slice() == order)
    }

    /// Returns true if `order` or one of its rotations is stored
    #[must_use]
    pub fn represents(&self, order: &[ExtremumEvent]) -> bool {
        self.orders.iter().any(|member| is_rotation(order, member))
    }

    /// Iterate representatives in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &ExtremaSequence> {
        self.orders.iter()
    }
}

impl Extend<ExtremaSequence> for CanonicalSet {
    fn extend<I: IntoIterator<Item = ExtremaSequence>>(&mut self, iter: I) {
        for order in iter {
            self.insert(order);
        }
    }
}

impl FromIterator<ExtremaSequence> for CanonicalSet {
    fn from_iter<I: IntoIterator<Item = ExtremaSequence>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for CanonicalSet {
    type Item = ExtremaSequence;
    type IntoIter = std::collections::btree_set::IntoIter<ExtremaSequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.into_iter()
    }
}

impl<'a> IntoIterator for &'a CanonicalSet {
    type Item = &'a ExtremaSequence;
    type IntoIter = std::collections::btree_set::Iter<'a, ExtremaSequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}

/// Fold `orders` into `existing`, returning the grown set.
#[must_use]
pub fn accumulate<I>(mut existing: CanonicalSet, orders: I) -> CanonicalSet
where
    I: IntoIterator<Item = ExtremaSequence>,
{
    existing.extend(orders);
    existing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::seq;

    #[test]
    fn test_is_rotation() {
        let a = seq(&["x max", "y min", "x min"]);
        assert!(is_rotation(&seq(&["y min", "x min", "x max"]), &a));
        assert!(is_rotation(&seq(&["x min", "x max", "y min"]), &a));
        assert!(is_rotation(&a, &a));
    }

    #[test]
    fn test_reversal_is_not_rotation() {
        let a = seq(&["x max", "y min", "x min"]);
        assert!(!is_rotation(&seq(&["x min", "y min", "x max"]), &a));
    }

    #[test]
    fn test_length_mismatch_is_not_rotation() {
        let a = seq(&["x max", "x min"]);
        assert!(!is_rotation(&seq(&["x max", "x min", "x max"]), &a));
    }

    #[test]
    fn test_rotation_recognised_on_insert() {
        let set = accumulate(
            CanonicalSet::new(),
            vec![seq(&["x max", "y min"]), seq(&["y min", "x max"])],
        );
        assert_eq!(set.len(), 1);
        assert!(set.contains(&seq(&["x max", "y min"])));
        assert!(set.represents(&seq(&["y min", "x max"])));
    }

    #[test]
    fn test_insert_reports_outcome() {
        let mut set = CanonicalSet::new();
        assert!(set.insert(seq(&["x max", "y max", "x min", "y min"])));
        assert!(!set.insert(seq(&["x min", "y min", "x max", "y max"])));
        assert!(!set.insert(seq(&["x max", "y max", "x min", "y min"])));
        assert!(set.insert(seq(&["x max", "y min", "x min", "y max"])));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_same_values_different_counts_both_kept() {
        // Same length and distinct-value set, but not rotations of each other
        let mut set = CanonicalSet::new();
        assert!(set.insert(seq(&["x max", "x max", "y min"])));
        assert!(set.insert(seq(&["x max", "y min", "y min"])));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_no_two_members_are_rotations() {
        let base = seq(&["x max", "y max", "z min", "x min", "y min", "z max"]);
        let mut orders = Vec::new();
        for shift in 0..base.len() {
            let mut rotated = base.clone();
            rotated.rotate_left(shift);
            orders.push(rotated);
        }
        orders.push(seq(&["x max", "z min", "y max", "x min", "y min", "z max"]));

        let set: CanonicalSet = orders.into_iter().collect();
        assert_eq!(set.len(), 2);
        let members: Vec<_> = set.iter().collect();
        for (i, a) in members.iter().enumerate() {
            for b in members.iter().skip(i + 1) {
                assert!(!is_rotation(a, b));
            }
        }
    }

    #[test]
    fn test_first_arrival_is_representative() {
        let set = accumulate(
            CanonicalSet::new(),
            vec![seq(&["y min", "x max"]), seq(&["x max", "y min"])],
        );
        assert!(set.contains(&seq(&["y min", "x max"])));
        assert!(!set.contains(&seq(&["x max", "y min"])));
    }

    #[test]
    fn test_serializes_as_token_lists() {
        let set = accumulate(CanonicalSet::new(), vec![seq(&["x max", "x min"])]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"[["x max","x min"]]"#);
    }
}
