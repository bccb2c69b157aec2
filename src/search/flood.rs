//! Unweighted reachability. These functions only answer "what can be reached",
//! see [`crate::search::measure`] for distances.

use crate::search::Transition;
use indexmap::IndexSet;
use std::hash::Hash;

/// The set of states reachable from any seed, seeds included, in discovery
/// order. Terminates only if the reachable set is finite.
pub fn flood_all<S, T>(seeds: impl IntoIterator<Item = S>, transition: &mut T) -> IndexSet<S>
where
    S: Clone + Eq + Hash,
    T: Transition<S> + ?Sized,
{
    let mut total: IndexSet<S> = seeds.into_iter().collect();
    let mut shell: Vec<S> = total.iter().cloned().collect();
    while !shell.is_empty() {
        let mut next_shell = Vec::new();
        for current in &shell {
            for next in transition.successors(current) {
                if total.insert(next.clone()) {
                    next_shell.push(next);
                }
            }
        }
        shell = next_shell;
    }
    total
}

/// The subset of `targets` reachable from the seeds, in discovery order.
///
/// The traversal stops as soon as the last target is discovered, without
/// expanding anything further.
pub fn flood_until<S, T>(
    seeds: impl IntoIterator<Item = S>,
    targets: impl IntoIterator<Item = S>,
    transition: &mut T,
) -> IndexSet<S>
where
    S: Clone + Eq + Hash,
    T: Transition<S> + ?Sized,
{
    let targets: IndexSet<S> = targets.into_iter().collect();
    let mut total: IndexSet<S> = seeds.into_iter().collect();
    let mut found: IndexSet<S> = total
        .iter()
        .filter(|seed| targets.contains(*seed))
        .cloned()
        .collect();
    if found.len() == targets.len() {
        return found;
    }

    let mut shell: Vec<S> = total.iter().cloned().collect();
    while !shell.is_empty() {
        let mut next_shell = Vec::new();
        for current in &shell {
            for next in transition.successors(current) {
                if total.contains(&next) {
                    continue;
                }
                if targets.contains(&next) {
                    found.insert(next.clone());
                    if found.len() == targets.len() {
                        return found;
                    }
                }
                total.insert(next.clone());
                next_shell.push(next);
            }
        }
        shell = next_shell;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::TransitionTable;

    fn table(pairs: &[(i32, i32)], symmetric: bool) -> TransitionTable<i32> {
        let mut table = TransitionTable::new();
        for &(source, sink) in pairs {
            if symmetric {
                table.add_symmetric(source, sink);
            } else {
                table.add(source, sink);
            }
        }
        table
    }

    #[test]
    fn flood_all_directed() {
        let mut t = table(&[(1, 2), (0, 5), (2, 3), (2, 3), (2, 5), (3, 4)], false);
        assert_eq!(flood_all([2], &mut t), IndexSet::from([2, 3, 4, 5]));
    }

    #[test]
    fn flood_all_symmetric() {
        let mut t = table(&[(1, 2), (0, 5), (2, 3), (2, 3), (2, 5), (3, 4)], true);
        assert_eq!(flood_all([2], &mut t), IndexSet::from([0, 1, 2, 3, 4, 5]));
    }

    #[test]
    fn flood_all_is_closed_and_contains_seeds() {
        let pairs = [(1, 2), (2, 3), (3, 1), (4, 5), (6, 4), (3, 7)];
        let mut t = table(&pairs, false);
        let reached = flood_all([1, 6], &mut t);
        assert!(reached.contains(&1) && reached.contains(&6));
        for state in &reached {
            for next in t.neighbors(state) {
                assert!(reached.contains(next));
            }
        }
        // every reached state is a seed or the sink of an edge out of a
        // reached state
        for state in &reached {
            let is_seed = *state == 1 || *state == 6;
            let has_reached_parent = pairs
                .iter()
                .any(|(source, sink)| sink == state && reached.contains(source));
            assert!(is_seed || has_reached_parent);
        }
    }

    #[test]
    fn flood_until_finds_reachable_subset() {
        let mut t = table(&[(1, 2), (2, 3), (4, 5), (5, 6)], true);
        assert_eq!(flood_until([1], [2, 3, 4], &mut t), IndexSet::from([2, 3]));
    }

    #[test]
    fn flood_until_directed_chain() {
        let mut t = table(&[(1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 7)], false);
        assert_eq!(flood_until([3], [6], &mut t), IndexSet::from([6]));
    }

    #[test]
    fn flood_until_stops_at_discovery() {
        let mut expanded = Vec::new();
        let mut transition = |x: &i32| {
            expanded.push(*x);
            vec![x + 1, x + 2]
        };
        let found = flood_until([0], [2], &mut transition);
        assert_eq!(found, IndexSet::from([2]));
        // 2 is discovered while expanding 0, so nothing else is expanded
        assert_eq!(expanded, vec![0]);
    }

    #[test]
    fn flood_until_seed_targets_count_immediately() {
        let mut transition = |_: &i32| -> Vec<i32> { panic!("should not expand") };
        assert_eq!(flood_until([4, 5], [5], &mut transition), IndexSet::from([5]));
    }

    #[test]
    fn flood_until_infinite_graph_terminates_when_all_found() {
        let mut transition = |x: &i32| vec![x + 1];
        assert_eq!(
            flood_until([0], [3, 10], &mut transition),
            IndexSet::from([3, 10])
        );
    }
}
