//! Turning the output of a search into a concrete path.

use crate::search::{measure_until_all, ActionTransitionTable, DistanceMap, Traceback, Transition};
use indexmap::IndexSet;
use std::hash::Hash;

/// Follow predecessor links from `terminal` back to a seed. The returned path
/// is in terminal to seed order; reverse it for the forward path.
///
/// A state missing from the traceback is treated like a seed.
pub fn traceback_to_path<S>(traceback: &Traceback<S>, terminal: &S) -> Vec<S>
where
    S: Clone + Eq + Hash,
{
    let mut path = vec![terminal.clone()];
    let mut current = terminal;
    while let Some(Some(predecessor)) = traceback.get(current) {
        path.push(predecessor.clone());
        current = predecessor;
    }
    path
}

/// Walk downhill through a distance map from `source` to a state at distance
/// zero, always moving to the neighbor with the smallest recorded distance.
/// Ties go to the neighbor the transition lists first.
///
/// Returns `None` if `source` has no distance, or if at some point no
/// neighbor is strictly closer than the current state.
pub fn path_from_distances<S, T>(
    source: &S,
    transition: &mut T,
    distances: &DistanceMap<S>,
) -> Option<Vec<S>>
where
    S: Clone + Eq + Hash,
    T: Transition<S> + ?Sized,
{
    let mut current = source.clone();
    let mut current_distance = *distances.get(&current)?;
    let mut path = vec![current.clone()];
    while current_distance != 0 {
        let mut best: Option<(u32, S)> = None;
        for next in transition.successors(&current) {
            if let Some(&distance) = distances.get(&next) {
                if best.as_ref().map_or(true, |(best_distance, _)| distance < *best_distance) {
                    best = Some((distance, next));
                }
            }
        }
        let (distance, next) = best.filter(|(distance, _)| *distance < current_distance)?;
        path.push(next.clone());
        current = next;
        current_distance = distance;
    }
    Some(path)
}

/// All actions out of `source` that lead to a state as close as possible to
/// one of the equally good `targets`. Distances are measured by a backward
/// search from the targets. Returns an empty set if no target is reachable.
pub fn best_actions<S, A>(
    source: &S,
    targets: impl IntoIterator<Item = S>,
    backwards: &ActionTransitionTable<S, A>,
    forwards: &ActionTransitionTable<S, A>,
) -> IndexSet<A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    let mut backward_transition =
        |state: &S| backwards.neighbors(state).cloned().collect::<Vec<_>>();
    let distances = measure_until_all(targets, [source.clone()], &mut backward_transition);

    let scored: Vec<(u32, &S)> = forwards
        .neighbors(source)
        .filter_map(|sink| distances.get(sink).map(|&distance| (distance, sink)))
        .collect();
    let Some(best_distance) = scored.iter().map(|(distance, _)| *distance).min() else {
        return IndexSet::new();
    };
    scored
        .into_iter()
        .filter(|(distance, _)| *distance == best_distance)
        .filter_map(|(_, sink)| forwards.action(source, sink).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{measure_all, BackwardsForwardsTable, TransitionTable};

    #[test]
    fn traceback_walks_to_seed() {
        let traceback = Traceback::from([(1, None), (2, Some(1)), (3, Some(2)), (9, Some(1))]);
        assert_eq!(traceback_to_path(&traceback, &3), vec![3, 2, 1]);
        assert_eq!(traceback_to_path(&traceback, &1), vec![1]);
    }

    #[test]
    fn distance_path_prefers_first_listed_on_ties() {
        let mut table = TransitionTable::new();
        for (source, sink) in [(0, 1), (0, 2), (1, 3), (2, 3)] {
            table.add_symmetric(source, sink);
        }
        let distances = measure_all([0], &mut table);
        // 3 is listed with 1 before 2
        assert_eq!(
            path_from_distances(&3, &mut table, &distances),
            Some(vec![3, 1, 0])
        );
    }

    #[test]
    fn distance_path_requires_progress() {
        let mut table = TransitionTable::new();
        table.add(0, 1);
        let distances = DistanceMap::from([(0, 0), (1, 1)]);
        // 1 has no neighbor closer to the seed
        assert_eq!(path_from_distances(&1, &mut table, &distances), None);
        assert_eq!(path_from_distances(&5, &mut table, &distances), None);
        assert_eq!(path_from_distances(&0, &mut table, &distances), Some(vec![0]));
    }

    fn branching_table() -> BackwardsForwardsTable<&'static str, &'static str> {
        let mut t = BackwardsForwardsTable::new();
        for (source, sink, action) in [
            ("a1", "a2", "-a->"),
            ("a2", "a3", "-a->"),
            ("a3", "a4", "-a->"),
            ("a4", "x1", "-x->"),
            ("x1", "x2", "-x->"),
            ("x2", "x3", "-x->"),
            ("x3", "x4", "-x->"),
            ("x4", "fail", "-x->"),
            ("a4", "y1", "-y->"),
            ("y1", "y2", "-y->"),
            ("y2", "win1", "-y->"),
            ("a4", "z1", "-z->"),
            ("z1", "z2", "-z->"),
            ("z2", "win2", "-z->"),
        ] {
            t.add(source, sink, action);
        }
        t
    }

    #[test]
    fn best_actions_from_branch_point() {
        let t = branching_table();
        let targets = ["win1", "win2"];
        assert_eq!(
            best_actions(&"a4", targets, &t.backwards, &t.forwards),
            IndexSet::from(["-y->", "-z->"])
        );
        assert_eq!(
            best_actions(&"a1", targets, &t.backwards, &t.forwards),
            IndexSet::from(["-a->"])
        );
        assert_eq!(
            best_actions(&"z1", targets, &t.backwards, &t.forwards),
            IndexSet::from(["-z->"])
        );
    }

    #[test]
    fn best_actions_without_route_is_empty() {
        let t = branching_table();
        assert!(best_actions(&"x2", ["win1"], &t.backwards, &t.forwards).is_empty());
    }
}
