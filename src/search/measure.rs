//! Unweighted shortest distances by multi-source breadth-first search. Every
//! transition costs one.
//!
//! The three functions differ only in when they stop, so they agree on the
//! distance of every state they all report.

use crate::search::{DistanceMap, Transition};
use std::collections::HashSet;
use std::hash::Hash;

fn seed_distances<S>(seeds: impl IntoIterator<Item = S>) -> (DistanceMap<S>, Vec<S>)
where
    S: Clone + Eq + Hash,
{
    let mut distances = DistanceMap::new();
    let mut shell = Vec::new();
    for seed in seeds {
        if !distances.contains_key(&seed) {
            distances.insert(seed.clone(), 0);
            shell.push(seed);
        }
    }
    (distances, shell)
}

/// Distances from the seeds to every reachable state.
pub fn measure_all<S, T>(seeds: impl IntoIterator<Item = S>, transition: &mut T) -> DistanceMap<S>
where
    S: Clone + Eq + Hash,
    T: Transition<S> + ?Sized,
{
    let (mut distances, mut shell) = seed_distances(seeds);
    let mut distance = 0;
    while !shell.is_empty() {
        distance += 1;
        let mut next_shell = Vec::new();
        for current in &shell {
            for next in transition.successors(current) {
                if !distances.contains_key(&next) {
                    distances.insert(next.clone(), distance);
                    next_shell.push(next);
                }
            }
        }
        shell = next_shell;
    }
    distances
}

/// Distances from the seeds, stopping once every target has a distance.
/// Unreachable targets are simply missing from the result.
pub fn measure_until_all<S, T>(
    seeds: impl IntoIterator<Item = S>,
    targets: impl IntoIterator<Item = S>,
    transition: &mut T,
) -> DistanceMap<S>
where
    S: Clone + Eq + Hash,
    T: Transition<S> + ?Sized,
{
    let targets: HashSet<S> = targets.into_iter().collect();
    let (mut distances, mut shell) = seed_distances(seeds);
    let mut remaining = targets
        .iter()
        .filter(|target| !distances.contains_key(*target))
        .count();
    if remaining == 0 {
        return distances;
    }

    let mut distance = 0;
    while !shell.is_empty() {
        distance += 1;
        let mut next_shell = Vec::new();
        for current in &shell {
            for next in transition.successors(current) {
                if distances.contains_key(&next) {
                    continue;
                }
                distances.insert(next.clone(), distance);
                if targets.contains(&next) {
                    remaining -= 1;
                    if remaining == 0 {
                        return distances;
                    }
                }
                next_shell.push(next);
            }
        }
        shell = next_shell;
    }
    distances
}

/// Distances from the seeds, stopping as soon as any target has a distance.
pub fn measure_until_any<S, T>(
    seeds: impl IntoIterator<Item = S>,
    targets: impl IntoIterator<Item = S>,
    transition: &mut T,
) -> DistanceMap<S>
where
    S: Clone + Eq + Hash,
    T: Transition<S> + ?Sized,
{
    let targets: HashSet<S> = targets.into_iter().collect();
    let (mut distances, mut shell) = seed_distances(seeds);
    if shell.iter().any(|seed| targets.contains(seed)) {
        return distances;
    }

    let mut distance = 0;
    while !shell.is_empty() {
        distance += 1;
        let mut next_shell = Vec::new();
        for current in &shell {
            for next in transition.successors(current) {
                if distances.contains_key(&next) {
                    continue;
                }
                distances.insert(next.clone(), distance);
                if targets.contains(&next) {
                    return distances;
                }
                next_shell.push(next);
            }
        }
        shell = next_shell;
    }
    distances
}
