//! One-shot drivers over [`InformedSearch`] for callers that do not need to
//! interleave steps.

use crate::search::{
    search_engines::InformedSearch, DistanceMap, Heuristic, Traceback, Transition,
};
use std::hash::Hash;

/// Run an informed search to completion and return the distances it
/// recorded. If a terminal state was found it is in the map, and
/// [`crate::search::path_from_distances`] can walk back from it to a seed.
pub fn measure_informed<S, T, H>(
    seeds: impl IntoIterator<Item = S>,
    transition: T,
    heuristic: H,
) -> DistanceMap<S>
where
    S: Clone + Eq + Hash,
    T: Transition<S>,
    H: Heuristic<S>,
{
    let mut search = InformedSearch::new(seeds, transition, heuristic);
    search.run();
    search.into_distances()
}

/// Run an informed search to completion and return its traceback together
/// with the terminal state, or `None` if no terminal state is reachable.
pub fn measure_informed_traceback<S, T, H>(
    seeds: impl IntoIterator<Item = S>,
    transition: T,
    heuristic: H,
) -> (Traceback<S>, Option<S>)
where
    S: Clone + Eq + Hash,
    T: Transition<S>,
    H: Heuristic<S>,
{
    let mut search = InformedSearch::new(seeds, transition, heuristic);
    search.run();
    search.into_traceback()
}
