//! This module implements a resumable informed best-first search.
//!
//! The search is A* with unit transition costs, generalised to any heuristic
//! that returns `None` for states that cannot lead to a terminal state. A
//! state is terminal when its heuristic value is zero, and the search stops
//! as soon as such a state is *generated*, not when it is popped.
//!
//! Nothing is computed until [`InformedSearch::step`] is called, and each call
//! pops exactly one state off the frontier. Callers racing several searches
//! can interleave steps and compare [`InformedSearch::current_bound`] between
//! them.

use crate::search::{
    search_engines::SearchStatistics, traceback_to_path, DistanceMap, Heuristic, HeuristicValue,
    Traceback, Transition,
};
use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use std::fmt::{self, Debug, Formatter};
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus<S> {
    /// The frontier is non-empty and no terminal state has been generated yet
    Searching,
    /// A terminal state has been generated
    Solved(S),
    /// The frontier emptied without generating a terminal state
    Exhausted,
}

/// Frontier priority: estimated total cost, then insertion order. Wrapped in
/// [`Reverse`] because [`PriorityQueue`] pops the maximum.
type FrontierPriority = Reverse<(HeuristicValue, u64)>;

pub struct InformedSearch<S, T, H>
where
    S: Clone + Eq + Hash,
{
    transition: T,
    heuristic: H,
    distances: DistanceMap<S>,
    traceback: Traceback<S>,
    frontier: PriorityQueue<S, FrontierPriority>,
    insertions: u64,
    status: SearchStatus<S>,
    statistics: SearchStatistics,
}

impl<S, T, H> InformedSearch<S, T, H>
where
    S: Clone + Eq + Hash,
    T: Transition<S>,
    H: Heuristic<S>,
{
    /// Start a search from the given seeds. Seeds without a heuristic value
    /// are dropped. If a seed is already terminal the search is solved
    /// immediately.
    pub fn new(seeds: impl IntoIterator<Item = S>, transition: T, heuristic: H) -> Self {
        let mut search = Self {
            transition,
            heuristic,
            distances: DistanceMap::new(),
            traceback: Traceback::new(),
            frontier: PriorityQueue::new(),
            insertions: 0,
            status: SearchStatus::Searching,
            statistics: SearchStatistics::new(),
        };

        for seed in seeds {
            if search.distances.contains_key(&seed) {
                continue;
            }
            search.statistics.increment_evaluated_nodes();
            let Some(remaining) = search.heuristic.evaluate(&seed) else {
                search.statistics.increment_pruned_nodes();
                continue;
            };
            search.distances.insert(seed.clone(), 0);
            search.traceback.insert(seed.clone(), None);
            if remaining == 0 {
                search.finish(SearchStatus::Solved(seed));
                return search;
            }
            search.push(seed, remaining);
        }

        if search.frontier.is_empty() {
            search.finish(SearchStatus::Exhausted);
        }
        search
    }

    /// Pop one state off the frontier and generate its successors. Does
    /// nothing once the search is solved or exhausted.
    pub fn step(&mut self) -> &SearchStatus<S> {
        if !self.is_searching() {
            return &self.status;
        }
        let Some((current, _)) = self.frontier.pop() else {
            self.finish(SearchStatus::Exhausted);
            return &self.status;
        };
        self.statistics.increment_expanded_nodes();

        let distance = self.distances[&current] + 1;
        for next in self.transition.successors(&current) {
            if self.distances.contains_key(&next) {
                continue;
            }
            self.statistics.increment_evaluated_nodes();
            let Some(remaining) = self.heuristic.evaluate(&next) else {
                self.statistics.increment_pruned_nodes();
                continue;
            };
            self.distances.insert(next.clone(), distance);
            self.traceback.insert(next.clone(), Some(current.clone()));
            self.statistics.increment_generated_nodes();
            if remaining == 0 {
                self.finish(SearchStatus::Solved(next));
                return &self.status;
            }
            self.push(next, distance + remaining);
        }

        if self.frontier.is_empty() {
            self.finish(SearchStatus::Exhausted);
        }
        &self.status
    }

    /// Step until the search is solved or exhausted.
    pub fn run(&mut self) -> &SearchStatus<S> {
        while self.is_searching() {
            self.step();
        }
        &self.status
    }
}

impl<S, T, H> InformedSearch<S, T, H>
where
    S: Clone + Eq + Hash,
{
    fn push(&mut self, state: S, estimate: HeuristicValue) {
        self.frontier.push(state, Reverse((estimate, self.insertions)));
        self.insertions += 1;
    }

    fn finish(&mut self, status: SearchStatus<S>) {
        self.frontier.clear();
        self.status = status;
        self.statistics.finalise_search();
    }

    pub fn status(&self) -> &SearchStatus<S> {
        &self.status
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.status, SearchStatus::Searching)
    }

    /// The traceback and terminal state, once a terminal has been generated.
    pub fn solution(&self) -> Option<(&Traceback<S>, &S)> {
        match &self.status {
            SearchStatus::Solved(terminal) => Some((&self.traceback, terminal)),
            _ => None,
        }
    }

    /// The path from the terminal back to its seed, once solved.
    pub fn path(&self) -> Option<Vec<S>> {
        self.solution()
            .map(|(traceback, terminal)| traceback_to_path(traceback, terminal))
    }

    /// A lower bound on the length of any solution: the smallest estimate on
    /// the frontier while searching, the exact distance once solved, and
    /// `None` once the search is exhausted.
    pub fn current_bound(&self) -> Option<HeuristicValue> {
        match &self.status {
            SearchStatus::Searching => self
                .frontier
                .peek()
                .map(|(_, Reverse((estimate, _)))| *estimate),
            SearchStatus::Solved(terminal) => self.distances.get(terminal).copied(),
            SearchStatus::Exhausted => None,
        }
    }

    /// Distances recorded so far. Once exhausted these are only useful for
    /// diagnostics.
    pub fn distances(&self) -> &DistanceMap<S> {
        &self.distances
    }

    pub fn traceback(&self) -> &Traceback<S> {
        &self.traceback
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn into_distances(self) -> DistanceMap<S> {
        self.distances
    }

    /// Split the search into its traceback and terminal state, if any.
    pub fn into_traceback(self) -> (Traceback<S>, Option<S>) {
        let terminal = match self.status {
            SearchStatus::Solved(terminal) => Some(terminal),
            _ => None,
        };
        (self.traceback, terminal)
    }
}

impl<S, T, H> Debug for InformedSearch<S, T, H>
where
    S: Clone + Eq + Hash + Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("InformedSearch")
            .field("status", &self.status)
            .field("reached", &self.distances.len())
            .field("frontier", &self.frontier.len())
            .field("statistics", &self.statistics)
            .finish()
    }
}
