//! Explicit transition tables, for when the edges of a graph are known up
//! front rather than computed on the fly from a state.

use crate::search::Transition;
use indexmap::IndexSet;
use std::collections::HashMap;
use std::hash::Hash;

/// Directed edges between hashable states. Sinks are kept in insertion order
/// so that searches over a table are deterministic.
#[derive(Debug, Clone)]
pub struct TransitionTable<S> {
    neighbors: HashMap<S, IndexSet<S>>,
}

impl<S> Default for TransitionTable<S> {
    fn default() -> Self {
        Self {
            neighbors: HashMap::new(),
        }
    }
}

impl<S> TransitionTable<S>
where
    S: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, source: S, sink: S) {
        self.neighbors.entry(source).or_default().insert(sink);
    }

    /// Add an edge in each direction.
    pub fn add_symmetric(&mut self, source: S, sink: S) {
        self.add(source.clone(), sink.clone());
        self.add(sink, source);
    }

    pub fn neighbors(&self, source: &S) -> impl Iterator<Item = &S> {
        self.neighbors.get(source).into_iter().flatten()
    }

    pub fn contains_edge(&self, source: &S, sink: &S) -> bool {
        self.neighbors
            .get(source)
            .is_some_and(|sinks| sinks.contains(sink))
    }

    /// Number of source states with at least one outgoing edge.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

impl<S> Transition<S> for TransitionTable<S>
where
    S: Clone + Eq + Hash,
{
    fn successors(&mut self, source: &S) -> Vec<S> {
        self.neighbors(source).cloned().collect()
    }
}

/// A transition table that also records the action causing each transition.
///
/// Adding the same `(source, sink)` pair twice with different actions is a
/// caller error: the last action wins, and the reverse lookup keeps both
/// actions pointing at the sink.
#[derive(Debug, Clone)]
pub struct ActionTransitionTable<S, A> {
    table: TransitionTable<S>,
    actions: HashMap<(S, S), A>,
    sinks: HashMap<(S, A), S>,
}

impl<S, A> Default for ActionTransitionTable<S, A> {
    fn default() -> Self {
        Self {
            table: TransitionTable::default(),
            actions: HashMap::new(),
            sinks: HashMap::new(),
        }
    }
}

impl<S, A> ActionTransitionTable<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, source: S, sink: S, action: A) {
        self.table.add(source.clone(), sink.clone());
        self.actions.insert((source.clone(), sink.clone()), action.clone());
        self.sinks.insert((source, action), sink);
    }

    pub fn add_symmetric(&mut self, source: S, sink: S, action: A) {
        self.add(source.clone(), sink.clone(), action.clone());
        self.add(sink, source, action);
    }

    pub fn neighbors(&self, source: &S) -> impl Iterator<Item = &S> {
        self.table.neighbors(source)
    }

    /// The action that moves from `source` to `sink`, if the edge exists.
    pub fn action(&self, source: &S, sink: &S) -> Option<&A> {
        self.actions.get(&(source.clone(), sink.clone()))
    }

    /// The state reached by taking `action` in `source`, if known.
    pub fn sink(&self, source: &S, action: &A) -> Option<&S> {
        self.sinks.get(&(source.clone(), action.clone()))
    }
}

impl<S, A> Transition<S> for ActionTransitionTable<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    fn successors(&mut self, source: &S) -> Vec<S> {
        self.neighbors(source).cloned().collect()
    }
}

/// A pair of action tables kept in sync: every insertion goes forwards into
/// one and backwards into the other. Backward searches run from targets over
/// `backwards`, and the chosen move is then read off `forwards`.
#[derive(Debug, Clone)]
pub struct BackwardsForwardsTable<S, A> {
    pub forwards: ActionTransitionTable<S, A>,
    pub backwards: ActionTransitionTable<S, A>,
}

impl<S, A> Default for BackwardsForwardsTable<S, A> {
    fn default() -> Self {
        Self {
            forwards: ActionTransitionTable::default(),
            backwards: ActionTransitionTable::default(),
        }
    }
}

impl<S, A> BackwardsForwardsTable<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, source: S, sink: S, action: A) {
        self.forwards.add(source.clone(), sink.clone(), action.clone());
        self.backwards.add(sink, source, action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_directed() {
        let mut table = TransitionTable::new();
        table.add(1, 2);
        assert!(table.contains_edge(&1, &2));
        assert!(!table.contains_edge(&2, &1));
        assert_eq!(table.neighbors(&2).count(), 0);
    }

    #[test]
    fn symmetric_edges_are_two_directed_edges() {
        let mut table = TransitionTable::new();
        table.add_symmetric(1, 2);
        assert!(table.contains_edge(&1, &2));
        assert!(table.contains_edge(&2, &1));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn duplicate_edges_are_collapsed_in_insertion_order() {
        let mut table = TransitionTable::new();
        for (source, sink) in [(2, 5), (2, 3), (2, 5), (2, 4)] {
            table.add(source, sink);
        }
        assert_eq!(table.successors(&2), vec![5, 3, 4]);
        assert!(table.successors(&7).is_empty());
    }

    #[test]
    fn action_lookup_in_both_directions() {
        let mut table = ActionTransitionTable::new();
        table.add("a1", "a2", 'a');
        table.add("a1", "b1", 'b');
        assert_eq!(table.action(&"a1", &"b1"), Some(&'b'));
        assert_eq!(table.sink(&"a1", &'a'), Some(&"a2"));
        assert_eq!(table.sink(&"a2", &'a'), None);
        assert_eq!(table.action(&"a2", &"a1"), None);
    }

    #[test]
    fn readding_an_edge_overwrites_its_action() {
        let mut table = ActionTransitionTable::new();
        table.add(0, 1, "first");
        table.add(0, 1, "second");
        assert_eq!(table.action(&0, &1), Some(&"second"));
        assert_eq!(table.successors(&0), vec![1]);
    }

    #[test]
    fn backwards_forwards_stay_in_sync() {
        let mut table = BackwardsForwardsTable::new();
        table.add("x", "y", "-a->");
        table.add("y", "z", "-b->");
        assert_eq!(table.forwards.action(&"x", &"y"), Some(&"-a->"));
        assert_eq!(table.backwards.action(&"y", &"x"), Some(&"-a->"));
        assert_eq!(table.backwards.successors(&"z"), vec!["y"]);
        assert_eq!(table.forwards.sink(&"y", &"-b->"), Some(&"z"));
    }
}
