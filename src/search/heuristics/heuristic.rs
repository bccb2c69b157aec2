/// A lower bound on the number of transitions left before a terminal state.
pub type HeuristicValue = u32;

pub trait Heuristic<S> {
    /// Evaluate the given state.
    ///
    /// Returns `Some(0)` if the state is terminal, `None` if no terminal state
    /// can be reached from it (the state will be pruned), and otherwise an
    /// admissible estimate of the remaining distance.
    fn evaluate(&mut self, state: &S) -> Option<HeuristicValue>;
}

impl<S, F> Heuristic<S> for F
where
    F: FnMut(&S) -> Option<HeuristicValue>,
{
    fn evaluate(&mut self, state: &S) -> Option<HeuristicValue> {
        self(state)
    }
}
