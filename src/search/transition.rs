//! A transition function maps a source state to the states reachable from it
//! in a single step. Every search algorithm in this crate consumes one.

/// Generates the successors of a state. The order of the returned states is
/// significant: search engines break ties by generation order, so an
/// implementation must be deterministic for search results to be
/// reproducible.
pub trait Transition<S> {
    fn successors(&mut self, source: &S) -> Vec<S>;
}

/// Any closure returning something iterable can be used as an implicit
/// transition function.
impl<S, F, I> Transition<S> for F
where
    F: FnMut(&S) -> I,
    I: IntoIterator<Item = S>,
{
    fn successors(&mut self, source: &S) -> Vec<S> {
        self(source).into_iter().collect()
    }
}
