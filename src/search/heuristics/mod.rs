mod heuristic;

pub use heuristic::{Heuristic, HeuristicValue};
