//! Generic graph search over hashable states: explicit transition tables,
//! reachability, unweighted distances, and resumable informed search.

mod flood;
pub mod heuristics;
mod measure;
mod path;
pub mod search_engines;
mod search_space;
mod transition;
mod transition_table;

pub use flood::{flood_all, flood_until};
pub use heuristics::{Heuristic, HeuristicValue};
pub use measure::{measure_all, measure_until_all, measure_until_any};
pub use path::{best_actions, path_from_distances, traceback_to_path};
pub use search_engines::{
    measure_informed, measure_informed_traceback, InformedSearch, SearchStatistics, SearchStatus,
};
pub use search_space::{DistanceMap, Traceback};
pub use transition::Transition;
pub use transition_table::{ActionTransitionTable, BackwardsForwardsTable, TransitionTable};
