//! Pushing boulders into traps on a grid, one boulder at a time.

mod board;
mod geometry;
mod level;
pub mod levels;
mod location;
mod overlay;
mod push_heuristic;
mod push_log;
mod push_transition;
mod solver;
mod terrain;
mod walking;

pub use board::{Board, PushRecord};
pub use geometry::{Neighbors, PushGeometry, PushPair, PushPairs};
pub use level::{Level, LevelError};
pub use levels::{identify_level, identify_screen, DetectionError, LEVELS};
pub use location::{Direction, Location, Rect};
pub use overlay::BoulderOverlay;
pub use push_heuristic::{BoulderHeuristic, RelaxedBoulderReverseTransition};
pub use push_log::{
    load_push_log, parse_push_log, push_log_path, write_push_log, PushLogError, PushReplay,
    PUSH_LOG_EXTENSION,
};
pub use push_transition::{BoulderTransition, PushState};
pub use solver::{BoulderSearch, PushCommand, PushSolver, SolverId, SolverPool};
pub use terrain::Terrain;
pub use walking::{approach_step, ManhattanTransition, SlowNeighborTransition};
