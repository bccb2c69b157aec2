//! Plans boulder pushes for a whole level, one boulder at a time.
//!
//! Every boulder gets its own informed search over a snapshot in which the
//! other boulders are fixed. The searches are raced against each other: the
//! one with the lowest lower bound is always the next to step, so the first
//! to finish has the cheapest plan of any of them. Only that plan is kept,
//! and after every push everything is thrown away and rebuilt, since a moved
//! boulder changes every other boulder's problem.

use crate::config::SolverConfig;
use crate::search::{HeuristicValue, InformedSearch};
use crate::sokoban::{
    approach_step, push_log_path, write_push_log, Board, BoulderHeuristic, BoulderTransition,
    Direction, Location, PushGeometry, PushLogError, PushState, Terrain,
};
use itertools::Itertools;
use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use std::collections::VecDeque;
use std::fmt::{self, Debug, Formatter};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info, warn};

pub type BoulderSearch = InformedSearch<PushState, BoulderTransition, BoulderHeuristic>;

/// Handle of one boulder's search within a [`SolverPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SolverId(usize);

/// Stand on `stand`, then step in `direction` to push the boulder in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PushCommand {
    pub stand: Location,
    pub direction: Direction,
}

impl PushCommand {
    pub fn new(stand: Location, direction: Direction) -> Self {
        Self { stand, direction }
    }

    /// Where the boulder is before the push.
    pub fn boulder(&self) -> Location {
        self.stand.step(self.direction)
    }
}

/// Turn a search path, seed first, into the pushes along it.
fn path_to_commands(path: &[PushState]) -> Vec<PushCommand> {
    path.iter()
        .tuple_windows()
        .filter(|(old, new)| old.boulder != new.boulder)
        .filter_map(|(old, new)| {
            Direction::between(old.player, new.player)
                .map(|direction| PushCommand::new(old.player, direction))
        })
        .collect()
}

/// One informed search per boulder, ordered by their current bounds.
pub struct SolverPool {
    searches: Vec<(Location, BoulderSearch)>,
    queue: PriorityQueue<SolverId, Reverse<(HeuristicValue, u64)>>,
    insertions: u64,
    steps: usize,
}

impl SolverPool {
    pub fn new(board: &Board, geometry: &Rc<PushGeometry>) -> Self {
        let mut pool = Self {
            searches: Vec::new(),
            queue: PriorityQueue::new(),
            insertions: 0,
            steps: 0,
        };
        for boulder in board.boulders() {
            let mut snapshot = board.level().clone();
            snapshot.set(boulder, Terrain::Floor);
            let transition = BoulderTransition::new(Rc::new(snapshot), Rc::clone(geometry));
            let heuristic = BoulderHeuristic::new(transition.snapshot(), geometry);
            let seed = PushState::new(boulder, board.player());
            let id = SolverId(pool.searches.len());
            let search = InformedSearch::new([seed], transition, heuristic);
            pool.searches.push((boulder, search));
            pool.step(id);
        }
        pool
    }

    fn step(&mut self, id: SolverId) {
        let search = &mut self.searches[id.0].1;
        search.step();
        self.steps += 1;
        match search.current_bound() {
            Some(bound) => {
                self.queue.push(id, Reverse((bound, self.insertions)));
                self.insertions += 1;
            }
            None => debug!(boulder = %self.searches[id.0].0, "boulder cannot reach a trap"),
        }
    }

    /// Step the cheapest search until one is solved, and return its path,
    /// seed first. Gives up once `step_limit` steps have been taken in total,
    /// counting the first step of every search.
    pub fn solve(&mut self, step_limit: Option<usize>) -> Option<(SolverId, Vec<PushState>)> {
        while let Some((id, _)) = self.queue.pop() {
            if let Some(mut path) = self.searches[id.0].1.path() {
                path.reverse();
                return Some((id, path));
            }
            if step_limit.is_some_and(|limit| self.steps >= limit) {
                warn!(steps = self.steps, "step limit reached before any boulder was solved");
                return None;
            }
            self.step(id);
        }
        None
    }

    pub fn len(&self) -> usize {
        self.searches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.searches.is_empty()
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn boulder(&self, id: SolverId) -> Location {
        self.searches[id.0].0
    }

    pub fn search(&self, id: SolverId) -> &BoulderSearch {
        &self.searches[id.0].1
    }
}

impl Debug for SolverPool {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverPool")
            .field("searches", &self.searches.len())
            .field("queued", &self.queue.len())
            .field("steps", &self.steps)
            .finish()
    }
}

/// A board together with the current push plan for it.
#[derive(Debug)]
pub struct PushSolver {
    board: Board,
    geometry: Rc<PushGeometry>,
    plan: VecDeque<PushCommand>,
    step_limit: Option<usize>,
}

impl PushSolver {
    pub fn new(board: Board) -> Self {
        Self::with_step_limit(board, None)
    }

    pub fn with_config(board: Board, config: &SolverConfig) -> Self {
        Self::with_step_limit(board, config.step_limit)
    }

    pub fn with_step_limit(board: Board, step_limit: Option<usize>) -> Self {
        let geometry = Rc::new(PushGeometry::new(board.level()));
        let mut solver = Self {
            board,
            geometry,
            plan: VecDeque::new(),
            step_limit,
        };
        solver.invalidate();
        solver
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    /// The remaining pushes, next first. Empty if no plan is known.
    pub fn plan(&self) -> &VecDeque<PushCommand> {
        &self.plan
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    /// Throw the plan away and search for a new one from the current board.
    pub fn invalidate(&mut self) {
        self.plan.clear();
        if self.board.is_solved() {
            return;
        }
        let mut pool = SolverPool::new(&self.board, &self.geometry);
        match pool.solve(self.step_limit) {
            Some((id, path)) => {
                self.plan.extend(path_to_commands(&path));
                info!(
                    level = self.board.name(),
                    boulder = %pool.boulder(id),
                    pushes = self.plan.len(),
                    steps = pool.steps(),
                    "planned pushes"
                );
            }
            None => info!(
                level = self.board.name(),
                boulders = pool.len(),
                steps = pool.steps(),
                "no boulder can be pushed into a trap"
            ),
        }
    }

    /// Change a square of the map, for instance when a boulder turns out to
    /// be somewhere else. Walls may have changed, so everything is rebuilt.
    pub fn set_terrain(&mut self, location: Location, terrain: Terrain) -> bool {
        if !self.board.set_terrain(location, terrain) {
            return false;
        }
        self.geometry = Rc::new(PushGeometry::new(self.board.level()));
        self.invalidate();
        true
    }

    /// The move that makes progress on the plan: the push itself when the
    /// player is in position, otherwise the first step of the shortest walk
    /// there. `None` if there is no plan.
    pub fn next_move(&mut self) -> Option<Direction> {
        let command = *self.plan.front()?;
        let player = self.board.player();
        if player == command.stand {
            return Some(command.direction);
        }
        let step = approach_step(&self.board, command.stand);
        if step.is_none() {
            warn!(
                %player,
                stand = %command.stand,
                "cannot walk to the next push, dropping the plan"
            );
            self.plan.clear();
        }
        step
    }

    /// Move the player, replanning if a boulder was pushed. Returns whether
    /// the player moved.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        let pushes_before = self.board.push_records().len();
        let moved = self.board.move_player(direction);
        if self.board.push_records().len() != pushes_before {
            self.invalidate();
        }
        moved
    }

    /// Handle a key press: a vi movement key moves the player, and `.` lets
    /// the solver make one move. Returns whether the player moved.
    pub fn process_command(&mut self, key: char) -> bool {
        let direction = match key {
            '.' => self.next_move(),
            _ => Direction::from_key(key),
        };
        direction.is_some_and(|direction| self.apply_move(direction))
    }

    /// Write the pushes made so far to `<dir>/<level name>.soko`.
    pub fn write_push_log(&self, dir: &Path) -> Result<PathBuf, PushLogError> {
        let path = push_log_path(dir, self.board.name());
        write_push_log(&path, self.board.push_records())?;
        Ok(path)
    }
}
