//! Transitions over player locations, used to walk up to a boulder.

use crate::search::{measure_until_all, path_from_distances, Transition};
use crate::sokoban::{Board, Direction, Level, Location, Neighbors, PushGeometry};
use std::collections::HashMap;

/// Cardinal walking over a fixed snapshot, precomputed once per solver.
///
/// Only the solver's own boulder can move, so the snapshot squares that block
/// walking are removed up front and the moving boulder is filtered out at
/// query time with [`ManhattanTransition::around`].
#[derive(Debug, Clone, Default)]
pub struct ManhattanTransition {
    sinks: HashMap<Location, Neighbors>,
}

impl ManhattanTransition {
    pub fn new(snapshot: &Level, geometry: &PushGeometry) -> Self {
        let open = |location: Location| {
            snapshot
                .get(location)
                .is_some_and(|terrain| !terrain.blocks_pushing_from())
        };
        let sinks = geometry
            .iter_floor_neighbors()
            .filter(|&(source, _)| open(source))
            .filter_map(|(source, neighbors)| {
                let sinks: Neighbors = neighbors.iter().copied().filter(|&n| open(n)).collect();
                (!sinks.is_empty()).then_some((source, sinks))
            })
            .collect();
        Self { sinks }
    }

    pub fn sinks(&self, source: &Location) -> &[Location] {
        self.sinks
            .get(source)
            .map(|sinks| sinks.as_slice())
            .unwrap_or(&[])
    }

    /// Walking with a boulder standing at `boulder`.
    pub fn around(&self, boulder: Location) -> impl FnMut(&Location) -> Neighbors + '_ {
        move |source: &Location| {
            self.sinks(source)
                .iter()
                .copied()
                .filter(|&sink| sink != boulder)
                .collect()
        }
    }
}

impl Transition<Location> for ManhattanTransition {
    fn successors(&mut self, source: &Location) -> Vec<Location> {
        self.sinks(source).to_vec()
    }
}

/// Eight-way walking on a live board. Slow, but only used to pick the next
/// approach step, never inside a search.
#[derive(Debug, Clone, Copy)]
pub struct SlowNeighborTransition<'a> {
    board: &'a Board,
}

impl<'a> SlowNeighborTransition<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }
}

impl Transition<Location> for SlowNeighborTransition<'_> {
    fn successors(&mut self, source: &Location) -> Vec<Location> {
        self.board
            .rect()
            .neighbors(*source)
            .filter(|&sink| self.board.is_passable(*source, sink))
            .collect()
    }
}

/// The first step of a shortest eight-way walk from the player to `target`.
/// `None` if the player is already there or cannot get there.
pub fn approach_step(board: &Board, target: Location) -> Option<Direction> {
    let player = board.player();
    let mut walking = SlowNeighborTransition::new(board);
    let distances = measure_until_all([target], [player], &mut walking);
    let path = path_from_distances(&player, &mut walking, &distances)?;
    path.get(1).and_then(|&next| Direction::between(player, next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{flood_all, flood_until, measure_all};

    fn room() -> Level {
        Level::parse(
            "\
------
|....|
|.0^.|
|....|
------",
        )
        .unwrap()
    }

    #[test]
    fn manhattan_skips_boulders_and_traps() {
        let level = room();
        let geometry = PushGeometry::new(&level);
        let mut walking = ManhattanTransition::new(&level, &geometry);
        assert_eq!(
            walking.successors(&Location::new(1, 2)),
            vec![Location::new(1, 1), Location::new(1, 3)]
        );
        assert!(walking.successors(&Location::new(2, 2)).is_empty());
        let reachable = flood_all([Location::new(1, 1)], &mut walking);
        assert_eq!(reachable.len(), 10);
    }

    #[test]
    fn walking_around_a_boulder() {
        let level = room();
        let geometry = PushGeometry::new(&level);
        let walking = ManhattanTransition::new(&level, &geometry);
        // a second boulder at (1, 2) cuts the top-left corner off from the
        // top-right one along the top row
        let mut around = walking.around(Location::new(1, 2));
        let distances = measure_all([Location::new(1, 1)], &mut around);
        assert_eq!(distances.get(&Location::new(1, 2)), None);
        assert_eq!(distances.get(&Location::new(1, 3)), Some(&8));
        let sides = flood_until(
            [Location::new(1, 1)],
            [Location::new(1, 3), Location::new(3, 2)],
            &mut around,
        );
        assert_eq!(sides.len(), 2);
        assert_eq!(sides[0], Location::new(3, 2));
    }

    #[test]
    fn slow_neighbors_do_not_squeeze() {
        let board = Board::new(
            "squeeze",
            "\
-----
|>.-|
|.|.|
-----",
        )
        .unwrap();
        let mut walking = SlowNeighborTransition::new(&board);
        // (1, 2) to (2, 3) is diagonal between two walls
        assert_eq!(
            walking.successors(&Location::new(1, 2)),
            vec![Location::new(1, 1), Location::new(2, 1)]
        );
    }

    #[test]
    fn approach_prefers_diagonals() {
        let board = Board::new(
            "room",
            "\
------
|>...|
|....|
|....|
------",
        )
        .unwrap();
        assert_eq!(
            approach_step(&board, Location::new(3, 3)),
            Some(Direction::SouthEast)
        );
        assert_eq!(approach_step(&board, Location::new(1, 4)), Some(Direction::East));
        assert_eq!(approach_step(&board, board.player()), None);
        assert_eq!(approach_step(&board, Location::new(0, 0)), None);
    }
}
