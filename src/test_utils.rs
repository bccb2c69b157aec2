use crate::search::HeuristicValue;

pub const LEVEL_1A_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/levels/level_1a.txt"
));

/// One boulder in a corridor, two pushes from the only trap.
pub const CORRIDOR_TEXT: &str = "\
-------
|>.0.^|
-------
";

/// The boulder starts south of the start square and has to be pushed east
/// twice and then south into the trap, which needs the player to walk round.
pub const DOGLEG_TEXT: &str = "\
-------
|>....|
|.0...|
|.....|
|---^--
";

/// The western boulder is wedged in a corner and can never move, so only the
/// eastern one is worth solving for.
pub const WEDGED_TEXT: &str = "\
---------
|0..>0.^|
|.......|
---------
";

/// Two boulders that can both be solved. The western one comes first in
/// row-major order but needs more pushes than the eastern one.
pub const RACE_TEXT: &str = "\
----------
|>.......|
|..0...0.|
|........|
|^......^|
----------
";

/// A trap no boulder can ever reach.
pub const HOPELESS_TEXT: &str = "\
------
|>0.|
|...|
|---|
|^..|
-----
";

/// A row-major 3x3 sliding tile puzzle with `0` as the blank.
pub type TileState = [u8; 9];

pub const TILE_START: TileState = [1, 8, 7, 2, 0, 6, 3, 4, 5];
pub const TILE_GOAL: TileState = [1, 2, 3, 4, 5, 6, 7, 8, 0];

/// Slide a neighboring tile into the blank. The blank moves up, down, left,
/// then right.
pub fn slide_successors(state: &TileState) -> Vec<TileState> {
    let blank = state.iter().position(|&tile| tile == 0).unwrap();
    let (row, col) = (blank / 3, blank % 3);
    let mut successors = Vec::new();
    for (drow, dcol) in [(-1i32, 0i32), (1, 0), (0, -1), (0, 1)] {
        let (next_row, next_col) = (row as i32 + drow, col as i32 + dcol);
        if (0..3).contains(&next_row) && (0..3).contains(&next_col) {
            let mut next = *state;
            next.swap(blank, (next_row * 3 + next_col) as usize);
            successors.push(next);
        }
    }
    successors
}

/// Sum of the Manhattan distances of every tile from its goal square.
pub fn tile_manhattan(goal: TileState) -> impl FnMut(&TileState) -> Option<HeuristicValue> {
    move |state: &TileState| {
        let mut distance = 0;
        for (index, &tile) in state.iter().enumerate() {
            if tile == 0 {
                continue;
            }
            let target = goal.iter().position(|&t| t == tile).unwrap();
            distance += (index / 3).abs_diff(target / 3) + (index % 3).abs_diff(target % 3);
        }
        Some(distance as HeuristicValue)
    }
}
