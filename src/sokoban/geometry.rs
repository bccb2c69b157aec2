use crate::sokoban::{Level, Location};
use indexmap::IndexMap;
use smallvec::SmallVec;

pub type Neighbors = SmallVec<[Location; 4]>;
/// `(back, front)`: where the player stands, and where the boulder lands.
pub type PushPair = (Location, Location);
pub type PushPairs = SmallVec<[PushPair; 4]>;

/// Adjacency that depends only on where the walls are. Walls never move
/// during a level, so one of these is computed per map and shared by every
/// boulder's solver.
#[derive(Debug, Clone, Default)]
pub struct PushGeometry {
    floor_neighbors: IndexMap<Location, Neighbors>,
    push_pairs: IndexMap<Location, PushPairs>,
}

impl PushGeometry {
    pub fn new(level: &Level) -> Self {
        let is_open = |location: Location| level.get(location).is_some_and(|t| !t.is_wall());
        let rect = level.rect();

        let mut floor_neighbors = IndexMap::new();
        let mut push_pairs = IndexMap::new();
        for location in rect.locations().filter(|&location| is_open(location)) {
            let neighbors: Neighbors = rect
                .manhattan_neighbors(location)
                .filter(|&neighbor| is_open(neighbor))
                .collect();
            if !neighbors.is_empty() {
                floor_neighbors.insert(location, neighbors);
            }

            let mut pairs = PushPairs::new();
            for (drow, dcol) in [(0, 1), (1, 0)] {
                let side_a = location.offset(-drow, -dcol);
                let side_b = location.offset(drow, dcol);
                for (back, front) in [(side_a, side_b), (side_b, side_a)] {
                    if is_open(back) && is_open(front) {
                        pairs.push((back, front));
                    }
                }
            }
            if !pairs.is_empty() {
                push_pairs.insert(location, pairs);
            }
        }

        Self {
            floor_neighbors,
            push_pairs,
        }
    }

    /// Cardinal neighbours that are not walls, north, south, west, then east.
    pub fn floor_neighbors(&self, location: Location) -> &[Location] {
        self.floor_neighbors
            .get(&location)
            .map(|neighbors| neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// The ways a boulder at `location` could be pushed, ignoring everything
    /// but walls. Horizontal pushes come first.
    pub fn push_pairs(&self, location: Location) -> &[PushPair] {
        self.push_pairs
            .get(&location)
            .map(|pairs| pairs.as_slice())
            .unwrap_or(&[])
    }

    /// Every location with at least one push pair, in row-major order.
    pub fn iter_push_pairs(&self) -> impl Iterator<Item = (Location, &[PushPair])> {
        self.push_pairs
            .iter()
            .map(|(&location, pairs)| (location, pairs.as_slice()))
    }

    pub fn iter_floor_neighbors(&self) -> impl Iterator<Item = (Location, &[Location])> {
        self.floor_neighbors
            .iter()
            .map(|(&location, neighbors)| (location, neighbors.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::CORRIDOR_TEXT;

    #[test]
    fn corridor_pairs_are_horizontal() {
        let level = Level::parse(CORRIDOR_TEXT).unwrap();
        let geometry = PushGeometry::new(&level);
        let boulder = Location::new(1, 3);
        assert_eq!(
            geometry.push_pairs(boulder),
            &[
                (Location::new(1, 2), Location::new(1, 4)),
                (Location::new(1, 4), Location::new(1, 2))
            ]
        );
        // against the end wall there is no way through
        assert!(geometry.push_pairs(Location::new(1, 1)).is_empty());
        assert!(geometry.push_pairs(Location::new(0, 3)).is_empty());
        assert_eq!(
            geometry.floor_neighbors(Location::new(1, 1)),
            &[Location::new(1, 2)]
        );
    }

    #[test]
    fn open_room_has_four_pairs() {
        let level = Level::parse("-----\n|...|\n|...|\n|...|\n-----").unwrap();
        let geometry = PushGeometry::new(&level);
        let centre = Location::new(2, 2);
        assert_eq!(geometry.push_pairs(centre).len(), 4);
        assert_eq!(geometry.floor_neighbors(centre).len(), 4);
        assert_eq!(geometry.iter_push_pairs().count(), 5);
    }
}
