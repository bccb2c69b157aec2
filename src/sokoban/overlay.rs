use crate::sokoban::{Level, Location, Terrain};

/// A read-only view of a level with one extra boulder placed on it.
///
/// A per-boulder solver keeps a snapshot with its own boulder removed and
/// looks at it through an overlay, so the snapshot never changes while
/// successors are generated.
#[derive(Debug, Clone, Copy)]
pub struct BoulderOverlay<'a> {
    level: &'a Level,
    boulder: Location,
}

impl<'a> BoulderOverlay<'a> {
    pub fn new(level: &'a Level, boulder: Location) -> Self {
        Self { level, boulder }
    }

    pub fn boulder(&self) -> Location {
        self.boulder
    }

    /// Terrain as seen with the boulder in place. `None` outside the level.
    pub fn get(&self, location: Location) -> Option<Terrain> {
        if location == self.boulder {
            Some(Terrain::Boulder)
        } else {
            self.level.get(location)
        }
    }

    /// Whether the player could stand on a square. Out of bounds counts as
    /// blocked.
    pub fn is_walkable(&self, location: Location) -> bool {
        self.get(location).is_some_and(|terrain| !terrain.blocks_walking())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_shadows_snapshot() {
        let level = Level::parse("|...|").unwrap();
        let overlay = BoulderOverlay::new(&level, Location::new(0, 2));
        assert_eq!(overlay.get(Location::new(0, 2)), Some(Terrain::Boulder));
        assert_eq!(overlay.get(Location::new(0, 1)), Some(Terrain::Floor));
        assert_eq!(overlay.get(Location::new(0, 9)), None);
        assert!(overlay.is_walkable(Location::new(0, 3)));
        assert!(!overlay.is_walkable(Location::new(0, 2)));
        assert!(!overlay.is_walkable(Location::new(0, 0)));
        // the snapshot itself is untouched
        assert_eq!(level[Location::new(0, 2)], Terrain::Floor);
    }
}
