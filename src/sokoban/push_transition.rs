//! The state space a single boulder's solver searches.
//!
//! A state is where the boulder is and where the player is. The interesting
//! transitions are pushing the boulder one square, and walking round to a
//! different side of it from which a push is possible. Walking between squares
//! that are not pushing sides is collapsed into a single transition, so the
//! search only sees positions that matter.

use crate::search::{flood_until, Transition};
use crate::sokoban::{BoulderOverlay, Level, Location, ManhattanTransition, PushGeometry, Terrain};
use indexmap::IndexSet;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PushState {
    pub boulder: Location,
    pub player: Location,
}

impl PushState {
    pub fn new(boulder: Location, player: Location) -> Self {
        Self { boulder, player }
    }
}

/// Successor generation for one boulder over a snapshot with that boulder
/// lifted off the map. Every other boulder is treated as fixed.
#[derive(Debug)]
pub struct BoulderTransition {
    snapshot: Rc<Level>,
    geometry: Rc<PushGeometry>,
    walking: ManhattanTransition,
    /// Pushing sides reachable from a state, shared between every state with
    /// the same boulder whose player stands on one of those sides.
    side_cache: HashMap<PushState, Rc<IndexSet<Location>>>,
}

impl BoulderTransition {
    pub fn new(snapshot: Rc<Level>, geometry: Rc<PushGeometry>) -> Self {
        let walking = ManhattanTransition::new(&snapshot, &geometry);
        Self {
            snapshot,
            geometry,
            walking,
            side_cache: HashMap::new(),
        }
    }

    pub fn snapshot(&self) -> &Level {
        &self.snapshot
    }

    pub fn cached_states(&self) -> usize {
        self.side_cache.len()
    }

    fn check_state(&self, state: &PushState) {
        for (what, location) in [("boulder", state.boulder), ("player", state.player)] {
            let terrain = self.snapshot.get(location);
            assert!(
                terrain.is_some_and(|t| !t.blocks_walking()),
                "{what} at {location} is on {terrain:?}, not on floor"
            );
        }
        assert_ne!(
            state.boulder, state.player,
            "player and boulder share {}",
            state.player
        );
    }
}

impl Transition<PushState> for BoulderTransition {
    /// Pushes come first, in push pair order, followed by moves to other
    /// reachable pushing sides in the order they were discovered.
    ///
    /// # Panics
    ///
    /// If the boulder or the player is outside the map or on a wall, trap or
    /// another boulder, or if they are on the same square.
    fn successors(&mut self, source: &PushState) -> Vec<PushState> {
        self.check_state(source);
        let overlay = BoulderOverlay::new(&self.snapshot, source.boulder);

        let mut successors = Vec::new();
        let mut desirable_sides = IndexSet::new();
        let mut needs_walk = false;
        for &(back, front) in self.geometry.push_pairs(source.boulder) {
            if overlay.get(back).map_or(true, |t| t.blocks_pushing_from()) {
                continue;
            }
            if overlay.get(front) == Some(Terrain::Boulder) {
                continue;
            }
            desirable_sides.insert(back);
            if source.player == back {
                successors.push(PushState::new(front, source.boulder));
            } else {
                needs_walk = true;
            }
        }
        if !needs_walk {
            return successors;
        }

        let reachable = match self.side_cache.get(source) {
            Some(sides) if !sides.is_empty() => Rc::clone(sides),
            _ => {
                let mut around = self.walking.around(source.boulder);
                let sides = flood_until([source.player], desirable_sides, &mut around);
                trace!(?source, sides = sides.len(), "flooded pushing sides");
                Rc::new(sides)
            }
        };
        for &side in reachable.iter() {
            let adjacent = PushState::new(source.boulder, side);
            self.side_cache.insert(adjacent, Rc::clone(&reachable));
            if adjacent != *source {
                successors.push(adjacent);
            }
        }
        successors
    }
}
