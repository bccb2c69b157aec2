use crate::search::{measure_all, DistanceMap, Heuristic, HeuristicValue, Transition};
use crate::sokoban::{Level, Location, PushGeometry, PushState, Terrain};
use indexmap::{IndexMap, IndexSet};

/// A relaxation of boulder pushing in which the player may teleport to any
/// floor square, so only the boulder's location matters. Given where a
/// boulder ended up, it yields every square it could have been pushed from.
#[derive(Debug, Clone, Default)]
pub struct RelaxedBoulderReverseTransition {
    sink_to_sources: IndexMap<Location, IndexSet<Location>>,
}

impl RelaxedBoulderReverseTransition {
    /// Build from a snapshot with the active boulder removed. Walls and
    /// bounds are already accounted for by the geometry.
    pub fn new(snapshot: &Level, geometry: &PushGeometry) -> Self {
        let blocks_pushing_from =
            |location: Location| snapshot.get(location).map_or(true, Terrain::blocks_pushing_from);
        let mut sink_to_sources: IndexMap<Location, IndexSet<Location>> = IndexMap::new();
        for (source, pairs) in geometry.iter_push_pairs() {
            // a boulder on a trap has filled it, and other boulders stay put
            if blocks_pushing_from(source) {
                continue;
            }
            for &(back, front) in pairs {
                if blocks_pushing_from(back) || snapshot.get(front) == Some(Terrain::Boulder) {
                    continue;
                }
                sink_to_sources.entry(front).or_default().insert(source);
            }
        }
        Self { sink_to_sources }
    }

    pub fn sources(&self, sink: &Location) -> impl Iterator<Item = &Location> {
        self.sink_to_sources.get(sink).into_iter().flatten()
    }
}

impl Transition<Location> for RelaxedBoulderReverseTransition {
    fn successors(&mut self, sink: &Location) -> Vec<Location> {
        self.sources(sink).copied().collect()
    }
}

/// A lower bound on the number of pushes needed to drop a boulder into any
/// trap, ignoring where the player has to walk.
///
/// Returns zero for a boulder on a trap and `None` for a boulder that can
/// never reach one.
#[derive(Debug, Clone)]
pub struct BoulderHeuristic {
    lower_bounds: DistanceMap<Location>,
}

impl BoulderHeuristic {
    pub fn new(snapshot: &Level, geometry: &PushGeometry) -> Self {
        let mut relaxed = RelaxedBoulderReverseTransition::new(snapshot, geometry);
        let traps: Vec<Location> = snapshot.locations_of(Terrain::Trap).collect();
        let lower_bounds = measure_all(traps, &mut relaxed);
        Self { lower_bounds }
    }

    pub fn lower_bound(&self, boulder: Location) -> Option<HeuristicValue> {
        self.lower_bounds.get(&boulder).copied()
    }
}

impl Heuristic<PushState> for BoulderHeuristic {
    fn evaluate(&mut self, state: &PushState) -> Option<HeuristicValue> {
        self.lower_bound(state.boulder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{CORRIDOR_TEXT, HOPELESS_TEXT, WEDGED_TEXT};

    fn without_boulder(text: &str, boulder: Location) -> Level {
        let mut level = Level::parse(text).unwrap();
        level.set(boulder, Terrain::Floor);
        level
    }

    #[test]
    fn corridor_bounds() {
        let level = without_boulder(CORRIDOR_TEXT, Location::new(1, 3));
        let geometry = PushGeometry::new(&level);
        let mut heuristic = BoulderHeuristic::new(&level, &geometry);
        assert_eq!(heuristic.lower_bound(Location::new(1, 5)), Some(0));
        assert_eq!(heuristic.lower_bound(Location::new(1, 4)), Some(1));
        assert_eq!(heuristic.lower_bound(Location::new(1, 3)), Some(2));
        assert_eq!(heuristic.lower_bound(Location::new(1, 2)), Some(3));
        // nothing can get behind a boulder against the end wall
        assert_eq!(heuristic.lower_bound(Location::new(1, 1)), None);
        let state = PushState::new(Location::new(1, 3), Location::new(1, 1));
        assert_eq!(heuristic.evaluate(&state), Some(2));
    }

    #[test]
    fn reverse_transition_lists_sources() {
        let level = without_boulder(CORRIDOR_TEXT, Location::new(1, 3));
        let geometry = PushGeometry::new(&level);
        let mut relaxed = RelaxedBoulderReverseTransition::new(&level, &geometry);
        assert_eq!(relaxed.successors(&Location::new(1, 4)), vec![Location::new(1, 3)]);
        // nobody can push while standing on the trap
        assert_eq!(relaxed.successors(&Location::new(1, 3)), vec![Location::new(1, 2)]);
    }

    #[test]
    fn cornered_boulder_has_no_bound() {
        let level = without_boulder(WEDGED_TEXT, Location::new(1, 1));
        let geometry = PushGeometry::new(&level);
        let heuristic = BoulderHeuristic::new(&level, &geometry);
        assert_eq!(heuristic.lower_bound(Location::new(1, 1)), None);
        // the other boulder stays in the snapshot, on the square the player
        // would have to push from
        assert_eq!(heuristic.lower_bound(Location::new(1, 6)), None);
        assert_eq!(heuristic.lower_bound(Location::new(1, 7)), Some(0));
    }

    #[test]
    fn unreachable_trap_gives_no_bounds() {
        let level = without_boulder(HOPELESS_TEXT, Location::new(1, 2));
        let geometry = PushGeometry::new(&level);
        let heuristic = BoulderHeuristic::new(&level, &geometry);
        assert_eq!(heuristic.lower_bound(Location::new(1, 2)), None);
        assert_eq!(heuristic.lower_bound(Location::new(4, 1)), Some(0));
    }
}
