use crate::sokoban::{levels, Direction, Level, LevelError, Location, Rect, Terrain};
use std::fmt::{self, Display, Formatter};
use tracing::debug;

/// A successful push, recorded by where the player stood and where the
/// boulder was just before it moved. The player always ends up where the
/// boulder was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PushRecord {
    pub player: Location,
    pub boulder: Location,
}

impl PushRecord {
    pub fn new(player: Location, boulder: Location) -> Self {
        Self { player, boulder }
    }

    /// The direction of the push, if the two squares are neighbours.
    pub fn direction(&self) -> Option<Direction> {
        Direction::between(self.player, self.boulder)
    }
}

/// A live Sokoban level with the player on it.
///
/// The player starts on the down staircase. Stairs and doorways are plain
/// floor once the level is loaded.
#[derive(Debug, Clone)]
pub struct Board {
    name: String,
    level: Level,
    player: Location,
    pushes: Vec<PushRecord>,
}

impl Board {
    pub fn new(name: impl Into<String>, text: &str) -> Result<Self, LevelError> {
        Self::from_level(name, Level::parse(text)?)
    }

    /// Load one of the built-in levels by name.
    pub fn builtin(name: &str) -> Result<Self, LevelError> {
        let text =
            levels::level_text(name).ok_or_else(|| LevelError::UnknownLevel(name.to_string()))?;
        Self::new(name, text)
    }

    pub fn from_level(name: impl Into<String>, mut level: Level) -> Result<Self, LevelError> {
        let starts: Vec<Location> = level.locations_of(Terrain::DownStairs).collect();
        let [player] = starts[..] else {
            return Err(LevelError::StartCount(starts.len()));
        };
        for location in level.rect().locations() {
            if matches!(
                level[location],
                Terrain::Doorway | Terrain::UpStairs | Terrain::DownStairs
            ) {
                level.set(location, Terrain::Floor);
            }
        }
        Ok(Self {
            name: name.into(),
            level,
            player,
            pushes: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn rect(&self) -> Rect {
        self.level.rect()
    }

    pub fn player(&self) -> Location {
        self.player
    }

    /// Every push made so far, oldest first.
    pub fn push_records(&self) -> &[PushRecord] {
        &self.pushes
    }

    pub fn boulders(&self) -> Vec<Location> {
        self.level.locations_of(Terrain::Boulder).collect()
    }

    pub fn traps_remaining(&self) -> usize {
        self.level.count(Terrain::Trap)
    }

    pub fn is_solved(&self) -> bool {
        self.traps_remaining() == 0
    }

    /// Overwrite a square, as when the map turns out to differ from what was
    /// expected. Returns `false` if the location is outside the level.
    pub fn set_terrain(&mut self, location: Location, terrain: Terrain) -> bool {
        self.level.set(location, terrain)
    }

    /// Try to move the player one square, pushing a boulder if the move is
    /// cardinal and one is in the way. Returns whether the player moved.
    ///
    /// Diagonal moves may not squeeze between two walls or boulders, and the
    /// player never walks onto a wall or a trap. A boulder cannot be pushed
    /// off the map, into a wall, or into another boulder. A boulder pushed
    /// onto a trap fills it.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        let target = self.player.step(direction);
        if !direction.is_cardinal() && !self.is_passable(self.player, target) {
            return false;
        }
        let Some(terrain) = self.level.get(target) else {
            return false;
        };
        if terrain.is_wall() || terrain == Terrain::Trap {
            return false;
        }

        if terrain == Terrain::Boulder {
            if !direction.is_cardinal() {
                return false;
            }
            let landing = target.step(direction);
            let landing_terrain = match self.level.get(landing) {
                Some(t) if !t.is_wall() && t != Terrain::Boulder => t,
                _ => return false,
            };
            self.level.set(target, Terrain::Floor);
            if landing_terrain == Terrain::Trap {
                debug!(trap = %landing, "boulder filled a trap");
                self.level.set(landing, Terrain::Floor);
            } else {
                self.level.set(landing, Terrain::Boulder);
            }
            self.pushes.push(PushRecord::new(self.player, target));
        }

        self.player = target;
        true
    }

    /// Whether the player could step from `from` to `to` without pushing
    /// anything. The squares must be distinct neighbours, neither may block
    /// walking, and a diagonal step may not squeeze between two solid
    /// squares.
    pub fn is_passable(&self, from: Location, to: Location) -> bool {
        let open = |location: Location| {
            self.level
                .get(location)
                .is_some_and(|terrain| !terrain.blocks_walking())
        };
        if !open(from) || !open(to) {
            return false;
        }
        let Some(direction) = Direction::between(from, to) else {
            return false;
        };
        if direction.is_cardinal() {
            return true;
        }
        let solid = |location: Location| {
            self.level
                .get(location)
                .map_or(true, Terrain::blocks_squeeze)
        };
        !(solid(Location::new(from.row, to.col)) && solid(Location::new(to.row, from.col)))
    }

    /// The map without the player.
    pub fn ascii_lines(&self) -> Vec<String> {
        self.level.ascii_lines()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (row, line) in self.ascii_lines().iter().enumerate() {
            let line: String = line
                .chars()
                .enumerate()
                .map(|(col, glyph)| {
                    if Location::new(row as i32, col as i32) == self.player {
                        '@'
                    } else {
                        glyph
                    }
                })
                .collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
