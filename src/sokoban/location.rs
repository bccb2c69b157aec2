use itertools::iproduct;
use std::fmt::{self, Display, Formatter};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// A square on the map, addressed the way a terminal addresses characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

impl Location {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (drow, dcol) = direction.delta();
        Self::new(self.row + drow, self.col + dcol)
    }

    pub fn offset(self, drow: i32, dcol: i32) -> Self {
        Self::new(self.row + drow, self.col + dcol)
    }

    /// Translate by another location treated as a vector.
    pub fn translate(self, by: Location) -> Self {
        self.offset(by.row, by.col)
    }

    /// [`Location::translate`], or `None` if the result does not fit.
    pub fn checked_translate(self, by: Location) -> Option<Self> {
        Some(Self::new(
            self.row.checked_add(by.row)?,
            self.col.checked_add(by.col)?,
        ))
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The eight single-square moves, named by compass point. The `strum`
/// serialisation is the vi key that requests the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
pub enum Direction {
    #[strum(serialize = "k")]
    North,
    #[strum(serialize = "j")]
    South,
    #[strum(serialize = "h")]
    West,
    #[strum(serialize = "l")]
    East,
    #[strum(serialize = "y")]
    NorthWest,
    #[strum(serialize = "u")]
    NorthEast,
    #[strum(serialize = "b")]
    SouthWest,
    #[strum(serialize = "n")]
    SouthEast,
}

impl Direction {
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
            Direction::NorthWest => (-1, -1),
            Direction::NorthEast => (-1, 1),
            Direction::SouthWest => (1, -1),
            Direction::SouthEast => (1, 1),
        }
    }

    pub fn from_delta(drow: i32, dcol: i32) -> Option<Self> {
        match (drow, dcol) {
            (-1, 0) => Some(Direction::North),
            (1, 0) => Some(Direction::South),
            (0, -1) => Some(Direction::West),
            (0, 1) => Some(Direction::East),
            (-1, -1) => Some(Direction::NorthWest),
            (-1, 1) => Some(Direction::NorthEast),
            (1, -1) => Some(Direction::SouthWest),
            (1, 1) => Some(Direction::SouthEast),
            _ => None,
        }
    }

    /// The single move from `from` to `to`, if they are neighbours.
    pub fn between(from: Location, to: Location) -> Option<Self> {
        let drow = to.row.checked_sub(from.row)?;
        let dcol = to.col.checked_sub(from.col)?;
        Self::from_delta(drow, dcol)
    }

    pub fn from_key(key: char) -> Option<Self> {
        key.to_string().parse().ok()
    }

    pub fn key(self) -> char {
        let key: &'static str = self.into();
        key.chars().next().unwrap_or('.')
    }

    pub fn is_cardinal(self) -> bool {
        let (drow, dcol) = self.delta();
        drow == 0 || dcol == 0
    }
}

/// An inclusive rectangle of locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub row_min: i32,
    pub col_min: i32,
    pub row_max: i32,
    pub col_max: i32,
}

impl Rect {
    pub fn new(row_min: i32, col_min: i32, row_max: i32, col_max: i32) -> Self {
        Self {
            row_min,
            col_min,
            row_max,
            col_max,
        }
    }

    /// The smallest rectangle containing every location, or `None` if there
    /// are none.
    pub fn bounding(locations: impl IntoIterator<Item = Location>) -> Option<Self> {
        locations.into_iter().fold(None, |rect, loc| {
            Some(match rect {
                None => Rect::new(loc.row, loc.col, loc.row, loc.col),
                Some(r) => Rect::new(
                    r.row_min.min(loc.row),
                    r.col_min.min(loc.col),
                    r.row_max.max(loc.row),
                    r.col_max.max(loc.col),
                ),
            })
        })
    }

    pub fn contains(&self, location: Location) -> bool {
        (self.row_min..=self.row_max).contains(&location.row)
            && (self.col_min..=self.col_max).contains(&location.col)
    }

    pub fn height(&self) -> usize {
        (self.row_max - self.row_min + 1).max(0) as usize
    }

    pub fn width(&self) -> usize {
        (self.col_max - self.col_min + 1).max(0) as usize
    }

    pub fn origin(&self) -> Location {
        Location::new(self.row_min, self.col_min)
    }

    /// Every location in row-major order.
    pub fn locations(&self) -> impl Iterator<Item = Location> {
        iproduct!(self.row_min..=self.row_max, self.col_min..=self.col_max)
            .map(|(row, col)| Location::new(row, col))
    }

    /// The in-bounds neighbours of a location in all eight directions,
    /// scanning rows top to bottom and columns left to right.
    pub fn neighbors(&self, location: Location) -> impl Iterator<Item = Location> + '_ {
        iproduct!(-1..=1, -1..=1)
            .filter(|&delta| delta != (0, 0))
            .map(move |(drow, dcol)| location.offset(drow, dcol))
            .filter(move |&neighbor| self.contains(neighbor))
    }

    /// The in-bounds cardinal neighbours of a location: north, south, west,
    /// then east.
    pub fn manhattan_neighbors(&self, location: Location) -> impl Iterator<Item = Location> + '_ {
        Direction::CARDINAL
            .into_iter()
            .map(move |direction| location.step(direction))
            .filter(move |&neighbor| self.contains(neighbor))
    }
}
