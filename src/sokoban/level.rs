use crate::sokoban::{Location, Rect, Terrain};
use std::ops::Index;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level text has no non-blank lines")]
    Empty,
    #[error("unknown glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
    #[error("expected exactly one start square '>', found {0}")]
    StartCount(usize),
    #[error("unknown level {0:?}")]
    UnknownLevel(String),
}

/// A rectangular terrain grid anchored at the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    rect: Rect,
    cells: Vec<Terrain>,
}

impl Level {
    /// Parse a level drawing. Trailing whitespace and blank lines before and
    /// after the drawing are ignored, and short lines are padded with void.
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
        let first = lines.iter().position(|line| !line.is_empty());
        let last = lines.iter().rposition(|line| !line.is_empty());
        let (Some(first), Some(last)) = (first, last) else {
            return Err(LevelError::Empty);
        };
        let lines = &lines[first..=last];

        let width = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let mut cells = vec![Terrain::Void; width * lines.len()];
        for (row, line) in lines.iter().enumerate() {
            for (col, glyph) in line.chars().enumerate() {
                cells[row * width + col] = Terrain::from_glyph(glyph)
                    .ok_or(LevelError::UnknownGlyph { glyph, row, col })?;
            }
        }

        let rect = Rect::new(0, 0, lines.len() as i32 - 1, width as i32 - 1);
        Ok(Self { rect, cells })
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    fn index_of(&self, location: Location) -> Option<usize> {
        self.rect
            .contains(location)
            .then(|| location.row as usize * self.rect.width() + location.col as usize)
    }

    /// The terrain at a location, or `None` outside the level.
    pub fn get(&self, location: Location) -> Option<Terrain> {
        self.index_of(location).map(|index| self.cells[index])
    }

    /// Change the terrain at a location. Returns `false` and does nothing if
    /// the location is outside the level.
    pub fn set(&mut self, location: Location, terrain: Terrain) -> bool {
        match self.index_of(location) {
            Some(index) => {
                self.cells[index] = terrain;
                true
            }
            None => false,
        }
    }

    /// Every location holding the given terrain, in row-major order.
    pub fn locations_of(&self, terrain: Terrain) -> impl Iterator<Item = Location> + '_ {
        self.rect
            .locations()
            .filter(move |&location| self[location] == terrain)
    }

    pub fn count(&self, terrain: Terrain) -> usize {
        self.cells.iter().filter(|&&cell| cell == terrain).count()
    }

    pub fn ascii_lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.rect.width().max(1))
            .map(|row| row.iter().map(|cell| cell.glyph()).collect())
            .collect()
    }
}

impl Index<Location> for Level {
    type Output = Terrain;

    fn index(&self, location: Location) -> &Terrain {
        match self.index_of(location) {
            Some(index) => &self.cells[index],
            None => panic!("{location} is outside the level"),
        }
    }
}

impl FromStr for Level {
    type Err = LevelError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}
