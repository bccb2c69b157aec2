//! The eight Sokoban levels of the Gnomish branch, and recognising which one
//! is on screen from its walls alone.

use crate::sokoban::{Location, Rect};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use thiserror::Error;

macro_rules! level {
    ($name:literal) => {
        (
            $name,
            include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/levels/", $name, ".txt")),
        )
    };
}

/// `(name, drawing)` for every built-in level, easiest first.
pub const LEVELS: [(&str, &str); 8] = [
    level!("level_1a"),
    level!("level_1b"),
    level!("level_2a"),
    level!("level_2b"),
    level!("level_3a"),
    level!("level_3b"),
    level!("level_4a"),
    level!("level_4b"),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectionError {
    #[error("walls match several levels: {}", .0.join(", "))]
    Ambiguous(Vec<&'static str>),
}

pub fn level_text(name: &str) -> Option<&'static str> {
    LEVELS
        .iter()
        .find(|(level_name, _)| *level_name == name)
        .map(|(_, text)| *text)
}

pub fn level_names() -> impl Iterator<Item = &'static str> {
    LEVELS.iter().map(|(name, _)| *name)
}

type WallPattern = HashSet<Location>;

/// The squares drawn as `-` or `|` in a block of text.
pub fn wall_locations(text: &str) -> Vec<Location> {
    text.lines()
        .enumerate()
        .flat_map(|(row, line)| {
            line.chars()
                .enumerate()
                .filter(|&(_, glyph)| matches!(glyph, '-' | '|'))
                .map(move |(col, _)| Location::new(row as i32, col as i32))
        })
        .collect()
}

/// Shift a set of walls so that its bounding box starts at the origin.
fn normalise(walls: impl IntoIterator<Item = Location>) -> WallPattern {
    let walls: Vec<Location> = walls.into_iter().collect();
    let Some(rect) = Rect::bounding(walls.iter().copied()) else {
        return WallPattern::new();
    };
    let shift = Location::new(-rect.row_min, -rect.col_min);
    walls.into_iter().map(|wall| wall.translate(shift)).collect()
}

static WALL_PATTERNS: Lazy<Vec<(&'static str, WallPattern)>> = Lazy::new(|| {
    LEVELS
        .iter()
        .map(|&(name, text)| (name, normalise(wall_locations(text))))
        .collect()
});

/// Find the built-in level whose walls match exactly, up to translation.
///
/// `Ok(None)` means no level matched, which is the usual answer outside
/// Sokoban. Matching more than one level is an error.
pub fn identify_level(
    walls: impl IntoIterator<Item = Location>,
) -> Result<Option<&'static str>, DetectionError> {
    let observed = normalise(walls);
    if observed.is_empty() {
        return Ok(None);
    }
    let matches: Vec<&'static str> = WALL_PATTERNS
        .iter()
        .filter(|(_, pattern)| *pattern == observed)
        .map(|(name, _)| *name)
        .collect();
    match matches.len() {
        0 => Ok(None),
        1 => Ok(Some(matches[0])),
        _ => Err(DetectionError::Ambiguous(matches)),
    }
}

/// [`identify_level`] on the walls of a screen dump.
pub fn identify_screen(screen: &str) -> Result<Option<&'static str>, DetectionError> {
    identify_level(wall_locations(screen))
}
