//! Solved levels are remembered as the list of pushes that solved them, one
//! per line as `player_row player_col boulder_row boulder_col` separated by
//! tabs. Walking between pushes is not recorded; it is recomputed on replay.

use crate::sokoban::{approach_step, Board, Direction, Location, PushRecord};
use itertools::Itertools;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const PUSH_LOG_EXTENSION: &str = "soko";

#[derive(Debug, Error)]
pub enum PushLogError {
    #[error("push log I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: expected four integers, found {content:?}")]
    Malformed { line: usize, content: String },
    #[error("line {line}: player at {player} is not beside boulder at {boulder}")]
    NotAdjacent {
        line: usize,
        player: Location,
        boulder: Location,
    },
    #[error("push {index}: no way to walk to {stand}")]
    Unreachable { index: usize, stand: Location },
    #[error("push {index}: boulder at {boulder} would not move")]
    Blocked { index: usize, boulder: Location },
}

/// `<dir>/<level name>.soko`
pub fn push_log_path(dir: &Path, level_name: &str) -> PathBuf {
    dir.join(level_name).with_extension(PUSH_LOG_EXTENSION)
}

pub fn parse_push_log(text: &str) -> Result<Vec<PushRecord>, PushLogError> {
    let mut records = Vec::new();
    for (index, content) in text.lines().enumerate() {
        if content.trim().is_empty() {
            continue;
        }
        let line = index + 1;
        let malformed = || PushLogError::Malformed {
            line,
            content: content.to_string(),
        };
        let values: Vec<i32> = content
            .split_whitespace()
            .map(str::parse::<i32>)
            .collect::<Result<_, _>>()
            .map_err(|_| malformed())?;
        let [player_row, player_col, boulder_row, boulder_col] = values[..] else {
            return Err(malformed());
        };
        let record = PushRecord::new(
            Location::new(player_row, player_col),
            Location::new(boulder_row, boulder_col),
        );
        if !record.direction().is_some_and(Direction::is_cardinal) {
            return Err(PushLogError::NotAdjacent {
                line,
                player: record.player,
                boulder: record.boulder,
            });
        }
        records.push(record);
    }
    Ok(records)
}

pub fn format_push_log(records: &[PushRecord]) -> String {
    records
        .iter()
        .map(|record| {
            format!(
                "{}\t{}\t{}\t{}\n",
                record.player.row, record.player.col, record.boulder.row, record.boulder.col
            )
        })
        .join("")
}

/// Read a push log. A missing or empty file means the level has not been
/// solved yet, and gives `Ok(None)`.
pub fn load_push_log(path: &Path) -> Result<Option<Vec<PushRecord>>, PushLogError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(error.into()),
    };
    let records = parse_push_log(&text)?;
    debug!(path = %path.display(), pushes = records.len(), "loaded push log");
    Ok((!records.is_empty()).then_some(records))
}

pub fn write_push_log(path: &Path, records: &[PushRecord]) -> Result<(), PushLogError> {
    fs::write(path, format_push_log(records))?;
    info!(path = %path.display(), pushes = records.len(), "wrote push log");
    Ok(())
}

/// Steps through a recorded solution against a live map.
///
/// Records are in level coordinates. The offset is where the level's origin
/// sits in the caller's coordinates, for instance on a terminal screen.
#[derive(Debug, Clone)]
pub struct PushReplay {
    records: Vec<PushRecord>,
    offset: Location,
    next: usize,
}

impl PushReplay {
    pub fn new(records: Vec<PushRecord>, offset: Location) -> Self {
        Self {
            records,
            offset,
            next: 0,
        }
    }

    fn shifted(&self, record: &PushRecord) -> Option<PushRecord> {
        Some(PushRecord::new(
            record.player.checked_translate(self.offset)?,
            record.boulder.checked_translate(self.offset)?,
        ))
    }

    /// The next push, in the caller's coordinates. `None` once the log is
    /// finished, or if the push lies beyond the range of the coordinates.
    pub fn next_push(&self) -> Option<PushRecord> {
        self.records
            .get(self.next)
            .and_then(|record| self.shifted(record))
    }

    /// The direction to push in, if the player stands where the next push
    /// starts.
    pub fn push_delta(&self, player: Location) -> Option<Direction> {
        self.next_push()
            .filter(|push| push.player == player)
            .and_then(|push| push.direction())
    }

    /// Mark the next push as done.
    pub fn advance(&mut self) {
        self.next = (self.next + 1).min(self.records.len());
    }

    pub fn pushes_done(&self) -> usize {
        self.next
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.records.len()
    }

    /// Drive a board through the rest of the log, walking up to each push
    /// the shortest way. The board must use the same coordinates as the
    /// offset. Stops early once the board is solved, and returns the number
    /// of pushes made.
    pub fn replay_on(&mut self, board: &mut Board) -> Result<usize, PushLogError> {
        let start = self.next;
        while !board.is_solved() {
            let Some(record) = self.records.get(self.next) else {
                break;
            };
            let rect = board.rect();
            let push = self
                .shifted(record)
                .filter(|push| rect.contains(push.player) && rect.contains(push.boulder))
                .ok_or(PushLogError::Unreachable {
                    index: self.next,
                    stand: record.player,
                })?;
            if let Some(direction) = self.push_delta(board.player()) {
                let pushes_before = board.push_records().len();
                if !board.move_player(direction) || board.push_records().len() == pushes_before {
                    return Err(PushLogError::Blocked {
                        index: self.next,
                        boulder: push.boulder,
                    });
                }
                self.advance();
                continue;
            }
            let step = approach_step(board, push.player).ok_or(PushLogError::Unreachable {
                index: self.next,
                stand: push.player,
            })?;
            if !board.move_player(step) {
                return Err(PushLogError::Unreachable {
                    index: self.next,
                    stand: push.player,
                });
            }
        }
        Ok(self.next - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::CORRIDOR_TEXT;

    fn corridor_pushes() -> Vec<PushRecord> {
        vec![
            PushRecord::new(Location::new(1, 2), Location::new(1, 3)),
            PushRecord::new(Location::new(1, 3), Location::new(1, 4)),
        ]
    }

    #[test]
    fn format_is_tab_separated() {
        assert_eq!(format_push_log(&corridor_pushes()), "1\t2\t1\t3\n1\t3\t1\t4\n");
        assert_eq!(
            parse_push_log("1\t2\t1\t3\n\n1 3 1 4\n").unwrap(),
            corridor_pushes()
        );
    }

    #[test]
    fn parse_rejects_bad_lines() {
        assert!(matches!(
            parse_push_log("1\t2\t1\n"),
            Err(PushLogError::Malformed { line: 1, .. })
        ));
        assert!(matches!(
            parse_push_log("1\t2\t1\t3\n1\tx\t1\t4\n"),
            Err(PushLogError::Malformed { line: 2, .. })
        ));
        assert!(matches!(
            parse_push_log("1\t2\t2\t3\n"),
            Err(PushLogError::NotAdjacent { line: 1, .. })
        ));
    }

    #[test]
    fn parse_rejects_extreme_coordinates() {
        assert!(matches!(
            parse_push_log("-2147483648\t0\t2147483647\t0\n"),
            Err(PushLogError::NotAdjacent { line: 1, .. })
        ));
        assert!(matches!(
            parse_push_log("0\t2147483647\t0\t-2147483648\n"),
            Err(PushLogError::NotAdjacent { line: 1, .. })
        ));
    }

    #[test]
    fn missing_or_empty_log_is_unsolved() {
        let dir = tempfile::tempdir().unwrap();
        let path = push_log_path(dir.path(), "corridor");
        assert_eq!(path.file_name().unwrap(), "corridor.soko");
        assert!(load_push_log(&path).unwrap().is_none());
        fs::write(&path, "").unwrap();
        assert!(load_push_log(&path).unwrap().is_none());
        write_push_log(&path, &corridor_pushes()).unwrap();
        assert_eq!(load_push_log(&path).unwrap(), Some(corridor_pushes()));
    }

    #[test]
    fn push_delta_uses_offset() {
        let mut replay = PushReplay::new(corridor_pushes(), Location::new(1, 10));
        assert_eq!(replay.push_delta(Location::new(1, 2)), None);
        assert_eq!(replay.push_delta(Location::new(2, 12)), Some(Direction::East));
        replay.advance();
        assert_eq!(replay.push_delta(Location::new(2, 13)), Some(Direction::East));
        replay.advance();
        replay.advance();
        assert!(replay.is_finished());
        assert_eq!(replay.pushes_done(), 2);
        assert_eq!(replay.push_delta(Location::new(2, 13)), None);
    }

    #[test]
    fn replay_solves_corridor() {
        let mut board = Board::new("corridor", CORRIDOR_TEXT).unwrap();
        let mut replay = PushReplay::new(corridor_pushes(), Location::new(0, 0));
        assert_eq!(replay.replay_on(&mut board).unwrap(), 2);
        assert!(board.is_solved());
        assert_eq!(board.push_records(), corridor_pushes().as_slice());
    }

    #[test]
    fn replay_rejects_pushes_off_the_board() {
        let mut board = Board::new("corridor", CORRIDOR_TEXT).unwrap();
        let pushes = parse_push_log("2147483647\t5\t2147483647\t6\n").unwrap();
        let mut replay = PushReplay::new(pushes, Location::new(0, 0));
        assert!(matches!(
            replay.replay_on(&mut board),
            Err(PushLogError::Unreachable { index: 0, .. })
        ));
        assert_eq!(board.player(), Location::new(1, 1));

        // shifted off the board by the offset
        let mut replay = PushReplay::new(corridor_pushes(), Location::new(0, 10));
        assert!(matches!(
            replay.replay_on(&mut board),
            Err(PushLogError::Unreachable { index: 0, .. })
        ));

        // shifted past the largest row
        let mut replay = PushReplay::new(corridor_pushes(), Location::new(i32::MAX, 0));
        assert_eq!(replay.next_push(), None);
        assert_eq!(replay.push_delta(Location::new(1, 2)), None);
        assert!(!replay.is_finished());
        assert!(matches!(
            replay.replay_on(&mut board),
            Err(PushLogError::Unreachable { index: 0, .. })
        ));
        assert!(board.push_records().is_empty());
    }

    #[test]
    fn replay_reports_blocked_push() {
        let mut board = Board::new("corridor", CORRIDOR_TEXT).unwrap();
        // nothing to push west of (1, 2), so the player just walks
        let pushes = vec![PushRecord::new(Location::new(1, 2), Location::new(1, 1))];
        let mut replay = PushReplay::new(pushes, Location::new(0, 0));
        assert!(matches!(
            replay.replay_on(&mut board),
            Err(PushLogError::Blocked { index: 0, .. })
        ));
    }
}
