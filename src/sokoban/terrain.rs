/// What occupies a square of a Sokoban level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    /// Unmapped rock outside the level.
    Void,
    HorizontalWall,
    VerticalWall,
    Floor,
    Boulder,
    /// A hole or trap door. A boulder pushed onto it fills it, and the square
    /// becomes floor.
    Trap,
    Doorway,
    UpStairs,
    DownStairs,
}

impl Terrain {
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            ' ' => Some(Terrain::Void),
            '-' => Some(Terrain::HorizontalWall),
            '|' => Some(Terrain::VerticalWall),
            '.' => Some(Terrain::Floor),
            '0' => Some(Terrain::Boulder),
            '^' => Some(Terrain::Trap),
            '+' => Some(Terrain::Doorway),
            '<' => Some(Terrain::UpStairs),
            '>' => Some(Terrain::DownStairs),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Terrain::Void => ' ',
            Terrain::HorizontalWall => '-',
            Terrain::VerticalWall => '|',
            Terrain::Floor => '.',
            Terrain::Boulder => '0',
            Terrain::Trap => '^',
            Terrain::Doorway => '+',
            Terrain::UpStairs => '<',
            Terrain::DownStairs => '>',
        }
    }

    /// Drawn walls, the only squares that identify a level.
    pub fn is_drawn_wall(self) -> bool {
        matches!(self, Terrain::HorizontalWall | Terrain::VerticalWall)
    }

    /// Squares nothing can ever enter. Void counts, since it is rock.
    pub fn is_wall(self) -> bool {
        self.is_drawn_wall() || self == Terrain::Void
    }

    /// Squares the player cannot walk onto without pushing or falling.
    pub fn blocks_walking(self) -> bool {
        self.is_wall() || matches!(self, Terrain::Boulder | Terrain::Trap)
    }

    /// Squares a player cannot push from.
    pub fn blocks_pushing_from(self) -> bool {
        matches!(self, Terrain::Boulder | Terrain::Trap)
    }

    /// Blocks diagonal squeezing when on both sides of the move.
    pub fn blocks_squeeze(self) -> bool {
        self.is_wall() || self == Terrain::Boulder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_round_trip() {
        for glyph in " -|.0^+<>".chars() {
            let terrain = Terrain::from_glyph(glyph).unwrap();
            assert_eq!(terrain.glyph(), glyph);
        }
        assert_eq!(Terrain::from_glyph('@'), None);
    }

    #[test]
    fn void_is_wall_but_not_drawn() {
        assert!(Terrain::Void.is_wall());
        assert!(!Terrain::Void.is_drawn_wall());
        assert!(Terrain::VerticalWall.blocks_walking());
        assert!(Terrain::Trap.blocks_walking());
        assert!(!Terrain::Trap.blocks_squeeze());
        assert!(!Terrain::Floor.blocks_walking());
    }
}
