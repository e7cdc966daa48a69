use super::shape::PieceKind;

/// A single cell of the board.
///
/// Locked cells remember the kind of piece that filled them so a renderer can
/// pick a color. The game logic only cares whether a cell is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell filled by a locked piece of a specific type.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Block::Empty)
    }

    #[must_use]
    pub const fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    /// Returns `'.'` for an empty cell, or the piece letter.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Block::Empty => '.',
            Block::Piece(kind) => kind.as_char(),
        }
    }

    /// Inverse of [`Self::as_char`].
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        if c == '.' {
            return Some(Block::Empty);
        }
        match PieceKind::from_char(c) {
            Some(kind) => Some(Block::Piece(kind)),
            None => None,
        }
    }
}
