use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::block::Block;

/// Rectangular bitmap of a tetromino in one orientation.
///
/// A shape is at most 4×4. Rotating an `r`-row by `c`-column bitmap yields a
/// `c`-row by `r`-column bitmap, so the bounding box changes with rotation
/// (e.g. the I-piece is 1×4 at rotation 0 and 4×1 at rotation 1).
///
/// # Example
///
/// ```
/// use tetris_engine::PieceKind;
///
/// let t = PieceKind::T.base_shape();
/// assert_eq!((t.rows(), t.cols()), (2, 3));
///
/// let rotated = t.rotated_right();
/// assert_eq!((rotated.rows(), rotated.cols()), (3, 2));
/// assert_eq!(t.rotated(4), t);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; Shape::MAX_SIZE]; Shape::MAX_SIZE],
}

impl Shape {
    /// Largest extent of any tetromino bitmap in either direction.
    pub const MAX_SIZE: usize = 4;

    #[expect(clippy::cast_possible_truncation)]
    const fn from_bitmap<const R: usize, const C: usize>(bitmap: [[u8; C]; R]) -> Self {
        assert!(R > 0 && R <= Self::MAX_SIZE);
        assert!(C > 0 && C <= Self::MAX_SIZE);
        let mut cells = [[false; Self::MAX_SIZE]; Self::MAX_SIZE];
        let mut row = 0;
        while row < R {
            let mut col = 0;
            while col < C {
                cells[row][col] = bitmap[row][col] != 0;
                col += 1;
            }
            row += 1;
        }
        Self {
            rows: R as u8,
            cols: C as u8,
            cells,
        }
    }

    #[must_use]
    pub const fn rows(&self) -> u8 {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> u8 {
        self.cols
    }

    /// Returns whether the cell at (`row`, `col`) is filled.
    ///
    /// Cells outside the bounding box are reported as unfilled.
    #[must_use]
    pub const fn is_filled(&self, row: u8, col: u8) -> bool {
        row < self.rows && col < self.cols && self.cells[row as usize][col as usize]
    }

    /// Rotates the bitmap 90° clockwise.
    ///
    /// `new[col][rows - 1 - row] = old[row][col]`
    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        let mut cells = [[false; Self::MAX_SIZE]; Self::MAX_SIZE];
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut row = 0;
        while row < rows {
            let mut col = 0;
            while col < cols {
                cells[col][rows - 1 - row] = self.cells[row][col];
                col += 1;
            }
            row += 1;
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Applies [`Self::rotated_right`] `turns % 4` times.
    #[must_use]
    pub fn rotated(&self, turns: u8) -> Self {
        (0..turns % 4).fold(*self, |shape, _| shape.rotated_right())
    }

    /// Returns the `(col, row)` offsets of every filled cell, row by row.
    pub fn filled_cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols)
                .filter(move |&col| self.is_filled(row, col))
                .map(move |col| (col, row))
        })
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                f.write_str("\n")?;
            }
            for col in 0..self.cols {
                f.write_str(if self.is_filled(row, col) { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

/// The seven tetromino types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

const BASE_SHAPES: [Shape; PieceKind::LEN] = [
    // I-piece
    Shape::from_bitmap([[1, 1, 1, 1]]),
    // O-piece
    Shape::from_bitmap([[1, 1], [1, 1]]),
    // T-piece
    Shape::from_bitmap([[0, 1, 0], [1, 1, 1]]),
    // S-piece
    Shape::from_bitmap([[0, 1, 1], [1, 1, 0]]),
    // Z-piece
    Shape::from_bitmap([[1, 1, 0], [0, 1, 1]]),
    // J-piece
    Shape::from_bitmap([[1, 0, 0], [1, 1, 1]]),
    // L-piece
    Shape::from_bitmap([[0, 0, 1], [1, 1, 1]]),
];

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns the bitmap of this kind at rotation 0.
    #[must_use]
    pub const fn base_shape(self) -> Shape {
        BASE_SHAPES[self as usize]
    }

    /// Returns the bitmap of this kind after `rotation` clockwise turns.
    #[must_use]
    pub fn shape(self, rotation: u8) -> Shape {
        self.base_shape().rotated(rotation)
    }

    /// Returns the block written into the board when a piece of this kind locks.
    #[must_use]
    pub const fn fill(self) -> Block {
        Block::Piece(self)
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// ```
    /// use tetris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('S'), Some(PieceKind::S));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
