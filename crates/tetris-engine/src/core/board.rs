use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ParseBoardError;

use super::{BOARD_HEIGHT, BOARD_WIDTH, block::Block};

const CELL_COUNT: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// The 10×20 playfield.
///
/// Cells are stored row-major in a flat array, so a `Board` is a plain value:
/// cloning it gives an independent copy and no view can alias another. Row 0 is
/// the top of the visible field and y grows downward.
///
/// # Text form
///
/// `Display` writes one line per row, `.` for empty cells and the piece letter
/// for locked cells. `FromStr` reads the same format; when fewer than
/// [`Board::HEIGHT`] rows are given they are aligned to the bottom and the rows
/// above are empty.
///
/// ```
/// use tetris_engine::{Block, Board, PieceKind};
///
/// let board: Board = "IIIIIIIII.".parse().unwrap();
/// assert_eq!(board.cell(0, Board::HEIGHT - 1), Block::Piece(PieceKind::I));
/// assert!(board.cell(9, Board::HEIGHT - 1).is_empty());
/// assert!(!board.is_row_filled(Board::HEIGHT - 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Block; CELL_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        cells: [Block::Empty; CELL_COUNT],
    };

    const fn index(x: usize, y: usize) -> usize {
        assert!(x < BOARD_WIDTH);
        assert!(y < BOARD_HEIGHT);
        y * BOARD_WIDTH + x
    }

    /// Returns the cell at (`x`, `y`).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board.
    #[must_use]
    pub const fn cell(&self, x: usize, y: usize) -> Block {
        self.cells[Self::index(x, y)]
    }

    /// Like [`Self::cell`], but returns `None` outside the board.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<Block> {
        (x < BOARD_WIDTH && y < BOARD_HEIGHT).then(|| self.cell(x, y))
    }

    #[must_use]
    pub const fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_occupied()
    }

    pub fn set_cell(&mut self, x: usize, y: usize, block: Block) {
        self.cells[Self::index(x, y)] = block;
    }

    /// Returns row `y` as a slice of [`Board::WIDTH`] cells.
    #[must_use]
    pub fn row(&self, y: usize) -> &[Block] {
        &self.cells[Self::index(0, y)..][..BOARD_WIDTH]
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        self.cells.chunks_exact(BOARD_WIDTH)
    }

    /// A row is filled when every one of its cells is occupied.
    #[must_use]
    pub fn is_row_filled(&self, y: usize) -> bool {
        self.row(y).iter().all(|b| b.is_occupied())
    }

    /// Returns the number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|b| b.is_occupied()).count()
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Cleared rows are removed, the remaining rows keep their relative order
    /// and slide down, and empty rows are inserted at the top.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..BOARD_HEIGHT).rev() {
            if self.is_row_filled(y) {
                count += 1;
                continue;
            }
            if count > 0 {
                let start = Self::index(0, y);
                self.cells
                    .copy_within(start..start + BOARD_WIDTH, Self::index(0, y + count));
            }
        }
        self.cells[..count * BOARD_WIDTH].fill(Block::Empty);
        count
    }

    fn parse_rows<'a, I>(lines: I) -> Result<Self, ParseBoardError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let lines = lines
            .into_iter()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        if lines.len() > BOARD_HEIGHT {
            return Err(ParseBoardError::TooManyRows {
                found: lines.len(),
            });
        }

        let mut board = Self::EMPTY;
        let top = BOARD_HEIGHT - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != BOARD_WIDTH {
                return Err(ParseBoardError::RowWidth { row: i, found: width });
            }
            for (x, ch) in line.chars().enumerate() {
                let block =
                    Block::from_char(ch).ok_or(ParseBoardError::InvalidCell { row: i, ch })?;
                board.set_cell(x, top + i, block);
            }
        }
        Ok(board)
    }

    fn write_rows(&self, f: &mut impl fmt::Write, separator: char) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                f.write_char(separator)?;
            }
            for block in row {
                f.write_char(block.as_char())?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_rows(f, '\n')
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_rows(s.lines())
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "........../........../..." (rows top to bottom, '/'-separated)
        let mut s = String::with_capacity(CELL_COUNT + BOARD_HEIGHT);
        self.write_rows(&mut s, '/').map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_rows(s.split('/')).map_err(serde::de::Error::custom)
    }
}
