//! Collision checks and piece placement.
//!
//! A pose is valid when every filled cell of the piece lies inside the side
//! walls, above the floor, and on an empty board cell. Cells above the visible
//! field (`y < 0`) are accepted without looking at the board, which lets a
//! piece spawn partially out of view.

use super::{BOARD_HEIGHT, BOARD_WIDTH, board::Board, piece::Piece};

/// Maps signed piece coordinates to board coordinates, or `None` outside the
/// board.
fn board_coords(x: i16, y: i16) -> Option<(usize, usize)> {
    let x = usize::try_from(x).ok().filter(|x| *x < BOARD_WIDTH)?;
    let y = usize::try_from(y).ok().filter(|y| *y < BOARD_HEIGHT)?;
    Some((x, y))
}

impl Board {
    /// Returns `true` if `piece` can occupy its pose on this board.
    ///
    /// ```
    /// use tetris_engine::{Board, Piece, PieceKind};
    ///
    /// let board = Board::EMPTY;
    /// let piece = Piece::new(PieceKind::O);
    /// assert!(board.is_valid_position(&piece));
    ///
    /// let mut against_wall = piece;
    /// for _ in 0..4 {
    ///     against_wall = against_wall.left();
    /// }
    /// assert!(board.is_valid_position(&against_wall));
    /// assert!(!board.is_valid_position(&against_wall.left()));
    /// ```
    #[must_use]
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece.occupied_positions().all(|(x, y)| {
            let Ok(col) = usize::try_from(x) else {
                return false;
            };
            if col >= BOARD_WIDTH {
                return false;
            }
            match usize::try_from(y) {
                // Above the visible field
                Err(_) => true,
                Ok(row) => row < BOARD_HEIGHT && !self.is_occupied(col, row),
            }
        })
    }

    /// Writes the piece's fill marker into every on-board cell it covers.
    ///
    /// Cells outside the board (in particular above the top edge) are skipped.
    pub fn fill_piece(&mut self, piece: &Piece) {
        let block = piece.kind().fill();
        for (x, y) in piece.occupied_positions() {
            if let Some((x, y)) = board_coords(x, y) {
                self.set_cell(x, y, block);
            }
        }
    }

    /// Returns a copy of this board with `piece` locked into it.
    #[must_use]
    pub fn commit(&self, piece: &Piece) -> Board {
        let mut board = self.clone();
        board.fill_piece(piece);
        board
    }
}

/// Free-function form of [`Board::is_valid_position`].
#[must_use]
pub fn is_valid_position(piece: &Piece, board: &Board) -> bool {
    board.is_valid_position(piece)
}

/// Free-function form of [`Board::commit`].
#[must_use]
pub fn commit(piece: &Piece, board: &Board) -> Board {
    board.commit(piece)
}

#[cfg(test)]
mod tests {
    use crate::{Block, PieceKind, PiecePosition, PieceRotation};

    use super::*;

    fn piece_at(kind: PieceKind, x: i16, y: i16, turns: u8) -> Piece {
        Piece::with_pose(kind, PiecePosition::new(x, y), PieceRotation::new(turns))
    }

    #[test]
    fn test_side_walls() {
        let board = Board::EMPTY;
        assert!(is_valid_position(&piece_at(PieceKind::I, 0, 5, 0), &board));
        assert!(is_valid_position(&piece_at(PieceKind::I, 6, 5, 0), &board));
        assert!(!is_valid_position(&piece_at(PieceKind::I, -1, 5, 0), &board));
        assert!(!is_valid_position(&piece_at(PieceKind::I, 7, 5, 0), &board));
        // Vertical I is one column wide
        assert!(is_valid_position(&piece_at(PieceKind::I, 9, 5, 1), &board));
        assert!(!is_valid_position(&piece_at(PieceKind::I, 10, 5, 1), &board));
    }

    #[test]
    fn test_floor() {
        let board = Board::EMPTY;
        assert!(is_valid_position(&piece_at(PieceKind::O, 0, 18, 0), &board));
        assert!(!is_valid_position(&piece_at(PieceKind::O, 0, 19, 0), &board));
        assert!(is_valid_position(&piece_at(PieceKind::I, 0, 16, 1), &board));
        assert!(!is_valid_position(&piece_at(PieceKind::I, 0, 17, 1), &board));
    }

    #[test]
    fn test_cells_above_board_are_not_checked() {
        let mut board = Board::EMPTY;
        for x in 0..Board::WIDTH {
            board.set_cell(x, 0, Block::Piece(PieceKind::Z));
        }
        // Vertical I with its lowest cell at y = -1
        assert!(is_valid_position(&piece_at(PieceKind::I, 3, -4, 1), &board));
        // Reaching into row 0 collides
        assert!(!is_valid_position(&piece_at(PieceKind::I, 3, -3, 1), &board));
        // Out-of-wall cells are rejected even above the board
        assert!(!is_valid_position(&piece_at(PieceKind::I, -1, -4, 1), &board));
    }

    #[test]
    fn test_occupied_cell_collides() {
        let mut board = Board::EMPTY;
        board.set_cell(5, 10, Block::Piece(PieceKind::L));
        // T at rotation 0 covers (x+1, y) and (x..x+3, y+1)
        assert!(!is_valid_position(&piece_at(PieceKind::T, 4, 10, 0), &board));
        assert!(!is_valid_position(&piece_at(PieceKind::T, 4, 9, 0), &board));
        assert!(is_valid_position(&piece_at(PieceKind::T, 6, 9, 0), &board));
        // Upside-down T: only its stem reaches row 10
        assert!(!is_valid_position(&piece_at(PieceKind::T, 4, 9, 2), &board));
        assert!(is_valid_position(&piece_at(PieceKind::T, 5, 9, 2), &board));
    }

    #[test]
    fn test_commit_writes_fill_marker() {
        let board = Board::EMPTY;
        let piece = piece_at(PieceKind::S, 2, 18, 0);
        let committed = commit(&piece, &board);

        assert_eq!(board, Board::EMPTY, "commit must not mutate its input");
        assert_eq!(committed.occupied_count(), 4);
        for (x, y) in [(3, 18), (4, 18), (2, 19), (3, 19)] {
            assert_eq!(committed.cell(x, y), Block::Piece(PieceKind::S));
        }
    }

    #[test]
    fn test_commit_drops_cells_above_board() {
        let piece = piece_at(PieceKind::I, 0, -2, 1);
        let committed = commit(&piece, &Board::EMPTY);
        assert_eq!(committed.occupied_count(), 2);
        assert!(committed.is_occupied(0, 0));
        assert!(committed.is_occupied(0, 1));
    }
}
