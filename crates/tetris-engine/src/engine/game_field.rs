use crate::{
    CompletePieceDropError, PieceCollisionError,
    core::{board::Board, piece::Piece, shape::PieceKind},
};

use super::piece_source::PieceSource;

/// Board, falling piece and queued next kind.
///
/// `GameField` performs the geometric half of a turn: it validates poses,
/// locks the falling piece, clears lines and spawns the next piece. Scoring and
/// phase handling live in [`GameSession`](super::GameSession).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameField {
    board: Board,
    falling_piece: Option<Piece>,
    next_kind: Option<PieceKind>,
}

impl GameField {
    /// Creates a field with an empty board and nothing spawned.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_board(Board::EMPTY)
    }

    #[must_use]
    pub const fn with_board(board: Board) -> Self {
        Self {
            board,
            falling_piece: None,
            next_kind: None,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.falling_piece.as_ref()
    }

    #[must_use]
    pub fn next_kind(&self) -> Option<PieceKind> {
        self.next_kind
    }

    /// Replaces the falling piece if `piece` fits on the board.
    pub fn set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if !self.board.is_valid_position(&piece) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = Some(piece);
        Ok(())
    }

    /// Draws the first piece and the next kind.
    ///
    /// Fails, leaving no falling piece, if the spawn pose is blocked.
    pub fn spawn_first<S>(&mut self, source: &mut S) -> Result<(), PieceCollisionError>
    where
        S: PieceSource + ?Sized,
    {
        let first = source.next_kind();
        self.next_kind = None;
        self.spawn(first, source)
    }

    /// Locks the falling piece, clears lines and spawns the queued piece.
    ///
    /// Returns the number of cleared lines. The result is an error when there
    /// was no falling piece, or when the new piece collides at its spawn pose;
    /// in the latter case the field is left without a falling piece and the
    /// blocked kind stays queued as the next kind.
    pub fn complete_piece_drop<S>(
        &mut self,
        source: &mut S,
    ) -> (usize, Result<(), CompletePieceDropError>)
    where
        S: PieceSource + ?Sized,
    {
        let Some(piece) = self.falling_piece.take() else {
            return (0, Err(CompletePieceDropError::NoFallingPiece));
        };
        self.board = self.board.commit(&piece);
        let cleared_lines = self.board.clear_lines();

        let kind = self.next_kind.unwrap_or_else(|| source.next_kind());
        let result = self
            .spawn(kind, source)
            .map_err(|_| CompletePieceDropError::NewPieceCollision);
        (cleared_lines, result)
    }

    fn spawn<S>(&mut self, kind: PieceKind, source: &mut S) -> Result<(), PieceCollisionError>
    where
        S: PieceSource + ?Sized,
    {
        let piece = Piece::new(kind);
        if !self.board.is_valid_position(&piece) {
            self.falling_piece = None;
            return Err(PieceCollisionError);
        }
        self.falling_piece = Some(piece);
        self.next_kind = Some(source.next_kind());
        Ok(())
    }

    /// Returns a copy of the board with the falling piece drawn in.
    #[must_use]
    pub fn display_board(&self) -> Board {
        let mut board = self.board.clone();
        if let Some(piece) = &self.falling_piece {
            board.fill_piece(piece);
        }
        board
    }
}
